//! Mass units. The SI base unit is the kilogram, so the prefix ladder is
//! generated in kilo mode: the bare gram is synthesized alongside it.

use crate::dimension::Dimension;
use crate::error::Result;
use crate::registry::Registry;
use crate::unit::{UnitSpec, UnitSystem};

pub(crate) fn register(registry: &Registry) -> Result<()> {
    let mass = registry.register_kind(
        "Mass",
        Dimension::MASS,
        UnitSpec::new("kg", "kilogram", UnitSystem::Si),
    )?;
    let kg = mass.base_unit();
    mass.generate_si_prefixes(&kg, true, false)?;

    mass.derive_linear(&kg, 1000.0, UnitSpec::new("t", "tonne", UnitSystem::Si))?;
    let lb = mass.derive_linear(
        &kg,
        0.453_592_37,
        UnitSpec::new("lb", "pound", UnitSystem::Imperial),
    )?;
    mass.derive_linear(
        &lb,
        1.0 / 16.0,
        UnitSpec::new("oz", "ounce", UnitSystem::Imperial),
    )?;
    Ok(())
}
