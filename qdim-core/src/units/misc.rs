//! Amount of substance, luminous intensity and the named dimensionless
//! kind.
//!
//! Claiming the dimensionless vector here means quantity ratios land on a
//! proper named kind with percent and ppm readouts instead of an anonymous
//! one.

use crate::dimension::Dimension;
use crate::error::Result;
use crate::registry::Registry;
use crate::unit::{UnitSpec, UnitSystem};

pub(crate) fn register(registry: &Registry) -> Result<()> {
    let amount = registry.register_kind(
        "Amount",
        Dimension::AMOUNT,
        UnitSpec::new("mol", "mole", UnitSystem::Si),
    )?;
    amount.generate_si_prefixes(&amount.base_unit(), false, false)?;

    registry.register_kind(
        "LuminousIntensity",
        Dimension::LUMINOUS_INTENSITY,
        UnitSpec::new("cd", "candela", UnitSystem::Si),
    )?;

    let dimensionless = registry.register_kind(
        "Dimensionless",
        Dimension::DIMENSIONLESS,
        UnitSpec::new("1", "one", UnitSystem::Other),
    )?;
    let one = dimensionless.base_unit();
    dimensionless.derive_linear(&one, 1e-2, UnitSpec::new("%", "percent", UnitSystem::Other))?;
    dimensionless.derive_linear(
        &one,
        1e-6,
        UnitSpec::new("ppm", "parts per million", UnitSystem::Other),
    )?;
    Ok(())
}
