//! Temperature kinds: the kelvin difference kind and its absolute twin with
//! the offset scales (Celsius, Fahrenheit).
//!
//! Offset units live only on the absolute kind; a temperature *difference*
//! of 1 °C is exactly 1 K and needs no separate unit.

use crate::dimension::Dimension;
use crate::error::Result;
use crate::registry::Registry;
use crate::unit::{UnitSpec, UnitSystem};

pub(crate) fn register(registry: &Registry) -> Result<()> {
    let tdiff = registry.register_kind(
        "TemperatureDifference",
        Dimension::TEMPERATURE,
        UnitSpec::new("K", "kelvin", UnitSystem::Si),
    )?;
    tdiff.generate_si_prefixes(&tdiff.base_unit(), false, false)?;

    let temp = registry.register_absolute_kind(
        "Temperature",
        &tdiff,
        UnitSpec::new("K", "kelvin", UnitSystem::Si),
    )?;
    let kelvin = temp.base_unit();
    // base = (value + offset) * factor
    temp.derive_linear_offset(
        &kelvin,
        1.0,
        273.15,
        UnitSpec::new("degC", "degree Celsius", UnitSystem::Si),
    )?;
    temp.derive_linear_offset(
        &kelvin,
        5.0 / 9.0,
        459.67,
        UnitSpec::new("degF", "degree Fahrenheit", UnitSystem::Imperial),
    )?;
    Ok(())
}
