//! Electrical kinds: current, charge, voltage, resistance, capacitance.

use crate::dimension::Dimension;
use crate::error::Result;
use crate::registry::Registry;
use crate::unit::{UnitSpec, UnitSystem};

pub(crate) fn register(registry: &Registry) -> Result<()> {
    let current = registry.register_kind(
        "Current",
        Dimension::CURRENT,
        UnitSpec::new("A", "ampere", UnitSystem::Si),
    )?;
    current.generate_si_prefixes(&current.base_unit(), false, false)?;

    let charge = registry.register_kind(
        "Charge",
        Dimension::CHARGE,
        UnitSpec::new("C", "coulomb", UnitSystem::Si),
    )?;
    charge.derive_linear(
        &charge.base_unit(),
        3600.0,
        UnitSpec::new("Ah", "ampere-hour", UnitSystem::Si),
    )?;

    let voltage = registry.register_kind(
        "Voltage",
        Dimension::VOLTAGE,
        UnitSpec::new("V", "volt", UnitSystem::Si),
    )?;
    voltage.generate_si_prefixes(&voltage.base_unit(), false, false)?;

    let resistance = registry.register_kind(
        "Resistance",
        Dimension::RESISTANCE,
        UnitSpec::new("Ohm", "ohm", UnitSystem::Si),
    )?;
    let ohm = resistance.base_unit();
    resistance.derive_linear(&ohm, 1e3, UnitSpec::new("kOhm", "kiloohm", UnitSystem::Si))?;
    resistance.derive_linear(&ohm, 1e6, UnitSpec::new("MOhm", "megaohm", UnitSystem::Si))?;

    let capacitance = registry.register_kind(
        "Capacitance",
        Dimension::CAPACITANCE,
        UnitSpec::new("F", "farad", UnitSystem::Si),
    )?;
    let farad = capacitance.base_unit();
    capacitance.derive_linear(&farad, 1e-6, UnitSpec::new("uF", "microfarad", UnitSystem::Si))?;
    capacitance.derive_linear(&farad, 1e-9, UnitSpec::new("nF", "nanofarad", UnitSystem::Si))?;
    capacitance.derive_linear(&farad, 1e-12, UnitSpec::new("pF", "picofarad", UnitSystem::Si))?;
    Ok(())
}
