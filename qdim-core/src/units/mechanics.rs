//! Derived mechanical kinds: geometry, kinematics, force, energy, power,
//! pressure, frequency, density and momentum.

use crate::dimension::Dimension;
use crate::error::Result;
use crate::registry::Registry;
use crate::unit::{UnitSpec, UnitSystem};

pub(crate) fn register(registry: &Registry) -> Result<()> {
    let area = registry.register_kind(
        "Area",
        Dimension::AREA,
        UnitSpec::new("m2", "square meter", UnitSystem::Si),
    )?;
    area.derive_linear(
        &area.base_unit(),
        1e4,
        UnitSpec::new("ha", "hectare", UnitSystem::Si),
    )?;

    let volume = registry.register_kind(
        "Volume",
        Dimension::VOLUME,
        UnitSpec::new("m3", "cubic meter", UnitSystem::Si),
    )?;
    let liter = volume.derive_linear(
        &volume.base_unit(),
        1e-3,
        UnitSpec::new("L", "liter", UnitSystem::Si),
    )?;
    volume.derive_linear(&liter, 1e-3, UnitSpec::new("mL", "milliliter", UnitSystem::Si))?;

    let velocity = registry.register_kind(
        "Velocity",
        Dimension::VELOCITY,
        UnitSpec::new("m/s", "meter per second", UnitSystem::Si),
    )?;
    let mps = velocity.base_unit();
    velocity.generate_si_prefixes(&mps, false, true)?;
    velocity.derive_linear(
        &mps,
        1.0 / 3.6,
        UnitSpec::new("km/h", "kilometer per hour", UnitSystem::Si),
    )?;
    velocity.derive_linear(
        &mps,
        1852.0 / 3600.0,
        UnitSpec::new("kn", "knot", UnitSystem::Other),
    )?;

    let accel = registry.register_kind(
        "Acceleration",
        Dimension::ACCELERATION,
        UnitSpec::new("m/s2", "meter per second squared", UnitSystem::Si),
    )?;
    accel.derive_linear(
        &accel.base_unit(),
        9.80665,
        UnitSpec::new("g0", "standard gravity", UnitSystem::Other),
    )?;

    let force = registry.register_kind(
        "Force",
        Dimension::FORCE,
        UnitSpec::new("N", "newton", UnitSystem::Si),
    )?;
    let newton = force.base_unit();
    force.derive_linear(&newton, 1e-5, UnitSpec::new("dyn", "dyne", UnitSystem::Cgs))?;
    force.derive_linear(
        &newton,
        4.448_221_615_260_5,
        UnitSpec::new("lbf", "pound-force", UnitSystem::Imperial),
    )?;

    let energy = registry.register_kind(
        "Energy",
        Dimension::ENERGY,
        UnitSpec::new("J", "joule", UnitSystem::Si),
    )?;
    let joule = energy.base_unit();
    energy.derive_linear(&joule, 1e-7, UnitSpec::new("erg", "erg", UnitSystem::Cgs))?;
    energy.derive_linear(&joule, 4.184, UnitSpec::new("cal", "calorie", UnitSystem::Other))?;
    energy.derive_linear(
        &joule,
        3.6e6,
        UnitSpec::new("kWh", "kilowatt-hour", UnitSystem::Si),
    )?;
    energy.derive_linear(
        &joule,
        1.602_176_634e-19,
        UnitSpec::new("eV", "electronvolt", UnitSystem::Si),
    )?;

    let power = registry.register_kind(
        "Power",
        Dimension::POWER,
        UnitSpec::new("W", "watt", UnitSystem::Si),
    )?;
    power.generate_si_prefixes(&power.base_unit(), false, false)?;

    let pressure = registry.register_kind(
        "Pressure",
        Dimension::PRESSURE,
        UnitSpec::new("Pa", "pascal", UnitSystem::Si),
    )?;
    let pascal = pressure.base_unit();
    pressure.derive_linear(&pascal, 1e5, UnitSpec::new("bar", "bar", UnitSystem::Si))?;
    pressure.derive_linear(
        &pascal,
        101_325.0,
        UnitSpec::new("atm", "standard atmosphere", UnitSystem::Other),
    )?;

    let frequency = registry.register_kind(
        "Frequency",
        Dimension::FREQUENCY,
        UnitSpec::new("Hz", "hertz", UnitSystem::Si),
    )?;
    frequency.generate_si_prefixes(&frequency.base_unit(), false, false)?;

    registry.register_kind(
        "Density",
        Dimension::MASS / Dimension::VOLUME,
        UnitSpec::new("kg/m3", "kilogram per cubic meter", UnitSystem::Si),
    )?;

    registry.register_kind(
        "Momentum",
        Dimension::MASS * Dimension::VELOCITY,
        UnitSpec::new("kgm/s", "kilogram meter per second", UnitSystem::Si),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn registry() -> Registry {
        let registry = Registry::new();
        register(&registry).unwrap();
        registry
    }

    #[test]
    fn cgs_units_convert() {
        let registry = registry();
        let force = registry.kind("Force").unwrap();
        assert_abs_diff_eq!(force.unit("dyn").unwrap().scale().to_base(1.0), 1e-5);
        let energy = registry.kind("Energy").unwrap();
        assert_abs_diff_eq!(energy.unit("erg").unwrap().scale().to_base(1.0), 1e-7);
    }

    #[test]
    fn velocity_ladder_prefixes_the_numerator() {
        let registry = registry();
        let velocity = registry.kind("Velocity").unwrap();
        let mmps = velocity.unit("mm/s").unwrap();
        assert_eq!(mmps.name(), "millimeter per second");
        assert_abs_diff_eq!(mmps.scale().to_base(1.0), 1e-3);
        assert_abs_diff_eq!(
            velocity.unit("km/h").unwrap().scale().to_base(3.6),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn derived_dimensions_are_consistent() {
        let registry = registry();
        let force = registry.kind("Force").unwrap();
        let energy = registry.kind("Energy").unwrap();
        let length = Dimension::LENGTH;
        assert_eq!(force.dimension() * length, energy.dimension());
        let momentum = registry.kind("Momentum").unwrap();
        assert_eq!(
            momentum.dimension() / Dimension::TIME,
            force.dimension()
        );
    }
}
