//! Duration units and the absolute Time twin.

use crate::dimension::Dimension;
use crate::error::Result;
use crate::registry::Registry;
use crate::unit::{UnitSpec, UnitSystem};

pub(crate) fn register(registry: &Registry) -> Result<()> {
    let duration = registry.register_kind(
        "Duration",
        Dimension::TIME,
        UnitSpec::new("s", "second", UnitSystem::Si),
    )?;
    let s = duration.base_unit();
    duration.generate_si_prefixes(&s, false, false)?;

    let minute = duration.derive_linear(&s, 60.0, UnitSpec::new("min", "minute", UnitSystem::Si))?;
    let hour = duration.derive_linear(&minute, 60.0, UnitSpec::new("h", "hour", UnitSystem::Si))?;
    duration.derive_linear(&hour, 24.0, UnitSpec::new("day", "day", UnitSystem::Si))?;
    // Julian year, the astronomical convention.
    duration.derive_linear(
        &s,
        3.155_76e7,
        UnitSpec::new("yr", "year", UnitSystem::Astronomical),
    )?;

    registry.register_absolute_kind(
        "Time",
        &duration,
        UnitSpec::new("s", "second", UnitSystem::Si),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn calendar_units_compose() {
        let registry = Registry::new();
        register(&registry).unwrap();
        let duration = registry.kind("Duration").unwrap();
        assert_abs_diff_eq!(duration.unit("h").unwrap().scale().to_base(1.0), 3600.0);
        assert_abs_diff_eq!(duration.unit("day").unwrap().scale().to_base(1.0), 86400.0);
        assert_abs_diff_eq!(duration.unit("ms").unwrap().scale().to_base(1.0), 1e-3);
    }

    #[test]
    fn instants_are_absolute() {
        let registry = Registry::new();
        register(&registry).unwrap();
        let time = registry.kind("Time").unwrap();
        assert!(time.is_absolute());
        assert_eq!(time.relative_twin().unwrap().tag(), "Duration");
    }
}
