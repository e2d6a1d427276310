//! Angular units: plane angle, solid angle and angular velocity.
//!
//! Angles carry their own base dimension here rather than being treated as
//! dimensionless, which keeps angular velocity distinct from frequency.

use crate::dimension::Dimension;
use crate::error::Result;
use crate::registry::Registry;
use crate::scale::Scale;
use crate::unit::{UnitSpec, UnitSystem};
use std::f64::consts::PI;

pub(crate) fn register(registry: &Registry) -> Result<()> {
    let angle = registry.register_kind(
        "Angle",
        Dimension::ANGLE,
        UnitSpec::new("rad", "radian", UnitSystem::Si),
    )?;
    let rad = angle.base_unit();
    let deg = angle.derive_linear(
        &rad,
        PI / 180.0,
        UnitSpec::new("deg", "degree", UnitSystem::Si),
    )?;
    let arcmin = angle.derive_linear(
        &deg,
        1.0 / 60.0,
        UnitSpec::new("arcmin", "arcminute", UnitSystem::Astronomical),
    )?;
    angle.derive_linear(
        &arcmin,
        1.0 / 60.0,
        UnitSpec::new("arcsec", "arcsecond", UnitSystem::Astronomical),
    )?;
    angle.derive_linear(
        &rad,
        2.0 * PI,
        UnitSpec::new("rev", "revolution", UnitSystem::Other),
    )?;
    // Slope grade: 100 % is a 45° incline. Non-linear, so it gets its own
    // scale formula instead of a factor.
    angle.define_unit(
        UnitSpec::new("%", "percent angle", UnitSystem::Other),
        Scale::PercentAngle,
    )?;

    registry.register_kind(
        "SolidAngle",
        Dimension::SOLID_ANGLE,
        UnitSpec::new("sr", "steradian", UnitSystem::Si),
    )?;

    let angvel = registry.register_kind(
        "AngularVelocity",
        Dimension::ANGULAR_VELOCITY,
        UnitSpec::new("rad/s", "radian per second", UnitSystem::Si),
    )?;
    angvel.derive_linear(
        &angvel.base_unit(),
        PI / 180.0,
        UnitSpec::new("deg/s", "degree per second", UnitSystem::Si),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn degree_chain() {
        let registry = Registry::new();
        register(&registry).unwrap();
        let angle = registry.kind("Angle").unwrap();
        assert_abs_diff_eq!(
            angle.unit("deg").unwrap().scale().to_base(180.0),
            PI,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            angle.unit("arcsec").unwrap().scale().to_base(3600.0),
            PI / 180.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn percent_angle_is_tangent_based() {
        let registry = Registry::new();
        register(&registry).unwrap();
        let angle = registry.kind("Angle").unwrap();
        let pct = angle.unit("%").unwrap();
        assert_abs_diff_eq!(pct.scale().to_base(100.0), PI / 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pct.scale().from_base(PI / 4.0), 100.0, epsilon = 1e-12);
    }

    #[test]
    fn angular_velocity_is_not_frequency() {
        let registry = Registry::new();
        register(&registry).unwrap();
        let angvel = registry.kind("AngularVelocity").unwrap();
        assert_ne!(angvel.dimension(), Dimension::FREQUENCY);
    }
}
