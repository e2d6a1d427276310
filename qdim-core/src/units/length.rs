//! Length units and the absolute Position twin.

use crate::dimension::Dimension;
use crate::error::Result;
use crate::registry::Registry;
use crate::unit::{UnitSpec, UnitSystem};

pub(crate) fn register(registry: &Registry) -> Result<()> {
    let length = registry.register_kind(
        "Length",
        Dimension::LENGTH,
        UnitSpec::new("m", "meter", UnitSystem::Si),
    )?;
    let m = length.base_unit();
    length.generate_si_prefixes(&m, false, false)?;

    // Imperial chain, each rung derived from the previous so the factors
    // compose down to meters.
    let yd = length.derive_linear(&m, 0.9144, UnitSpec::new("yd", "yard", UnitSystem::Imperial))?;
    let ft = length.derive_linear(
        &yd,
        1.0 / 3.0,
        UnitSpec::new("ft", "foot", UnitSystem::Imperial),
    )?;
    length.derive_linear(
        &ft,
        1.0 / 12.0,
        UnitSpec::new("in", "inch", UnitSystem::Imperial),
    )?;
    length.derive_linear(
        &yd,
        1760.0,
        UnitSpec::new("mi", "mile", UnitSystem::Imperial),
    )?;

    length.derive_linear(
        &m,
        1.495_978_707e11,
        UnitSpec::new("au", "astronomical unit", UnitSystem::Astronomical),
    )?;
    length.derive_linear(
        &m,
        9.460_730_472_580_8e15,
        UnitSpec::new("ly", "light-year", UnitSystem::Astronomical),
    )?;
    length.derive_linear(
        &m,
        3.085_677_581_491_367_3e16,
        UnitSpec::new("pc", "parsec", UnitSystem::Astronomical),
    )?;

    registry.register_absolute_kind(
        "Position",
        &length,
        UnitSpec::new("m", "meter", UnitSystem::Si),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn imperial_chain_resolves_against_meters() {
        let registry = Registry::new();
        register(&registry).unwrap();
        let length = registry.kind("Length").unwrap();
        let inch = length.unit("in").unwrap();
        assert_abs_diff_eq!(inch.scale().to_base(1.0), 0.0254, epsilon = 1e-15);
        let mile = length.unit("mi").unwrap();
        assert_abs_diff_eq!(mile.scale().to_base(1.0), 1609.344, epsilon = 1e-9);
    }

    #[test]
    fn prefixes_and_position_twin_exist() {
        let registry = Registry::new();
        register(&registry).unwrap();
        let length = registry.kind("Length").unwrap();
        assert!(length.unit("nm").is_some());
        let position = registry.kind("Position").unwrap();
        assert!(position.is_absolute());
    }
}
