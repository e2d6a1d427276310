//! The predefined quantity kinds and their unit tables.
//!
//! [`register_all`] populates a fresh registry with the standard catalogue:
//! the SI base kinds, the common derived mechanical and electrical kinds,
//! SI prefix ladders where they make sense, a handful of imperial and
//! astronomical units, and the absolute twins (Position, Time, Temperature).
//!
//! Every registration goes through the same public [`crate::Kind`] API a
//! caller would use for custom kinds; nothing in here is privileged.

use crate::error::Result;
use crate::registry::Registry;

mod angular;
mod electrical;
mod length;
mod mass;
mod mechanics;
mod misc;
mod temperature;
mod time;

/// Registers the full standard catalogue into `registry`.
///
/// Any failure here means the built-in tables themselves are inconsistent,
/// so [`crate::Registry::with_si_kinds`] surfaces it as a startup error.
pub(crate) fn register_all(registry: &Registry) -> Result<()> {
    length::register(registry)?;
    mass::register(registry)?;
    time::register(registry)?;
    temperature::register(registry)?;
    angular::register(registry)?;
    mechanics::register(registry)?;
    electrical::register(registry)?;
    misc::register(registry)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_registers_cleanly() {
        let registry = Registry::new();
        register_all(&registry).unwrap();
        for tag in [
            "Length",
            "Position",
            "Mass",
            "Duration",
            "Time",
            "TemperatureDifference",
            "Temperature",
            "Angle",
            "SolidAngle",
            "AngularVelocity",
            "Area",
            "Volume",
            "Velocity",
            "Acceleration",
            "Force",
            "Energy",
            "Power",
            "Pressure",
            "Frequency",
            "Density",
            "Momentum",
            "Current",
            "Charge",
            "Voltage",
            "Resistance",
            "Capacitance",
            "Amount",
            "LuminousIntensity",
            "Dimensionless",
        ] {
            assert!(registry.kind(tag).is_ok(), "missing kind {tag}");
        }
    }

    #[test]
    fn every_predefined_signature_parses_back() {
        use crate::dimension::Dimension;

        let registry = Registry::new();
        register_all(&registry).unwrap();
        for tag in ["Length", "Force", "Energy", "Voltage", "AngularVelocity"] {
            let kind = registry.kind(tag).unwrap();
            let dim = kind.dimension();
            let parsed: Dimension = dim.to_string().parse().unwrap();
            assert_eq!(parsed, dim, "round-trip failed for {tag}");
        }
    }
}
