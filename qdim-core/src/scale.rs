//! Unit scales: the invertible map between a unit's own numbers and the
//! canonical base numbers of its quantity kind.
//!
//! Every [`Unit`](crate::Unit) carries exactly one [`Scale`], constructed
//! once and shared read-only by every value expressed in that unit. The
//! conversion convention follows the canonical-value formula
//!
//! ```text
//! v_base = (v_unit + offset) * factor
//! v_unit = v_base / factor - offset
//! ```
//!
//! with `offset = 0` for everything but absolute-quantity offset units
//! (Celsius, Fahrenheit, …).
//!
//! `to_base` and `from_base` are total over the real line except where a
//! named non-linear formula declares a singularity: the percent-angle scale
//! is undefined at ±90°, which surfaces as non-finite values, never as an
//! error.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The conversion function between a unit's numbers and base numbers.
///
/// Immutable and `Copy`; constructed once per unit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Scale {
    /// The canonical base unit itself: `v_base == v_unit`.
    Identity,
    /// Pure rescaling: `v_base = v_unit * factor`.
    Linear {
        /// Multiplier into the canonical base unit.
        factor: f64,
    },
    /// Rescaling with origin shift: `v_base = (v_unit + offset) * factor`.
    ///
    /// Only units of absolute quantity kinds may carry a non-zero offset.
    LinearOffset {
        /// Multiplier into the canonical base unit.
        factor: f64,
        /// Additive shift applied before the factor.
        offset: f64,
    },
    /// Percent grade of an angle: the unit value is `tan(angle) * 100`,
    /// the base value the angle in radians.
    ///
    /// Undefined at ±90°; `from_base` there yields values on the order of
    /// `±1e16` (IEEE tan near the pole) and `to_base(±∞)` yields ±90° in
    /// radians. Callers must tolerate non-finite unit values.
    PercentAngle,
}

impl Scale {
    /// Converts a value expressed in this unit to the canonical base value.
    #[must_use]
    pub fn to_base(&self, value: f64) -> f64 {
        match self {
            Scale::Identity => value,
            Scale::Linear { factor } => value * factor,
            Scale::LinearOffset { factor, offset } => (value + offset) * factor,
            Scale::PercentAngle => (value / 100.0).atan(),
        }
    }

    /// Converts a canonical base value to this unit's numbers.
    #[must_use]
    pub fn from_base(&self, base: f64) -> f64 {
        match self {
            Scale::Identity => base,
            Scale::Linear { factor } => base / factor,
            Scale::LinearOffset { factor, offset } => base / factor - offset,
            Scale::PercentAngle => base.tan() * 100.0,
        }
    }

    /// The linear factor against the canonical base, where one exists.
    ///
    /// `Identity` reports `1.0`; the non-linear formula has no meaningful
    /// factor and reports `None`.
    #[must_use]
    pub fn factor(&self) -> Option<f64> {
        match self {
            Scale::Identity => Some(1.0),
            Scale::Linear { factor } | Scale::LinearOffset { factor, .. } => Some(*factor),
            Scale::PercentAngle => None,
        }
    }

    /// The additive offset; zero for every relative scale.
    #[must_use]
    pub fn offset(&self) -> f64 {
        match self {
            Scale::LinearOffset { offset, .. } => *offset,
            _ => 0.0,
        }
    }

    /// True for the canonical base scale.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        matches!(self, Scale::Identity)
    }
}
