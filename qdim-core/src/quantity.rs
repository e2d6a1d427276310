//! Scalar quantities: a numeric payload bound to a kind and a display unit.
//!
//! The payload is stored in the kind's *canonical base unit*; the display
//! unit only affects how the number is read out. This keeps arithmetic free
//! of per-operation conversions and makes casting a metadata swap.
//!
//! Two scalar families exist, mirroring the abs/rel kind split:
//!
//! * [`Relative`] — a difference (a length, a duration, a temperature
//!   delta). Supports the full arithmetic surface including scalar
//!   multiplication and the dimension-combining products.
//! * [`Absolute`] — a point on a scale with an origin (a position, an
//!   instant, a temperature reading). Deliberately *not* closed under
//!   addition or scalar multiplication; summing two temperature readings is
//!   physically meaningless, so those operations simply do not exist on the
//!   type.
//!
//! The cross-type rules that do exist:
//!
//! | lhs      | op | rhs      | result   |
//! |----------|----|----------|----------|
//! | Absolute | −  | Absolute | Relative |
//! | Absolute | ±  | Relative | Absolute |
//! | Relative | ±  | Relative | Relative |
//! | Relative | ×  | scalar   | Relative |
//!
//! # Examples
//!
//! ```
//! use qdim_core::{Absolute, Registry, Relative};
//!
//! let registry = Registry::with_si_kinds()?;
//! let position = registry.kind("Position")?;
//! let meter = position.base_unit();
//!
//! let here = Absolute::new(10.0, &position, &meter)?;
//! let there = Absolute::new(4.0, &position, &meter)?;
//! let gap = here.try_sub(&there)?;
//! assert_eq!(gap.kind().tag(), "Length");
//! assert_eq!(gap.value(), 6.0);
//!
//! // Walking back: point plus difference is a point again.
//! let back = there.try_add_rel(&gap)?;
//! assert_eq!(back.value(), 10.0);
//! # Ok::<(), qdim_core::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::registry::Registry;
use crate::unit::Unit;
use std::fmt;
use std::ops::{Div, Mul, Neg};
use std::sync::Arc;

fn check_dim(expected: &Kind, found: crate::dimension::Dimension) -> Result<()> {
    if expected.dimension() == found {
        Ok(())
    } else {
        Err(Error::DimensionMismatch {
            expected: expected.dimension().to_string(),
            found: found.to_string(),
        })
    }
}

fn check_role(kind: &Kind, want_absolute: bool) -> Result<()> {
    if kind.is_absolute() == want_absolute {
        Ok(())
    } else {
        let (expected, found) = if want_absolute {
            ("absolute", "relative")
        } else {
            ("relative", "absolute")
        };
        Err(Error::RoleMismatch {
            kind: kind.tag().to_string(),
            expected,
            found,
        })
    }
}

// ────────────────────────────── Relative ──────────────────────────────

/// A difference quantity, stored in its kind's canonical base unit.
#[derive(Debug, Clone)]
pub struct Relative {
    base: f64,
    kind: Arc<Kind>,
    display: Arc<Unit>,
}

impl Relative {
    /// Builds a relative quantity from a value expressed in `unit`.
    ///
    /// Fails when `kind` is an absolute kind or when the unit's dimension
    /// vector differs from the kind's.
    pub fn new(value: f64, kind: &Arc<Kind>, unit: &Arc<Unit>) -> Result<Self> {
        check_role(kind, false)?;
        check_dim(kind, unit.dimension())?;
        Ok(Self {
            base: unit.scale().to_base(value),
            kind: kind.clone(),
            display: unit.clone(),
        })
    }

    /// Unchecked assembly for container element reads; the caller has
    /// already validated role and dimension at container construction.
    pub(crate) fn raw(base: f64, kind: Arc<Kind>, display: Arc<Unit>) -> Self {
        Self {
            base,
            kind,
            display,
        }
    }

    /// Builds a relative quantity from a value already in base units; the
    /// display unit defaults to the kind's canonical unit.
    pub fn from_base(base: f64, kind: &Arc<Kind>) -> Result<Self> {
        check_role(kind, false)?;
        Ok(Self {
            base,
            display: kind.base_unit(),
            kind: kind.clone(),
        })
    }

    /// The value read out in the display unit.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.display.scale().from_base(self.base)
    }

    /// The payload in the canonical base unit.
    #[must_use]
    pub fn base_value(&self) -> f64 {
        self.base
    }

    /// The display unit.
    #[must_use]
    pub fn unit(&self) -> &Arc<Unit> {
        &self.display
    }

    /// The owning kind.
    #[must_use]
    pub fn kind(&self) -> &Arc<Kind> {
        &self.kind
    }

    /// The dimension vector.
    #[must_use]
    pub fn dimension(&self) -> crate::dimension::Dimension {
        self.kind.dimension()
    }

    /// Reads the value out in another unit of the same dimension.
    pub fn in_unit(&self, unit: &Arc<Unit>) -> Result<f64> {
        check_dim(&self.kind, unit.dimension())?;
        Ok(unit.scale().from_base(self.base))
    }

    /// Rebinds the display unit, leaving the payload untouched.
    pub fn with_unit(mut self, unit: &Arc<Unit>) -> Result<Self> {
        check_dim(&self.kind, unit.dimension())?;
        self.display = unit.clone();
        Ok(self)
    }

    /// Sum of two differences of the same dimension.
    pub fn try_add(&self, rhs: &Relative) -> Result<Relative> {
        check_dim(&self.kind, rhs.dimension())?;
        Ok(Self {
            base: self.base + rhs.base,
            kind: self.kind.clone(),
            display: self.display.clone(),
        })
    }

    /// Difference of two differences of the same dimension.
    pub fn try_sub(&self, rhs: &Relative) -> Result<Relative> {
        check_dim(&self.kind, rhs.dimension())?;
        Ok(Self {
            base: self.base - rhs.base,
            kind: self.kind.clone(),
            display: self.display.clone(),
        })
    }

    /// Product of two quantities; the result lives in whatever kind owns the
    /// combined dimension vector, synthesized on first sight.
    ///
    /// Named apart from [`Mul`] because the by-value `f64` operator shadows an
    /// inherent `mul` under method syntax.
    #[must_use]
    pub fn multiply(&self, rhs: &Relative, registry: &Registry) -> Relative {
        let dim = self.dimension() * rhs.dimension();
        let kind = registry.lookup_or_create(dim);
        Relative {
            base: self.base * rhs.base,
            display: kind.base_unit(),
            kind,
        }
    }

    /// Quotient of two quantities, with the same kind synthesis as
    /// [`Relative::multiply`].
    #[must_use]
    pub fn divide(&self, rhs: &Relative, registry: &Registry) -> Relative {
        let dim = self.dimension() / rhs.dimension();
        let kind = registry.lookup_or_create(dim);
        Relative {
            base: self.base / rhs.base,
            display: kind.base_unit(),
            kind,
        }
    }

    /// Integer power: payload and dimension vector raised together.
    #[must_use]
    pub fn powi(&self, n: i8, registry: &Registry) -> Relative {
        let dim = self.dimension().pow(n);
        let kind = registry.lookup_or_create(dim);
        Relative {
            base: self.base.powi(i32::from(n)),
            display: kind.base_unit(),
            kind,
        }
    }

    /// Square root; fails when any exponent of the dimension vector is odd.
    pub fn sqrt(&self, registry: &Registry) -> Result<Relative> {
        let dim = self.dimension().root(2)?;
        let kind = registry.lookup_or_create(dim);
        Ok(Relative {
            base: self.base.sqrt(),
            display: kind.base_unit(),
            kind,
        })
    }

    /// Reinterprets the quantity under a concrete kind of equal dimension.
    ///
    /// The payload is already in base units, so it is reused unchanged; only
    /// the kind and display metadata change. The display unit defaults to the
    /// target kind's canonical unit.
    pub fn cast(&self, kind: &Arc<Kind>) -> Result<Relative> {
        check_role(kind, false)?;
        check_dim(kind, self.dimension())?;
        Ok(Relative {
            base: self.base,
            display: kind.base_unit(),
            kind: kind.clone(),
        })
    }

    /// Like [`Relative::cast`] with a caller-supplied display unit.
    pub fn cast_in(&self, kind: &Arc<Kind>, unit: &Arc<Unit>) -> Result<Relative> {
        self.cast(kind)?.with_unit(unit)
    }
}

impl PartialEq for Relative {
    fn eq(&self, other: &Self) -> bool {
        self.dimension() == other.dimension() && self.base == other.base
    }
}

impl Mul<f64> for Relative {
    type Output = Relative;
    fn mul(mut self, rhs: f64) -> Relative {
        self.base *= rhs;
        self
    }
}

impl Mul<Relative> for f64 {
    type Output = Relative;
    fn mul(self, rhs: Relative) -> Relative {
        rhs * self
    }
}

impl Div<f64> for Relative {
    type Output = Relative;
    fn div(mut self, rhs: f64) -> Relative {
        self.base /= rhs;
        self
    }
}

impl Neg for Relative {
    type Output = Relative;
    fn neg(mut self) -> Relative {
        self.base = -self.base;
        self
    }
}

impl fmt::Display for Relative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value(), self.display)
    }
}

// ────────────────────────────── Absolute ──────────────────────────────

/// A point quantity, stored in its kind's canonical base unit.
///
/// No `Add<Absolute>`, `Mul<f64>` or negation exist here; the missing
/// operations are the point of the type.
#[derive(Debug, Clone)]
pub struct Absolute {
    base: f64,
    kind: Arc<Kind>,
    display: Arc<Unit>,
}

impl Absolute {
    /// Builds an absolute quantity from a value expressed in `unit`.
    ///
    /// Fails when `kind` is a relative kind or when the unit's dimension
    /// vector differs from the kind's.
    pub fn new(value: f64, kind: &Arc<Kind>, unit: &Arc<Unit>) -> Result<Self> {
        check_role(kind, true)?;
        check_dim(kind, unit.dimension())?;
        Ok(Self {
            base: unit.scale().to_base(value),
            kind: kind.clone(),
            display: unit.clone(),
        })
    }

    /// Unchecked assembly for container element reads; the caller has
    /// already validated role and dimension at container construction.
    pub(crate) fn raw(base: f64, kind: Arc<Kind>, display: Arc<Unit>) -> Self {
        Self {
            base,
            kind,
            display,
        }
    }

    /// Builds an absolute quantity from a value already in base units.
    pub fn from_base(base: f64, kind: &Arc<Kind>) -> Result<Self> {
        check_role(kind, true)?;
        Ok(Self {
            base,
            display: kind.base_unit(),
            kind: kind.clone(),
        })
    }

    /// The value read out in the display unit.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.display.scale().from_base(self.base)
    }

    /// The payload in the canonical base unit.
    #[must_use]
    pub fn base_value(&self) -> f64 {
        self.base
    }

    /// The display unit.
    #[must_use]
    pub fn unit(&self) -> &Arc<Unit> {
        &self.display
    }

    /// The owning kind.
    #[must_use]
    pub fn kind(&self) -> &Arc<Kind> {
        &self.kind
    }

    /// The dimension vector.
    #[must_use]
    pub fn dimension(&self) -> crate::dimension::Dimension {
        self.kind.dimension()
    }

    /// Reads the value out in another unit of the same dimension.
    pub fn in_unit(&self, unit: &Arc<Unit>) -> Result<f64> {
        check_dim(&self.kind, unit.dimension())?;
        Ok(unit.scale().from_base(self.base))
    }

    /// Rebinds the display unit, leaving the payload untouched.
    pub fn with_unit(mut self, unit: &Arc<Unit>) -> Result<Self> {
        check_dim(&self.kind, unit.dimension())?;
        self.display = unit.clone();
        Ok(self)
    }

    /// Point minus point is a difference, landing on the relative twin.
    pub fn try_sub(&self, rhs: &Absolute) -> Result<Relative> {
        check_dim(&self.kind, rhs.dimension())?;
        let twin = self
            .kind
            .relative_twin()
            .cloned()
            .expect("absolute kinds carry a relative twin");
        Ok(Relative {
            base: self.base - rhs.base,
            display: twin.base_unit(),
            kind: twin,
        })
    }

    /// Point plus difference is a point.
    pub fn try_add_rel(&self, rhs: &Relative) -> Result<Absolute> {
        check_dim(&self.kind, rhs.dimension())?;
        Ok(Self {
            base: self.base + rhs.base,
            kind: self.kind.clone(),
            display: self.display.clone(),
        })
    }

    /// Point minus difference is a point.
    pub fn try_sub_rel(&self, rhs: &Relative) -> Result<Absolute> {
        check_dim(&self.kind, rhs.dimension())?;
        Ok(Self {
            base: self.base - rhs.base,
            kind: self.kind.clone(),
            display: self.display.clone(),
        })
    }

    /// Reinterprets the point under another absolute kind of equal
    /// dimension; payload unchanged, display defaults to the target's
    /// canonical unit.
    pub fn cast(&self, kind: &Arc<Kind>) -> Result<Absolute> {
        check_role(kind, true)?;
        check_dim(kind, self.dimension())?;
        Ok(Absolute {
            base: self.base,
            display: kind.base_unit(),
            kind: kind.clone(),
        })
    }

    /// Like [`Absolute::cast`] with a caller-supplied display unit.
    pub fn cast_in(&self, kind: &Arc<Kind>, unit: &Arc<Unit>) -> Result<Absolute> {
        self.cast(kind)?.with_unit(unit)
    }
}

impl PartialEq for Absolute {
    fn eq(&self, other: &Self) -> bool {
        self.dimension() == other.dimension() && self.base == other.base
    }
}

impl fmt::Display for Absolute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value(), self.display)
    }
}
