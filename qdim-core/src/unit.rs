//! Unit descriptors and the derivation protocol.
//!
//! A [`Unit`] is an immutable descriptor: abbreviation, display name, the
//! [`UnitSystem`] it originates from, its [`Scale`] against the canonical
//! base unit of its kind, and the kind's [`Dimension`]. Units are shared as
//! `Arc<Unit>` and never mutated after construction, with one exception: the
//! late-bound SI-prefix marker used for display, which is set at most once.
//!
//! Construction goes through a plain [`UnitSpec`] configuration struct
//! validated by a single constructor; related units are created with the
//! derivation methods ([`Unit::derive_linear`],
//! [`Unit::derive_linear_offset`]) which *compose* conversion factors so a
//! chain of derivations (inch ← foot ← meter) always resolves to the true
//! factor against the canonical base, never to the last link alone.

use crate::dimension::Dimension;
use crate::error::{Error, Result};
use crate::scale::Scale;
use std::fmt;
use std::sync::OnceLock;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Originating unit system, carried for display and provenance only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnitSystem {
    /// Système international.
    Si,
    /// Imperial / US customary.
    Imperial,
    /// Centimetre–gram–second.
    Cgs,
    /// Astronomical conventions (au, parsec, …).
    Astronomical,
    /// Anything else, including synthesized anonymous units.
    Other,
}

/// Plain configuration for one unit-definition call.
///
/// This replaces a chained mutable builder: fill in the fields, hand the
/// spec to the constructor or a derivation method, and validation happens in
/// one place.
#[derive(Debug, Clone)]
pub struct UnitSpec {
    /// Primary abbreviation, e.g. `"km"`. Must be non-empty.
    pub abbrev: String,
    /// Human-readable name, e.g. `"kilometer"`. Must be non-empty.
    pub name: String,
    /// Originating unit system tag.
    pub system: UnitSystem,
}

impl UnitSpec {
    /// Convenience constructor for the common case.
    pub fn new(abbrev: &str, name: &str, system: UnitSystem) -> Self {
        Self {
            abbrev: abbrev.to_string(),
            name: name.to_string(),
            system,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.abbrev.is_empty() {
            return Err(Error::InvalidUnitSpec(format!(
                "unit '{}' has an empty abbreviation",
                self.name
            )));
        }
        if self.name.is_empty() {
            return Err(Error::InvalidUnitSpec(format!(
                "unit '{}' has an empty name",
                self.abbrev
            )));
        }
        Ok(())
    }
}

/// SI decimal prefixes, used by the prefix-ladder generator and stored on
/// generated units as a display marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SiPrefix {
    /// 10²⁴
    Yotta,
    /// 10²¹
    Zetta,
    /// 10¹⁸
    Exa,
    /// 10¹⁵
    Peta,
    /// 10¹²
    Tera,
    /// 10⁹
    Giga,
    /// 10⁶
    Mega,
    /// 10³
    Kilo,
    /// 10²
    Hecto,
    /// 10¹
    Deca,
    /// 10⁻¹
    Deci,
    /// 10⁻²
    Centi,
    /// 10⁻³
    Milli,
    /// 10⁻⁶
    Micro,
    /// 10⁻⁹
    Nano,
    /// 10⁻¹²
    Pico,
    /// 10⁻¹⁵
    Femto,
    /// 10⁻¹⁸
    Atto,
    /// 10⁻²¹
    Zepto,
    /// 10⁻²⁴
    Yocto,
}

impl SiPrefix {
    /// Every prefix, largest to smallest.
    pub const ALL: [SiPrefix; 20] = [
        SiPrefix::Yotta,
        SiPrefix::Zetta,
        SiPrefix::Exa,
        SiPrefix::Peta,
        SiPrefix::Tera,
        SiPrefix::Giga,
        SiPrefix::Mega,
        SiPrefix::Kilo,
        SiPrefix::Hecto,
        SiPrefix::Deca,
        SiPrefix::Deci,
        SiPrefix::Centi,
        SiPrefix::Milli,
        SiPrefix::Micro,
        SiPrefix::Nano,
        SiPrefix::Pico,
        SiPrefix::Femto,
        SiPrefix::Atto,
        SiPrefix::Zepto,
        SiPrefix::Yocto,
    ];

    /// Decimal factor of the prefix.
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            SiPrefix::Yotta => 1e24,
            SiPrefix::Zetta => 1e21,
            SiPrefix::Exa => 1e18,
            SiPrefix::Peta => 1e15,
            SiPrefix::Tera => 1e12,
            SiPrefix::Giga => 1e9,
            SiPrefix::Mega => 1e6,
            SiPrefix::Kilo => 1e3,
            SiPrefix::Hecto => 1e2,
            SiPrefix::Deca => 1e1,
            SiPrefix::Deci => 1e-1,
            SiPrefix::Centi => 1e-2,
            SiPrefix::Milli => 1e-3,
            SiPrefix::Micro => 1e-6,
            SiPrefix::Nano => 1e-9,
            SiPrefix::Pico => 1e-12,
            SiPrefix::Femto => 1e-15,
            SiPrefix::Atto => 1e-18,
            SiPrefix::Zepto => 1e-21,
            SiPrefix::Yocto => 1e-24,
        }
    }

    /// Abbreviated symbol (`"k"`, `"µ"`, …).
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            SiPrefix::Yotta => "Y",
            SiPrefix::Zetta => "Z",
            SiPrefix::Exa => "E",
            SiPrefix::Peta => "P",
            SiPrefix::Tera => "T",
            SiPrefix::Giga => "G",
            SiPrefix::Mega => "M",
            SiPrefix::Kilo => "k",
            SiPrefix::Hecto => "h",
            SiPrefix::Deca => "da",
            SiPrefix::Deci => "d",
            SiPrefix::Centi => "c",
            SiPrefix::Milli => "m",
            SiPrefix::Micro => "u",
            SiPrefix::Nano => "n",
            SiPrefix::Pico => "p",
            SiPrefix::Femto => "f",
            SiPrefix::Atto => "a",
            SiPrefix::Zepto => "z",
            SiPrefix::Yocto => "y",
        }
    }

    /// Spelled-out prefix name (`"kilo"`, `"micro"`, …).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SiPrefix::Yotta => "yotta",
            SiPrefix::Zetta => "zetta",
            SiPrefix::Exa => "exa",
            SiPrefix::Peta => "peta",
            SiPrefix::Tera => "tera",
            SiPrefix::Giga => "giga",
            SiPrefix::Mega => "mega",
            SiPrefix::Kilo => "kilo",
            SiPrefix::Hecto => "hecto",
            SiPrefix::Deca => "deca",
            SiPrefix::Deci => "deci",
            SiPrefix::Centi => "centi",
            SiPrefix::Milli => "milli",
            SiPrefix::Micro => "micro",
            SiPrefix::Nano => "nano",
            SiPrefix::Pico => "pico",
            SiPrefix::Femto => "femto",
            SiPrefix::Atto => "atto",
            SiPrefix::Zepto => "zepto",
            SiPrefix::Yocto => "yocto",
        }
    }
}

/// Immutable unit descriptor.
///
/// The scale always converts to the *canonical* unit of the owning kind,
/// never to an intermediate unit; the derivation methods compose factors to
/// keep this invariant across derivation chains.
#[derive(Debug)]
pub struct Unit {
    abbrev: String,
    name: String,
    system: UnitSystem,
    scale: Scale,
    dim: Dimension,
    kind_tag: String,
    prefix: OnceLock<SiPrefix>,
}

impl Unit {
    /// Validates the spec and builds the descriptor.
    ///
    /// Not public: units come into existence through
    /// [`Kind`](crate::Kind) definition and derivation calls, which register
    /// them into the abbreviation index at construction time.
    pub(crate) fn new(
        spec: UnitSpec,
        scale: Scale,
        dim: Dimension,
        kind_tag: &str,
    ) -> Result<Self> {
        spec.validate()?;
        if let Some(factor) = scale.factor() {
            if !factor.is_finite() || factor == 0.0 {
                return Err(Error::InvalidUnitSpec(format!(
                    "unit '{}' has unusable conversion factor {factor}",
                    spec.abbrev
                )));
            }
        }
        Ok(Self {
            abbrev: spec.abbrev,
            name: spec.name,
            system: spec.system,
            scale,
            dim,
            kind_tag: kind_tag.to_string(),
            prefix: OnceLock::new(),
        })
    }

    /// Synthesizes the identity-scale canonical unit for an anonymous kind.
    ///
    /// The display form is the dimension vector's textual signature (the
    /// dimensionless vector prints as `"1"`).
    pub(crate) fn anonymous(dim: Dimension) -> Self {
        let sig = dim.to_string();
        let abbrev = if sig.is_empty() { "1".to_string() } else { sig };
        Self {
            name: abbrev.clone(),
            kind_tag: abbrev.clone(),
            abbrev,
            system: UnitSystem::Other,
            scale: Scale::Identity,
            dim,
            prefix: OnceLock::new(),
        }
    }

    /// Primary abbreviation, e.g. `"km"`.
    #[must_use]
    pub fn abbrev(&self) -> &str {
        &self.abbrev
    }

    /// Human-readable name, e.g. `"kilometer"`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Originating unit system.
    #[must_use]
    pub fn system(&self) -> UnitSystem {
        self.system
    }

    /// Conversion scale against the kind's canonical base unit.
    #[must_use]
    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Dimension vector of the owning kind.
    #[must_use]
    pub fn dimension(&self) -> Dimension {
        self.dim
    }

    /// Tag of the owning kind, e.g. `"Length"`.
    #[must_use]
    pub fn kind_tag(&self) -> &str {
        &self.kind_tag
    }

    /// The late-bound SI-prefix display marker, if one was attached.
    #[must_use]
    pub fn si_prefix(&self) -> Option<SiPrefix> {
        self.prefix.get().copied()
    }

    /// Attaches the SI-prefix display marker. Only the first call takes
    /// effect; the marker is display metadata and never feeds conversion.
    pub fn mark_si_prefix(&self, prefix: SiPrefix) {
        let _ = self.prefix.set(prefix);
    }

    /// Derives a linearly scaled unit of the same kind.
    ///
    /// The resulting scale factor is the *product* of this unit's factor and
    /// `factor`, so `1 new_unit == factor × this_unit` regardless of how far
    /// this unit itself sits from the canonical base.
    ///
    /// Deriving from an offset or non-linear unit is rejected: the factor
    /// composition below is only valid for pure rescalings.
    pub fn derive_linear(&self, factor: f64, spec: UnitSpec) -> Result<Unit> {
        if !factor.is_finite() || factor == 0.0 {
            return Err(Error::InvalidUnitSpec(format!(
                "unit '{}' has unusable conversion factor {factor}",
                spec.abbrev
            )));
        }
        let base_factor = match self.scale {
            Scale::Identity => 1.0,
            Scale::Linear { factor } => factor,
            Scale::LinearOffset { .. } | Scale::PercentAngle => {
                return Err(Error::InvalidDerivation(format!(
                    "cannot derive '{}' linearly from '{}': base scale is not a pure rescaling",
                    spec.abbrev, self.abbrev
                )))
            }
        };
        log::debug!(
            "deriving unit '{}' from '{}' with factor {factor}",
            spec.abbrev,
            self.abbrev
        );
        Unit::new(
            spec,
            Scale::Linear {
                factor: base_factor * factor,
            },
            self.dim,
            &self.kind_tag,
        )
    }

    /// Derives an offset unit (`v_base = (v + offset) * factor`).
    ///
    /// Only valid starting from the canonical (identity-scale) unit. The
    /// general chained-offset composition through a lineage of offset units
    /// would be `v_base = ((v + o2) * f2 + o1) * f1`; it is not implemented,
    /// and deriving from any non-identity base is rejected so the
    /// restriction is visible instead of silently producing wrong factors.
    /// Anyone adding the general case must implement that formula and test
    /// the chained composition explicitly.
    pub fn derive_linear_offset(&self, factor: f64, offset: f64, spec: UnitSpec) -> Result<Unit> {
        if !self.scale.is_identity() {
            return Err(Error::InvalidDerivation(format!(
                "cannot derive offset unit '{}' from '{}': offset derivation requires the canonical base unit",
                spec.abbrev, self.abbrev
            )));
        }
        Unit::new(
            spec,
            Scale::LinearOffset { factor, offset },
            self.dim,
            &self.kind_tag,
        )
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.abbrev)
    }
}

impl PartialEq for Unit {
    /// Units are equal when they describe the same conversion for the same
    /// kind; the prefix marker is display metadata and does not participate.
    fn eq(&self, other: &Self) -> bool {
        self.abbrev == other.abbrev
            && self.kind_tag == other.kind_tag
            && self.dim == other.dim
            && self.scale == other.scale
    }
}
