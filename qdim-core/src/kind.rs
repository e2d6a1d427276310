//! Quantity kinds: the named grouping of all units sharing one dimension
//! vector.
//!
//! A [`Kind`] owns its units in an abbreviation-keyed index and designates
//! exactly one canonical base unit (identity scale, zero offset). Kinds are
//! identity-stable: the registry hands out the same `Arc<Kind>` for a given
//! dimension vector for the life of the process, so kind equality is
//! pointer equality.
//!
//! Kinds come in two roles. A *relative* kind models differences (Length,
//! Duration, TemperatureDifference). An *absolute* kind models points on a
//! scale with an origin (Position, TimeInstant, Temperature); it links 1:1
//! to its relative twin, shares the twin's dimension vector, and is the only
//! role allowed to register offset units.

use crate::dimension::Dimension;
use crate::error::{Error, Result};
use crate::scale::Scale;
use crate::unit::{SiPrefix, Unit, UnitSpec};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Abs/rel role of a kind.
#[derive(Debug, Clone)]
enum Role {
    /// A difference quantity; the form generic arithmetic produces.
    Relative,
    /// A point quantity, linked to its relative twin.
    Absolute {
        /// The relative kind sharing this dimension vector.
        relative: Arc<Kind>,
    },
}

/// A named quantity kind and its unit index.
#[derive(Debug)]
pub struct Kind {
    tag: String,
    dim: Dimension,
    role: Role,
    base_abbrev: String,
    units: Mutex<HashMap<String, Arc<Unit>>>,
}

impl Kind {
    fn with_role(tag: &str, dim: Dimension, base_spec: UnitSpec, role: Role) -> Result<Arc<Self>> {
        let base = Unit::new(base_spec, Scale::Identity, dim, tag)?;
        let base_abbrev = base.abbrev().to_string();
        let mut units = HashMap::new();
        units.insert(base_abbrev.clone(), Arc::new(base));
        Ok(Arc::new(Self {
            tag: tag.to_string(),
            dim,
            role,
            base_abbrev,
            units: Mutex::new(units),
        }))
    }

    /// Creates a relative (named) kind with its canonical base unit.
    pub(crate) fn create(tag: &str, dim: Dimension, base_spec: UnitSpec) -> Result<Arc<Self>> {
        Self::with_role(tag, dim, base_spec, Role::Relative)
    }

    /// Creates an absolute kind twinned with `relative`.
    pub(crate) fn create_absolute(
        tag: &str,
        relative: Arc<Kind>,
        base_spec: UnitSpec,
    ) -> Result<Arc<Self>> {
        let dim = relative.dim;
        Self::with_role(tag, dim, base_spec, Role::Absolute { relative })
    }

    /// Synthesizes an anonymous kind for a dimension vector nobody named.
    ///
    /// The tag and the canonical unit's display form are both the vector's
    /// textual signature.
    pub(crate) fn create_anonymous(dim: Dimension) -> Arc<Self> {
        let base = Unit::anonymous(dim);
        let tag = base.kind_tag().to_string();
        let base_abbrev = base.abbrev().to_string();
        let mut units = HashMap::new();
        units.insert(base_abbrev.clone(), Arc::new(base));
        Arc::new(Self {
            tag,
            dim,
            role: Role::Relative,
            base_abbrev,
            units: Mutex::new(units),
        })
    }

    /// Human-readable tag, e.g. `"Length"`.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Dimension vector shared by every unit of this kind.
    #[must_use]
    pub fn dimension(&self) -> Dimension {
        self.dim
    }

    /// True for point-on-a-scale kinds (Temperature, Position, …).
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        matches!(self.role, Role::Absolute { .. })
    }

    /// The relative twin of an absolute kind.
    #[must_use]
    pub fn relative_twin(&self) -> Option<&Arc<Kind>> {
        match &self.role {
            Role::Absolute { relative } => Some(relative),
            Role::Relative => None,
        }
    }

    /// The canonical base unit (identity scale, zero offset).
    #[must_use]
    pub fn base_unit(&self) -> Arc<Unit> {
        self.units
            .lock()
            .expect("kind unit index poisoned")
            .get(&self.base_abbrev)
            .cloned()
            .expect("canonical unit registered at construction")
    }

    /// Looks up a unit by abbreviation.
    #[must_use]
    pub fn unit(&self, abbrev: &str) -> Option<Arc<Unit>> {
        self.units
            .lock()
            .expect("kind unit index poisoned")
            .get(abbrev)
            .cloned()
    }

    /// Registers a constructed unit into the abbreviation index.
    fn add(&self, unit: Unit) -> Result<Arc<Unit>> {
        if unit.dimension() != self.dim {
            return Err(Error::DimensionMismatch {
                expected: self.dim.to_string(),
                found: unit.dimension().to_string(),
            });
        }
        if unit.scale().offset() != 0.0 && !self.is_absolute() {
            return Err(Error::InvalidDerivation(format!(
                "offset unit '{}' on relative kind '{}': only absolute kinds carry offsets",
                unit.abbrev(),
                self.tag
            )));
        }
        let mut units = self.units.lock().expect("kind unit index poisoned");
        if units.contains_key(unit.abbrev()) {
            return Err(Error::DuplicateUnit {
                kind: self.tag.clone(),
                abbrev: unit.abbrev().to_string(),
            });
        }
        log::debug!("kind '{}': registering unit '{}'", self.tag, unit.abbrev());
        let unit = Arc::new(unit);
        units.insert(unit.abbrev().to_string(), unit.clone());
        Ok(unit)
    }

    /// Defines a unit with an explicit scale (used for named non-linear
    /// formulas such as the percent-angle scale).
    pub fn define_unit(&self, spec: UnitSpec, scale: Scale) -> Result<Arc<Unit>> {
        let unit = Unit::new(spec, scale, self.dim, &self.tag)?;
        self.add(unit)
    }

    /// Derives and registers a linearly scaled unit from `parent`.
    ///
    /// See [`Unit::derive_linear`] for the factor-composition contract.
    pub fn derive_linear(&self, parent: &Unit, factor: f64, spec: UnitSpec) -> Result<Arc<Unit>> {
        if parent.kind_tag() != self.tag {
            return Err(Error::InvalidDerivation(format!(
                "parent unit '{}' belongs to kind '{}', not '{}'",
                parent.abbrev(),
                parent.kind_tag(),
                self.tag
            )));
        }
        self.add(parent.derive_linear(factor, spec)?)
    }

    /// Derives and registers an offset unit from `parent`.
    ///
    /// Absolute kinds only; see [`Unit::derive_linear_offset`] for the
    /// identity-base restriction.
    pub fn derive_linear_offset(
        &self,
        parent: &Unit,
        factor: f64,
        offset: f64,
        spec: UnitSpec,
    ) -> Result<Arc<Unit>> {
        if !self.is_absolute() {
            return Err(Error::InvalidDerivation(format!(
                "offset unit '{}' on relative kind '{}': only absolute kinds carry offsets",
                spec.abbrev, self.tag
            )));
        }
        if parent.kind_tag() != self.tag {
            return Err(Error::InvalidDerivation(format!(
                "parent unit '{}' belongs to kind '{}', not '{}'",
                parent.abbrev(),
                parent.kind_tag(),
                self.tag
            )));
        }
        self.add(parent.derive_linear_offset(factor, offset, spec)?)
    }

    /// Generates and registers the full SI prefix ladder for `parent`.
    ///
    /// `is_kilo` marks a parent that is itself the kilo-prefixed form
    /// (kilogram): the ladder is then built on the bare stem (gram), which
    /// is registered too. `is_per_unit` marks a quotient-style unit
    /// ("meter per second"), whose prefix attaches to the numerator of both
    /// abbreviation and name.
    ///
    /// Fails fast when the stored abbreviation/name does not match the
    /// expected "kilo-"/"per-" textual convention; that consistency check is
    /// a precondition, not a recoverable condition.
    pub fn generate_si_prefixes(
        &self,
        parent: &Unit,
        is_kilo: bool,
        is_per_unit: bool,
    ) -> Result<Vec<Arc<Unit>>> {
        if is_kilo && !(parent.abbrev().starts_with('k') && parent.name().starts_with("kilo")) {
            return Err(Error::InvalidUnitSpec(format!(
                "unit '{}' ('{}') does not follow the kilo- convention",
                parent.abbrev(),
                parent.name()
            )));
        }
        if is_per_unit && !(parent.abbrev().contains('/') && parent.name().contains(" per ")) {
            return Err(Error::InvalidUnitSpec(format!(
                "unit '{}' ('{}') does not follow the per- convention",
                parent.abbrev(),
                parent.name()
            )));
        }
        let parent_factor = match parent.scale() {
            Scale::Identity => 1.0,
            Scale::Linear { factor } => factor,
            Scale::LinearOffset { .. } | Scale::PercentAngle => {
                return Err(Error::InvalidDerivation(format!(
                    "cannot build a prefix ladder on '{}': base scale is not a pure rescaling",
                    parent.abbrev()
                )))
            }
        };

        let (stem_abbrev, stem_name, stem_factor) = if is_kilo {
            (
                parent.abbrev()[1..].to_string(),
                parent.name()["kilo".len()..].to_string(),
                parent_factor / SiPrefix::Kilo.factor(),
            )
        } else {
            (
                parent.abbrev().to_string(),
                parent.name().to_string(),
                parent_factor,
            )
        };

        let compose = |sym: &str, pname: &str| -> (String, String) {
            if is_per_unit {
                let (a_head, a_tail) = stem_abbrev.split_once('/').expect("checked above");
                let (n_head, n_tail) = stem_name.split_once(" per ").expect("checked above");
                (
                    format!("{sym}{a_head}/{a_tail}"),
                    format!("{pname}{n_head} per {n_tail}"),
                )
            } else {
                (format!("{sym}{stem_abbrev}"), format!("{pname}{stem_name}"))
            }
        };

        let mut generated = Vec::new();
        if is_kilo {
            // The bare stem (e.g. gram) is registered alongside the ladder.
            let (abbrev, name) = (stem_abbrev.clone(), stem_name.clone());
            let unit = Unit::new(
                UnitSpec::new(&abbrev, &name, parent.system()),
                Scale::Linear {
                    factor: stem_factor,
                },
                self.dim,
                &self.tag,
            )?;
            generated.push(self.add(unit)?);
        }
        for prefix in SiPrefix::ALL {
            let (abbrev, name) = compose(prefix.symbol(), prefix.name());
            if abbrev == parent.abbrev() {
                continue; // the parent already covers this rung
            }
            let unit = Unit::new(
                UnitSpec::new(&abbrev, &name, parent.system()),
                Scale::Linear {
                    factor: stem_factor * prefix.factor(),
                },
                self.dim,
                &self.tag,
            )?;
            unit.mark_si_prefix(prefix);
            generated.push(self.add(unit)?);
        }
        Ok(generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::UnitSystem;
    use approx::assert_abs_diff_eq;

    fn length() -> Arc<Kind> {
        Kind::create(
            "Length",
            Dimension::LENGTH,
            UnitSpec::new("m", "meter", UnitSystem::Si),
        )
        .unwrap()
    }

    #[test]
    fn base_unit_is_canonical() {
        let length = length();
        let m = length.base_unit();
        assert_eq!(m.abbrev(), "m");
        assert!(m.scale().is_identity());
        assert_eq!(m.dimension(), Dimension::LENGTH);
    }

    #[test]
    fn derive_and_resolve() {
        let length = length();
        let m = length.base_unit();
        length
            .derive_linear(&m, 1000.0, UnitSpec::new("km", "kilometer", UnitSystem::Si))
            .unwrap();
        let km = length.unit("km").unwrap();
        assert_abs_diff_eq!(km.scale().to_base(1.0), 1000.0, epsilon = 1e-12);
        assert!(length.unit("mi").is_none());
    }

    #[test]
    fn duplicate_abbreviation_is_rejected() {
        let length = length();
        let m = length.base_unit();
        let err = length.derive_linear(&m, 1000.0, UnitSpec::new("m", "meter again", UnitSystem::Si));
        assert!(matches!(err, Err(Error::DuplicateUnit { .. })));
    }

    #[test]
    fn offset_units_only_on_absolute_kinds() {
        let length = length();
        let m = length.base_unit();
        let err = length.derive_linear_offset(
            &m,
            1.0,
            5.0,
            UnitSpec::new("mo", "offset meter", UnitSystem::Other),
        );
        assert!(matches!(err, Err(Error::InvalidDerivation(_))));
    }

    #[test]
    fn absolute_kind_links_to_twin() {
        let length = length();
        let position = Kind::create_absolute(
            "Position",
            length.clone(),
            UnitSpec::new("m", "meter", UnitSystem::Si),
        )
        .unwrap();
        assert!(position.is_absolute());
        assert!(Arc::ptr_eq(position.relative_twin().unwrap(), &length));
        assert_eq!(position.dimension(), Dimension::LENGTH);
    }

    #[test]
    fn prefix_ladder_on_meter() {
        let length = length();
        let m = length.base_unit();
        length.generate_si_prefixes(&m, false, false).unwrap();

        let km = length.unit("km").unwrap();
        assert_abs_diff_eq!(km.scale().to_base(1.0), 1000.0, epsilon = 1e-12);
        assert_eq!(km.si_prefix(), Some(SiPrefix::Kilo));

        let cm = length.unit("cm").unwrap();
        assert_abs_diff_eq!(cm.scale().to_base(1.0), 0.01, epsilon = 1e-15);
    }

    #[test]
    fn prefix_ladder_on_kilogram() {
        let mass = Kind::create(
            "Mass",
            Dimension::MASS,
            UnitSpec::new("kg", "kilogram", UnitSystem::Si),
        )
        .unwrap();
        let kg = mass.base_unit();
        mass.generate_si_prefixes(&kg, true, false).unwrap();

        let g = mass.unit("g").unwrap();
        assert_abs_diff_eq!(g.scale().to_base(1.0), 1e-3, epsilon = 1e-18);
        let mg = mass.unit("mg").unwrap();
        assert_abs_diff_eq!(mg.scale().to_base(1.0), 1e-6, epsilon = 1e-18);
        // "kg" itself stays the canonical unit, not a generated rung.
        assert!(mass.unit("kg").unwrap().scale().is_identity());
    }

    #[test]
    fn prefix_ladder_checks_kilo_convention() {
        let mass = Kind::create(
            "Mass",
            Dimension::MASS,
            UnitSpec::new("lb", "pound", UnitSystem::Imperial),
        )
        .unwrap();
        let lb = mass.base_unit();
        let err = mass.generate_si_prefixes(&lb, true, false);
        assert!(matches!(err, Err(Error::InvalidUnitSpec(_))));
    }

    #[test]
    fn prefix_ladder_on_per_unit() {
        let velocity = Kind::create(
            "Velocity",
            Dimension::VELOCITY,
            UnitSpec::new("m/s", "meter per second", UnitSystem::Si),
        )
        .unwrap();
        let mps = velocity.base_unit();
        velocity.generate_si_prefixes(&mps, false, true).unwrap();

        let kmps = velocity.unit("km/s").unwrap();
        assert_eq!(kmps.name(), "kilometer per second");
        assert_abs_diff_eq!(kmps.scale().to_base(1.0), 1000.0, epsilon = 1e-12);
    }

    #[test]
    fn prefix_ladder_checks_per_convention() {
        let velocity = Kind::create(
            "Velocity",
            Dimension::VELOCITY,
            UnitSpec::new("mps", "meters/second", UnitSystem::Si),
        )
        .unwrap();
        let mps = velocity.base_unit();
        let err = velocity.generate_si_prefixes(&mps, false, true);
        assert!(matches!(err, Err(Error::InvalidUnitSpec(_))));
    }
}
