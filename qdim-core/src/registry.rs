//! The kind registry: one table of kinds per registry value, keyed both by
//! tag and by dimension vector.
//!
//! There is no hidden process-wide singleton. Callers construct a
//! [`Registry`] (usually via [`Registry::with_si_kinds`]), hold it for the
//! life of the computation, and pass it wherever generic arithmetic needs a
//! kind for a freshly produced dimension vector.
//!
//! The dimension-keyed table maps each vector to its *relative* kind, since
//! that is the form generic arithmetic produces. Absolute kinds are reached
//! by tag, or through [`Kind::relative_twin`] from the other direction.
//!
//! # Examples
//!
//! ```
//! use qdim_core::{Dimension, Registry};
//!
//! let registry = Registry::with_si_kinds()?;
//! let length = registry.kind("Length")?;
//! assert_eq!(length.dimension(), Dimension::LENGTH);
//!
//! // A vector nobody named gets an anonymous kind, idempotently.
//! let jerk: Dimension = "m/s3".parse()?;
//! let a = registry.lookup_or_create(jerk);
//! let b = registry.lookup_or_create(jerk);
//! assert!(std::sync::Arc::ptr_eq(&a, &b));
//! # Ok::<(), qdim_core::Error>(())
//! ```

use crate::dimension::Dimension;
use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::unit::{Unit, UnitSpec};
use crate::units;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Tables {
    by_dim: HashMap<Dimension, Arc<Kind>>,
    by_tag: HashMap<String, Arc<Kind>>,
}

/// Thread-safe kind registry.
///
/// Both lookup tables live under one lock, so a lookup-or-create cannot race
/// a registration into producing two kinds for the same vector.
#[derive(Debug, Default)]
pub struct Registry {
    tables: Mutex<Tables>,
}

impl Registry {
    /// Creates an empty registry with no kinds at all.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-populated with the standard SI catalogue:
    /// the base kinds, common derived mechanical and electrical kinds, their
    /// prefix ladders, and the absolute twins (Position, Time, Temperature).
    pub fn with_si_kinds() -> Result<Self> {
        let registry = Self::new();
        units::register_all(&registry)?;
        Ok(registry)
    }

    /// Registers a named relative kind with its canonical base unit.
    ///
    /// Fails with [`Error::DuplicateKind`] when either the tag or the
    /// dimension vector is already claimed; one dimension vector has at most
    /// one relative kind.
    pub fn register_kind(
        &self,
        tag: &str,
        dim: Dimension,
        base_spec: UnitSpec,
    ) -> Result<Arc<Kind>> {
        let mut tables = self.lock();
        if tables.by_tag.contains_key(tag) {
            return Err(Error::DuplicateKind(tag.to_string()));
        }
        if let Some(existing) = tables.by_dim.get(&dim) {
            return Err(Error::DuplicateKind(format!(
                "dimension '{dim}' already belongs to kind '{}'",
                existing.tag()
            )));
        }
        let kind = Kind::create(tag, dim, base_spec)?;
        log::debug!("registry: kind '{tag}' for dimension '{dim}'");
        tables.by_dim.insert(dim, kind.clone());
        tables.by_tag.insert(tag.to_string(), kind.clone());
        Ok(kind)
    }

    /// Registers an absolute kind twinned with an already registered
    /// relative kind.
    ///
    /// Only the tag table learns the new kind; the dimension table keeps
    /// pointing at the relative twin.
    pub fn register_absolute_kind(
        &self,
        tag: &str,
        relative: &Arc<Kind>,
        base_spec: UnitSpec,
    ) -> Result<Arc<Kind>> {
        let mut tables = self.lock();
        if tables.by_tag.contains_key(tag) {
            return Err(Error::DuplicateKind(tag.to_string()));
        }
        let kind = Kind::create_absolute(tag, relative.clone(), base_spec)?;
        log::debug!(
            "registry: absolute kind '{tag}' twinned with '{}'",
            relative.tag()
        );
        tables.by_tag.insert(tag.to_string(), kind.clone());
        Ok(kind)
    }

    /// Returns the relative kind owning `dim`, creating an anonymous kind on
    /// first sight of an unnamed vector.
    ///
    /// Total and idempotent: never fails, and repeated calls for the same
    /// vector return the same `Arc`.
    #[must_use]
    pub fn lookup_or_create(&self, dim: Dimension) -> Arc<Kind> {
        let mut tables = self.lock();
        if let Some(kind) = tables.by_dim.get(&dim) {
            return kind.clone();
        }
        let kind = Kind::create_anonymous(dim);
        log::debug!("registry: anonymous kind for dimension '{dim}'");
        tables.by_dim.insert(dim, kind.clone());
        tables
            .by_tag
            .entry(kind.tag().to_string())
            .or_insert_with(|| kind.clone());
        kind
    }

    /// Looks up a kind by tag.
    pub fn kind(&self, tag: &str) -> Result<Arc<Kind>> {
        self.lock()
            .by_tag
            .get(tag)
            .cloned()
            .ok_or_else(|| Error::UnknownKind(tag.to_string()))
    }

    /// Resolves a unit by kind tag and unit abbreviation.
    pub fn resolve(&self, tag: &str, abbrev: &str) -> Result<Arc<Unit>> {
        let kind = self.kind(tag)?;
        kind.unit(abbrev).ok_or_else(|| Error::UnknownUnit {
            kind: tag.to_string(),
            abbrev: abbrev.to_string(),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().expect("registry tables poisoned")
    }
}
