//! Runtime-checked physical quantities: dimension algebra, unit tables,
//! abs/rel arithmetic and unit-aware numeric containers.
//!
//! Every quantity carries a nine-exponent SI dimension vector (plane and
//! solid angle included) and converts to its kind's canonical base unit once,
//! at construction. Arithmetic combines dimension vectors exactly, products
//! and quotients land on whatever kind owns the resulting vector — named if
//! one was registered, synthesized otherwise — and a runtime cast
//! reinterprets such a generic result as a concrete kind after an exact
//! signature check.
//!
//! # Quick start
//!
//! ```
//! use qdim_core::{Registry, Relative};
//!
//! let registry = Registry::with_si_kinds()?;
//! let length = registry.kind("Length")?;
//! let km = registry.resolve("Length", "km")?;
//!
//! let a = Relative::new(1.5, &length, &km)?;
//! let b = Relative::new(500.0, &length, &registry.resolve("Length", "m")?)?;
//! let total = a.try_add(&b)?;
//! assert_eq!(total.value(), 2.0); // read out in kilometers
//!
//! // Length × Length is an Area, checked at runtime.
//! let area = a.multiply(&b, &registry).cast(&registry.kind("Area")?)?;
//! assert_eq!(area.unit().abbrev(), "m2");
//! # Ok::<(), qdim_core::Error>(())
//! ```
//!
//! # Organization
//!
//! * [`dimension`] — the exact-integer dimension vector and its textual
//!   signature grammar.
//! * [`scale`] — value↔base conversion formulas (linear, offset,
//!   percent-angle).
//! * [`unit`], [`kind`], [`registry`] — unit descriptors, the per-kind unit
//!   index and the process-lifetime kind tables.
//! * [`quantity`] — [`Relative`]/[`Absolute`] scalars and the abs/rel
//!   arithmetic rules.
//! * [`storage`], [`container`] — dense/sparse numeric storage and the
//!   unit-aware vector/matrix family on top of it.
//! * `units` — the predefined catalogue behind
//!   [`Registry::with_si_kinds`].
//!
//! # Feature flags
//!
//! * `serde` — `Serialize`/`Deserialize` for the plain-data types
//!   ([`Dimension`], [`Scale`], [`SiPrefix`], [`UnitSystem`], [`Layout`]).

#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod container;
pub mod dimension;
pub mod error;
pub mod kind;
pub mod quantity;
pub mod registry;
pub mod scale;
pub mod storage;
pub mod unit;
mod units;

pub use container::{AbsMatrix, AbsVector, RelMatrix, RelVector};
pub use dimension::Dimension;
pub use error::{Error, Result};
pub use kind::Kind;
pub use quantity::{Absolute, Relative};
pub use registry::Registry;
pub use scale::Scale;
pub use storage::{Layout, MatData, VecData};
pub use unit::{SiPrefix, Unit, UnitSpec, UnitSystem};
