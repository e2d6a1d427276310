//! Runtime-checked physical quantities and unit conversion.
//!
//! `qdim` is the user-facing crate in this workspace. It re-exports the full
//! API from `qdim-core`: the SI dimension algebra, the kind/unit registry
//! with its predefined catalogue, abs/rel scalar arithmetic, and unit-aware
//! dense/sparse vectors and matrices.
//!
//! The core idea is: a value always travels with its kind's nine-exponent
//! dimension vector and is stored in the kind's canonical base unit.
//! Dimensions are combined exactly under multiplication and division, so a
//! `Length` divided by a `Duration` *is* a `Velocity`, checked at runtime
//! rather than by the type system.
//!
//! # What this crate solves
//!
//! - Prevents mixing incompatible dimensions (adding meters to seconds is an
//!   error carrying both signatures).
//! - Distinguishes points from differences: temperatures and positions
//!   cannot be summed or scaled, only subtracted or shifted.
//! - Gives products and quotients a real kind, named when one is registered
//!   and synthesized from the dimension signature otherwise, with an
//!   explicit cast back to a concrete kind.
//! - Converts whole arrays once, eagerly, and stores them densely or
//!   sparsely without changing observable values.
//!
//! # What this crate does not try to solve
//!
//! - Compile-time dimension checking; everything here is runtime-valued.
//! - Exact arithmetic: payloads are `f64`.
//! - Unit *formatting* beyond abbreviations (no locale-aware display).
//!
//! # Quick start
//!
//! ```
//! use qdim::{Layout, Registry, Relative, RelVector};
//!
//! let registry = Registry::with_si_kinds()?;
//! let length = registry.kind("Length")?;
//! let duration = registry.kind("Duration")?;
//!
//! let d = Relative::new(1.0, &length, &registry.resolve("Length", "km")?)?;
//! let t = Relative::new(100.0, &duration, &registry.resolve("Duration", "s")?)?;
//! let v = d.divide(&t, &registry).cast(&registry.kind("Velocity")?)?;
//! assert_eq!(v.value(), 10.0); // m/s
//!
//! // Whole arrays convert once at construction.
//! let marks = RelVector::from_values(
//!     &[0.0, 2.5, 5.0],
//!     &length,
//!     &registry.resolve("Length", "km")?,
//!     Layout::Dense,
//! )?;
//! assert_eq!(marks.base_at(1), 2500.0);
//! # Ok::<(), qdim::Error>(())
//! ```

#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub use qdim_core::{
    container, dimension, error, kind, quantity, registry, scale, storage, unit, AbsMatrix,
    AbsVector, Absolute, Dimension, Error, Kind, Layout, MatData, Registry, RelMatrix, RelVector,
    Relative, Result, Scale, SiPrefix, Unit, UnitSpec, UnitSystem, VecData,
};
