//! Unit-aware vectors and matrices over the dense/sparse storage engine.
//!
//! The family is {vector, matrix} × {relative, absolute}: four concrete
//! types instead of an inheritance lattice. Values are converted to base
//! units once, eagerly, at construction; every element read re-attaches the
//! container's kind and display unit.
//!
//! Like their scalar counterparts, absolute containers deliberately lack
//! elementwise addition, scalar multiplication and [`RelVector::assign`];
//! the cross-type rules are the scalar table applied elementwise.
//!
//! # Examples
//!
//! ```
//! use qdim_core::{Layout, Registry, RelVector};
//!
//! let registry = Registry::with_si_kinds()?;
//! let length = registry.kind("Length")?;
//! let km = registry.resolve("Length", "km")?;
//!
//! let v = RelVector::from_values(&[1.0, 2.5], &length, &km, Layout::Dense)?;
//! assert_eq!(v.base_at(1), 2500.0); // stored in meters
//! assert_eq!(v.value_at(1), 2.5);   // read back in kilometers
//! # Ok::<(), qdim_core::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::quantity::{Absolute, Relative};
use crate::storage::{Layout, MatData, VecData};
use crate::unit::Unit;
use std::ops::Mul;
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

fn vec_shape(expected: &VecData, found: &VecData) -> Result<()> {
    if expected.len() == found.len() {
        Ok(())
    } else {
        Err(Error::ShapeMismatch {
            expected: expected.len().to_string(),
            found: found.len().to_string(),
        })
    }
}

fn mat_shape(expected: &MatData, found: &MatData) -> Result<()> {
    if expected.rows() == found.rows() && expected.cols() == found.cols() {
        Ok(())
    } else {
        Err(Error::ShapeMismatch {
            expected: format!("{}x{}", expected.rows(), expected.cols()),
            found: format!("{}x{}", found.rows(), found.cols()),
        })
    }
}

/// Shared metadata accessors of all four container types.
macro_rules! impl_container_meta {
    ($ty:ident) => {
        impl $ty {
            /// The owning kind.
            #[must_use]
            pub fn kind(&self) -> &Arc<Kind> {
                &self.kind
            }

            /// The display unit used by element readouts.
            #[must_use]
            pub fn unit(&self) -> &Arc<Unit> {
                &self.display
            }

            /// Current storage layout.
            #[must_use]
            pub fn layout(&self) -> Layout {
                self.data.layout()
            }

            /// Number of physically stored entries.
            #[must_use]
            pub fn stored_len(&self) -> usize {
                self.data.stored_len()
            }

            /// Copy of this container in the requested layout; values are
            /// reproduced bit-identically.
            #[must_use]
            pub fn converted(&self, layout: Layout) -> Self {
                Self {
                    data: self.data.converted(layout),
                    kind: self.kind.clone(),
                    display: self.display.clone(),
                }
            }

            /// Rebinds the display unit, leaving stored base values
            /// untouched.
            pub fn with_unit(mut self, unit: &Arc<Unit>) -> Result<Self> {
                check_dim(&self.kind, unit.dimension())?;
                self.display = unit.clone();
                Ok(self)
            }
        }
    };
}

// ──────────────────────────── RelVector ────────────────────────────

/// A vector of difference quantities sharing one kind and display unit.
#[derive(Debug, Clone)]
pub struct RelVector {
    data: VecData,
    kind: Arc<Kind>,
    display: Arc<Unit>,
}

impl_container_meta!(RelVector);

impl RelVector {
    /// Builds from a flat slice of values expressed in `unit`; each value is
    /// converted to base units here, once.
    pub fn from_values(
        values: &[f64],
        kind: &Arc<Kind>,
        unit: &Arc<Unit>,
        layout: Layout,
    ) -> Result<Self> {
        check_role(kind, false)?;
        check_dim(kind, unit.dimension())?;
        let base: Vec<f64> = values.iter().map(|&v| unit.scale().to_base(v)).collect();
        Ok(Self {
            data: VecData::from_slice(&base, layout),
            kind: kind.clone(),
            display: unit.clone(),
        })
    }

    /// Builds from already unit-attached scalars; mixed display units are
    /// fine since each payload is already in base units. Every scalar must
    /// match the container's dimension.
    pub fn from_scalars(scalars: &[Relative], kind: &Arc<Kind>, layout: Layout) -> Result<Self> {
        check_role(kind, false)?;
        let mut base = Vec::with_capacity(scalars.len());
        for q in scalars {
            check_dim(kind, q.dimension())?;
            base.push(q.base_value());
        }
        Ok(Self {
            data: VecData::from_slice(&base, layout),
            kind: kind.clone(),
            display: kind.base_unit(),
        })
    }

    /// Builds from (index, value) pairs at a declared length; the values are
    /// expressed in `unit`, absent indices default to `0.0` in base units.
    pub fn from_pairs(
        len: usize,
        pairs: &[(usize, f64)],
        kind: &Arc<Kind>,
        unit: &Arc<Unit>,
        layout: Layout,
    ) -> Result<Self> {
        check_role(kind, false)?;
        check_dim(kind, unit.dimension())?;
        let base: Vec<(usize, f64)> = pairs
            .iter()
            .map(|&(i, v)| (i, unit.scale().to_base(v)))
            .collect();
        Ok(Self {
            data: VecData::from_pairs(len, &base, layout)?,
            kind: kind.clone(),
            display: unit.clone(),
        })
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for a zero-length vector.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element as a scalar quantity; panics out of range.
    #[must_use]
    pub fn get(&self, i: usize) -> Relative {
        Relative::raw(self.data.get(i), self.kind.clone(), self.display.clone())
    }

    /// Element in base units; panics out of range.
    #[must_use]
    pub fn base_at(&self, i: usize) -> f64 {
        self.data.get(i)
    }

    /// Element read out in the display unit; panics out of range.
    #[must_use]
    pub fn value_at(&self, i: usize) -> f64 {
        self.display.scale().from_base(self.data.get(i))
    }

    /// Every element read out in `unit`.
    pub fn values_in(&self, unit: &Arc<Unit>) -> Result<Vec<f64>> {
        check_dim(&self.kind, unit.dimension())?;
        Ok(self.data.iter().map(|v| unit.scale().from_base(v)).collect())
    }

    /// Overwrites an element from a scalar quantity; panics out of range.
    pub fn set(&mut self, i: usize, q: &Relative) -> Result<()> {
        check_dim(&self.kind, q.dimension())?;
        self.data.set(i, q.base_value());
        Ok(())
    }

    /// Applies a unary numeric function to every element, in base units.
    ///
    /// The mechanism behind whole-container transcendentals; sparse storage
    /// materializes when the function does not fix zero.
    pub fn assign(&mut self, f: impl Fn(f64) -> f64) {
        self.data.assign(f);
    }

    /// Elementwise sum; shapes and dimensions must match.
    pub fn try_add(&self, rhs: &RelVector) -> Result<RelVector> {
        check_dim(&self.kind, rhs.kind.dimension())?;
        vec_shape(&self.data, &rhs.data)?;
        let mut out = self.clone();
        for i in 0..out.len() {
            out.data.set(i, self.data.get(i) + rhs.data.get(i));
        }
        Ok(out)
    }

    /// Elementwise difference; shapes and dimensions must match.
    pub fn try_sub(&self, rhs: &RelVector) -> Result<RelVector> {
        check_dim(&self.kind, rhs.kind.dimension())?;
        vec_shape(&self.data, &rhs.data)?;
        let mut out = self.clone();
        for i in 0..out.len() {
            out.data.set(i, self.data.get(i) - rhs.data.get(i));
        }
        Ok(out)
    }

    /// Reinterprets the container under a concrete kind of equal dimension;
    /// the stored base values are reused unchanged.
    pub fn cast(&self, kind: &Arc<Kind>) -> Result<RelVector> {
        check_role(kind, false)?;
        check_dim(kind, self.kind.dimension())?;
        Ok(RelVector {
            data: self.data.clone(),
            display: kind.base_unit(),
            kind: kind.clone(),
        })
    }
}

impl Mul<f64> for RelVector {
    type Output = RelVector;
    fn mul(mut self, rhs: f64) -> RelVector {
        self.data.assign(|x| x * rhs);
        self
    }
}

// ──────────────────────────── AbsVector ────────────────────────────

/// A vector of point quantities sharing one absolute kind and display unit.
#[derive(Debug, Clone)]
pub struct AbsVector {
    data: VecData,
    kind: Arc<Kind>,
    display: Arc<Unit>,
}

impl_container_meta!(AbsVector);

impl AbsVector {
    /// Builds from a flat slice of values expressed in `unit`.
    pub fn from_values(
        values: &[f64],
        kind: &Arc<Kind>,
        unit: &Arc<Unit>,
        layout: Layout,
    ) -> Result<Self> {
        check_role(kind, true)?;
        check_dim(kind, unit.dimension())?;
        let base: Vec<f64> = values.iter().map(|&v| unit.scale().to_base(v)).collect();
        Ok(Self {
            data: VecData::from_slice(&base, layout),
            kind: kind.clone(),
            display: unit.clone(),
        })
    }

    /// Builds from already unit-attached scalars.
    pub fn from_scalars(scalars: &[Absolute], kind: &Arc<Kind>, layout: Layout) -> Result<Self> {
        check_role(kind, true)?;
        let mut base = Vec::with_capacity(scalars.len());
        for q in scalars {
            check_dim(kind, q.dimension())?;
            base.push(q.base_value());
        }
        Ok(Self {
            data: VecData::from_slice(&base, layout),
            kind: kind.clone(),
            display: kind.base_unit(),
        })
    }

    /// Builds from (index, value) pairs at a declared length; the values are
    /// expressed in `unit`, absent indices default to `0.0` in base units
    /// (not in `unit` — for an offset unit the two differ).
    pub fn from_pairs(
        len: usize,
        pairs: &[(usize, f64)],
        kind: &Arc<Kind>,
        unit: &Arc<Unit>,
        layout: Layout,
    ) -> Result<Self> {
        check_role(kind, true)?;
        check_dim(kind, unit.dimension())?;
        let base: Vec<(usize, f64)> = pairs
            .iter()
            .map(|&(i, v)| (i, unit.scale().to_base(v)))
            .collect();
        Ok(Self {
            data: VecData::from_pairs(len, &base, layout)?,
            kind: kind.clone(),
            display: unit.clone(),
        })
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for a zero-length vector.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element as a scalar quantity; panics out of range.
    #[must_use]
    pub fn get(&self, i: usize) -> Absolute {
        Absolute::raw(self.data.get(i), self.kind.clone(), self.display.clone())
    }

    /// Element in base units; panics out of range.
    #[must_use]
    pub fn base_at(&self, i: usize) -> f64 {
        self.data.get(i)
    }

    /// Element read out in the display unit; panics out of range.
    #[must_use]
    pub fn value_at(&self, i: usize) -> f64 {
        self.display.scale().from_base(self.data.get(i))
    }

    /// Overwrites an element from a scalar quantity; panics out of range.
    pub fn set(&mut self, i: usize, q: &Absolute) -> Result<()> {
        check_dim(&self.kind, q.dimension())?;
        self.data.set(i, q.base_value());
        Ok(())
    }

    /// Elementwise point-minus-point, landing on the relative twin.
    pub fn try_sub(&self, rhs: &AbsVector) -> Result<RelVector> {
        check_dim(&self.kind, rhs.kind.dimension())?;
        vec_shape(&self.data, &rhs.data)?;
        let twin = self
            .kind
            .relative_twin()
            .cloned()
            .expect("absolute kinds carry a relative twin");
        let mut data = self.data.clone();
        for i in 0..data.len() {
            data.set(i, self.data.get(i) - rhs.data.get(i));
        }
        Ok(RelVector {
            data,
            display: twin.base_unit(),
            kind: twin,
        })
    }

    /// Elementwise point-plus-difference.
    pub fn try_add_rel(&self, rhs: &RelVector) -> Result<AbsVector> {
        check_dim(&self.kind, rhs.kind().dimension())?;
        vec_shape(&self.data, &rhs.data)?;
        let mut out = self.clone();
        for i in 0..out.len() {
            out.data.set(i, self.data.get(i) + rhs.data.get(i));
        }
        Ok(out)
    }

    /// Elementwise point-minus-difference.
    pub fn try_sub_rel(&self, rhs: &RelVector) -> Result<AbsVector> {
        check_dim(&self.kind, rhs.kind().dimension())?;
        vec_shape(&self.data, &rhs.data)?;
        let mut out = self.clone();
        for i in 0..out.len() {
            out.data.set(i, self.data.get(i) - rhs.data.get(i));
        }
        Ok(out)
    }
}

// ──────────────────────────── RelMatrix ────────────────────────────

/// A matrix of difference quantities sharing one kind and display unit.
#[derive(Debug, Clone)]
pub struct RelMatrix {
    data: MatData,
    kind: Arc<Kind>,
    display: Arc<Unit>,
}

impl_container_meta!(RelMatrix);

impl RelMatrix {
    /// Builds a dense matrix from row slices of values expressed in `unit`;
    /// array-of-array input is dense by nature.
    pub fn from_rows(rows: &[Vec<f64>], kind: &Arc<Kind>, unit: &Arc<Unit>) -> Result<Self> {
        check_role(kind, false)?;
        check_dim(kind, unit.dimension())?;
        let base: Vec<Vec<f64>> = rows
            .iter()
            .map(|row| row.iter().map(|&v| unit.scale().to_base(v)).collect())
            .collect();
        Ok(Self {
            data: MatData::from_rows(&base)?,
            kind: kind.clone(),
            display: unit.clone(),
        })
    }

    /// Builds a dense matrix from rows of already unit-attached scalars;
    /// mixed display units are fine since each payload is already in base
    /// units.
    pub fn from_scalar_rows(rows: &[Vec<Relative>], kind: &Arc<Kind>) -> Result<Self> {
        check_role(kind, false)?;
        let mut base = Vec::with_capacity(rows.len());
        for row in rows {
            let mut out = Vec::with_capacity(row.len());
            for q in row {
                check_dim(kind, q.dimension())?;
                out.push(q.base_value());
            }
            base.push(out);
        }
        Ok(Self {
            data: MatData::from_rows(&base)?,
            kind: kind.clone(),
            display: kind.base_unit(),
        })
    }

    /// Builds from (row, col, value) triplets at a declared shape; absent
    /// cells default to `0.0` in base units.
    pub fn from_triplets(
        rows: usize,
        cols: usize,
        triplets: &[(usize, usize, f64)],
        kind: &Arc<Kind>,
        unit: &Arc<Unit>,
        layout: Layout,
    ) -> Result<Self> {
        check_role(kind, false)?;
        check_dim(kind, unit.dimension())?;
        let base: Vec<(usize, usize, f64)> = triplets
            .iter()
            .map(|&(r, c, v)| (r, c, unit.scale().to_base(v)))
            .collect();
        Ok(Self {
            data: MatData::from_triplets(rows, cols, &base, layout)?,
            kind: kind.clone(),
            display: unit.clone(),
        })
    }

    /// Row count.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.data.rows()
    }

    /// Column count.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.data.cols()
    }

    /// Element as a scalar quantity; panics out of range.
    #[must_use]
    pub fn get(&self, r: usize, c: usize) -> Relative {
        Relative::raw(self.data.get(r, c), self.kind.clone(), self.display.clone())
    }

    /// Element in base units; panics out of range.
    #[must_use]
    pub fn base_at(&self, r: usize, c: usize) -> f64 {
        self.data.get(r, c)
    }

    /// Element read out in the display unit; panics out of range.
    #[must_use]
    pub fn value_at(&self, r: usize, c: usize) -> f64 {
        self.display.scale().from_base(self.data.get(r, c))
    }

    /// Overwrites an element from a scalar quantity; panics out of range.
    pub fn set(&mut self, r: usize, c: usize, q: &Relative) -> Result<()> {
        check_dim(&self.kind, q.dimension())?;
        self.data.set(r, c, q.base_value());
        Ok(())
    }

    /// Applies a unary numeric function to every element, in base units;
    /// see [`RelVector::assign`].
    pub fn assign(&mut self, f: impl Fn(f64) -> f64) {
        self.data.assign(f);
    }

    /// Elementwise sum; shapes and dimensions must match.
    pub fn try_add(&self, rhs: &RelMatrix) -> Result<RelMatrix> {
        check_dim(&self.kind, rhs.kind.dimension())?;
        mat_shape(&self.data, &rhs.data)?;
        let mut out = self.clone();
        for r in 0..out.rows() {
            for c in 0..out.cols() {
                out.data.set(r, c, self.data.get(r, c) + rhs.data.get(r, c));
            }
        }
        Ok(out)
    }

    /// Elementwise difference; shapes and dimensions must match.
    pub fn try_sub(&self, rhs: &RelMatrix) -> Result<RelMatrix> {
        check_dim(&self.kind, rhs.kind.dimension())?;
        mat_shape(&self.data, &rhs.data)?;
        let mut out = self.clone();
        for r in 0..out.rows() {
            for c in 0..out.cols() {
                out.data.set(r, c, self.data.get(r, c) - rhs.data.get(r, c));
            }
        }
        Ok(out)
    }

    /// Reinterprets the container under a concrete kind of equal dimension.
    pub fn cast(&self, kind: &Arc<Kind>) -> Result<RelMatrix> {
        check_role(kind, false)?;
        check_dim(kind, self.kind.dimension())?;
        Ok(RelMatrix {
            data: self.data.clone(),
            display: kind.base_unit(),
            kind: kind.clone(),
        })
    }
}

impl Mul<f64> for RelMatrix {
    type Output = RelMatrix;
    fn mul(mut self, rhs: f64) -> RelMatrix {
        self.data.assign(|x| x * rhs);
        self
    }
}

// ──────────────────────────── AbsMatrix ────────────────────────────

/// A matrix of point quantities sharing one absolute kind and display unit.
#[derive(Debug, Clone)]
pub struct AbsMatrix {
    data: MatData,
    kind: Arc<Kind>,
    display: Arc<Unit>,
}

impl_container_meta!(AbsMatrix);

impl AbsMatrix {
    /// Builds a dense matrix from row slices of values expressed in `unit`.
    pub fn from_rows(rows: &[Vec<f64>], kind: &Arc<Kind>, unit: &Arc<Unit>) -> Result<Self> {
        check_role(kind, true)?;
        check_dim(kind, unit.dimension())?;
        let base: Vec<Vec<f64>> = rows
            .iter()
            .map(|row| row.iter().map(|&v| unit.scale().to_base(v)).collect())
            .collect();
        Ok(Self {
            data: MatData::from_rows(&base)?,
            kind: kind.clone(),
            display: unit.clone(),
        })
    }

    /// Builds a dense matrix from rows of already unit-attached scalars.
    pub fn from_scalar_rows(rows: &[Vec<Absolute>], kind: &Arc<Kind>) -> Result<Self> {
        check_role(kind, true)?;
        let mut base = Vec::with_capacity(rows.len());
        for row in rows {
            let mut out = Vec::with_capacity(row.len());
            for q in row {
                check_dim(kind, q.dimension())?;
                out.push(q.base_value());
            }
            base.push(out);
        }
        Ok(Self {
            data: MatData::from_rows(&base)?,
            kind: kind.clone(),
            display: kind.base_unit(),
        })
    }

    /// Builds from (row, col, value) triplets at a declared shape; absent
    /// cells default to `0.0` in base units (not in `unit` — for an offset
    /// unit the two differ).
    pub fn from_triplets(
        rows: usize,
        cols: usize,
        triplets: &[(usize, usize, f64)],
        kind: &Arc<Kind>,
        unit: &Arc<Unit>,
        layout: Layout,
    ) -> Result<Self> {
        check_role(kind, true)?;
        check_dim(kind, unit.dimension())?;
        let base: Vec<(usize, usize, f64)> = triplets
            .iter()
            .map(|&(r, c, v)| (r, c, unit.scale().to_base(v)))
            .collect();
        Ok(Self {
            data: MatData::from_triplets(rows, cols, &base, layout)?,
            kind: kind.clone(),
            display: unit.clone(),
        })
    }

    /// Row count.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.data.rows()
    }

    /// Column count.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.data.cols()
    }

    /// Element as a scalar quantity; panics out of range.
    #[must_use]
    pub fn get(&self, r: usize, c: usize) -> Absolute {
        Absolute::raw(self.data.get(r, c), self.kind.clone(), self.display.clone())
    }

    /// Element in base units; panics out of range.
    #[must_use]
    pub fn base_at(&self, r: usize, c: usize) -> f64 {
        self.data.get(r, c)
    }

    /// Element read out in the display unit; panics out of range.
    #[must_use]
    pub fn value_at(&self, r: usize, c: usize) -> f64 {
        self.display.scale().from_base(self.data.get(r, c))
    }

    /// Overwrites an element from a scalar quantity; panics out of range.
    pub fn set(&mut self, r: usize, c: usize, q: &Absolute) -> Result<()> {
        check_dim(&self.kind, q.dimension())?;
        self.data.set(r, c, q.base_value());
        Ok(())
    }

    /// Elementwise point-minus-point, landing on the relative twin.
    pub fn try_sub(&self, rhs: &AbsMatrix) -> Result<RelMatrix> {
        check_dim(&self.kind, rhs.kind.dimension())?;
        mat_shape(&self.data, &rhs.data)?;
        let twin = self
            .kind
            .relative_twin()
            .cloned()
            .expect("absolute kinds carry a relative twin");
        let mut data = self.data.clone();
        for r in 0..data.rows() {
            for c in 0..data.cols() {
                data.set(r, c, self.data.get(r, c) - rhs.data.get(r, c));
            }
        }
        Ok(RelMatrix {
            data,
            display: twin.base_unit(),
            kind: twin,
        })
    }

    /// Elementwise point-plus-difference.
    pub fn try_add_rel(&self, rhs: &RelMatrix) -> Result<AbsMatrix> {
        check_dim(&self.kind, rhs.kind().dimension())?;
        mat_shape(&self.data, &rhs.data)?;
        let mut out = self.clone();
        for r in 0..out.rows() {
            for c in 0..out.cols() {
                out.data.set(r, c, self.data.get(r, c) + rhs.data.get(r, c));
            }
        }
        Ok(out)
    }

    /// Elementwise point-minus-difference.
    pub fn try_sub_rel(&self, rhs: &RelMatrix) -> Result<AbsMatrix> {
        check_dim(&self.kind, rhs.kind().dimension())?;
        mat_shape(&self.data, &rhs.data)?;
        let mut out = self.clone();
        for r in 0..out.rows() {
            for c in 0..out.cols() {
                out.data.set(r, c, self.data.get(r, c) - rhs.data.get(r, c));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimension;
    use crate::registry::Registry;
    use crate::unit::{UnitSpec, UnitSystem};
    use approx::assert_abs_diff_eq;

    fn fixture() -> Registry {
        let registry = Registry::new();
        let length = registry
            .register_kind(
                "Length",
                Dimension::LENGTH,
                UnitSpec::new("m", "meter", UnitSystem::Si),
            )
            .unwrap();
        length
            .derive_linear(
                &length.base_unit(),
                1000.0,
                UnitSpec::new("km", "kilometer", UnitSystem::Si),
            )
            .unwrap();
        registry
            .register_absolute_kind(
                "Position",
                &length,
                UnitSpec::new("m", "meter", UnitSystem::Si),
            )
            .unwrap();
        let tdiff = registry
            .register_kind(
                "TemperatureDifference",
                Dimension::TEMPERATURE,
                UnitSpec::new("K", "kelvin", UnitSystem::Si),
            )
            .unwrap();
        let temp = registry
            .register_absolute_kind(
                "Temperature",
                &tdiff,
                UnitSpec::new("K", "kelvin", UnitSystem::Si),
            )
            .unwrap();
        temp.derive_linear_offset(
            &temp.base_unit(),
            1.0,
            273.15,
            UnitSpec::new("degC", "degree Celsius", UnitSystem::Si),
        )
        .unwrap();
        registry
    }

    #[test]
    fn values_convert_eagerly_at_construction() {
        let registry = fixture();
        let length = registry.kind("Length").unwrap();
        let km = length.unit("km").unwrap();
        let v = RelVector::from_values(&[1.0, 0.5], &length, &km, Layout::Dense).unwrap();
        assert_abs_diff_eq!(v.base_at(0), 1000.0);
        assert_abs_diff_eq!(v.base_at(1), 500.0);
        assert_abs_diff_eq!(v.value_at(0), 1.0);
        let meters = v.values_in(&length.base_unit()).unwrap();
        assert_abs_diff_eq!(meters[1], 500.0);
    }

    #[test]
    fn mixed_unit_scalars_convert_independently() {
        let registry = fixture();
        let length = registry.kind("Length").unwrap();
        let m = length.base_unit();
        let km = length.unit("km").unwrap();
        let scalars = [
            Relative::new(250.0, &length, &m).unwrap(),
            Relative::new(1.0, &length, &km).unwrap(),
        ];
        let v = RelVector::from_scalars(&scalars, &length, Layout::Dense).unwrap();
        assert_abs_diff_eq!(v.base_at(0), 250.0);
        assert_abs_diff_eq!(v.base_at(1), 1000.0);
        assert_eq!(v.unit().abbrev(), "m");
    }

    #[test]
    fn sparse_pairs_default_to_base_zero() {
        let registry = fixture();
        let length = registry.kind("Length").unwrap();
        let km = length.unit("km").unwrap();
        let v = RelVector::from_pairs(4, &[(2, 2.0)], &length, &km, Layout::Sparse).unwrap();
        assert_eq!(v.stored_len(), 1);
        assert_abs_diff_eq!(v.base_at(2), 2000.0);
        assert_abs_diff_eq!(v.base_at(0), 0.0);
    }

    #[test]
    fn elementwise_abs_rel_rules() {
        let registry = fixture();
        let position = registry.kind("Position").unwrap();
        let m = position.base_unit();
        let a = AbsVector::from_values(&[10.0, 20.0], &position, &m, Layout::Dense).unwrap();
        let b = AbsVector::from_values(&[4.0, 5.0], &position, &m, Layout::Dense).unwrap();

        let gap = a.try_sub(&b).unwrap();
        assert_eq!(gap.kind().tag(), "Length");
        assert_abs_diff_eq!(gap.value_at(0), 6.0);
        assert_abs_diff_eq!(gap.value_at(1), 15.0);

        let back = b.try_add_rel(&gap).unwrap();
        assert_eq!(back.kind().tag(), "Position");
        assert_abs_diff_eq!(back.value_at(1), 20.0);
    }

    #[test]
    fn matrix_point_minus_difference() {
        let registry = fixture();
        let position = registry.kind("Position").unwrap();
        let length = registry.kind("Length").unwrap();
        let m = position.base_unit();
        let a = AbsMatrix::from_rows(&[vec![10.0, 20.0]], &position, &m).unwrap();
        let step = RelMatrix::from_rows(&[vec![4.0, 5.0]], &length, &length.base_unit()).unwrap();

        let moved = a.try_sub_rel(&step).unwrap();
        assert_eq!(moved.kind().tag(), "Position");
        assert_abs_diff_eq!(moved.value_at(0, 0), 6.0);
        assert_abs_diff_eq!(moved.value_at(0, 1), 15.0);

        let back = moved.try_add_rel(&step).unwrap();
        assert_abs_diff_eq!(back.value_at(0, 1), 20.0);
    }

    #[test]
    fn matrix_from_mixed_unit_scalar_rows() {
        let registry = fixture();
        let length = registry.kind("Length").unwrap();
        let m = length.base_unit();
        let km = length.unit("km").unwrap();
        let rows = vec![
            vec![
                Relative::new(250.0, &length, &m).unwrap(),
                Relative::new(1.0, &length, &km).unwrap(),
            ],
            vec![
                Relative::new(0.5, &length, &km).unwrap(),
                Relative::new(3.0, &length, &m).unwrap(),
            ],
        ];
        let mat = RelMatrix::from_scalar_rows(&rows, &length).unwrap();
        assert_abs_diff_eq!(mat.base_at(0, 1), 1000.0);
        assert_abs_diff_eq!(mat.base_at(1, 0), 500.0);
        assert_eq!(mat.unit().abbrev(), "m");
    }

    #[test]
    fn absolute_matrix_from_scalar_rows() {
        let registry = fixture();
        let temp = registry.kind("Temperature").unwrap();
        let k = temp.base_unit();
        let celsius = temp.unit("degC").unwrap();
        let rows = vec![vec![
            Absolute::new(300.15, &temp, &k).unwrap(),
            Absolute::new(0.0, &temp, &celsius).unwrap(),
        ]];
        let mat = AbsMatrix::from_scalar_rows(&rows, &temp).unwrap();
        assert_abs_diff_eq!(mat.base_at(0, 0), 300.15, epsilon = 1e-12);
        assert_abs_diff_eq!(mat.base_at(0, 1), 273.15, epsilon = 1e-12);
    }

    #[test]
    fn sparse_absolute_construction() {
        let registry = fixture();
        let position = registry.kind("Position").unwrap();
        let m = position.base_unit();

        let v = AbsVector::from_pairs(3, &[(1, 7.0)], &position, &m, Layout::Sparse).unwrap();
        assert_eq!(v.stored_len(), 1);
        assert_abs_diff_eq!(v.base_at(1), 7.0);
        assert_abs_diff_eq!(v.base_at(0), 0.0);

        let temp = registry.kind("Temperature").unwrap();
        let celsius = temp.unit("degC").unwrap();
        // Absent cells stay at base zero (0 K), not at zero degrees Celsius.
        let mat =
            AbsMatrix::from_triplets(2, 2, &[(0, 1, 0.0)], &temp, &celsius, Layout::Sparse)
                .unwrap();
        assert_abs_diff_eq!(mat.base_at(0, 1), 273.15, epsilon = 1e-12);
        assert_abs_diff_eq!(mat.base_at(0, 0), 0.0);
        assert_eq!(
            mat.converted(Layout::Dense).base_at(1, 1).to_bits(),
            0.0_f64.to_bits()
        );
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let registry = fixture();
        let length = registry.kind("Length").unwrap();
        let m = length.base_unit();
        let a = RelVector::from_values(&[1.0, 2.0], &length, &m, Layout::Dense).unwrap();
        let b = RelVector::from_values(&[1.0], &length, &m, Layout::Dense).unwrap();
        assert!(matches!(a.try_add(&b), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn matrix_round_trip_preserves_values() {
        let registry = fixture();
        let length = registry.kind("Length").unwrap();
        let m = length.base_unit();
        let mat = RelMatrix::from_rows(
            &[
                vec![0.0, 1.0, 0.0, 0.0, 2.0],
                vec![0.0, 0.0, 3.0, 0.0, 0.0],
                vec![0.0, 0.0, 0.0, 0.0, 0.0],
                vec![4.0, 0.0, 0.0, 5.0, 0.0],
                vec![0.0, 6.0, 0.0, 0.0, 7.0],
            ],
            &length,
            &m,
        )
        .unwrap();
        let round = mat.converted(Layout::Sparse).converted(Layout::Dense);
        for r in 0..5 {
            for c in 0..5 {
                assert_eq!(mat.base_at(r, c).to_bits(), round.base_at(r, c).to_bits());
            }
        }
        assert_eq!(mat.converted(Layout::Sparse).stored_len(), 7);
    }

    #[test]
    fn assign_backs_transcendentals() {
        let registry = fixture();
        let length = registry.kind("Length").unwrap();
        let m = length.base_unit();
        let mut v = RelVector::from_values(&[1.0, 4.0, 9.0], &length, &m, Layout::Dense).unwrap();
        v.assign(f64::sqrt);
        assert_abs_diff_eq!(v.base_at(2), 3.0);
    }

    #[test]
    fn celsius_matrix_reads_back_in_celsius() {
        let registry = fixture();
        let temp = registry.kind("Temperature").unwrap();
        let celsius = temp.unit("degC").unwrap();
        let mat =
            AbsMatrix::from_rows(&[vec![0.0, 27.0], vec![100.0, -40.0]], &temp, &celsius).unwrap();
        assert_abs_diff_eq!(mat.base_at(0, 0), 273.15, epsilon = 1e-12);
        assert_abs_diff_eq!(mat.base_at(0, 1), 300.15, epsilon = 1e-12);
        assert_abs_diff_eq!(mat.value_at(1, 0), 100.0, epsilon = 1e-12);
        assert_eq!(mat.get(1, 1).unit().abbrev(), "degC");
    }

    #[test]
    fn cast_swaps_metadata_only() {
        let registry = fixture();
        let length = registry.kind("Length").unwrap();
        let m = length.base_unit();
        let v = RelVector::from_values(&[3.0], &length, &m, Layout::Dense).unwrap();
        let anon = registry.lookup_or_create(Dimension::LENGTH * Dimension::LENGTH);
        let squared = RelVector::from_values(&[9.0], &anon, &anon.base_unit(), Layout::Dense)
            .unwrap();
        assert!(squared.cast(&length).is_err());
        let recast = v.cast(&length).unwrap();
        assert_abs_diff_eq!(recast.base_at(0), 3.0);
    }
}
