//! Dense/sparse numeric storage for vectors and matrices.
//!
//! This layer is purely numeric: values arrive here already converted to
//! base units (the containers in [`crate::container`] do that eagerly at
//! construction). The layout choice — contiguous buffer versus index-keyed
//! map — affects memory footprint and access complexity only, never the
//! externally observable values: converting a container dense→sparse→dense
//! at the same shape reproduces bit-identical values, signed zeros included.
//!
//! Sparse stores keep a canonical form: positive zero is the implicit
//! default and is never stored, while `-0.0` (different bit pattern) is a
//! real entry.
//!
//! Shapes are fixed at construction. Out-of-range *access* panics like slice
//! indexing does; out-of-range indices in explicit (index, value) input are
//! an [`Error::ShapeMismatch`] instead, since they arrive from data rather
//! than from code.

use crate::error::{Error, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Storage layout of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Layout {
    /// Contiguous buffer; O(1) access, memory proportional to shape.
    Dense,
    /// Index-keyed map; memory proportional to the non-default entries,
    /// O(log n) access.
    Sparse,
}

/// True when `v` is the sparse default (positive zero, by bit pattern).
#[inline]
fn is_default(v: f64) -> bool {
    v.to_bits() == 0
}

#[derive(Debug, Clone, PartialEq)]
enum Store {
    Dense(Vec<f64>),
    Sparse(BTreeMap<usize, f64>),
}

impl Store {
    fn with_layout(len: usize, layout: Layout) -> Self {
        match layout {
            Layout::Dense => Store::Dense(vec![0.0; len]),
            Layout::Sparse => Store::Sparse(BTreeMap::new()),
        }
    }

    fn layout(&self) -> Layout {
        match self {
            Store::Dense(_) => Layout::Dense,
            Store::Sparse(_) => Layout::Sparse,
        }
    }

    fn get(&self, i: usize) -> f64 {
        match self {
            Store::Dense(v) => v[i],
            Store::Sparse(m) => m.get(&i).copied().unwrap_or(0.0),
        }
    }

    fn set(&mut self, i: usize, value: f64) {
        match self {
            Store::Dense(v) => v[i] = value,
            Store::Sparse(m) => {
                if is_default(value) {
                    m.remove(&i);
                } else {
                    m.insert(i, value);
                }
            }
        }
    }

    /// Applies `f` in place.
    ///
    /// Sparse stores touch only their present entries unless `f` moves zero,
    /// in which case every cell of the shape must materialize.
    fn assign(&mut self, len: usize, f: impl Fn(f64) -> f64) {
        match self {
            Store::Dense(v) => {
                for x in v.iter_mut() {
                    *x = f(*x);
                }
            }
            Store::Sparse(m) => {
                if is_default(f(0.0)) {
                    let updated: BTreeMap<usize, f64> = m
                        .iter()
                        .map(|(&i, &x)| (i, f(x)))
                        .filter(|&(_, x)| !is_default(x))
                        .collect();
                    *m = updated;
                } else {
                    let materialized: BTreeMap<usize, f64> = (0..len)
                        .map(|i| (i, f(m.get(&i).copied().unwrap_or(0.0))))
                        .filter(|&(_, x)| !is_default(x))
                        .collect();
                    *m = materialized;
                }
            }
        }
    }

    fn converted(&self, len: usize, layout: Layout) -> Self {
        match (self, layout) {
            (Store::Dense(v), Layout::Dense) => Store::Dense(v.clone()),
            (Store::Sparse(m), Layout::Sparse) => Store::Sparse(m.clone()),
            (Store::Dense(v), Layout::Sparse) => Store::Sparse(
                v.iter()
                    .enumerate()
                    .filter(|&(_, &x)| !is_default(x))
                    .map(|(i, &x)| (i, x))
                    .collect(),
            ),
            (Store::Sparse(m), Layout::Dense) => {
                let mut v = vec![0.0; len];
                for (&i, &x) in m {
                    v[i] = x;
                }
                Store::Dense(v)
            }
        }
    }

    fn stored_len(&self, len: usize) -> usize {
        match self {
            Store::Dense(_) => len,
            Store::Sparse(m) => m.len(),
        }
    }
}

// ─────────────────────────────── vectors ───────────────────────────────

/// Fixed-length numeric vector storage.
#[derive(Debug, Clone, PartialEq)]
pub struct VecData {
    store: Store,
    len: usize,
}

impl VecData {
    /// Zero-filled storage of the given length and layout.
    #[must_use]
    pub fn zeros(len: usize, layout: Layout) -> Self {
        Self {
            store: Store::with_layout(len, layout),
            len,
        }
    }

    /// Builds from a flat slice; a flat array of values is dense input, so
    /// the layout is an explicit choice.
    #[must_use]
    pub fn from_slice(values: &[f64], layout: Layout) -> Self {
        let mut data = Self::zeros(values.len(), layout);
        for (i, &v) in values.iter().enumerate() {
            data.store.set(i, v);
        }
        data
    }

    /// Builds from (index, value) pairs; absent indices default to `0.0`,
    /// and a repeated index keeps its last value.
    ///
    /// Fails with [`Error::ShapeMismatch`] on an index at or past `len`.
    pub fn from_pairs(len: usize, pairs: &[(usize, f64)], layout: Layout) -> Result<Self> {
        let mut data = Self::zeros(len, layout);
        for &(i, v) in pairs {
            if i >= len {
                return Err(Error::ShapeMismatch {
                    expected: format!("index below {len}"),
                    found: i.to_string(),
                });
            }
            data.store.set(i, v);
        }
        Ok(data)
    }

    /// Number of elements (fixed at construction).
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for a zero-length vector.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current layout.
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.store.layout()
    }

    /// Number of physically stored entries (equals `len` when dense).
    #[must_use]
    pub fn stored_len(&self) -> usize {
        self.store.stored_len(self.len)
    }

    /// Element at `i`; panics when `i >= len`, like slice indexing.
    #[must_use]
    pub fn get(&self, i: usize) -> f64 {
        assert!(i < self.len, "index {i} out of range for length {}", self.len);
        self.store.get(i)
    }

    /// Overwrites the element at `i`; panics when `i >= len`.
    pub fn set(&mut self, i: usize, value: f64) {
        assert!(i < self.len, "index {i} out of range for length {}", self.len);
        self.store.set(i, value);
    }

    /// Iterates every logical element in index order, defaults included.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(move |i| self.store.get(i))
    }

    /// Applies a unary function to every element in place.
    ///
    /// This is the mechanism behind whole-container transcendental
    /// operations. A sparse vector only walks its stored entries when the
    /// function fixes zero; otherwise the affected cells materialize and the
    /// density changes.
    pub fn assign(&mut self, f: impl Fn(f64) -> f64) {
        self.store.assign(self.len, f);
    }

    /// Copy of this vector in the requested layout.
    #[must_use]
    pub fn converted(&self, layout: Layout) -> Self {
        Self {
            store: self.store.converted(self.len, layout),
            len: self.len,
        }
    }
}

// ─────────────────────────────── matrices ───────────────────────────────

/// Fixed-shape numeric matrix storage, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct MatData {
    store: Store,
    rows: usize,
    cols: usize,
}

impl MatData {
    /// Zero-filled storage of the given shape and layout.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize, layout: Layout) -> Self {
        Self {
            store: Store::with_layout(rows * cols, layout),
            rows,
            cols,
        }
    }

    /// Builds a dense matrix from row slices.
    ///
    /// Array-of-array input is dense by nature, so the layout is fixed;
    /// convert afterwards if a sparse copy is wanted. Ragged rows fail with
    /// [`Error::ShapeMismatch`].
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::ShapeMismatch {
                    expected: format!("{cols} columns"),
                    found: format!("{} in row {r}", row.len()),
                });
            }
        }
        let mut data = Self::zeros(rows.len(), cols, Layout::Dense);
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                data.store.set(r * cols + c, v);
            }
        }
        Ok(data)
    }

    /// Builds from (row, col, value) triplets at a declared shape; absent
    /// cells default to `0.0`, and a repeated cell keeps its last value.
    /// Triplet input is sparse by nature, so that is the default layout.
    pub fn from_triplets(
        rows: usize,
        cols: usize,
        triplets: &[(usize, usize, f64)],
        layout: Layout,
    ) -> Result<Self> {
        let mut data = Self::zeros(rows, cols, layout);
        for &(r, c, v) in triplets {
            if r >= rows || c >= cols {
                return Err(Error::ShapeMismatch {
                    expected: format!("{rows}x{cols}"),
                    found: format!("({r}, {c})"),
                });
            }
            data.store.set(r * cols + c, v);
        }
        Ok(data)
    }

    /// Row count (fixed at construction).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column count (fixed at construction).
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Current layout.
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.store.layout()
    }

    /// Number of physically stored entries (equals `rows * cols` when
    /// dense).
    #[must_use]
    pub fn stored_len(&self) -> usize {
        self.store.stored_len(self.rows * self.cols)
    }

    /// Element at (`r`, `c`); panics out of range, like slice indexing.
    #[must_use]
    pub fn get(&self, r: usize, c: usize) -> f64 {
        self.check(r, c);
        self.store.get(r * self.cols + c)
    }

    /// Overwrites the element at (`r`, `c`); panics out of range.
    pub fn set(&mut self, r: usize, c: usize, value: f64) {
        self.check(r, c);
        self.store.set(r * self.cols + c, value);
    }

    /// Iterates every logical element in row-major order, defaults included.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.rows * self.cols).map(move |i| self.store.get(i))
    }

    /// Applies a unary function to every element in place; see
    /// [`VecData::assign`] for the sparse materialization rule.
    pub fn assign(&mut self, f: impl Fn(f64) -> f64) {
        self.store.assign(self.rows * self.cols, f);
    }

    /// Copy of this matrix in the requested layout.
    #[must_use]
    pub fn converted(&self, layout: Layout) -> Self {
        Self {
            store: self.store.converted(self.rows * self.cols, layout),
            rows: self.rows,
            cols: self.cols,
        }
    }

    fn check(&self, r: usize, c: usize) {
        assert!(
            r < self.rows && c < self.cols,
            "index ({r}, {c}) out of range for shape {}x{}",
            self.rows,
            self.cols
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sparse_defaults_to_zero() {
        let v = VecData::from_pairs(6, &[(1, 2.5), (4, -1.0)], Layout::Sparse).unwrap();
        assert_eq!(v.len(), 6);
        assert_eq!(v.stored_len(), 2);
        assert_eq!(v.get(0), 0.0);
        assert_eq!(v.get(1), 2.5);
        assert_eq!(v.get(4), -1.0);
        assert_eq!(v.iter().collect::<Vec<_>>(), [0.0, 2.5, 0.0, 0.0, -1.0, 0.0]);
    }

    #[test]
    fn repeated_index_keeps_last_value() {
        let v = VecData::from_pairs(3, &[(1, 1.0), (1, 7.0)], Layout::Sparse).unwrap();
        assert_eq!(v.get(1), 7.0);
        assert_eq!(v.stored_len(), 1);
    }

    #[test]
    fn out_of_range_pair_is_an_error() {
        let err = VecData::from_pairs(3, &[(3, 1.0)], Layout::Sparse);
        assert!(matches!(err, Err(Error::ShapeMismatch { .. })));
        let err = MatData::from_triplets(2, 2, &[(0, 2, 1.0)], Layout::Sparse);
        assert!(matches!(err, Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_access_panics() {
        let v = VecData::zeros(3, Layout::Dense);
        let _ = v.get(3);
    }

    #[test]
    fn ragged_rows_are_an_error() {
        let err = MatData::from_rows(&[vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(err, Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn setting_zero_prunes_a_sparse_entry() {
        let mut v = VecData::from_pairs(4, &[(2, 5.0)], Layout::Sparse).unwrap();
        v.set(2, 0.0);
        assert_eq!(v.stored_len(), 0);
        // Negative zero has a distinct bit pattern and stays stored.
        v.set(1, -0.0);
        assert_eq!(v.stored_len(), 1);
        assert_eq!(v.get(1).to_bits(), (-0.0f64).to_bits());
    }

    #[test]
    fn dense_sparse_round_trip_is_bit_identical() {
        let m = MatData::from_rows(&[
            vec![0.0, 1.5, 0.0, 0.0, 2.0],
            vec![0.0, 0.0, 0.0, 0.0, 0.0],
            vec![-3.25, 0.0, 4.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, -0.0, 0.0],
            vec![5.5, 0.0, 0.0, 0.0, 6.75],
        ])
        .unwrap();
        let round = m.converted(Layout::Sparse).converted(Layout::Dense);
        assert_eq!(round.rows(), 5);
        assert_eq!(round.cols(), 5);
        for (a, b) in m.iter().zip(round.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn assign_on_sparse_touches_stored_entries_only() {
        let mut v = VecData::from_pairs(100, &[(3, 4.0), (7, 9.0)], Layout::Sparse).unwrap();
        v.assign(f64::sqrt); // sqrt(0) == 0, no materialization
        assert_eq!(v.stored_len(), 2);
        assert_eq!(v.get(3), 2.0);
        assert_eq!(v.get(7), 3.0);
    }

    #[test]
    fn assign_not_fixing_zero_materializes_sparse_cells() {
        let mut v = VecData::from_pairs(5, &[(0, 1.0)], Layout::Sparse).unwrap();
        v.assign(f64::cos); // cos(0) == 1, density changes
        assert_eq!(v.stored_len(), 5);
        assert_eq!(v.get(1), 1.0);
        assert!((v.get(0) - 1.0f64.cos()).abs() < 1e-15);
    }

    #[test]
    fn assign_prunes_entries_that_become_zero() {
        let mut v = VecData::from_pairs(4, &[(1, 2.0), (2, 3.0)], Layout::Sparse).unwrap();
        v.assign(|x| if x == 2.0 { 0.0 } else { x });
        // x=2 maps to 0 and leaves the store; x=3 stays.
        assert_eq!(v.stored_len(), 1);
        assert_eq!(v.get(2), 3.0);
    }

    #[test]
    fn assign_on_dense_hits_every_cell() {
        let mut m = MatData::from_rows(&[vec![1.0, 4.0], vec![9.0, 16.0]]).unwrap();
        m.assign(f64::sqrt);
        assert_eq!(m.iter().collect::<Vec<_>>(), [1.0, 2.0, 3.0, 4.0]);
    }

    proptest! {
        #[test]
        fn layout_never_changes_observable_values(values in proptest::collection::vec(-1e9f64..1e9, 0..64)) {
            let dense = VecData::from_slice(&values, Layout::Dense);
            let sparse = dense.converted(Layout::Sparse);
            prop_assert_eq!(dense.len(), sparse.len());
            for i in 0..dense.len() {
                prop_assert_eq!(dense.get(i).to_bits(), sparse.get(i).to_bits());
            }
            let back = sparse.converted(Layout::Dense);
            for i in 0..dense.len() {
                prop_assert_eq!(dense.get(i).to_bits(), back.get(i).to_bits());
            }
        }
    }
}
