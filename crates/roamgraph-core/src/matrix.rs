//! # Dense Square Matrix
//!
//! Row-major `f64` storage for adjacency and distance matrices.
//!
//! Row/column `i` corresponds to `nodes[i]` of the graph the matrix was
//! built from. A matrix is a snapshot: it is never updated when a graph
//! changes.

use crate::RoamError;
use crate::primitives::SELF_DISTANCE;
use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;

/// An N×N matrix of `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    size: usize,
    cells: Vec<f64>,
}

impl Matrix {
    /// Create an N×N matrix filled with zeros.
    #[must_use]
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            cells: vec![SELF_DISTANCE; size.saturating_mul(size)],
        }
    }

    /// Build a matrix from nested rows.
    ///
    /// Returns `RoamError::InvalidMatrix` unless every row is as long as the
    /// number of rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, RoamError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size.saturating_mul(size));
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(RoamError::InvalidMatrix(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    size
                )));
            }
            cells.extend(row);
        }
        Ok(Self { size, cells })
    }

    /// Number of rows (equal to the number of columns).
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the matrix has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Get cell `[i, j]`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.offset(i, j).map(|k| self.cells[k])
    }

    /// Set cell `[i, j]`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        if let Some(k) = self.offset(i, j) {
            self.cells[k] = value;
        }
    }

    /// Borrow row `i`.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i >= self.size {
            return None;
        }
        let start = i * self.size;
        self.cells.get(start..start + self.size)
    }

    /// Iterate rows in index order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact(0) panics, and an empty matrix has no rows anyway
        self.cells.chunks_exact(self.size.max(1))
    }

    /// Copy into nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }

    /// Return the transpose.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.size);
        for i in 0..self.size {
            for j in 0..self.size {
                out.cells[j * self.size + i] = self.cells[i * self.size + j];
            }
        }
        out
    }

    /// True iff `[i, j] == [j, i]` for every pair.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| {
            ((i + 1)..self.size).all(|j| {
                self.cells[i * self.size + j].to_bits() == self.cells[j * self.size + i].to_bits()
            })
        })
    }

    fn offset(&self, i: usize, j: usize) -> Option<usize> {
        (i < self.size && j < self.size).then(|| i * self.size + j)
    }
}

/// Serializes as nested rows. serde_json writes infinity as `null`.
impl Serialize for Matrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.size))?;
        for row in self.rows() {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

// =============================================================================
// TESTS
// =============================================================================
