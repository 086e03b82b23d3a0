//! # Shortest-Path Engine
//!
//! All-pairs shortest paths over a dense weight matrix.
//!
//! ## Input contract
//!
//! - Square, non-negative weights
//! - `+inf` means "no direct edge"
//! - Every finite off-diagonal value is an edge, zero included
//! - The diagonal is ignored: self-distance is always `0`
//!
//! ## Output contract
//!
//! Same size and index correspondence as the input, `+inf` for unreachable
//! pairs, `0` on the diagonal.

use crate::RoamError;
use crate::matrix::Matrix;
use crate::primitives::SELF_DISTANCE;

// =============================================================================
// ENGINE TRAIT
// =============================================================================

/// Computes an all-pairs distance matrix from a weight matrix.
pub trait ShortestPathEngine {
    /// Compute shortest-path distances.
    ///
    /// When `directed` is false the edge between `i` and `j` weighs
    /// `min(w[i, j], w[j, i])` in both directions.
    fn all_pairs(&self, weights: &Matrix, directed: bool) -> Result<Matrix, RoamError>;
}

/// Reject weights the engine cannot interpret.
pub fn validate_weights(weights: &Matrix) -> Result<(), RoamError> {
    for (i, row) in weights.rows().enumerate() {
        for (j, &w) in row.iter().enumerate() {
            if w.is_nan() {
                return Err(RoamError::InvalidMatrix(format!("NaN weight at [{i}, {j}]")));
            }
            if w < 0.0 {
                return Err(RoamError::InvalidMatrix(format!(
                    "negative weight {w} at [{i}, {j}]"
                )));
            }
        }
    }
    Ok(())
}

// =============================================================================
// FLOYD–WARSHALL
// =============================================================================

/// Dense O(N³) all-pairs engine. The default for `Graph::distance_matrix`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloydWarshall;

impl ShortestPathEngine for FloydWarshall {
    fn all_pairs(&self, weights: &Matrix, directed: bool) -> Result<Matrix, RoamError> {
        validate_weights(weights)?;

        let n = weights.size();
        let mut dist = weights.clone();

        if !directed {
            for i in 0..n {
                for j in (i + 1)..n {
                    if let (Some(a), Some(b)) = (weights.get(i, j), weights.get(j, i)) {
                        let w = a.min(b);
                        dist.set(i, j, w);
                        dist.set(j, i, w);
                    }
                }
            }
        }

        for i in 0..n {
            dist.set(i, i, SELF_DISTANCE);
        }

        for k in 0..n {
            for i in 0..n {
                let Some(ik) = dist.get(i, k) else { continue };
                if ik.is_infinite() {
                    continue;
                }
                for j in 0..n {
                    if let (Some(kj), Some(ij)) = (dist.get(k, j), dist.get(i, j)) {
                        let through = relax(ik, kj);
                        if through < ij {
                            dist.set(i, j, through);
                        }
                    }
                }
            }
        }

        Ok(dist)
    }
}

/// Length of the path `i → k → j`. Infinity absorbs.
#[allow(clippy::float_arithmetic)]
#[inline]
fn relax(ik: f64, kj: f64) -> f64 {
    ik + kj
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::NO_EDGE;

    const X: f64 = NO_EDGE;

    fn matrix(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).expect("matrix")
    }

    #[test]
    fn chain_distances_directed() {
        // 0 -> 1 -> 2
        let w = matrix(vec![vec![0.0, 1.0, X], vec![X, 0.0, 1.0], vec![X, X, 0.0]]);
        let d = FloydWarshall.all_pairs(&w, true).expect("all pairs");

        assert_eq!(d.get(0, 2), Some(2.0));
        assert_eq!(d.get(2, 0), Some(X));
        assert_eq!(d.get(1, 0), Some(X));
    }

    #[test]
    fn chain_distances_undirected() {
        let w = matrix(vec![vec![0.0, 1.0, X], vec![X, 0.0, 1.0], vec![X, X, 0.0]]);
        let d = FloydWarshall.all_pairs(&w, false).expect("all pairs");

        assert_eq!(d.get(2, 0), Some(2.0));
        assert_eq!(d.get(1, 0), Some(1.0));
        assert!(d.is_symmetric());
    }

    #[test]
    fn diagonal_is_zero() {
        let w = matrix(vec![vec![5.0, 1.0], vec![1.0, 7.0]]);
        let d = FloydWarshall.all_pairs(&w, true).expect("all pairs");
        assert_eq!(d.get(0, 0), Some(0.0));
        assert_eq!(d.get(1, 1), Some(0.0));
    }

    #[test]
    fn disconnected_pairs_stay_infinite() {
        let w = matrix(vec![vec![0.0, X], vec![X, 0.0]]);
        let d = FloydWarshall.all_pairs(&w, false).expect("all pairs");
        assert_eq!(d.get(0, 1), Some(X));
    }

    #[test]
    fn shorter_detour_wins() {
        // Direct 0 -> 2 costs 5, detour via 1 costs 2.
        let w = matrix(vec![vec![0.0, 1.0, 5.0], vec![X, 0.0, 1.0], vec![X, X, 0.0]]);
        let d = FloydWarshall.all_pairs(&w, true).expect("all pairs");
        assert_eq!(d.get(0, 2), Some(2.0));
    }

    #[test]
    fn undirected_uses_cheaper_direction() {
        let w = matrix(vec![vec![0.0, 4.0], vec![1.0, 0.0]]);
        let d = FloydWarshall.all_pairs(&w, false).expect("all pairs");
        assert_eq!(d.get(0, 1), Some(1.0));
        assert_eq!(d.get(1, 0), Some(1.0));
    }

    #[test]
    fn empty_matrix_is_fine() {
        let d = FloydWarshall.all_pairs(&Matrix::zeros(0), true).expect("all pairs");
        assert!(d.is_empty());
    }

    #[test]
    fn negative_weights_rejected() {
        let w = matrix(vec![vec![0.0, -1.0], vec![X, 0.0]]);
        assert!(matches!(
            FloydWarshall.all_pairs(&w, true),
            Err(RoamError::InvalidMatrix(_))
        ));
    }

    #[test]
    fn nan_weights_rejected() {
        let w = matrix(vec![vec![0.0, f64::NAN], vec![X, 0.0]]);
        assert!(FloydWarshall.all_pairs(&w, true).is_err());
    }
}
