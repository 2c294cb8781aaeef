//! Gauss–Seidel iteration for small dense linear systems `A·x = b`.
//!
//! The sweep count is fixed rather than convergence-checked. Diagonally dominant
//! systems converge quickly; for other systems the method may drift away from the
//! true solution, and the result after the configured sweeps is returned as-is.
//! Callers get a best-effort answer, not a guarantee.

use crate::error::{CollisionError, Result};

/// Solver parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaussSeidelConfig {
    /// Number of full row sweeps.
    pub iterations: usize,
}

impl GaussSeidelConfig {
    pub const DEFAULT_ITERATIONS: usize = 10;
}

impl Default for GaussSeidelConfig {
    fn default() -> Self {
        Self { iterations: Self::DEFAULT_ITERATIONS }
    }
}

/// Runs the configured number of sweeps, updating each component in place from
/// the freshest values of the others.
///
/// Returns [`CollisionError::NonConvergence`] as soon as any component becomes
/// non-finite (for example a zero on the diagonal or a runaway divergence).
pub fn try_solve(a: &[Vec<f64>], b: &[f64], config: &GaussSeidelConfig) -> Result<Vec<f64>> {
    let n = b.len();
    if a.len() != n || a.iter().any(|row| row.len() != n) {
        return Err(CollisionError::InvalidInput {
            reason: "matrix must be square and match the right-hand side",
        });
    }

    let mut x = vec![0.0; n];
    for sweep in 0..config.iterations {
        for i in 0..n {
            let row = &a[i];
            let off_diagonal: f64 = row
                .iter()
                .zip(x.iter())
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, (a_ij, x_j))| a_ij * x_j)
                .sum();
            let value = (b[i] - off_diagonal) / row[i];
            if !value.is_finite() {
                return Err(CollisionError::NonConvergence {
                    algorithm: "Gauss-Seidel",
                    iterations: sweep + 1,
                });
            }
            x[i] = value;
        }
    }
    Ok(x)
}

/// Like [`try_solve`], but a non-finite intermediate yields the zero vector
/// instead of an error. Dimension mismatches are still reported.
pub fn solve(a: &[Vec<f64>], b: &[f64], config: &GaussSeidelConfig) -> Result<Vec<f64>> {
    match try_solve(a, b, config) {
        Err(CollisionError::NonConvergence { iterations, .. }) => {
            log::warn!(
                "Gauss-Seidel produced a non-finite value in sweep {iterations}; returning zero vector"
            );
            Ok(vec![0.0; b.len()])
        }
        other => other,
    }
}
