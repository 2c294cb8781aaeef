//! Error type shared by every geometry and collision routine.

use thiserror::Error;

/// Failures surfaced by hull construction, half-edge building, narrow-phase
/// queries and the linear solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollisionError {
    /// The caller supplied input the algorithm cannot work with
    /// (too few points, a zero-length vector to normalize, mismatched dimensions).
    #[error("invalid input: {reason}")]
    InvalidInput { reason: &'static str },

    /// An iterative routine hit its iteration cap or produced a non-finite value.
    #[error("{algorithm} did not converge after {iterations} iterations")]
    NonConvergence {
        algorithm: &'static str,
        iterations: usize,
    },

    /// The geometry is degenerate (zero area, coincident points, zero-length edge).
    #[error("degenerate geometry: {reason}")]
    DegenerateGeometry { reason: &'static str },
}

pub type Result<T, E = CollisionError> = core::result::Result<T, E>;
