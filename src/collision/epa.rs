//! Expanding Polytope Algorithm: turns a GJK simplex that encloses the origin
//! into the minimum translation normal and depth.

use super::gjk::{support, Simplex};
use crate::error::{CollisionError, Result};
use crate::math::vec2::Vec2;
use crate::shapes::ConvexShape;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpaConfig {
    /// Expansion stops once a new support point improves on the closest edge
    /// by less than this.
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl EpaConfig {
    pub const DEFAULT_TOLERANCE: f64 = 1e-5;
    pub const DEFAULT_MAX_ITERATIONS: usize = 64;
}

impl Default for EpaConfig {
    fn default() -> Self {
        Self {
            tolerance: Self::DEFAULT_TOLERANCE,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Minimum translation: moving B by `normal * depth` (or A by the opposite)
/// separates the shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Penetration {
    /// Unit normal pointing from A towards B.
    pub normal: Vec2,
    pub depth: f64,
}

#[derive(Debug, Clone, Copy)]
struct PolytopeEdge {
    /// Index of the edge's first vertex; the edge runs to `index + 1`.
    index: usize,
    normal: Vec2,
    distance: f64,
}

/// Edge of the counter-clockwise `polytope` nearest to the origin.
fn closest_edge(polytope: &[Vec2]) -> Result<PolytopeEdge> {
    let n = polytope.len();
    let mut closest: Option<PolytopeEdge> = None;
    for i in 0..n {
        let start = polytope[i];
        let edge = polytope[(i + 1) % n] - start;
        // zero-length edges have no normal and cannot be the answer
        let Ok(normal) = Vec2::new(edge.y, -edge.x).try_normalize() else {
            continue;
        };
        let distance = normal.dot(start);
        if closest.map_or(true, |c| distance < c.distance) {
            closest = Some(PolytopeEdge { index: i, normal, distance });
        }
    }
    closest.ok_or(CollisionError::DegenerateGeometry { reason: "EPA polytope has no usable edge" })
}

/// Expands `simplex` over the boundary of `A ⊖ B` until the closest edge stops
/// moving, and reports that edge's normal and distance.
pub fn penetration<A, B>(a: &A, b: &B, simplex: &Simplex, config: &EpaConfig) -> Result<Penetration>
where
    A: ConvexShape + ?Sized,
    B: ConvexShape + ?Sized,
{
    if simplex.len() < 3 {
        return Err(CollisionError::InvalidInput { reason: "EPA needs a triangle enclosing the origin" });
    }

    let mut polytope = simplex.points().to_vec();
    let winding = (polytope[1] - polytope[0]).cross(polytope[2] - polytope[0]);
    if winding == 0.0 {
        return Err(CollisionError::DegenerateGeometry { reason: "EPA seed triangle has zero area" });
    }
    if winding < 0.0 {
        polytope.reverse();
    }

    for iteration in 0..config.max_iterations {
        let edge = closest_edge(&polytope)?;
        let point = support(a, b, edge.normal);
        let distance = point.dot(edge.normal);

        if distance - edge.distance < config.tolerance {
            log::trace!(
                "EPA converged after {} iterations: normal {:?}, depth {:.6}",
                iteration + 1,
                edge.normal,
                edge.distance
            );
            return Ok(Penetration { normal: edge.normal, depth: edge.distance });
        }
        polytope.insert(edge.index + 1, point);
    }

    log::warn!("EPA hit its iteration cap of {}", config.max_iterations);
    Err(CollisionError::NonConvergence { algorithm: "EPA", iterations: config.max_iterations })
}
