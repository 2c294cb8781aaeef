pub mod half_edge;
pub mod hull;
pub mod polygon;

pub use half_edge::{EdgeId, FaceId, HalfEdge, HalfEdgePolygon, VertexId};
pub use hull::convex_hull;
pub use polygon::Polygon;

use crate::math::vec2::Vec2;

/// Anything convex that can answer "which of your points is farthest along
/// this direction". GJK, EPA and SAT only talk to shapes through this trait.
pub trait ConvexShape {
    /// Boundary vertices, counter-clockwise. Never empty.
    fn vertices(&self) -> &[Vec2];

    /// Farthest vertex along `direction`; the first one wins ties.
    fn support(&self, direction: Vec2) -> Vec2 {
        let vertices = self.vertices();
        let mut best = vertices[0];
        let mut best_distance = direction.dot(best);
        for &candidate in &vertices[1..] {
            let distance = direction.dot(candidate);
            if distance > best_distance {
                best_distance = distance;
                best = candidate;
            }
        }
        best
    }

    /// Plain average of the vertices. Cheap stand-in for the centre when only
    /// a direction between two shapes is needed.
    fn vertex_mean(&self) -> Vec2 {
        let vertices = self.vertices();
        let mut sum = Vec2::ZERO;
        for &v in vertices {
            sum += v;
        }
        sum / vertices.len() as f64
    }
}
