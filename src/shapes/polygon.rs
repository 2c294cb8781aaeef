use std::f64::consts::TAU;

use super::{hull, ConvexShape};
use crate::error::{CollisionError, Result};
use crate::math::vec2::Vec2;

/// A convex polygon with vertices stored counter-clockwise.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    vertices: Vec<Vec2>,
}

/// Twice the signed area; positive for counter-clockwise rings.
fn signed_area_doubled(vertices: &[Vec2]) -> f64 {
    let n = vertices.len();
    (0..n).map(|i| vertices[i].cross(vertices[(i + 1) % n])).sum()
}

impl Polygon {
    /// Wraps an ordered vertex ring. A clockwise ring is reversed so the stored
    /// order is always counter-clockwise. Convexity is the caller's promise; use
    /// [`Polygon::from_points`] when it is not.
    pub fn new(mut vertices: Vec<Vec2>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(CollisionError::InvalidInput { reason: "polygon needs at least 3 vertices" });
        }
        let doubled_area = signed_area_doubled(&vertices);
        if doubled_area == 0.0 || !doubled_area.is_finite() {
            return Err(CollisionError::DegenerateGeometry { reason: "polygon has zero area" });
        }
        if doubled_area < 0.0 {
            vertices.reverse();
        }
        Ok(Polygon { vertices })
    }

    /// Builds the convex hull of an arbitrary point cloud.
    pub fn from_points(points: &[Vec2]) -> Result<Self> {
        Ok(Polygon { vertices: hull::convex_hull(points)? })
    }

    /// Regular polygon centred on the origin, first vertex on the +x axis.
    /// Handy as a circle stand-in.
    pub fn regular(sides: usize, radius: f64) -> Result<Self> {
        if sides < 3 || radius <= 0.0 || !radius.is_finite() {
            return Err(CollisionError::InvalidInput {
                reason: "regular polygon needs >= 3 sides and a positive radius",
            });
        }
        let vertices = (0..sides)
            .map(|i| {
                let angle = TAU * i as f64 / sides as f64;
                Vec2::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        Ok(Polygon { vertices })
    }

    /// Axis-aligned rectangle given its centre and half extents.
    pub fn rectangle(center: Vec2, half_width: f64, half_height: f64) -> Result<Self> {
        Self::new(vec![
            center + Vec2::new(-half_width, -half_height),
            center + Vec2::new(half_width, -half_height),
            center + Vec2::new(half_width, half_height),
            center + Vec2::new(-half_width, half_height),
        ])
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex at `index`, wrapping around in both directions.
    pub fn vertex_at(&self, index: isize) -> Vec2 {
        let n = self.vertices.len() as isize;
        self.vertices[index.rem_euclid(n) as usize]
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Polygon { vertices: self.vertices.iter().map(|&v| v + offset).collect() }
    }

    /// Rotated about the origin by `angle` radians.
    pub fn rotated(&self, angle: f64) -> Self {
        Polygon { vertices: self.vertices.iter().map(|&v| v.rotate(angle)).collect() }
    }

    /// Shoelace area.
    pub fn calculate_area(&self) -> f64 {
        (signed_area_doubled(&self.vertices) / 2.0).abs()
    }

    /// Area-weighted centroid, falling back to the vertex average when the
    /// ring has (numerically) no area.
    pub fn calculate_centroid(&self) -> Vec2 {
        let origin = self.vertices[0];
        let mut centroid = Vec2::ZERO;
        let mut signed_area_sum = 0.0;

        for window in self.vertices[1..].windows(2) {
            let (v2, v3) = (window[0], window[1]);
            let triangle_area = (v2 - origin).cross(v3 - origin) / 2.0;
            signed_area_sum += triangle_area;
            centroid += (origin + v2 + v3) / 3.0 * triangle_area;
        }

        if signed_area_sum.abs() < 1e-10 {
            let mut sum = Vec2::ZERO;
            for &v in &self.vertices {
                sum += v;
            }
            sum / self.vertices.len() as f64
        } else {
            centroid / signed_area_sum
        }
    }

    /// Outward unit normals, one per edge `i -> i+1`.
    pub fn edge_normals(&self) -> Result<Vec<Vec2>> {
        outward_normals(&self.vertices)
    }

    /// Every consecutive triple turns left (or goes straight).
    pub fn is_convex(&self) -> bool {
        let n = self.vertices.len();
        (0..n).all(|i| {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let c = self.vertices[(i + 2) % n];
            (b - a).cross(c - b) >= 0.0
        })
    }

    /// Inclusive point-in-polygon test.
    pub fn contains_point(&self, point: Vec2) -> bool {
        let n = self.vertices.len();
        (0..n).all(|i| {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            (b - a).cross(point - a) >= 0.0
        })
    }
}

impl ConvexShape for Polygon {
    fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }
}

/// Outward unit normals of a counter-clockwise ring. A zero-length edge would
/// give a zero projection axis and is rejected.
pub(crate) fn outward_normals(vertices: &[Vec2]) -> Result<Vec<Vec2>> {
    let n = vertices.len();
    (0..n)
        .map(|i| {
            let edge = vertices[(i + 1) % n] - vertices[i];
            // clockwise quarter turn points out of a counter-clockwise ring
            (-edge.perpendicular()).try_normalize().map_err(|_| CollisionError::DegenerateGeometry {
                reason: "zero-length edge has no normal",
            })
        })
        .collect()
}
