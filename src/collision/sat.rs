//! Separating Axis Theorem test between two convex polygons, with minimum
//! overlap axis selection and a single contact point.

use super::manifold::Contact;
use crate::error::Result;
use crate::math::vec2::Vec2;
use crate::shapes::polygon::outward_normals;
use crate::shapes::ConvexShape;

/// Which shape the minimum-overlap axis came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReferenceBody {
    A,
    B,
}

/// Axis of least penetration found by [`min_overlap_axis`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SatAxis {
    /// Outward unit normal of the originating edge.
    pub axis: Vec2,
    /// `min(max) - max(min)` of the two projections; always positive.
    pub overlap: f64,
    /// Edge `i -> i+1` of the owning shape whose normal gave `axis`. This is
    /// not necessarily the reference edge [`collide`] clips against; that one
    /// is picked afterwards as the owner's edge facing the other shape.
    pub edge_index: usize,
    pub reference: ReferenceBody,
}

/// Projects `vertices` onto `axis`, returning `(min, max)`.
fn project(vertices: &[Vec2], axis: Vec2) -> (f64, f64) {
    let mut min = axis.dot(vertices[0]);
    let mut max = min;
    for &v in &vertices[1..] {
        let projection = axis.dot(v);
        min = min.min(projection);
        max = max.max(projection);
    }
    (min, max)
}

/// Closest point to `point` on the segment `start -> end`.
fn closest_point_on_segment(start: Vec2, end: Vec2, point: Vec2) -> Vec2 {
    let segment = end - start;
    let length_sq = segment.magnitude_squared();
    if length_sq == 0.0 {
        return start;
    }
    let t = ((point - start).dot(segment) / length_sq).clamp(0.0, 1.0);
    start + segment * t
}

/// Tests every edge normal of `a`, then of `b`. Returns `None` as soon as one
/// axis separates the shapes (touching intervals count as separated), else the
/// axis with the smallest overlap, earliest axis on ties.
pub fn min_overlap_axis<A, B>(a: &A, b: &B) -> Result<Option<SatAxis>>
where
    A: ConvexShape + ?Sized,
    B: ConvexShape + ?Sized,
{
    let normals_a = outward_normals(a.vertices())?;
    let normals_b = outward_normals(b.vertices())?;

    let candidates = normals_a
        .iter()
        .enumerate()
        .map(|(i, &n)| (n, i, ReferenceBody::A))
        .chain(normals_b.iter().enumerate().map(|(i, &n)| (n, i, ReferenceBody::B)));

    let mut best: Option<SatAxis> = None;
    for (axis, edge_index, reference) in candidates {
        let (min_a, max_a) = project(a.vertices(), axis);
        let (min_b, max_b) = project(b.vertices(), axis);
        let overlap = max_a.min(max_b) - min_a.max(min_b);
        if overlap <= 0.0 {
            return Ok(None);
        }
        if best.map_or(true, |current| overlap < current.overlap) {
            best = Some(SatAxis { axis, overlap, edge_index, reference });
        }
    }
    Ok(best)
}

/// Index of the edge of `vertices` whose outward normal lines up best with
/// `direction`, earliest edge on ties.
fn facing_edge(normals: &[Vec2], direction: Vec2) -> usize {
    let mut best_index = 0;
    let mut best_alignment = f64::NEG_INFINITY;
    for (i, normal) in normals.iter().enumerate() {
        let alignment = normal.dot(direction);
        if alignment > best_alignment {
            best_alignment = alignment;
            best_index = i;
        }
    }
    best_index
}

/// Full SAT contact: normal from A to B, overlap as depth, and the vertex of
/// the incident shape nearest to the reference edge as the contact point.
pub fn collide<A, B>(a: &A, b: &B) -> Result<Option<Contact>>
where
    A: ConvexShape + ?Sized,
    B: ConvexShape + ?Sized,
{
    let Some(min_axis) = min_overlap_axis(a, b)? else {
        return Ok(None);
    };

    // overlap is symmetric in the axis sign, so orient it by the centres
    let mut normal = min_axis.axis;
    if normal.dot(b.vertex_mean() - a.vertex_mean()) < 0.0 {
        normal = -normal;
    }

    let (reference, reference_index, incident) = match min_axis.reference {
        ReferenceBody::A => {
            let normals = outward_normals(a.vertices())?;
            (a.vertices(), facing_edge(&normals, normal), b.vertices())
        }
        ReferenceBody::B => {
            let normals = outward_normals(b.vertices())?;
            (b.vertices(), facing_edge(&normals, -normal), a.vertices())
        }
    };

    let start = reference[reference_index];
    let end = reference[(reference_index + 1) % reference.len()];
    let mut point = incident[0];
    let mut best_distance = f64::INFINITY;
    for &v in incident {
        let distance = v.distance_squared(closest_point_on_segment(start, end, v));
        if distance < best_distance {
            best_distance = distance;
            point = v;
        }
    }

    log::trace!(
        "SAT contact: normal {:?}, depth {:.6}, point {:?}, axis from {:?} edge {}, reference edge {}",
        normal,
        min_axis.overlap,
        point,
        min_axis.reference,
        min_axis.edge_index,
        reference_index
    );
    Ok(Some(Contact { normal, depth: min_axis.overlap, point }))
}
