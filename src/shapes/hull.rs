//! QuickHull: reduces a point cloud to its convex hull.
//!
//! Orientation tests are exact (no epsilon). Points lying exactly on a dividing
//! line are dropped, so collinear boundary points never appear in the output.

use std::cmp::Ordering;

use crate::error::{CollisionError, Result};
use crate::math::vec2::Vec2;

/// Signed area of the parallelogram spanned by `p -> q` and `p -> r`.
/// Negative when `r` lies to the right of the directed line `p -> q`.
fn orientation(p: Vec2, q: Vec2, r: Vec2) -> f64 {
    (q - p).cross(r - p)
}

fn is_right_of(p: Vec2, q: Vec2, r: Vec2) -> bool {
    orientation(p, q, r) < 0.0
}

fn lexicographic(a: &Vec2, b: &Vec2) -> Ordering {
    a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
}

/// Returns the convex hull of `points` in counter-clockwise order, starting at
/// the lowest point (lowest `x` among equal `y`).
///
/// Duplicates are allowed. Fewer than three distinct points is
/// [`CollisionError::InvalidInput`]; a cloud with no area (all points collinear)
/// is [`CollisionError::DegenerateGeometry`].
pub fn convex_hull(points: &[Vec2]) -> Result<Vec<Vec2>> {
    if points.iter().any(|p| !p.is_finite()) {
        return Err(CollisionError::InvalidInput { reason: "hull input contains a non-finite point" });
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(lexicographic);
    sorted.dedup();
    if sorted.len() < 3 {
        return Err(CollisionError::InvalidInput {
            reason: "convex hull needs at least 3 distinct points",
        });
    }

    let a = sorted[0];
    let b = sorted[sorted.len() - 1];
    let inner = &sorted[1..sorted.len() - 1];

    let right: Vec<Vec2> = inner.iter().copied().filter(|&p| is_right_of(a, b, p)).collect();
    let left: Vec<Vec2> = inner.iter().copied().filter(|&p| is_right_of(b, a, p)).collect();

    let mut hull = vec![a, b];
    find_hull(&right, a, b, &mut hull);
    find_hull(&left, b, a, &mut hull);

    if hull.len() < 3 {
        return Err(CollisionError::DegenerateGeometry { reason: "all hull input points are collinear" });
    }

    sort_by_angle(&mut hull);
    Ok(hull)
}

/// Adds to `hull` every extreme point of `candidates`, all of which lie to the
/// right of `p -> q`.
fn find_hull(candidates: &[Vec2], p: Vec2, q: Vec2, hull: &mut Vec<Vec2>) {
    // first of the farthest points wins
    let mut farthest: Option<(Vec2, f64)> = None;
    for &c in candidates {
        let distance = orientation(p, q, c).abs();
        if farthest.map_or(true, |(_, best)| distance > best) {
            farthest = Some((c, distance));
        }
    }
    let Some((c, _)) = farthest else {
        return;
    };
    hull.push(c);

    let outside_pc: Vec<Vec2> = candidates.iter().copied().filter(|&s| is_right_of(p, c, s)).collect();
    let outside_cq: Vec<Vec2> = candidates.iter().copied().filter(|&s| is_right_of(c, q, s)).collect();

    find_hull(&outside_pc, p, c, hull);
    find_hull(&outside_cq, c, q, hull);
}

/// Orders hull points counter-clockwise by polar angle around the lowest point.
fn sort_by_angle(points: &mut Vec<Vec2>) {
    let pivot_index = points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)))
        .map(|(i, _)| i)
        .unwrap_or(0);
    let pivot = points.swap_remove(pivot_index);

    // every other point is on or above the pivot, so atan2 stays within [0, PI]
    points.sort_by(|a, b| {
        let angle_a = (*a - pivot).y.atan2((*a - pivot).x);
        let angle_b = (*b - pivot).y.atan2((*b - pivot).x);
        angle_a.total_cmp(&angle_b).then_with(|| lexicographic(a, b))
    });
    points.insert(0, pivot);
}
