//! Gilbert–Johnson–Keerthi intersection test on the Minkowski difference `A ⊖ B`.

use crate::error::{CollisionError, Result};
use crate::math::vec2::Vec2;
use crate::shapes::ConvexShape;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GjkConfig {
    /// Upper bound on support queries before giving up with `NonConvergence`.
    pub max_iterations: usize,
}

impl GjkConfig {
    pub const DEFAULT_MAX_ITERATIONS: usize = 64;
}

impl Default for GjkConfig {
    fn default() -> Self {
        Self { max_iterations: Self::DEFAULT_MAX_ITERATIONS }
    }
}

/// Working set of up to three Minkowski-difference points, oldest first.
/// Pushing a fourth point discards the oldest.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Simplex {
    points: [Vec2; 3],
    len: usize,
}

impl Simplex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: Vec2) {
        if self.len == self.points.len() {
            self.points.rotate_left(1);
            self.points[2] = point;
        } else {
            self.points[self.len] = point;
            self.len += 1;
        }
    }

    /// Oldest first, newest last.
    pub fn points(&self) -> &[Vec2] {
        &self.points[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn newest(&self) -> Vec2 {
        self.points[self.len - 1]
    }

    fn remove(&mut self, index: usize) {
        self.points.copy_within(index + 1..self.len, index);
        self.len -= 1;
    }
}

/// A point on the boundary of `A ⊖ B`: farthest of `a` along `direction`
/// minus farthest of `b` against it.
pub fn support<A, B>(a: &A, b: &B, direction: Vec2) -> Vec2
where
    A: ConvexShape + ?Sized,
    B: ConvexShape + ?Sized,
{
    a.support(direction) - b.support(-direction)
}

/// Perpendicular of segment `ab` facing the origin, or either perpendicular
/// when the origin lies on the segment's line.
fn toward_origin(ab: Vec2, ao: Vec2) -> Vec2 {
    let direction = Vec2::triple_product(ab, ao, ab);
    if direction == Vec2::ZERO {
        ab.perpendicular()
    } else {
        direction
    }
}

/// Updates the simplex and search direction after a new point was pushed.
/// Returns `true` once the simplex encloses the origin.
fn contains_origin(simplex: &mut Simplex, direction: &mut Vec2) -> bool {
    let a = simplex.newest();
    let ao = -a;

    match simplex.len() {
        3 => {
            let b = simplex.points[1];
            let c = simplex.points[0];
            let ab = b - a;
            let ac = c - a;

            if ab.cross(ac) == 0.0 {
                // flat triangle: keep the newer segment
                simplex.remove(0);
                *direction = toward_origin(ab, ao);
                return false;
            }

            let ab_perp = Vec2::triple_product(ac, ab, ab);
            let ac_perp = Vec2::triple_product(ab, ac, ac);

            // origin on an edge is not enclosed: keep searching past that edge
            if ab_perp.dot(ao) >= 0.0 {
                simplex.remove(0);
                *direction = ab_perp;
                false
            } else if ac_perp.dot(ao) >= 0.0 {
                simplex.remove(1);
                *direction = ac_perp;
                false
            } else {
                true
            }
        }
        2 => {
            let b = simplex.points[0];
            *direction = toward_origin(b - a, ao);
            false
        }
        _ => {
            *direction = ao;
            false
        }
    }
}

/// Runs GJK and, when the shapes overlap, returns the triangle that encloses
/// the origin (a valid seed for EPA). Shapes that only touch are reported as
/// not intersecting.
pub fn intersection_simplex<A, B>(a: &A, b: &B, config: &GjkConfig) -> Result<Option<Simplex>>
where
    A: ConvexShape + ?Sized,
    B: ConvexShape + ?Sized,
{
    let mut direction = b.vertex_mean() - a.vertex_mean();
    if direction == Vec2::ZERO {
        direction = Vec2::X;
    }

    let mut simplex = Simplex::new();
    simplex.push(support(a, b, direction));
    direction = -simplex.newest();
    if direction == Vec2::ZERO {
        // first support point is the origin itself: contact on the boundary
        return Ok(None);
    }

    for _ in 0..config.max_iterations {
        let point = support(a, b, direction);
        if point.dot(direction) <= 0.0 {
            return Ok(None);
        }
        simplex.push(point);
        if contains_origin(&mut simplex, &mut direction) {
            return Ok(Some(simplex));
        }
    }

    log::warn!("GJK hit its iteration cap of {}", config.max_iterations);
    Err(CollisionError::NonConvergence { algorithm: "GJK", iterations: config.max_iterations })
}

/// Boolean overlap test.
pub fn intersects<A, B>(a: &A, b: &B, config: &GjkConfig) -> Result<bool>
where
    A: ConvexShape + ?Sized,
    B: ConvexShape + ?Sized,
{
    Ok(intersection_simplex(a, b, config)?.is_some())
}
