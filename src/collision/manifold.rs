use crate::math::vec2::Vec2;

/// A resolved overlap between two convex shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contact {
    /// Unit normal pointing from body A towards body B.
    pub normal: Vec2,
    /// Penetration depth along `normal`.
    pub depth: f64,
    /// World-space contact point.
    pub point: Vec2,
}

/// A contact tagged with the indices of the two bodies involved. Valid for
/// the tick that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionManifold {
    pub body_a_idx: usize,
    pub body_b_idx: usize,
    pub contact: Contact,
}
