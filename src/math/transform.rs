use super::vec2::Vec2;

/// Rigid placement of a body: rotate about the local origin, then translate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f64, // radians
}

impl Transform {
    pub fn new(position: Vec2, rotation: f64) -> Self {
        Self { position, rotation }
    }

    pub fn identity() -> Self {
        Self::new(Vec2::ZERO, 0.0)
    }

    /// Maps a body-local point into world space.
    pub fn apply(self, point: Vec2) -> Vec2 {
        point.rotate(self.rotation) + self.position
    }

    /// Maps a world-space point back into body-local space.
    pub fn apply_inverse(self, point: Vec2) -> Vec2 {
        (point - self.position).rotate(-self.rotation)
    }

    /// Writes the world-space image of every `local` point into `out`,
    /// reusing its allocation.
    pub fn apply_into(self, local: &[Vec2], out: &mut Vec<Vec2>) {
        let (sin_a, cos_a) = self.rotation.sin_cos();
        out.clear();
        out.extend(local.iter().map(|p| {
            Vec2::new(
                p.x * cos_a - p.y * sin_a + self.position.x,
                p.x * sin_a + p.y * cos_a + self.position.y,
            )
        }));
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
