//! Surface properties that affect collision response.

/// Physical material of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    /// Coefficient of restitution (bounciness). Range [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub restitution: f64,
}

impl Material {
    /// Creates a material, clamping `restitution` into [0, 1].
    pub fn new(restitution: f64) -> Self {
        Material { restitution: restitution.clamp(0.0, 1.0) }
    }

    /// Restitution used when two materials meet: the less bouncy one wins.
    pub fn combined_restitution(self, other: Material) -> f64 {
        self.restitution.min(other.restitution)
    }
}

impl Default for Material {
    fn default() -> Self {
        Material { restitution: 0.2 }
    }
}
