use crate::common::Material;
use crate::error::{CollisionError, Result};
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;
use crate::shapes::{ConvexShape, Polygon};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RigidBody {
    // Geometry
    /// Convex hull in body space, centred on its area centroid.
    pub hull: Polygon,
    /// World-space hull vertices, recomputed by `update_world_vertices`.
    vertices: Vec<Vec2>,
    pub material: Material,

    // Primary state
    pub position: Vec2, // World position of the centroid
    pub rotation: f64,  // Radians
    pub linear_velocity: Vec2,
    pub angular_velocity: f64, // Radians per second

    pub mass: f64,
}

impl RigidBody {
    /// Creates a body from an arbitrary point cloud. The points are reduced to
    /// their convex hull, the hull is shifted so its centroid sits on the body
    /// origin, and the body is placed with that centroid at `position`.
    pub fn new(local_points: &[Vec2], position: Vec2, mass: f64) -> Result<Self> {
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(CollisionError::InvalidInput { reason: "body mass must be positive and finite" });
        }
        if !position.is_finite() {
            return Err(CollisionError::InvalidInput { reason: "body position must be finite" });
        }

        let hull = Polygon::from_points(local_points)?;
        let centroid = hull.calculate_centroid();
        let hull = hull.translated(-centroid);

        let mut body = Self {
            vertices: Vec::with_capacity(hull.len()),
            hull,
            material: Material::default(),
            position,
            rotation: 0.0,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            mass,
        };
        body.update_world_vertices();
        Ok(body)
    }

    pub fn with_velocity(mut self, linear_velocity: Vec2, angular_velocity: f64) -> Self {
        self.linear_velocity = linear_velocity;
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self.update_world_vertices();
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn inv_mass(&self) -> f64 {
        1.0 / self.mass
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation)
    }

    /// Moves the body and refreshes its world vertices.
    pub fn set_transform(&mut self, position: Vec2, rotation: f64) {
        self.position = position;
        self.rotation = rotation;
        self.update_world_vertices();
    }

    /// Recomputes the world-space vertex cache from the local hull and the
    /// current position and rotation.
    pub fn update_world_vertices(&mut self) {
        let transform = self.transform();
        transform.apply_into(self.hull.vertices(), &mut self.vertices);
    }
}

impl ConvexShape for RigidBody {
    fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;
    const EPSILON: f64 = 1e-10;

    fn offset_square() -> Vec<Vec2> {
        // unit square with corner at (10, -5) plus an interior point
        let offset = Vec2::new(10.0, -5.0);
        vec![
            offset + Vec2::new(0.0, 0.0),
            offset + Vec2::new(1.0, 0.0),
            offset + Vec2::new(0.5, 0.5),
            offset + Vec2::new(1.0, 1.0),
            offset + Vec2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_rigidbody_new_recentres_hull() {
        let rb = RigidBody::new(&offset_square(), Vec2::new(3.0, 4.0), 2.0).unwrap();

        assert_eq!(rb.hull.len(), 4);
        assert!(rb.hull.calculate_centroid().magnitude() < EPSILON);
        assert!((rb.hull.vertices()[0] - Vec2::new(-0.5, -0.5)).magnitude() < EPSILON);

        assert_eq!(rb.vertices().len(), 4);
        assert!((rb.vertices()[0] - Vec2::new(2.5, 3.5)).magnitude() < EPSILON);
        assert!((rb.vertex_mean() - Vec2::new(3.0, 4.0)).magnitude() < EPSILON);

        assert_eq!(rb.mass, 2.0);
        assert!((rb.inv_mass() - 0.5).abs() < EPSILON);
        assert_eq!(rb.rotation, 0.0);
        assert_eq!(rb.linear_velocity, Vec2::ZERO);
        assert_eq!(rb.angular_velocity, 0.0);
        assert_eq!(rb.material, Material::default());
    }

    #[test]
    fn test_rigidbody_new_rejects_bad_mass() {
        let points = offset_square();
        for mass in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                RigidBody::new(&points, Vec2::ZERO, mass),
                Err(CollisionError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_rigidbody_new_propagates_hull_errors() {
        let collinear = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)];
        assert!(matches!(
            RigidBody::new(&collinear, Vec2::ZERO, 1.0),
            Err(CollisionError::DegenerateGeometry { .. })
        ));
        assert!(matches!(
            RigidBody::new(&collinear[..2], Vec2::ZERO, 1.0),
            Err(CollisionError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_set_transform_updates_world_vertices() {
        let mut rb = RigidBody::new(&offset_square(), Vec2::ZERO, 1.0).unwrap();
        rb.set_transform(Vec2::new(1.0, 0.0), FRAC_PI_2);

        // local (-0.5, -0.5) turned a quarter counter-clockwise is (0.5, -0.5)
        let first = rb.vertices()[0];
        assert!((first - Vec2::new(1.5, -0.5)).magnitude() < EPSILON);
        assert!((rb.support(Vec2::X).x - 1.5).abs() < EPSILON);
    }

    #[test]
    fn test_builders() {
        let rb = RigidBody::new(&offset_square(), Vec2::ZERO, 1.0)
            .unwrap()
            .with_velocity(Vec2::new(1.0, -1.0), 0.25)
            .with_rotation(FRAC_PI_2)
            .with_material(Material::new(0.9));
        assert_eq!(rb.linear_velocity, Vec2::new(1.0, -1.0));
        assert_eq!(rb.angular_velocity, 0.25);
        assert_eq!(rb.rotation, FRAC_PI_2);
        assert_eq!(rb.material.restitution, 0.9);
        assert!((rb.vertices()[0] - Vec2::new(0.5, -0.5)).magnitude() < EPSILON);
    }
}
