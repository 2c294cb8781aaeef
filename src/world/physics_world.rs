use crate::collision::{
    self, impulse, CollisionManifold, DetectionConfig, EpaConfig, GjkConfig, NarrowPhase,
};
use crate::error::{CollisionError, Result};
use crate::integration::integrator;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Tunables for a [`PhysicsWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldConfig {
    pub narrow_phase: NarrowPhase,
    pub gjk: GjkConfig,
    pub epa: EpaConfig,
    /// Restitution applied to every contact instead of the bodies' materials.
    pub restitution_override: Option<f64>,
    /// Size of a wrap-around area with its corner at the origin. `None`
    /// leaves positions unbounded.
    pub bounds: Option<Vec2>,
}

impl WorldConfig {
    pub fn detection(&self) -> DetectionConfig {
        DetectionConfig { narrow_phase: self.narrow_phase, gjk: self.gjk, epa: self.epa }
    }
}

/// Borrows two distinct bodies mutably at once.
pub(crate) fn get_mutable_body_pair(
    bodies: &mut [RigidBody],
    idx_a: usize,
    idx_b: usize,
) -> Result<(&mut RigidBody, &mut RigidBody)> {
    if idx_a == idx_b {
        return Err(CollisionError::InvalidInput { reason: "a body cannot collide with itself" });
    }
    if idx_a >= bodies.len() || idx_b >= bodies.len() {
        return Err(CollisionError::InvalidInput { reason: "body index out of bounds" });
    }

    // Ensure a < b for split_at_mut
    if idx_a < idx_b {
        let (slice_a, slice_b) = bodies.split_at_mut(idx_b);
        Ok((&mut slice_a[idx_a], &mut slice_b[0]))
    } else {
        let (slice_b, slice_a) = bodies.split_at_mut(idx_a);
        Ok((&mut slice_a[0], &mut slice_b[idx_b]))
    }
}

/// Explicit simulation driver: owns the bodies and runs one tick at a time.
#[derive(Debug, Clone, Default)]
pub struct PhysicsWorld {
    pub bodies: Vec<RigidBody>,
    pub config: WorldConfig,
    // Store detected collisions from the last step
    contacts: Vec<CollisionManifold>,
}

impl PhysicsWorld {
    /// Creates a new, empty world with default settings.
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    pub fn with_config(config: WorldConfig) -> Self {
        Self { bodies: Vec::new(), config, contacts: Vec::new() }
    }

    /// Adds a body to the world and returns its index.
    pub fn add_body(&mut self, body: RigidBody) -> usize {
        let index = self.bodies.len();
        self.bodies.push(body);
        index
    }

    /// Contacts found by the most recent detection pass, for drawing.
    pub fn contacts(&self) -> &[CollisionManifold] {
        &self.contacts
    }

    /// Checks every pair `i < j` with the configured narrow phase.
    pub fn detect_collisions(&mut self) -> Result<&[CollisionManifold]> {
        self.contacts.clear();
        let detection = self.config.detection();

        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let maybe_manifold =
                    collision::check_collision(&self.bodies[i], i, &self.bodies[j], j, &detection)?;
                if let Some(manifold) = maybe_manifold {
                    self.contacts.push(manifold);
                }
            }
        }
        Ok(&self.contacts)
    }

    fn resolve_contact(&mut self, manifold: &CollisionManifold) -> Result<()> {
        let restitution = self.config.restitution_override;
        let (body_a, body_b) =
            get_mutable_body_pair(&mut self.bodies, manifold.body_a_idx, manifold.body_b_idx)?;
        let e = restitution.unwrap_or_else(|| body_a.material.combined_restitution(body_b.material));
        impulse::resolve(body_a, body_b, &manifold.contact, e);
        Ok(())
    }

    /// Advances the simulation by one time step `dt`: move every body, find
    /// contacts, then resolve each contact once. Non-positive `dt` does nothing.
    pub fn step(&mut self, dt: f64) -> Result<()> {
        if dt <= 0.0 {
            return Ok(());
        }

        // 1. Integrate motion
        for body in self.bodies.iter_mut() {
            integrator::integrate(body, dt);
            if let Some(bounds) = self.config.bounds {
                integrator::wrap_position(body, bounds);
            }
        }

        // 2. Collision detection
        self.detect_collisions()?;
        log::debug!("step dt={dt}: {} contacts among {} bodies", self.contacts.len(), self.bodies.len());

        // 3. Resolve collisions; the contact list is kept for drawing
        let contacts = self.contacts.clone();
        for manifold in &contacts {
            self.resolve_contact(manifold)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Material;
    use crate::shapes::ConvexShape;
    const EPSILON: f64 = 1e-9;

    fn square(position: Vec2) -> RigidBody {
        let points = [
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ];
        RigidBody::new(&points, position, 1.0).unwrap()
    }

    fn approaching_pair(config: WorldConfig) -> PhysicsWorld {
        let mut world = PhysicsWorld::with_config(config);
        world.add_body(square(Vec2::ZERO).with_velocity(Vec2::new(1.0, 0.0), 0.0));
        world.add_body(square(Vec2::new(2.5, 0.0)).with_velocity(Vec2::new(-1.0, 0.0), 0.0));
        world
    }

    #[test]
    fn test_world_new() {
        let world = PhysicsWorld::new();
        assert!(world.bodies.is_empty());
        assert!(world.contacts().is_empty());
        assert_eq!(world.config, WorldConfig::default());
        assert_eq!(world.config.narrow_phase, NarrowPhase::Sat);
    }

    #[test]
    fn test_add_body() {
        let mut world = PhysicsWorld::new();
        let idx1 = world.add_body(square(Vec2::ZERO));
        let idx2 = world.add_body(square(Vec2::new(5.0, 0.0)));
        assert_eq!(idx1, 0);
        assert_eq!(idx2, 1);
        assert_eq!(world.bodies.len(), 2);
    }

    #[test]
    fn test_get_mutable_body_pair() {
        let mut bodies = vec![square(Vec2::ZERO), square(Vec2::new(5.0, 0.0))];
        let (b, a) = get_mutable_body_pair(&mut bodies, 1, 0).unwrap();
        assert_eq!(b.position, Vec2::new(5.0, 0.0));
        assert_eq!(a.position, Vec2::ZERO);

        assert!(get_mutable_body_pair(&mut bodies, 1, 1).is_err());
        assert!(get_mutable_body_pair(&mut bodies, 0, 2).is_err());
    }

    #[test]
    fn test_detect_collisions_all_pairs() {
        let mut world = PhysicsWorld::new();
        world.add_body(square(Vec2::ZERO));
        world.add_body(square(Vec2::new(1.5, 0.0)));
        world.add_body(square(Vec2::new(3.0, 0.0)));
        world.add_body(square(Vec2::new(20.0, 20.0)));

        let contacts = world.detect_collisions().unwrap();
        let pairs: Vec<(usize, usize)> = contacts.iter().map(|m| (m.body_a_idx, m.body_b_idx)).collect();
        // 0 and 2 are apart, 3 is far away
        assert_eq!(pairs, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_step_moves_bodies() {
        let mut world = PhysicsWorld::new();
        let idx = world.add_body(square(Vec2::ZERO).with_velocity(Vec2::new(2.0, -1.0), 0.0));
        world.step(0.5).unwrap();

        assert!((world.bodies[idx].position - Vec2::new(1.0, -0.5)).magnitude() < EPSILON);
        assert!((world.bodies[idx].vertex_mean() - Vec2::new(1.0, -0.5)).magnitude() < EPSILON);
    }

    #[test]
    fn test_step_non_positive_dt_is_noop() {
        let mut world = approaching_pair(WorldConfig::default());
        let before = world.bodies.clone();
        world.step(0.0).unwrap();
        world.step(-1.0).unwrap();
        assert_eq!(world.bodies, before);
        assert!(world.contacts().is_empty());
    }

    #[test]
    fn test_step_resolves_collision() {
        for narrow_phase in [NarrowPhase::Sat, NarrowPhase::Gjk] {
            let mut world = approaching_pair(WorldConfig { narrow_phase, ..WorldConfig::default() });
            world.step(0.5).unwrap();

            assert_eq!(world.contacts().len(), 1);
            let a = &world.bodies[0];
            let b = &world.bodies[1];
            // pushed apart to just touching
            assert!((a.position.x - 0.25).abs() < 1e-5);
            assert!((b.position.x - 2.25).abs() < 1e-5);
            // momentum conserved, approach stopped
            assert!((a.linear_velocity + b.linear_velocity).magnitude() < EPSILON);
            assert!(a.linear_velocity.x < 1.0);
            assert!(b.linear_velocity.x > -1.0);
        }
    }

    #[test]
    fn test_restitution_override() {
        let bouncy = Material::new(1.0);
        let mut world = PhysicsWorld::new();
        let points = [Vec2::new(-1.0, -1.0), Vec2::new(1.0, -1.0), Vec2::new(1.0, 1.0), Vec2::new(-1.0, 1.0)];
        for (x, vx) in [(0.0, 1.0), (1.9, -1.0)] {
            let body = RigidBody::new(&points, Vec2::new(x, 0.0), 1.0)
                .unwrap()
                .with_material(bouncy)
                .with_velocity(Vec2::new(vx, 0.0), 0.0);
            world.add_body(body);
        }
        let mut damped = world.clone();
        damped.config.restitution_override = Some(0.0);

        // contact arm lies off the centre line, so compare relative speeds
        world.step(1e-6).unwrap();
        damped.step(1e-6).unwrap();
        let separating = world.bodies[1].linear_velocity.x - world.bodies[0].linear_velocity.x;
        let sticking = damped.bodies[1].linear_velocity.x - damped.bodies[0].linear_velocity.x;
        assert!(separating > sticking);
    }

    #[test]
    fn test_bounds_wrap_positions() {
        let config = WorldConfig { bounds: Some(Vec2::new(10.0, 10.0)), ..WorldConfig::default() };
        let mut world = PhysicsWorld::with_config(config);
        let idx = world.add_body(square(Vec2::new(9.5, 5.0)).with_velocity(Vec2::new(1.0, 0.0), 0.0));
        world.step(1.0).unwrap();
        assert!((world.bodies[idx].position - Vec2::new(0.5, 5.0)).magnitude() < EPSILON);
    }
}
