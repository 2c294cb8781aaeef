//! Collision core for 2D convex polygons: QuickHull, a half-edge polygon
//! structure, GJK/EPA and SAT narrow phases, single-pass impulse response, and
//! a Gauss–Seidel linear solver, plus a small world driver that ties them
//! together.

pub mod collision;
pub mod common;
pub mod error;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::{CollisionManifold, Contact, DetectionConfig, EpaConfig, GjkConfig, NarrowPhase};
pub use common::Material;
pub use error::{CollisionError, Result};
pub use math::{GaussSeidelConfig, Transform, Vec2};
pub use objects::RigidBody;
pub use shapes::{convex_hull, ConvexShape, HalfEdgePolygon, Polygon};
pub use world::{PhysicsWorld, WorldConfig};
