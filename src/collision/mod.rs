pub mod detection;
pub mod epa;
pub mod gjk;
pub mod impulse;
pub mod manifold;
pub mod sat;

pub use detection::{check_collision, find_contact, DetectionConfig, NarrowPhase};
pub use epa::{EpaConfig, Penetration};
pub use gjk::{GjkConfig, Simplex};
pub use manifold::{CollisionManifold, Contact};
pub use sat::{ReferenceBody, SatAxis};
