use super::epa::{self, EpaConfig};
use super::gjk::{self, GjkConfig};
use super::manifold::{CollisionManifold, Contact};
use super::sat;
use crate::error::Result;
use crate::objects::rigid_body::RigidBody;
use crate::shapes::ConvexShape;

/// Narrow-phase algorithm used for a body pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NarrowPhase {
    /// Separating axes over both shapes' edge normals.
    #[default]
    Sat,
    /// GJK for the overlap test, EPA for normal and depth.
    Gjk,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectionConfig {
    pub narrow_phase: NarrowPhase,
    pub gjk: GjkConfig,
    pub epa: EpaConfig,
}

/// Runs the configured narrow phase on two convex shapes.
///
/// The GJK path reports B's deepest vertex into A as the contact point.
pub fn find_contact<A, B>(a: &A, b: &B, config: &DetectionConfig) -> Result<Option<Contact>>
where
    A: ConvexShape + ?Sized,
    B: ConvexShape + ?Sized,
{
    match config.narrow_phase {
        NarrowPhase::Sat => sat::collide(a, b),
        NarrowPhase::Gjk => {
            let Some(simplex) = gjk::intersection_simplex(a, b, &config.gjk)? else {
                return Ok(None);
            };
            let penetration = epa::penetration(a, b, &simplex, &config.epa)?;
            Ok(Some(Contact {
                normal: penetration.normal,
                depth: penetration.depth,
                point: b.support(-penetration.normal),
            }))
        }
    }
}

/// Checks two bodies against each other and tags the result with their
/// indices in the world.
pub fn check_collision(
    body_a: &RigidBody,
    body_a_idx: usize,
    body_b: &RigidBody,
    body_b_idx: usize,
    config: &DetectionConfig,
) -> Result<Option<CollisionManifold>> {
    let contact = find_contact(body_a, body_b, config)?;
    Ok(contact.map(|contact| {
        log::debug!(
            "bodies {} and {} collide: normal {:?}, depth {:.4}",
            body_a_idx,
            body_b_idx,
            contact.normal,
            contact.depth
        );
        CollisionManifold { body_a_idx, body_b_idx, contact }
    }))
}
