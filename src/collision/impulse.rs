//! Single-pass impulse response for one contact between two bodies.
//!
//! This is not an iterative constraint solver. Each contact is resolved once
//! per tick, so stacks and many simultaneous contacts can jitter.

use super::manifold::Contact;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Approximate moment of inertia about a contact arm of length `|r|`.
fn arm_inertia(mass: f64, r: Vec2) -> f64 {
    mass * r.magnitude_squared() / 12.0
}

/// `(r x n)^2 / I`, or nothing when the arm has no length.
fn rotational_term(r_cross_n: f64, inertia: f64) -> f64 {
    if inertia > 0.0 {
        r_cross_n * r_cross_n / inertia
    } else {
        0.0
    }
}

/// Pushes the bodies apart by `contact.depth` and applies a restitution
/// impulse along `contact.normal` (which points from A to B).
///
/// The separation is split by mass: A moves `m_b / (m_a + m_b)` of the depth
/// away from B along the centre-to-centre line, B moves the rest. Bodies that
/// are already separating along the normal only receive that correction.
pub fn resolve(body_a: &mut RigidBody, body_b: &mut RigidBody, contact: &Contact, restitution: f64) {
    let normal = contact.normal;

    // Lever arms from the positions the contact was detected at
    let r_a = contact.point - body_a.position;
    let r_b = contact.point - body_b.position;

    // --- Velocity impulse --- //
    let v_a = body_a.linear_velocity + r_a.perpendicular() * body_a.angular_velocity;
    let v_b = body_b.linear_velocity + r_b.perpendicular() * body_b.angular_velocity;
    let relative_velocity_normal = (v_b - v_a).dot(normal);

    if relative_velocity_normal < 0.0 {
        let inertia_a = arm_inertia(body_a.mass, r_a);
        let inertia_b = arm_inertia(body_b.mass, r_b);
        let ra_cross_n = r_a.cross(normal);
        let rb_cross_n = r_b.cross(normal);

        let effective_mass = body_a.inv_mass()
            + body_b.inv_mass()
            + rotational_term(ra_cross_n, inertia_a)
            + rotational_term(rb_cross_n, inertia_b);
        let j = -(1.0 + restitution) * relative_velocity_normal / effective_mass;

        body_a.linear_velocity -= normal * (j * body_a.inv_mass());
        body_b.linear_velocity += normal * (j * body_b.inv_mass());
        if inertia_a > 0.0 {
            body_a.angular_velocity -= ra_cross_n * j / inertia_a;
        }
        if inertia_b > 0.0 {
            body_b.angular_velocity += rb_cross_n * j / inertia_b;
        }

        log::trace!(
            "impulse j={:.4} (relative normal velocity {:.4}, e={:.2})",
            j,
            relative_velocity_normal,
            restitution
        );
    }

    // --- Position correction --- //
    let direction = (body_b.position - body_a.position).try_normalize().unwrap_or(normal);
    let total_mass = body_a.mass + body_b.mass;
    let ratio_a = body_b.mass / total_mass;
    let ratio_b = body_a.mass / total_mass;

    body_a.position -= direction * (contact.depth * ratio_a);
    body_b.position += direction * (contact.depth * ratio_b);
    body_a.update_world_vertices();
    body_b.update_world_vertices();
}
