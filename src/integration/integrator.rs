use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Advances the body's state by `dt` with explicit Euler, then refreshes its
/// world vertices.
pub fn integrate(body: &mut RigidBody, dt: f64) {
    body.position += body.linear_velocity * dt;
    // wrapped to [-PI, PI]
    body.rotation = wrap_angle(body.rotation + body.angular_velocity * dt);
    body.update_world_vertices();
}

/// Wraps the body's position into `[0, bounds.x) x [0, bounds.y)`, so bodies
/// leaving one side of the area come back in on the other. Non-positive
/// extents leave that axis alone.
pub fn wrap_position(body: &mut RigidBody, bounds: Vec2) {
    let mut position = body.position;
    if bounds.x > 0.0 {
        position.x = position.x.rem_euclid(bounds.x);
    }
    if bounds.y > 0.0 {
        position.y = position.y.rem_euclid(bounds.y);
    }
    if position != body.position {
        body.position = position;
        body.update_world_vertices();
    }
}

/// Wraps an angle in radians to the range [-PI, PI].
pub fn wrap_angle(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}
