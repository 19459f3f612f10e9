//! Small vector and angle helpers shared by gameplay systems.
//!
//! Angles are in degrees. The world is Y-up; a yaw of 0 looks down +Z and
//! positive yaw turns to the right (toward -X).

use raylib::prelude::Vector3;

/// World up axis.
pub const UP: Vector3 = Vector3 {
    x: 0.0,
    y: 1.0,
    z: 0.0,
};

pub fn clamp01(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Linear interpolation with `t` clamped to `[0, 1]`.
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * clamp01(t)
}

/// Linear interpolation without clamping `t`.
pub fn lerp_unclamped(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Moves `current` toward `target` by at most `max_delta`, never overshooting.
pub fn move_towards(current: Vector3, target: Vector3, max_delta: f32) -> Vector3 {
    let to = target - current;
    let dist = to.length();
    if dist <= max_delta || dist <= f32::EPSILON {
        target
    } else {
        current + to * (max_delta / dist)
    }
}

/// Unsigned angle between two vectors in degrees.
pub fn angle_between(a: Vector3, b: Vector3) -> f32 {
    let denom = a.length() * b.length();
    if denom <= f32::EPSILON {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Wraps an angle into `[0, 360)`.
pub fn wrap_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

/// Wraps an angle into `(-180, 180]`.
pub fn signed_degrees(angle: f32) -> f32 {
    let a = wrap_degrees(angle);
    if a > 180.0 { a - 360.0 } else { a }
}

/// Planar forward direction for a yaw.
pub fn yaw_forward(yaw: f32) -> Vector3 {
    let r = yaw.to_radians();
    Vector3 {
        x: -r.sin(),
        y: 0.0,
        z: r.cos(),
    }
}

/// Planar right direction for a yaw.
pub fn yaw_right(yaw: f32) -> Vector3 {
    let r = yaw.to_radians();
    Vector3 {
        x: -r.cos(),
        y: 0.0,
        z: -r.sin(),
    }
}

/// Rotates a local vector (x = right, y = up, z = forward) by a yaw.
pub fn rotate_by_yaw(local: Vector3, yaw: f32) -> Vector3 {
    let right = yaw_right(yaw);
    let forward = yaw_forward(yaw);
    Vector3 {
        x: right.x * local.x + forward.x * local.z,
        y: local.y,
        z: right.z * local.x + forward.z * local.z,
    }
}

/// View direction for a yaw and a pitch (positive pitch looks up).
pub fn look_direction(yaw: f32, pitch: f32) -> Vector3 {
    let p = pitch.to_radians();
    let flat = yaw_forward(yaw);
    Vector3 {
        x: flat.x * p.cos(),
        y: p.sin(),
        z: flat.z * p.cos(),
    }
}

pub fn from_array(v: [f32; 3]) -> Vector3 {
    Vector3 {
        x: v[0],
        y: v[1],
        z: v[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn v3_approx_eq(a: Vector3, b: Vector3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    #[test]
    fn lerp_clamps_but_unclamped_does_not() {
        assert!(approx_eq(lerp_f32(0.0, 10.0, 1.5), 10.0));
        assert!(approx_eq(lerp_f32(0.0, 10.0, -1.0), 0.0));
        assert!(approx_eq(lerp_unclamped(0.0, 10.0, -1.0), -10.0));
    }

    #[test]
    fn signed_degrees_range() {
        assert!(approx_eq(signed_degrees(190.0), -170.0));
        assert!(approx_eq(signed_degrees(180.0), 180.0));
        assert!(approx_eq(signed_degrees(-90.0), -90.0));
        assert!(approx_eq(signed_degrees(725.0), 5.0));
    }

    #[test]
    fn forward_and_right_are_perpendicular_and_consistent_with_up() {
        for yaw in [0.0, 33.0, 90.0, 200.0, -45.0] {
            let f = yaw_forward(yaw);
            let r = yaw_right(yaw);
            assert!(approx_eq(f.dot(r), 0.0));
            // right = forward x up
            assert!(v3_approx_eq(f.cross(UP), r));
        }
    }

    #[test]
    fn positive_yaw_turns_forward_toward_right() {
        let f0 = yaw_forward(0.0);
        let r0 = yaw_right(0.0);
        let f10 = yaw_forward(10.0);
        assert!((f10 - f0).dot(r0) > 0.0);
    }

    #[test]
    fn rotate_by_yaw_keeps_vertical_and_length() {
        let local = Vector3::new(3.0, -2.0, 4.0);
        let world = rotate_by_yaw(local, 57.0);
        assert!(approx_eq(world.y, -2.0));
        assert!(approx_eq(
            (world.x * world.x + world.z * world.z).sqrt(),
            5.0
        ));
    }

    #[test]
    fn move_towards_never_overshoots() {
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(10.0, 0.0, 0.0);
        assert!(v3_approx_eq(move_towards(a, b, 4.0), Vector3::new(4.0, 0.0, 0.0)));
        assert!(v3_approx_eq(move_towards(a, b, 40.0), b));
    }

    #[test]
    fn look_direction_pitch_up_has_positive_y() {
        let d = look_direction(0.0, 30.0);
        assert!(d.y > 0.0);
        assert!(approx_eq(d.length(), 1.0));
    }

    #[test]
    fn angle_between_axes() {
        assert!(approx_eq(angle_between(UP, Vector3::new(1.0, 0.0, 0.0)), 90.0));
        assert!(approx_eq(angle_between(UP, UP), 0.0));
        assert!(approx_eq(angle_between(Vector3::zero(), UP), 0.0));
    }
}
