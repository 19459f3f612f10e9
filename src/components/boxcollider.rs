use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

use crate::components::layer::CollisionLayer;

/// Axis-aligned box collider centred on the entity position plus `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    /// Full extents of the box.
    pub size: Vector3,
    pub offset: Vector3,
    pub layer: CollisionLayer,
    /// Triggers report overlaps but never block movement.
    pub is_trigger: bool,
    pub enabled: bool,
}

/// Result of a ray against a single box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayBoxHit {
    pub distance: f32,
    pub normal: Vector3,
}

impl BoxCollider {
    /// Create a solid BoxCollider with given size on the given layer.
    pub fn new(width: f32, height: f32, depth: f32, layer: CollisionLayer) -> Self {
        Self {
            size: Vector3::new(width, height, depth),
            offset: Vector3::zero(),
            layer,
            is_trigger: false,
            enabled: true,
        }
    }

    /// Create a trigger volume on the sensor layer.
    pub fn trigger(width: f32, height: f32, depth: f32) -> Self {
        Self {
            is_trigger: true,
            ..Self::new(width, height, depth, CollisionLayer::Sensor)
        }
    }

    /// Modify BoxCollider with given offset.
    pub fn with_offset(mut self, offset: Vector3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vector3) -> (Vector3, Vector3) {
        let cx = position.x + self.offset.x;
        let cy = position.y + self.offset.y;
        let cz = position.z + self.offset.z;
        let hx = self.size.x.abs() * 0.5;
        let hy = self.size.y.abs() * 0.5;
        let hz = self.size.z.abs() * 0.5;
        (
            Vector3::new(cx - hx, cy - hy, cz - hz),
            Vector3::new(cx + hx, cy + hy, cz + hz),
        )
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different entity position.
    /// Touching faces do not count as overlap.
    pub fn overlaps(&self, position: Vector3, other: &Self, other_position: Vector3) -> bool {
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);
        min_a.x < max_b.x
            && max_a.x > min_b.x
            && min_a.y < max_b.y
            && max_a.y > min_b.y
            && min_a.z < max_b.z
            && max_a.z > min_b.z
    }

    /// Point containment in world space.
    pub fn contains_point(&self, position: Vector3, point: Vector3) -> bool {
        let (min, max) = self.aabb(position);
        point.x >= min.x
            && point.x <= max.x
            && point.y >= min.y
            && point.y <= max.y
            && point.z >= min.z
            && point.z <= max.z
    }

    /// Slab test of a ray against this box.
    ///
    /// `direction` must be normalized. Rays starting inside the box report no
    /// hit, so an actor never hits its own collider.
    pub fn raycast(
        &self,
        position: Vector3,
        origin: Vector3,
        direction: Vector3,
        max_distance: f32,
    ) -> Option<RayBoxHit> {
        if self.contains_point(position, origin) {
            return None;
        }
        let (min, max) = self.aabb(position);
        let o = [origin.x, origin.y, origin.z];
        let d = [direction.x, direction.y, direction.z];
        let lo = [min.x, min.y, min.z];
        let hi = [max.x, max.y, max.z];

        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut enter_axis = 0usize;
        let mut enter_sign = 0.0f32;

        for axis in 0..3 {
            if d[axis].abs() < 1e-8 {
                if o[axis] < lo[axis] || o[axis] > hi[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d[axis];
            let mut t0 = (lo[axis] - o[axis]) * inv;
            let mut t1 = (hi[axis] - o[axis]) * inv;
            // the face we enter through points against the ray
            let mut sign = -1.0;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
                sign = 1.0;
            }
            if t0 > t_enter {
                t_enter = t0;
                enter_axis = axis;
                enter_sign = sign;
            }
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        if t_enter < 0.0 || t_enter > max_distance {
            return None;
        }
        let mut n = [0.0f32; 3];
        n[enter_axis] = enter_sign;
        Some(RayBoxHit {
            distance: t_enter,
            normal: Vector3::new(n[0], n[1], n[2]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn floor() -> BoxCollider {
        BoxCollider::new(10.0, 1.0, 10.0, CollisionLayer::Ground)
    }

    #[test]
    fn aabb_is_centred_with_offset() {
        let c = BoxCollider::new(2.0, 4.0, 6.0, CollisionLayer::Environment)
            .with_offset(Vector3::new(1.0, 0.0, 0.0));
        let (min, max) = c.aabb(Vector3::new(0.0, 0.0, 0.0));
        assert!(approx_eq(min.x, 0.0) && approx_eq(max.x, 2.0));
        assert!(approx_eq(min.y, -2.0) && approx_eq(max.y, 2.0));
        assert!(approx_eq(min.z, -3.0) && approx_eq(max.z, 3.0));
    }

    #[test]
    fn touching_faces_do_not_overlap() {
        let a = BoxCollider::new(1.0, 1.0, 1.0, CollisionLayer::Player);
        let f = floor();
        // box bottom at y=0.5 resting on floor top at y=0.5
        assert!(!a.overlaps(Vector3::new(0.0, 1.0, 0.0), &f, Vector3::zero()));
        assert!(a.overlaps(Vector3::new(0.0, 0.9, 0.0), &f, Vector3::zero()));
    }

    #[test]
    fn raycast_down_hits_top_face() {
        let f = floor();
        let hit = f
            .raycast(
                Vector3::zero(),
                Vector3::new(0.0, 3.0, 0.0),
                Vector3::new(0.0, -1.0, 0.0),
                10.0,
            )
            .expect("should hit");
        assert!(approx_eq(hit.distance, 2.5));
        assert!(approx_eq(hit.normal.y, 1.0));
    }

    #[test]
    fn raycast_respects_max_distance() {
        let f = floor();
        let hit = f.raycast(
            Vector3::zero(),
            Vector3::new(0.0, 3.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
            2.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn raycast_from_inside_is_ignored() {
        let f = floor();
        let hit = f.raycast(
            Vector3::zero(),
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
            10.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn raycast_side_face_normal() {
        let wall = BoxCollider::new(1.0, 4.0, 4.0, CollisionLayer::Environment);
        let hit = wall
            .raycast(
                Vector3::new(5.0, 0.0, 0.0),
                Vector3::zero(),
                Vector3::new(1.0, 0.0, 0.0),
                10.0,
            )
            .expect("should hit wall");
        assert!(approx_eq(hit.distance, 4.5));
        assert!(approx_eq(hit.normal.x, -1.0));
    }

    #[test]
    fn raycast_parallel_outside_misses() {
        let wall = BoxCollider::new(1.0, 1.0, 1.0, CollisionLayer::Environment);
        let hit = wall.raycast(
            Vector3::new(0.0, 5.0, 0.0),
            Vector3::new(-5.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            100.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn trigger_is_on_sensor_layer() {
        let t = BoxCollider::trigger(1.0, 1.0, 1.0);
        assert!(t.is_trigger);
        assert_eq!(t.layer, CollisionLayer::Sensor);
        assert!(t.enabled);
    }
}
