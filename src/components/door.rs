//! Sliding door components.
//!
//! A [`Door`] entity owns a trigger volume that counts who stands in front of
//! it. Its two [`DoorLeaf`] entities are solid boxes slid sideways (and
//! optionally stretched) as the door's progress moves between closed (0) and
//! open (1).

use bevy_ecs::prelude::{Component, Entity};
use raylib::prelude::Vector3;

use crate::components::curve::Curve;
use crate::components::layer::CollisionLayer;
use crate::math;

#[derive(Component, Clone, Debug)]
pub struct Door {
    /// Opens by itself while occupied. Doors driven by an elevator are not
    /// automatic.
    pub automatic: bool,
    pub is_open: bool,
    pub occupancy: u32,
    /// 0 closed, 1 fully open.
    pub progress: f32,
    /// Seconds to go from closed to open.
    pub duration: f32,
    pub curve: Curve,
    /// Leaf centre distance from the door centre when closed.
    pub closed_x: f32,
    pub open_x: f32,
    pub closed_scale: f32,
    pub open_scale: f32,
    /// Unscaled size of one leaf.
    pub leaf_size: Vector3,
}

impl Default for Door {
    fn default() -> Self {
        Self {
            automatic: true,
            is_open: false,
            occupancy: 0,
            progress: 0.0,
            duration: 0.5,
            curve: Curve::linear(),
            closed_x: 0.5,
            open_x: 1.5,
            closed_scale: 1.0,
            open_scale: 1.0,
            leaf_size: Vector3::new(1.0, 3.0, 0.2),
        }
    }
}

impl Door {
    /// Something entered the trigger volume.
    pub fn enter(&mut self, layer: CollisionLayer) {
        if !self.automatic || layer.ignored_by_doors() {
            return;
        }
        self.occupancy += 1;
    }

    /// Something left the trigger volume. Occupancy never drops below zero.
    pub fn exit(&mut self, layer: CollisionLayer) {
        if !self.automatic || layer.ignored_by_doors() {
            return;
        }
        self.occupancy = self.occupancy.saturating_sub(1);
    }

    /// Move progress toward the open or closed end.
    pub fn tick(&mut self, dt: f32) {
        if self.automatic {
            self.is_open = self.occupancy > 0;
        }
        let rate = if self.duration > 0.0 {
            dt / self.duration
        } else {
            1.0
        };
        let dir = if self.is_open { 1.0 } else { -1.0 };
        self.progress = math::clamp01(self.progress + dir * rate);
    }

    /// Horizontal offset and x scale of a leaf at the current progress.
    /// Leaves stay between their closed and open layouts even when the
    /// curve overshoots.
    pub fn leaf_layout(&self, side: DoorSide) -> (f32, f32) {
        let t = self.curve.evaluate(self.progress);
        let x = math::lerp_f32(self.closed_x, self.open_x, t) * side.sign();
        let scale = math::lerp_f32(self.closed_scale, self.open_scale, t);
        (x, scale)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DoorSide {
    Left,
    Right,
}

impl DoorSide {
    pub fn sign(self) -> f32 {
        match self {
            DoorSide::Left => -1.0,
            DoorSide::Right => 1.0,
        }
    }
}

/// One solid half of a door.
#[derive(Component, Clone, Copy, Debug)]
pub struct DoorLeaf {
    pub door: Entity,
    pub side: DoorSide,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::curve::Keyframe;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn occupancy_ignores_projectiles_and_sensors() {
        let mut d = Door::default();
        d.enter(CollisionLayer::Projectile);
        d.enter(CollisionLayer::Sensor);
        d.enter(CollisionLayer::ProjectileInert);
        assert_eq!(d.occupancy, 0);
        d.enter(CollisionLayer::Player);
        assert_eq!(d.occupancy, 1);
    }

    #[test]
    fn occupancy_never_negative() {
        let mut d = Door::default();
        d.exit(CollisionLayer::Player);
        assert_eq!(d.occupancy, 0);
    }

    #[test]
    fn manual_door_ignores_occupants() {
        let mut d = Door {
            automatic: false,
            ..Door::default()
        };
        d.enter(CollisionLayer::Player);
        assert_eq!(d.occupancy, 0);
        d.tick(0.1);
        assert!(approx_eq(d.progress, 0.0));
    }

    #[test]
    fn automatic_door_opens_and_closes() {
        let mut d = Door::default();
        d.enter(CollisionLayer::Player);
        d.tick(0.25);
        assert!(d.is_open);
        assert!(approx_eq(d.progress, 0.5));
        d.tick(1.0);
        assert!(approx_eq(d.progress, 1.0));
        d.exit(CollisionLayer::Player);
        d.tick(0.25);
        assert!(!d.is_open);
        assert!(approx_eq(d.progress, 0.5));
    }

    #[test]
    fn leaves_slide_apart() {
        let mut d = Door {
            open_scale: 0.5,
            ..Door::default()
        };
        let (lx, ls) = d.leaf_layout(DoorSide::Left);
        let (rx, _) = d.leaf_layout(DoorSide::Right);
        assert!(approx_eq(lx, -0.5) && approx_eq(rx, 0.5) && approx_eq(ls, 1.0));
        d.progress = 1.0;
        let (lx, ls) = d.leaf_layout(DoorSide::Left);
        assert!(approx_eq(lx, -1.5) && approx_eq(ls, 0.5));
    }

    #[test]
    fn overshooting_curve_keeps_leaves_inside_the_frame() {
        let mut d = Door {
            curve: Curve::keyframes(vec![
                Keyframe::new(0.0, -0.3),
                Keyframe::new(0.5, 1.4),
                Keyframe::new(1.0, 1.0),
            ]),
            ..Door::default()
        };
        d.progress = 0.5;
        let (rx, _) = d.leaf_layout(DoorSide::Right);
        assert!(approx_eq(rx, d.open_x));
        d.progress = 0.0;
        let (rx, _) = d.leaf_layout(DoorSide::Right);
        assert!(approx_eq(rx, d.closed_x));
    }
}
