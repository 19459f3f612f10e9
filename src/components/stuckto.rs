//! Riders of a moving platform.
//!
//! An elevator's cabin trigger and its door are separate entities that keep a
//! fixed offset from the platform. The platform moves in the fixed step; the
//! riders are snapped after it by
//! [`stuck_to_entity_system`](crate::systems::stuckto::stuck_to_entity_system).

use bevy_ecs::prelude::{Component, Entity};
use raylib::prelude::Vector3;

#[derive(Debug, Clone, Copy, Component)]
pub struct StuckTo {
    /// Platform followed.
    pub target: Entity,
    /// Rider pivot relative to the platform pivot.
    pub offset: Vector3,
}

impl StuckTo {
    pub fn riding(target: Entity, offset: Vector3) -> Self {
        Self { target, offset }
    }

    /// Where the rider belongs when the platform sits at `target_pos`.
    pub fn follow(&self, target_pos: Vector3) -> Vector3 {
        target_pos + self.offset
    }
}
