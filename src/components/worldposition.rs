//! World-space position component.
//!
//! The [`WorldPosition`] component stores an entity's pivot in arena space.
//! For actors the pivot is the body centre; for geometry it is the centre of
//! the box.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

/// World-space position (pivot) for an entity.
#[derive(Component, Clone, Copy, Debug)]
pub struct WorldPosition {
    pub pos: Vector3,
}

impl Default for WorldPosition {
    fn default() -> Self {
        Self {
            pos: Vector3::zero(),
        }
    }
}

impl WorldPosition {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Vector3 { x, y, z },
        }
    }

    pub fn from_vec(pos: Vector3) -> Self {
        Self { pos }
    }

    pub fn translate(&mut self, delta: Vector3) {
        self.pos += delta;
    }
}
