//! Facing of an entity around the world up axis, plus the view pitch used by
//! player cameras. Both are in degrees.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

use crate::math;

/// Yaw/pitch orientation.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Heading {
    pub yaw: f32,
    pub pitch: f32,
}

impl Heading {
    pub fn new(yaw: f32) -> Self {
        Self { yaw, pitch: 0.0 }
    }

    /// Planar forward direction.
    pub fn forward(&self) -> Vector3 {
        math::yaw_forward(self.yaw)
    }

    /// View direction including pitch.
    pub fn look(&self) -> Vector3 {
        math::look_direction(self.yaw, self.pitch)
    }
}
