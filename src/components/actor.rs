//! Billboard actor component.
//!
//! Players and shirts are drawn as directional billboards. The billboard
//! material picks its sprite column from an angle derived from the actor's
//! heading, so the sprite always matches the facing direction regardless of
//! where the camera looks from.

use bevy_ecs::prelude::Component;
use raylib::prelude::{Color, Vector3};

use crate::math;

/// Which sprite sheet the billboard currently shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum BillboardMaterial {
    #[default]
    Standing,
    Moving,
    /// Tumbling shirt, with the current animation frame.
    Falling(usize),
    /// Shirt lying flat on the floor.
    Ground,
}

/// Shared billboard and environment-interaction state of an actor.
#[derive(Component, Clone, Debug)]
pub struct Actor {
    /// Added to the facing angle so the sprite sheet lines up with forward.
    pub rotation_offset: f32,
    pub material: BillboardMaterial,
    /// Angle fed to the directional billboard, in `(-180, 180]` plus offset.
    pub shader_angle: f32,
    /// Set by conveyors every physics step the actor stands on them; consumed
    /// and cleared by the actor's own update.
    pub propel: Vector3,
    pub tint: Color,
    /// Scale applied to the drawn billboard (shirts shrink when they land).
    pub visual_scale: f32,
    /// Vertical offset applied to the drawn billboard.
    pub visual_offset: f32,
}

impl Default for Actor {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Actor {
    pub fn new(rotation_offset: f32) -> Self {
        Self {
            rotation_offset,
            material: BillboardMaterial::Standing,
            shader_angle: 0.0,
            propel: Vector3::zero(),
            tint: Color::WHITE,
            visual_scale: 1.0,
            visual_offset: 0.0,
        }
    }

    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    /// Recompute the billboard angle from a yaw.
    pub fn update_angle(&mut self, yaw: f32) {
        self.shader_angle = math::signed_degrees(yaw) + self.rotation_offset;
    }

    /// Swap the billboard material, optionally refreshing the angle at once.
    pub fn set_material(&mut self, material: BillboardMaterial, refresh_angle: Option<f32>) {
        self.material = material;
        if let Some(yaw) = refresh_angle {
            self.update_angle(yaw);
        }
    }

    /// Take the pending conveyor push, leaving zero behind.
    pub fn take_propel(&mut self) -> Vector3 {
        std::mem::replace(&mut self.propel, Vector3::zero())
    }
}
