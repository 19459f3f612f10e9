//! Render target size resource.
//!
//! The game draws at a fixed internal resolution; this is that size in
//! pixels. Split-screen viewports and UI layout are computed from it.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct ScreenSize {
    pub w: i32,
    pub h: i32,
}
