//! Debug toggle resource.
//!
//! While present, the debug console is visible and collider wireframes are
//! drawn over every player view. F11 inserts or removes it.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct DebugMode {}
