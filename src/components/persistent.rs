//! Marker for entities that outlive scene changes.
//!
//! The scene-change observer despawns everything without it. Observers and
//! the registered scene hooks are spawned with it at startup; scene content
//! (arena, players, menus, HUDs) never is.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Persistent;
