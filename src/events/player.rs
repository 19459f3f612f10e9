//! Gameplay events between shirts and players.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector3;

/// A thrown shirt struck a player.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerHitEvent {
    pub victim: Entity,
    /// Displacement of the shirt over its last physics step.
    pub force: Vector3,
    /// Colour index the victim now wears.
    pub team: usize,
}

/// A shirt reached the player collecting it.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShirtCollectedEvent {
    pub player: Entity,
    pub shirt: Entity,
}

/// A thrown shirt hit a wall or the floor.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallHitEvent {
    pub owner: Entity,
}
