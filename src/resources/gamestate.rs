//! High-level game state resources.
//!
//! Each state is one scene of the game: the main menu, the join screen, the
//! arena and the victory screen. Systems request a change through
//! [`NextGameState`]; `check_pending_state` turns the request into a
//! `GameStateChangedEvent` whose observer tears down the old scene and runs
//! the new scene's enter hook.

use bevy_ecs::prelude::Resource;

/// Discrete high-level states the game can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    #[default]
    None,
    /// Loading assets and spawning persistent entities.
    Setup,
    MainMenu,
    PlayerSelect,
    /// A match in the arena.
    Playing,
    Victory,
    Quitting,
}

impl GameStates {
    /// Key of the enter hook in the `SystemsStore`.
    pub fn hook_name(self) -> Option<&'static str> {
        match self {
            GameStates::None => None,
            GameStates::Setup => Some("setup"),
            GameStates::MainMenu => Some("enter_main_menu"),
            GameStates::PlayerSelect => Some("enter_player_select"),
            GameStates::Playing => Some("enter_play"),
            GameStates::Victory => Some("enter_victory"),
            GameStates::Quitting => Some("quit_game"),
        }
    }
}

/// Representation of a requested next state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NextGameStates {
    #[default]
    Unchanged,
    Pending(GameStates),
}

/// Authoritative current game state.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameState {
    current: GameStates,
}

impl GameState {
    pub fn new() -> Self {
        GameState {
            current: GameStates::None,
        }
    }

    pub fn get(&self) -> &GameStates {
        &self.current
    }

    /// Update the current state immediately, without running hooks.
    pub fn set(&mut self, state: GameStates) {
        self.current = state;
    }
}

/// Intent to change to a new game state.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NextGameState {
    next: NextGameStates,
}

impl NextGameState {
    pub fn new() -> Self {
        NextGameState {
            next: NextGameStates::Unchanged,
        }
    }

    pub fn get(&self) -> &NextGameStates {
        &self.next
    }

    /// Request a transition to `next`.
    pub fn set(&mut self, next: GameStates) {
        self.next = NextGameStates::Pending(next);
    }

    pub fn reset(&mut self) {
        self.next = NextGameStates::Unchanged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_and_reset() {
        let mut next = NextGameState::new();
        assert_eq!(next.get(), &NextGameStates::Unchanged);
        next.set(GameStates::Victory);
        assert_eq!(next.get(), &NextGameStates::Pending(GameStates::Victory));
        next.reset();
        assert_eq!(next.get(), &NextGameStates::Unchanged);
    }

    #[test]
    fn every_scene_has_a_hook() {
        assert_eq!(GameStates::None.hook_name(), None);
        assert_eq!(GameStates::Playing.hook_name(), Some("enter_play"));
        assert_eq!(GameStates::PlayerSelect.hook_name(), Some("enter_player_select"));
    }
}
