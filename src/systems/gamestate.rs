use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use crate::resources::input::PlayerInputs;
use bevy_ecs::prelude::*;

/// Trigger the state change observer when a transition is pending.
pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    if let NextGameStates::Pending(_new_state) = next_state.get() {
        commands.trigger(GameStateChangedEvent {});
    }
}

pub fn state_is_playing(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Playing)
}

pub fn state_is_main_menu(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::MainMenu)
}

pub fn state_is_player_select(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::PlayerSelect)
}

pub fn state_is_victory(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Victory)
}

/// Escape backs out of the arena and the victory screen to the main menu,
/// reloads the main menu and quits from player select.
pub fn escape_system(
    inputs: Res<PlayerInputs>,
    state: Res<GameState>,
    mut next_state: ResMut<NextGameState>,
) {
    if !inputs.escape.just_pressed {
        return;
    }
    match state.get() {
        GameStates::Playing | GameStates::Victory | GameStates::MainMenu => {
            next_state.set(GameStates::MainMenu)
        }
        GameStates::PlayerSelect => next_state.set(GameStates::Quitting),
        _ => {}
    }
}
