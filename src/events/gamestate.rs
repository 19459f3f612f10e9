//! Game state transition event and observer.
//!
//! Systems request a change to the high-level [`GameStates`] by updating
//! [`NextGameState`]. Emitting a [`GameStateChangedEvent`] then triggers the
//! observer in this module, which applies the transition to [`GameState`],
//! clears the previous scene and runs the enter hook registered in
//! [`crate::resources::systemsstore::SystemsStore`].
use crate::components::persistent::Persistent;
use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::systemsstore::SystemsStore;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

/// Event used to indicate that a pending game state transition should be
/// applied.
///
/// Emitting this event causes [`observe_gamestate_change_event`] to read
/// [`NextGameState`]. If it contains [`Pending`], the observer updates the
/// authoritative [`GameState`], despawns the old scene and runs the enter
/// hook; if it is [`Unchanged`], nothing happens.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending game state transition.
///
/// Contract
/// - Reads the intention from [`NextGameState`].
/// - If pending, copies the new value into [`GameState`], then:
///   - despawns every entity not marked [`Persistent`]
///   - runs the enter hook named by [`GameStates::hook_name`]
///   - resets [`NextGameState`] to [`Unchanged`]
/// - If any required resource is missing, logs a diagnostic and returns.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: Option<ResMut<NextGameState>>,
    mut game_state: Option<ResMut<GameState>>,
    systems_store: Res<SystemsStore>,
    scene_entities: Query<Entity, Without<Persistent>>,
) {
    debug!("GameStateChangedEvent triggered");

    let (Some(next_game_state), Some(game_state)) =
        (next_game_state.as_deref_mut(), game_state.as_deref_mut())
    else {
        warn!(
            "One or more resources missing in observe_gamestate_change_event. next_state: {:?}, game_state: {:?}",
            next_game_state.is_some(),
            game_state.is_some()
        );
        return;
    };

    match *next_game_state.get() {
        Pending(new_state) => {
            info!("Transitioning from {:?} to {:?}", game_state.get(), new_state);
            game_state.set(new_state);
            next_game_state.reset();

            let mut despawned = 0usize;
            for entity in scene_entities.iter() {
                commands.entity(entity).despawn();
                despawned += 1;
            }
            debug!("Cleared {} scene entities", despawned);

            on_state_enter(new_state, &mut commands, &systems_store);
        }
        Unchanged => {
            debug!("No state change pending.");
        }
    }
}

/// Internal: run the "enter" system registered for the given state.
fn on_state_enter(state: GameStates, commands: &mut Commands, systems_store: &SystemsStore) {
    match (state.hook_name(), systems_store.hook_for(state)) {
        (None, _) => debug!("Entered {:?} state", state),
        (Some(_), Some(id)) => commands.run_system(id),
        (Some(hook), None) => warn!("No '{}' system registered for {:?}", hook, state),
    }
}
