use bevy_ecs::prelude::*;
use log::debug;

use crate::components::transition::TransitionBars;
use crate::resources::gamestate::NextGameState;
use crate::resources::worldtime::WorldTime;

/// Slide transition bars and switch state when a covering transition ends.
pub fn transition_system(
    time: Res<WorldTime>,
    mut next_state: ResMut<NextGameState>,
    mut bars: Query<&mut TransitionBars>,
) {
    for mut transition in bars.iter_mut() {
        if let Some(next) = transition.tick(time.delta) {
            debug!("Transition finished, heading to {:?}", next);
            next_state.set(next);
        }
    }
}
