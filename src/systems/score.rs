//! Score accumulation and win detection.

use bevy_ecs::prelude::*;
use log::info;

use crate::components::player::Player;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::scoreboard::Scoreboard;
use crate::resources::session::Session;
use crate::resources::worldtime::WorldTime;

/// Credit time to every worn colour, spin the icon roulette, fade the view
/// borders and end the match once a colour reaches the win score.
pub fn score_system(
    time: Res<WorldTime>,
    mut scoreboard: ResMut<Scoreboard>,
    mut session: ResMut<Session>,
    mut next_state: ResMut<NextGameState>,
    players: Query<&Player>,
) {
    let dt = time.delta;
    scoreboard.add_time(players.iter().map(|p| p.shirt_team), dt);
    scoreboard.tick_roulette(dt);
    scoreboard.tick_borders(dt);

    if session.winner.is_some() {
        return;
    }
    if let Some(winner) = scoreboard.winner() {
        info!("Player {} wins!", winner + 1);
        session.winner = Some(winner);
        next_state.set(GameStates::Victory);
    }
}
