//! Match session that outlives scene changes.
//!
//! Player select saves which device controls which slot; the arena reads it
//! back when spawning players. The winner is kept for the victory screen.

use bevy_ecs::prelude::{Entity, Resource};
use raylib::prelude::Color;

use crate::components::player::Outfit;
use crate::resources::gameconfig::MAX_PLAYERS;
use crate::resources::input::InputDevice;

/// Shirt colour of each slot.
pub const PALETTE: [Color; MAX_PLAYERS] = [
    Color { r: 230, g: 41, b: 55, a: 255 },
    Color { r: 0, g: 121, b: 241, a: 255 },
    Color { r: 0, g: 228, b: 48, a: 255 },
    Color { r: 253, g: 249, b: 0, a: 255 },
    Color { r: 200, g: 122, b: 255, a: 255 },
    Color { r: 255, g: 161, b: 0, a: 255 },
];

#[derive(Resource, Debug)]
pub struct Session {
    /// Device controlling each player slot.
    pub assignments: Vec<InputDevice>,
    pub players: Vec<Entity>,
    pub palette: Vec<Color>,
    pub winner: Option<usize>,
    pub rng: fastrand::Rng,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(fastrand::Rng::new())
    }
}

impl Session {
    pub fn new(rng: fastrand::Rng) -> Self {
        Self {
            assignments: Vec::new(),
            players: Vec::new(),
            palette: PALETTE.to_vec(),
            winner: None,
            rng,
        }
    }

    pub fn save_assignments(&mut self, devices: Vec<InputDevice>) {
        self.assignments = devices;
    }

    /// Device of slot `slot`. Slots nobody joined fall back to the device
    /// with the same index so a skipped menu still gives everyone a pad.
    pub fn device_for(&self, slot: usize) -> InputDevice {
        self.assignments
            .get(slot)
            .copied()
            .unwrap_or(InputDevice::ALL[slot % InputDevice::ALL.len()])
    }

    /// Players in the next match: everyone who joined on the select screen,
    /// or `configured` when the menus were skipped.
    pub fn player_count(&self, configured: usize) -> usize {
        if self.assignments.is_empty() {
            configured
        } else {
            self.assignments.len()
        }
    }

    pub fn color(&self, team: usize) -> Color {
        self.palette
            .get(team)
            .copied()
            .unwrap_or(Color::WHITE)
    }

    /// Coin flip between the two player models.
    pub fn roll_outfit(&mut self) -> Outfit {
        if self.rng.bool() {
            Outfit::Classic
        } else {
            Outfit::Alternate
        }
    }

    /// Forget the previous match, keeping the device assignment.
    pub fn reset_match(&mut self) {
        self.players.clear();
        self.winner = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigned_devices_win_over_fallback() {
        let mut s = Session::new(fastrand::Rng::with_seed(7));
        s.save_assignments(vec![InputDevice::Gamepad(2), InputDevice::Keyboard]);
        assert_eq!(s.device_for(0), InputDevice::Gamepad(2));
        assert_eq!(s.device_for(1), InputDevice::Keyboard);
        assert_eq!(s.device_for(2), InputDevice::Gamepad(1));
    }

    #[test]
    fn joined_players_decide_the_match_size() {
        let mut s = Session::new(fastrand::Rng::with_seed(7));
        assert_eq!(s.player_count(6), 6);
        s.save_assignments(InputDevice::ALL.to_vec());
        assert_eq!(s.player_count(6), InputDevice::ALL.len());
    }

    #[test]
    fn colours_fall_back_to_white() {
        let s = Session::default();
        assert_eq!(s.color(0), PALETTE[0]);
        assert_eq!(s.color(40), Color::WHITE);
    }

    #[test]
    fn outfit_rolls_are_seeded() {
        let mut a = Session::new(fastrand::Rng::with_seed(3));
        let mut b = Session::new(fastrand::Rng::with_seed(3));
        for _ in 0..8 {
            assert_eq!(a.roll_outfit(), b.roll_outfit());
        }
    }
}
