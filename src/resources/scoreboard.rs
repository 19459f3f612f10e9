//! Match score board.
//!
//! Score `i` is the time spent by players wearing colour `i`; the first
//! colour to reach the win score wins. The bar at the top of the screen
//! shows one icon per colour sliding from the start to the finish line.
//! Icons that overlap take turns being on top (the roulette), and each
//! player's view border flashes in the attacker's colour when hit.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Resource;
use raylib::prelude::Color;

use crate::components::curve::Curve;
use crate::math;
use crate::resources::gameconfig::{MAX_PLAYERS, MatchRules};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScoreIcon {
    pub roulette_index: usize,
    /// Draw depth; the most negative icon is drawn on top.
    pub depth: i32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BorderFlash {
    pub color: Color,
    pub timer: f32,
}

#[derive(Resource, Clone, Debug)]
pub struct Scoreboard {
    pub scores: ArrayVec<f32, MAX_PLAYERS>,
    pub colors: ArrayVec<Color, MAX_PLAYERS>,
    pub icons: ArrayVec<ScoreIcon, MAX_PLAYERS>,
    pub borders: ArrayVec<BorderFlash, MAX_PLAYERS>,
    pub win_score: f32,
    pub roulette_time: f32,
    pub roulette_timer: f32,
    pub border_fade_time: f32,
    pub border_curve: Curve,
    /// Icon x at score zero and at the win score, in pixels.
    pub start_x: f32,
    pub end_x: f32,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new(MAX_PLAYERS, &MatchRules::default())
    }
}

impl Scoreboard {
    pub fn new(count: usize, rules: &MatchRules) -> Self {
        let count = count.min(MAX_PLAYERS);
        let mut board = Self {
            scores: ArrayVec::new(),
            colors: ArrayVec::new(),
            icons: ArrayVec::new(),
            borders: ArrayVec::new(),
            win_score: rules.win_score,
            roulette_time: rules.score_roulette_time,
            roulette_timer: 0.0,
            border_fade_time: rules.border_fade_time,
            border_curve: Curve::linear(),
            start_x: 0.0,
            end_x: 0.0,
        };
        for i in 0..count {
            board.scores.push(0.0);
            board.colors.push(Color::WHITE);
            board.icons.push(ScoreIcon {
                roulette_index: i,
                depth: -(i as i32 + 1),
            });
            board.borders.push(BorderFlash {
                color: Color::WHITE,
                timer: 0.0,
            });
        }
        board
    }

    pub fn with_track(mut self, start_x: f32, end_x: f32) -> Self {
        self.start_x = start_x;
        self.end_x = end_x;
        self
    }

    pub fn report_colors(&mut self, colors: &[Color]) {
        for (slot, color) in self.colors.iter_mut().zip(colors) {
            *slot = *color;
        }
    }

    /// Credit `dt` to the colour of every shirt in `wearing`.
    pub fn add_time(&mut self, wearing: impl IntoIterator<Item = usize>, dt: f32) {
        for team in wearing {
            if let Some(score) = self.scores.get_mut(team) {
                *score += dt;
            }
        }
    }

    pub fn icon_x(&self, i: usize) -> f32 {
        let score = self.scores.get(i).copied().unwrap_or(0.0);
        let t = if self.win_score > 0.0 {
            math::clamp01(score / self.win_score)
        } else {
            1.0
        };
        math::lerp_f32(self.start_x, self.end_x, t)
    }

    /// Advance the roulette timer, rotating every icon each period.
    /// Returns true when the icons rotated.
    pub fn tick_roulette(&mut self, dt: f32) -> bool {
        if self.roulette_time <= 0.0 || self.icons.is_empty() {
            return false;
        }
        self.roulette_timer += dt;
        if self.roulette_timer < self.roulette_time {
            return false;
        }
        self.roulette_timer -= self.roulette_time;
        let count = self.icons.len();
        for icon in self.icons.iter_mut() {
            icon.roulette_index = (icon.roulette_index + 1) % count;
            icon.depth = -(icon.roulette_index as i32 + 1);
        }
        true
    }

    /// Icon indices in drawing order (top-most last).
    pub fn draw_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.icons.len()).collect();
        order.sort_by_key(|i| std::cmp::Reverse(self.icons[*i].depth));
        order
    }

    /// First colour at or past the win score.
    pub fn winner(&self) -> Option<usize> {
        self.scores.iter().position(|s| *s >= self.win_score)
    }

    pub fn tick_borders(&mut self, dt: f32) {
        for border in self.borders.iter_mut() {
            border.timer = (border.timer - dt).max(0.0);
        }
    }

    pub fn border_alpha(&self, i: usize) -> f32 {
        let Some(border) = self.borders.get(i) else {
            return 0.0;
        };
        if self.border_fade_time <= 0.0 {
            return 0.0;
        }
        math::clamp01(self.border_curve.evaluate(border.timer / self.border_fade_time))
    }

    /// Flash view `i`'s border in `color`.
    pub fn set_border_color(&mut self, i: usize, color: Color) {
        if let Some(border) = self.borders.get_mut(i) {
            border.color = color;
            border.timer = self.border_fade_time;
        }
    }
}
