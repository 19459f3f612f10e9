//! Scene transition bars.
//!
//! A stack of horizontal bars slides across the screen one after another.
//! Sliding in covers the screen before a scene change; sliding out uncovers
//! the freshly entered scene. When the last bar is done and a next state is
//! set, [`TransitionBars::tick`] hands it back so the caller can switch.

use bevy_ecs::prelude::Component;

use crate::components::curve::Curve;
use crate::math;
use crate::resources::gamestate::GameStates;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BarState {
    pub started: bool,
    /// Time since the bar started (or since reset while waiting).
    pub timer: f32,
}

#[derive(Component, Clone, Debug)]
pub struct TransitionBars {
    pub bars: Vec<BarState>,
    pub going_in: bool,
    /// Frozen until [`activate`](Self::activate) is called.
    pub wait: bool,
    pub next: Option<GameStates>,
    /// Seconds one bar takes to cross.
    pub bar_time: f32,
    /// Stagger between consecutive bars.
    pub bar_offset_time: f32,
    /// Travel distance as a fraction of the screen width.
    pub position_offset: f32,
    pub curve: Curve,
    fired: bool,
}

impl TransitionBars {
    pub fn new(count: usize) -> Self {
        Self {
            bars: vec![BarState::default(); count],
            going_in: false,
            wait: false,
            next: None,
            bar_time: 0.5,
            bar_offset_time: 0.06,
            position_offset: 1.0,
            curve: Curve::linear(),
            fired: false,
        }
    }

    /// Bars start covering the screen and slide away once activated.
    pub fn waiting(mut self) -> Self {
        self.wait = true;
        self
    }

    /// Restart the bars in the given direction, optionally heading to `next`.
    pub fn reset(&mut self, going_in: bool, next: Option<GameStates>) {
        self.going_in = going_in;
        self.next = next;
        self.fired = false;
        for bar in &mut self.bars {
            *bar = BarState::default();
        }
    }

    pub fn activate(&mut self) {
        self.wait = false;
    }

    /// Normalised progress of bar `i`.
    pub fn progress(&self, i: usize) -> f32 {
        match self.bars.get(i) {
            Some(bar) if bar.started => {
                if self.bar_time > 0.0 {
                    bar.timer / self.bar_time
                } else {
                    1.0
                }
            }
            _ => 0.0,
        }
    }

    /// Whether bar `i` should be drawn at all.
    pub fn is_visible(&self, i: usize) -> bool {
        match self.bars.get(i) {
            Some(bar) => bar.started || !self.going_in,
            None => false,
        }
    }

    /// Horizontal offset of bar `i` from its resting place, in pixels.
    pub fn bar_offset(&self, i: usize, screen_width: f32) -> f32 {
        let travel = screen_width * self.position_offset;
        let t = self.curve.evaluate(math::clamp01(self.progress(i)));
        if self.going_in {
            math::lerp_unclamped(travel, 0.0, t)
        } else {
            math::lerp_unclamped(0.0, -travel, t)
        }
    }

    /// Advance the bars. Returns the next state once, when the last bar
    /// finishes and a next state was set.
    pub fn tick(&mut self, dt: f32) -> Option<GameStates> {
        if self.wait || self.bars.is_empty() {
            return None;
        }
        for (i, bar) in self.bars.iter_mut().enumerate() {
            bar.timer += dt;
            if !bar.started && bar.timer >= self.bar_offset_time * i as f32 {
                bar.started = true;
                bar.timer = 0.0;
            }
        }
        let last = self.bars.len() - 1;
        if self.fired || !self.bars[last].started || self.progress(last) < 1.0 {
            return None;
        }
        let next = self.next?;
        self.fired = true;
        Some(next)
    }

    /// Every bar has started and crossed.
    pub fn is_finished(&self) -> bool {
        (0..self.bars.len()).all(|i| self.progress(i) >= 1.0)
    }
}
