//! Countdown that fires a [`TimerEvent`](crate::events::timer::TimerEvent).
//!
//! Used for one-shot delays such as showing the HUDs after the match
//! countdown or leaving the victory screen. The timer is removed when it
//! fires.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Debug)]
pub struct Timer {
    pub duration: f32,
    pub elapsed: f32,
    pub signal: String,
}

impl Timer {
    pub fn new(duration: f32, signal: impl Into<String>) -> Self {
        Timer {
            duration,
            elapsed: 0.0,
            signal: signal.into(),
        }
    }

    /// Advance by `dt`; returns true once the duration is reached.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.finished()
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_at_duration() {
        let mut t = Timer::new(1.0, "hud");
        assert!(!t.tick(0.6));
        assert!((t.remaining() - 0.4).abs() < 1e-5);
        assert!(t.tick(0.4));
        assert_eq!(t.remaining(), 0.0);
    }
}
