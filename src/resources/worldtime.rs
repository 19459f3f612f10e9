//! Frame and physics clocks.
//!
//! [`WorldTime`] is advanced once per rendered frame. [`FixedTime`] banks
//! that frame time and pays it out in constant physics steps.

use bevy_ecs::prelude::Resource;

/// Upper bound on physics steps run in one frame after a stall.
pub const MAX_FIXED_STEPS: u32 = 5;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    /// Scaled seconds since the previous frame.
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}

#[derive(Resource, Clone, Copy, Debug)]
pub struct FixedTime {
    /// Seconds per physics step.
    pub step: f32,
    pub accumulator: f32,
}

impl Default for FixedTime {
    fn default() -> Self {
        Self::new(0.02)
    }
}

impl FixedTime {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
        }
    }

    /// Bank `delta` and return how many steps to run now. Time that would
    /// need more than [`MAX_FIXED_STEPS`] steps is dropped.
    pub fn accumulate(&mut self, delta: f32) -> u32 {
        if self.step <= 0.0 {
            return 0;
        }
        self.accumulator += delta.max(0.0);
        let mut steps = 0;
        while self.accumulator >= self.step && steps < MAX_FIXED_STEPS {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == MAX_FIXED_STEPS && self.accumulator >= self.step {
            self.accumulator %= self.step;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_paid_from_the_accumulator() {
        let mut t = FixedTime::new(0.02);
        assert_eq!(t.accumulate(0.01), 0);
        assert_eq!(t.accumulate(0.015), 1);
        assert!((t.accumulator - 0.005).abs() < 1e-5);
    }

    #[test]
    fn catch_up_is_capped() {
        let mut t = FixedTime::new(0.02);
        assert_eq!(t.accumulate(1.0), MAX_FIXED_STEPS);
        assert!(t.accumulator < 0.02);
    }

    #[test]
    fn zero_step_never_runs() {
        let mut t = FixedTime::new(0.0);
        assert_eq!(t.accumulate(1.0), 0);
    }
}
