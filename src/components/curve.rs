//! Response curves used by timed animations.
//!
//! Gameplay and UI elements map a normalized time to an eased value through a
//! [`Curve`]: door leaves, elevator travel, charge strength, border fades,
//! transition bars, popups and grow-ins. A curve is either one of the fixed
//! [`Easing`] functions or a piecewise-linear list of keyframes.

use serde::{Deserialize, Serialize};

/// Easing functions for smooth interpolation.
///
/// These functions transform a linear `t` value (0.0 to 1.0) to create
/// different acceleration/deceleration curves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    /// Constant speed (no easing).
    Linear,
    /// Starts slow, accelerates (quadratic).
    QuadIn,
    /// Starts fast, decelerates (quadratic).
    QuadOut,
    /// Slow start and end (quadratic).
    QuadInOut,
    /// Starts slow, accelerates (cubic).
    CubicIn,
    /// Starts fast, decelerates (cubic).
    CubicOut,
    /// Slow start and end (cubic).
    CubicInOut,
}

/// Apply an easing function to a normalized time value.
///
/// The input `t` is clamped to [0.0, 1.0] and transformed according to the
/// easing curve.
pub fn ease(e: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::QuadIn => t * t,
        Easing::QuadOut => t * (2.0 - t),
        Easing::QuadInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                -1.0 + (4.0 - 2.0 * t) * t
            }
        }
        Easing::CubicIn => t * t * t,
        Easing::CubicOut => {
            let p = t - 1.0;
            p * p * p + 1.0
        }
        Easing::CubicInOut => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                let p = 2.0 * t - 2.0;
                0.5 * p * p * p + 1.0
            }
        }
    }
}

/// A single `(time, value)` point of a keyframed curve.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
}

impl Keyframe {
    pub const fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Maps a time value to an output value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Curve {
    Ease(Easing),
    /// Keyframes sorted by time; evaluation holds the first/last value outside
    /// the keyed range.
    Keyframes(Vec<Keyframe>),
}

impl Default for Curve {
    fn default() -> Self {
        Curve::Ease(Easing::Linear)
    }
}

impl Curve {
    pub fn linear() -> Self {
        Curve::Ease(Easing::Linear)
    }

    /// Build a keyframed curve, sorting the keys by time.
    pub fn keyframes(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Curve::Keyframes(keys)
    }

    pub fn evaluate(&self, t: f32) -> f32 {
        match self {
            Curve::Ease(e) => ease(*e, t),
            Curve::Keyframes(keys) => evaluate_keys(keys, t),
        }
    }
}

fn evaluate_keys(keys: &[Keyframe], t: f32) -> f32 {
    let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
        return 0.0;
    };
    if t <= first.time {
        return first.value;
    }
    if t >= last.time {
        return last.value;
    }
    for pair in keys.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.time {
            let span = b.time - a.time;
            if span <= f32::EPSILON {
                return b.value;
            }
            return a.value + (b.value - a.value) * ((t - a.time) / span);
        }
    }
    last.value
}
