//! Screen-space UI components.
//!
//! HUD parts are small timer-driven animations over a screen position:
//! popups pulse, float-up labels rise and fade, wiggles rock back and forth.
//! Each type exposes a `tick` that advances it and returns what the renderer
//! needs, so the systems in [`crate::systems::ui`] stay thin.

use bevy_ecs::prelude::{Component, Entity};
use log::error;
use raylib::prelude::{Color, Vector2};

use crate::components::curve::Curve;
use crate::math;

/// What a [`ScreenPosition`](super::screenposition::ScreenPosition) is
/// relative to.
#[derive(Component, Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum UiAnchor {
    /// The whole render target.
    #[default]
    Screen,
    /// Top-left corner of a player's split-screen view.
    Viewport(usize),
}

/// Rotation (degrees) and uniform scale applied when drawing a UI element.
#[derive(Component, Copy, Clone, Debug, PartialEq)]
pub struct UiTransform {
    pub rotation: f32,
    pub scale: f32,
}

impl Default for UiTransform {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

/// Root of one player's HUD. The parts carry a [`HudPart`] pointing back
/// here and are only drawn while the root is visible.
#[derive(Component, Clone, Debug)]
pub struct Hud {
    pub slot: usize,
    pub visible: bool,
    pub reticle: Entity,
    pub ammo: Entity,
    pub popup: Entity,
    pub weapon: Entity,
}

#[derive(Component, Copy, Clone, Debug)]
pub struct HudPart {
    pub hud: Entity,
}

/// Crosshair that grows with the charge level.
#[derive(Component, Clone, Debug)]
pub struct Reticle {
    pub level: usize,
    pub levels: usize,
    pub color: Color,
}

impl Reticle {
    pub fn new(levels: usize, color: Color) -> Self {
        Self {
            level: 0,
            levels,
            color,
        }
    }

    /// Show a charge level. Levels past the last sprite are logged and
    /// ignored.
    pub fn set_level(&mut self, level: usize) -> bool {
        if level >= self.levels {
            error!(
                "Reticle charge level {} out of range ({} levels)",
                level, self.levels
            );
            return false;
        }
        self.level = level;
        true
    }

    /// Half extent of the crosshair in pixels for the current level.
    pub fn radius(&self, base: f32) -> f32 {
        base * (1.0 + self.level as f32 * 0.5)
    }
}

/// Ammo readout: `x{ammo}` text plus the empty icon at zero.
#[derive(Component, Clone, Debug, Default)]
pub struct AmmoCounter {
    pub ammo: i32,
}

impl AmmoCounter {
    pub fn text(&self) -> String {
        format!("x{}", self.ammo)
    }

    pub fn is_empty(&self) -> bool {
        self.ammo <= 0
    }
}

/// Scale pulse played when ammo is collected.
#[derive(Component, Clone, Debug)]
pub struct Popup {
    pub timer: f32,
    pub time: f32,
    pub start_scale: f32,
    pub max_scale: f32,
    pub curve: Curve,
    /// Where the "+1" label appears relative to the popup.
    pub label_offset: Vector2,
}

impl Default for Popup {
    fn default() -> Self {
        Self {
            timer: 0.0,
            time: 0.3,
            start_scale: 1.0,
            max_scale: 1.6,
            curve: Curve::linear(),
            label_offset: Vector2::new(24.0, -16.0),
        }
    }
}

impl Popup {
    /// Restart the pulse.
    pub fn pop(&mut self) {
        self.timer = self.time;
    }

    /// Advance and return the scale to draw with.
    pub fn tick(&mut self, dt: f32) -> f32 {
        self.timer -= dt;
        let t = if self.time > 0.0 {
            math::clamp01(self.timer / self.time)
        } else {
            0.0
        };
        math::lerp_unclamped(self.start_scale, self.max_scale, self.curve.evaluate(t))
    }
}

/// Label that rises and fades out, then goes away.
#[derive(Component, Clone, Debug)]
pub struct FloatUp {
    pub timer: f32,
    pub time: f32,
    pub height: f32,
    pub start: Vector2,
    pub curve: Curve,
}

impl FloatUp {
    pub fn new(start: Vector2) -> Self {
        Self {
            timer: 0.0,
            time: 0.8,
            height: 40.0,
            start,
            curve: Curve::linear(),
        }
    }

    /// Returns position, alpha and whether the label is finished.
    pub fn tick(&mut self, dt: f32) -> (Vector2, f32, bool) {
        self.timer += dt;
        let t = if self.time > 0.0 {
            self.curve.evaluate(math::clamp01(self.timer / self.time))
        } else {
            1.0
        };
        let end = Vector2::new(self.start.x, self.start.y - self.height);
        let pos = self.start.lerp(end, t);
        let alpha = math::lerp_f32(1.0, 0.0, t);
        (pos, alpha, t >= 1.0)
    }
}

/// Rocks an element around its z axis.
#[derive(Component, Clone, Debug)]
pub struct Wiggle {
    pub timer: f32,
    pub amplitude: f32,
    pub frequency: f32,
}

impl Wiggle {
    pub fn new(amplitude: f32, frequency: f32) -> Self {
        Self {
            timer: 0.0,
            amplitude,
            frequency,
        }
    }

    pub fn tick(&mut self, dt: f32) -> f32 {
        self.timer += dt;
        if self.frequency <= 0.0 {
            return 0.0;
        }
        (self.timer / self.frequency).sin() * self.amplitude
    }
}

/// Grows an element from nothing; removed once it reaches full size.
#[derive(Component, Clone, Debug)]
pub struct GrowIn {
    pub elapsed: f32,
    pub time: f32,
    pub end_scale: f32,
    pub curve: Curve,
}

impl GrowIn {
    pub fn new(time: f32, end_scale: f32) -> Self {
        Self {
            elapsed: 0.0,
            time,
            end_scale,
            curve: Curve::linear(),
        }
    }

    /// Returns the scale and whether the growth is done.
    pub fn tick(&mut self, dt: f32) -> (f32, bool) {
        self.elapsed += dt;
        if self.time <= 0.0 || self.elapsed >= self.time {
            return (self.end_scale, true);
        }
        let t = self.curve.evaluate(self.elapsed / self.time);
        (math::lerp_unclamped(0.0, self.end_scale, t), false)
    }
}

/// Sway of the held shirt while walking.
#[derive(Clone, Debug)]
pub struct WeaponWobble {
    pub time_x: f32,
    pub time_y: f32,
    pub frequency: f32,
    pub amplitude: Vector2,
}

impl Default for WeaponWobble {
    fn default() -> Self {
        Self {
            time_x: 0.0,
            time_y: 0.0,
            frequency: 0.15,
            amplitude: Vector2::new(14.0, 8.0),
        }
    }
}

impl WeaponWobble {
    /// Advance and return the pixel offset. The vertical bob runs twice as
    /// fast as the horizontal sway.
    pub fn tick(&mut self, dt: f32, factor: f32) -> Vector2 {
        if self.frequency > 0.0 {
            self.time_x += dt / self.frequency;
            self.time_y += dt / (self.frequency * 0.5);
        }
        Vector2::new(
            self.time_x.sin() * self.amplitude.x * factor,
            self.time_y.sin() * self.amplitude.y * factor,
        )
    }

    pub fn reset(&mut self) {
        self.time_x = 0.0;
        self.time_y = 0.0;
    }
}

/// The shirt held at the bottom of a player's view.
#[derive(Component, Clone, Debug, Default)]
pub struct WeaponSprite {
    /// Arm lowered after a throw until the cooldown ends.
    pub reloading: bool,
    pub wobble: WeaponWobble,
    pub offset: Vector2,
    pub color: Color,
}

impl WeaponSprite {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn reload(&mut self) {
        self.reloading = true;
    }

    pub fn unreload(&mut self) {
        self.reloading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn reticle_rejects_out_of_range_levels() {
        let mut r = Reticle::new(5, Color::WHITE);
        assert!(r.set_level(4));
        assert!(!r.set_level(5));
        assert_eq!(r.level, 4);
    }

    #[test]
    fn ammo_counter_text() {
        let c = AmmoCounter { ammo: 7 };
        assert_eq!(c.text(), "x7");
        assert!(!c.is_empty());
        assert!(AmmoCounter { ammo: 0 }.is_empty());
    }

    #[test]
    fn popup_decays_back_to_rest() {
        let mut p = Popup::default();
        p.pop();
        assert!(approx_eq(p.tick(0.0), 1.6));
        assert!(approx_eq(p.tick(0.15), 1.3));
        assert!(approx_eq(p.tick(1.0), 1.0));
    }

    #[test]
    fn float_up_rises_fades_and_finishes() {
        let mut f = FloatUp::new(Vector2::new(10.0, 100.0));
        let (pos, alpha, done) = f.tick(0.4);
        assert!(approx_eq(pos.y, 80.0));
        assert!(approx_eq(alpha, 0.5));
        assert!(!done);
        let (_, alpha, done) = f.tick(0.4);
        assert!(approx_eq(alpha, 0.0));
        assert!(done);
    }

    #[test]
    fn wiggle_follows_sine() {
        let mut w = Wiggle::new(4.0, 0.1);
        let r = w.tick(std::f32::consts::FRAC_PI_2 * 0.1);
        assert!(approx_eq(r, 4.0));
        let mut still = Wiggle::new(0.0, 0.1);
        assert!(approx_eq(still.tick(0.3), 0.0));
    }

    #[test]
    fn grow_in_reaches_end_scale() {
        let mut g = GrowIn::new(0.5, 2.0);
        let (s, done) = g.tick(0.25);
        assert!(approx_eq(s, 1.0) && !done);
        let (s, done) = g.tick(0.5);
        assert!(approx_eq(s, 2.0) && done);
    }

    #[test]
    fn wobble_scales_with_factor_and_resets() {
        let mut w = WeaponWobble::default();
        let still = w.tick(0.1, 0.0);
        assert!(approx_eq(still.x, 0.0) && approx_eq(still.y, 0.0));
        assert!(w.time_x > 0.0);
        assert!(approx_eq(w.time_y, w.time_x * 2.0));
        w.reset();
        assert!(approx_eq(w.time_x, 0.0));
    }
}
