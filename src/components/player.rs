//! Player controller components.
//!
//! A player entity carries [`Player`] (identity, input and ground state),
//! [`CameraRig`] (view offset and charge screen shake) and a
//! [`ChargeWeapon`](super::weapon::ChargeWeapon). The movement rules live here
//! as plain functions so they can be checked without a world.

use bevy_ecs::prelude::{Component, Entity};
use raylib::prelude::{Vector2, Vector3};

use crate::math;
use crate::resources::gameconfig::PlayerTuning;
use crate::resources::input::InputDevice;

/// Which of the two player models was rolled at spawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Outfit {
    #[default]
    Classic,
    Alternate,
}

#[derive(Component, Clone, Debug)]
pub struct Player {
    /// Slot index, also the index of the player's own colour.
    pub id: usize,
    pub device: InputDevice,
    /// Colour index of the shirt currently worn. Starts as `id` and changes
    /// to the attacker's colour when hit.
    pub shirt_team: usize,
    pub outfit: Outfit,
    pub spawn_point: Vector3,
    pub move_input: Vector2,
    pub aim_input: Vector2,
    pub on_ground: bool,
    /// Feet box touched the ground this step.
    pub bottom_triggered: bool,
    pub is_sliding: bool,
    pub ground_normal: Vector3,
    pub ground_angle: f32,
    pub jump_disable_timer: f32,
    /// Hit impulse added on top of the next physics step's velocity.
    pub knockback: Vector3,
    pub active_speed: f32,
    pub is_moving: bool,
    /// Scales the weapon sprite wobble; follows forward input and charge.
    pub wobble_factor: f32,
    /// HUD entity drawn over this player's view.
    pub hud: Option<Entity>,
    pub debug_channel: Option<usize>,
}

impl Player {
    pub fn new(id: usize, device: InputDevice, spawn_point: Vector3) -> Self {
        Self {
            id,
            device,
            shirt_team: id,
            outfit: Outfit::Classic,
            spawn_point,
            move_input: Vector2::zero(),
            aim_input: Vector2::zero(),
            on_ground: false,
            bottom_triggered: false,
            is_sliding: false,
            ground_normal: math::UP,
            ground_angle: 0.0,
            jump_disable_timer: 0.0,
            knockback: Vector3::zero(),
            active_speed: 0.0,
            is_moving: false,
            wobble_factor: 0.0,
            hud: None,
            debug_channel: None,
        }
    }

    pub fn with_outfit(mut self, outfit: Outfit) -> Self {
        self.outfit = outfit;
        self
    }

    pub fn with_hud(mut self, hud: Entity) -> Self {
        self.hud = Some(hud);
        self
    }

    pub fn tick_jump_timer(&mut self, dt: f32) {
        self.jump_disable_timer = (self.jump_disable_timer - dt).max(0.0);
    }
}

/// Movement speed for the given input: full speed forward or idle, reduced
/// when backing up, blended toward strafe speed by sideways input.
pub fn move_speed(tuning: &PlayerTuning, move_input: Vector2) -> f32 {
    let mut speed = if move_input.y >= 0.0 {
        tuning.base_move_speed
    } else {
        tuning.base_move_speed * tuning.back_speed_ratio
    };
    if move_input.length() > 0.0 {
        speed = math::lerp_f32(
            speed,
            tuning.base_move_speed * tuning.strafe_speed_ratio,
            move_input.x.abs(),
        );
    }
    speed
}

/// World velocity from planar input rotated by yaw, keeping `vertical`.
pub fn planar_velocity(yaw: f32, move_input: Vector2, speed: f32, vertical: f32) -> Vector3 {
    math::rotate_by_yaw(
        Vector3::new(move_input.x * speed, vertical, move_input.y * speed),
        yaw,
    )
}

/// Re-aim `velocity` along the ground plane, keeping its magnitude.
pub fn project_on_ground(velocity: Vector3, normal: Vector3) -> Vector3 {
    let speed = velocity.length();
    if speed <= f32::EPSILON {
        return velocity;
    }
    let side = normal.cross(velocity.normalized());
    side.cross(normal) * speed
}

/// Gravity stays on while airborne or standing on a slope too steep to hold.
pub fn needs_gravity(on_ground: bool, ground_angle: f32, max_slope_angle: f32) -> bool {
    !on_ground || ground_angle > max_slope_angle
}

/// Wobble factor of the weapon sprite.
pub fn wobble_factor(move_input: Vector2, charge_ratio: f32) -> f32 {
    (move_input.y * (1.0 - math::clamp01(charge_ratio))).abs()
}

/// Picks the active aim vector: mouse first, then keyboard, then analog.
/// The vertical component is scaled by `vertical_ratio`.
pub fn resolve_aim(
    mouse: Vector2,
    keyboard: Vector2,
    analog: Vector2,
    tuning: &PlayerTuning,
) -> Vector2 {
    let mouse = if tuning.enable_mouse_aim {
        mouse
    } else {
        Vector2::zero()
    };
    let keyboard = if tuning.enable_keyboard_aim {
        keyboard
    } else {
        Vector2::zero()
    };
    let analog = if tuning.enable_analog_aim {
        analog
    } else {
        Vector2::zero()
    };
    let mut aim = if mouse.length() > 0.0 {
        Vector2::new(mouse.x * tuning.mouse_aim_speed, mouse.y * tuning.mouse_aim_speed)
    } else if keyboard.length() > 0.0 {
        Vector2::new(
            keyboard.x * tuning.keyboard_aim_speed,
            keyboard.y * tuning.keyboard_aim_speed,
        )
    } else {
        Vector2::new(
            analog.x * tuning.analog_aim_speed,
            analog.y * tuning.analog_aim_speed,
        )
    };
    aim.y *= tuning.aim_vertical_ratio;
    aim
}

/// Player camera placement and the screen shake that builds up while
/// charging.
#[derive(Component, Clone, Debug)]
pub struct CameraRig {
    /// Resting eye offset above the body centre.
    pub saved_offset: f32,
    /// Current eye offset including shake.
    pub offset: f32,
    pub shake_level: u8,
    pub shake_timer: f32,
    /// After a throw the shake is suspended for this many seconds.
    pub last_shake_timer: f32,
    pub is_last_shaking: bool,
}

impl CameraRig {
    pub fn new(eye_height: f32) -> Self {
        Self {
            saved_offset: eye_height,
            offset: eye_height,
            shake_level: 0,
            shake_timer: 0.0,
            last_shake_timer: 0.0,
            is_last_shaking: false,
        }
    }

    /// Start the post-throw pause.
    pub fn start_last_shake(&mut self, duration: f32) {
        self.last_shake_timer = duration;
        self.is_last_shaking = true;
    }

    /// Advance the shake oscillation.
    pub fn update_shake(&mut self, dt: f32, amplitude: f32, frequency: f32) {
        if self.is_last_shaking {
            self.last_shake_timer -= dt;
            if self.last_shake_timer <= 0.0 {
                self.last_shake_timer = 0.0;
                self.is_last_shaking = false;
            }
            return;
        }
        let amp = match self.shake_level {
            1 => amplitude / 3.0,
            2 => amplitude,
            _ => {
                self.offset = self.saved_offset;
                self.shake_timer = 0.0;
                return;
            }
        };
        self.shake_timer += dt;
        let phase = if frequency > 0.0 {
            (self.shake_timer / frequency).sin()
        } else {
            0.0
        };
        self.offset = math::lerp_unclamped(self.saved_offset - amp, self.saved_offset + amp, phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn tuning() -> PlayerTuning {
        PlayerTuning::default()
    }

    #[test]
    fn idle_and_forward_use_base_speed() {
        let t = tuning();
        assert!(approx_eq(move_speed(&t, Vector2::zero()), 13.0));
        assert!(approx_eq(move_speed(&t, Vector2::new(0.0, 1.0)), 13.0));
    }

    #[test]
    fn backwards_is_slower() {
        let t = tuning();
        assert!(approx_eq(move_speed(&t, Vector2::new(0.0, -1.0)), 13.0 * 0.6));
    }

    #[test]
    fn full_strafe_uses_strafe_ratio() {
        let t = tuning();
        assert!(approx_eq(move_speed(&t, Vector2::new(1.0, 0.0)), 13.0 * 0.85));
        assert!(approx_eq(move_speed(&t, Vector2::new(-1.0, 0.0)), 13.0 * 0.85));
    }

    #[test]
    fn planar_velocity_keeps_vertical() {
        let v = planar_velocity(0.0, Vector2::new(0.0, 1.0), 10.0, -3.0);
        assert!(approx_eq(v.z, 10.0));
        assert!(approx_eq(v.y, -3.0));
    }

    #[test]
    fn projection_on_flat_ground_is_identity() {
        let v = Vector3::new(3.0, 0.0, 4.0);
        let p = project_on_ground(v, math::UP);
        assert!(approx_eq(p.x, 3.0) && approx_eq(p.y, 0.0) && approx_eq(p.z, 4.0));
    }

    #[test]
    fn projection_on_slope_keeps_magnitude_and_lies_on_plane() {
        let n = Vector3::new(0.0, 1.0, -1.0).normalized();
        let v = Vector3::new(0.0, 0.0, 5.0);
        let p = project_on_ground(v, n);
        assert!(approx_eq(p.length(), 5.0));
        assert!(approx_eq(p.dot(n), 0.0));
        assert!(p.y > 0.0);
    }

    #[test]
    fn gravity_rules() {
        assert!(needs_gravity(false, 0.0, 70.0));
        assert!(!needs_gravity(true, 10.0, 70.0));
        assert!(needs_gravity(true, 75.0, 70.0));
    }

    #[test]
    fn aim_priority_mouse_keyboard_analog() {
        let t = tuning();
        let a = resolve_aim(
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 1.0),
            Vector2::new(1.0, 1.0),
            &t,
        );
        assert!(approx_eq(a.x, 5.0) && approx_eq(a.y, 0.0));

        let a = resolve_aim(Vector2::zero(), Vector2::new(0.0, 1.0), Vector2::new(1.0, 1.0), &t);
        assert!(approx_eq(a.x, 0.0) && approx_eq(a.y, 3.5));

        let a = resolve_aim(Vector2::zero(), Vector2::zero(), Vector2::new(1.0, 1.0), &t);
        assert!(approx_eq(a.x, 7.0) && approx_eq(a.y, 3.5));
    }

    #[test]
    fn disabled_aim_sources_are_skipped() {
        let mut t = tuning();
        t.enable_mouse_aim = false;
        let a = resolve_aim(Vector2::new(1.0, 0.0), Vector2::zero(), Vector2::new(0.5, 0.0), &t);
        assert!(approx_eq(a.x, 3.5));
    }

    #[test]
    fn wobble_shrinks_with_charge() {
        assert!(approx_eq(wobble_factor(Vector2::new(0.0, -1.0), 0.0), 1.0));
        assert!(approx_eq(wobble_factor(Vector2::new(0.0, 1.0), 0.5), 0.5));
        assert!(approx_eq(wobble_factor(Vector2::new(0.0, 1.0), 2.0), 0.0));
    }

    #[test]
    fn shake_level_zero_restores_offset() {
        let mut rig = CameraRig::new(0.6);
        rig.shake_level = 2;
        rig.update_shake(0.01, 0.1, 0.02);
        assert!(!approx_eq(rig.offset, 0.6));
        rig.shake_level = 0;
        rig.update_shake(0.01, 0.1, 0.02);
        assert!(approx_eq(rig.offset, 0.6));
        assert!(approx_eq(rig.shake_timer, 0.0));
    }

    #[test]
    fn shake_level_one_is_a_third() {
        let mut rig = CameraRig::new(0.0);
        rig.shake_level = 1;
        // sin(t/f) == 1 when t/f == pi/2
        let f = 0.02;
        rig.update_shake(std::f32::consts::FRAC_PI_2 * f, 0.3, f);
        assert!(approx_eq(rig.offset, 0.1));
    }

    #[test]
    fn last_shake_suspends_oscillation() {
        let mut rig = CameraRig::new(0.5);
        rig.shake_level = 2;
        rig.start_last_shake(0.2);
        rig.update_shake(0.1, 1.0, 0.01);
        assert!(rig.is_last_shaking);
        assert!(approx_eq(rig.offset, 0.5));
        rig.update_shake(0.15, 1.0, 0.01);
        assert!(!rig.is_last_shaking);
    }

    #[test]
    fn jump_timer_stops_at_zero() {
        let mut p = Player::new(0, InputDevice::Keyboard, Vector3::zero());
        p.jump_disable_timer = 0.05;
        p.tick_jump_timer(0.1);
        assert!(approx_eq(p.jump_disable_timer, 0.0));
    }
}
