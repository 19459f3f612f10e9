//! Per-frame input resource.
//!
//! Every input device (the keyboard/mouse pair and up to four gamepads) gets
//! its own [`DeviceInput`] snapshot so each split-screen player reads only
//! the device assigned to them. Menu screens read the merged global buttons
//! instead. [`update_input_state`](crate::systems::input::update_input_state)
//! fills the resource once per frame.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

/// Gamepads polled besides the keyboard.
pub const MAX_GAMEPADS: i32 = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum InputDevice {
    /// Keyboard plus mouse.
    #[default]
    Keyboard,
    Gamepad(i32),
}

impl InputDevice {
    pub const ALL: [InputDevice; 1 + MAX_GAMEPADS as usize] = [
        InputDevice::Keyboard,
        InputDevice::Gamepad(0),
        InputDevice::Gamepad(1),
        InputDevice::Gamepad(2),
        InputDevice::Gamepad(3),
    ];

    /// Slot of this device in [`PlayerInputs::devices`].
    pub fn index(self) -> usize {
        match self {
            InputDevice::Keyboard => 0,
            InputDevice::Gamepad(pad) => 1 + pad.clamp(0, MAX_GAMEPADS - 1) as usize,
        }
    }

    pub fn label(self) -> String {
        match self {
            InputDevice::Keyboard => "Keyboard".to_string(),
            InputDevice::Gamepad(pad) => format!("Gamepad {}", pad + 1),
        }
    }
}

/// Digital button state with edge detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Whether the button is held this frame.
    pub active: bool,
    /// Whether the button went down this frame.
    pub just_pressed: bool,
    /// Whether the button went up this frame.
    pub just_released: bool,
}

impl ButtonState {
    /// Feed the raw held state for this frame; edges come from comparing with
    /// the previous frame.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Snapshot of one device.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceInput {
    pub connected: bool,
    /// x = strafe right, y = forward. Each axis in `[-1, 1]`.
    pub move_axis: Vector2,
    /// Mouse delta this frame; y positive looks up.
    pub aim_mouse: Vector2,
    pub aim_keyboard: Vector2,
    pub aim_analog: Vector2,
    pub jump: ButtonState,
    pub fire: ButtonState,
    pub back: ButtonState,
    pub reset: ButtonState,
    pub start: ButtonState,
}

/// Keys used by the keyboard player and the global menu actions.
#[derive(Debug, Clone, Copy)]
pub struct KeyboardBindings {
    pub forward: KeyboardKey,
    pub backward: KeyboardKey,
    pub left: KeyboardKey,
    pub right: KeyboardKey,
    pub aim_up: KeyboardKey,
    pub aim_down: KeyboardKey,
    pub aim_left: KeyboardKey,
    pub aim_right: KeyboardKey,
    pub jump: KeyboardKey,
    pub fire: KeyboardKey,
    pub reset: KeyboardKey,
    pub back: KeyboardKey,
    pub start: KeyboardKey,
    pub escape: KeyboardKey,
    pub debug: KeyboardKey,
    pub fullscreen: KeyboardKey,
}

impl Default for KeyboardBindings {
    fn default() -> Self {
        Self {
            forward: KeyboardKey::KEY_W,
            backward: KeyboardKey::KEY_S,
            left: KeyboardKey::KEY_A,
            right: KeyboardKey::KEY_D,
            aim_up: KeyboardKey::KEY_UP,
            aim_down: KeyboardKey::KEY_DOWN,
            aim_left: KeyboardKey::KEY_LEFT,
            aim_right: KeyboardKey::KEY_RIGHT,
            jump: KeyboardKey::KEY_SPACE,
            fire: KeyboardKey::KEY_E,
            reset: KeyboardKey::KEY_R,
            back: KeyboardKey::KEY_BACKSPACE,
            start: KeyboardKey::KEY_ENTER,
            escape: KeyboardKey::KEY_ESCAPE,
            debug: KeyboardKey::KEY_F11,
            fullscreen: KeyboardKey::KEY_F10,
        }
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInputs {
    pub devices: [DeviceInput; 1 + MAX_GAMEPADS as usize],
    pub bindings: KeyboardBindings,
    /// Submit on any device (Enter, Space or a gamepad A).
    pub submit_all: ButtonState,
    /// Cancel on any device (Backspace or a gamepad B).
    pub cancel_all: ButtonState,
    /// Start on any device.
    pub start_all: ButtonState,
    pub escape: ButtonState,
    pub debug_toggle: ButtonState,
    pub fullscreen_toggle: ButtonState,
    pub menu_up: ButtonState,
    pub menu_down: ButtonState,
}

impl PlayerInputs {
    pub fn device(&self, device: InputDevice) -> &DeviceInput {
        &self.devices[device.index()]
    }

    pub fn device_mut(&mut self, device: InputDevice) -> &mut DeviceInput {
        &mut self.devices[device.index()]
    }

    pub fn connected(&self) -> Vec<InputDevice> {
        InputDevice::ALL
            .into_iter()
            .filter(|d| self.device(*d).connected)
            .collect()
    }
}

/// Maps two opposing keys to an axis value.
pub fn key_axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

/// Zeroes analog input inside the stick dead zone.
pub fn dead_zone(v: Vector2, threshold: f32) -> Vector2 {
    if (v.x * v.x + v.y * v.y).sqrt() < threshold {
        Vector2::zero()
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_edges() {
        let mut b = ButtonState::default();
        b.update(true);
        assert!(b.active && b.just_pressed && !b.just_released);
        b.update(true);
        assert!(b.active && !b.just_pressed);
        b.update(false);
        assert!(!b.active && b.just_released);
        b.update(false);
        assert!(!b.just_released);
    }

    #[test]
    fn device_indices_are_distinct() {
        let idx: Vec<usize> = InputDevice::ALL.iter().map(|d| d.index()).collect();
        assert_eq!(idx, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn keyboard_axis_cancels_out() {
        assert_eq!(key_axis(true, true), 0.0);
        assert_eq!(key_axis(true, false), -1.0);
        assert_eq!(key_axis(false, true), 1.0);
    }

    #[test]
    fn dead_zone_filters_small_values() {
        let v = dead_zone(Vector2::new(0.05, 0.05), 0.2);
        assert_eq!(v.x, 0.0);
        let v = dead_zone(Vector2::new(0.5, 0.0), 0.2);
        assert_eq!(v.x, 0.5);
    }

    #[test]
    fn default_bindings() {
        let input = PlayerInputs::default();
        assert_eq!(input.bindings.forward, KeyboardKey::KEY_W);
        assert_eq!(input.bindings.debug, KeyboardKey::KEY_F11);
        assert!(input.connected().is_empty());
    }
}
