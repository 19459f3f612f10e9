//! Input systems.
//!
//! [`update_input_state`] reads hardware input from Raylib each frame and
//! writes the results into [`PlayerInputs`]: one snapshot per device plus the
//! merged menu buttons. Pressing the debug key triggers a
//! [`SwitchDebugEvent`](crate::events::switchdebug::SwitchDebugEvent).
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::{
    DeviceInput, InputDevice, KeyboardBindings, MAX_GAMEPADS, PlayerInputs, dead_zone, key_axis,
};

/// Pixels of mouse travel that count as one unit of aim input.
pub const MOUSE_SENSITIVITY: f32 = 0.02;
/// Stick values below this length are ignored.
pub const STICK_DEAD_ZONE: f32 = 0.2;

fn poll_keyboard(rl: &RaylibHandle, keys: &KeyboardBindings, dev: &mut DeviceInput) {
    let down = |k: KeyboardKey| rl.is_key_down(k);
    dev.connected = true;
    dev.move_axis = Vector2::new(
        key_axis(down(keys.left), down(keys.right)),
        key_axis(down(keys.backward), down(keys.forward)),
    );
    dev.aim_keyboard = Vector2::new(
        key_axis(down(keys.aim_left), down(keys.aim_right)),
        key_axis(down(keys.aim_down), down(keys.aim_up)),
    );
    let mouse = rl.get_mouse_delta();
    dev.aim_mouse = Vector2::new(mouse.x * MOUSE_SENSITIVITY, -mouse.y * MOUSE_SENSITIVITY);
    dev.aim_analog = Vector2::zero();
    dev.jump.update(down(keys.jump));
    dev.fire
        .update(down(keys.fire) || rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT));
    dev.back.update(down(keys.back));
    dev.reset.update(down(keys.reset));
    dev.start.update(down(keys.start));
}

fn poll_gamepad(rl: &RaylibHandle, pad: i32, dev: &mut DeviceInput) {
    dev.connected = rl.is_gamepad_available(pad);
    if !dev.connected {
        *dev = DeviceInput::default();
        return;
    }
    let axis = |a: GamepadAxis| rl.get_gamepad_axis_movement(pad, a);
    let button = |b: GamepadButton| rl.is_gamepad_button_down(pad, b);
    // stick y grows downward
    dev.move_axis = dead_zone(
        Vector2::new(
            axis(GamepadAxis::GAMEPAD_AXIS_LEFT_X),
            -axis(GamepadAxis::GAMEPAD_AXIS_LEFT_Y),
        ),
        STICK_DEAD_ZONE,
    );
    dev.aim_analog = dead_zone(
        Vector2::new(
            axis(GamepadAxis::GAMEPAD_AXIS_RIGHT_X),
            -axis(GamepadAxis::GAMEPAD_AXIS_RIGHT_Y),
        ),
        STICK_DEAD_ZONE,
    );
    dev.aim_mouse = Vector2::zero();
    dev.aim_keyboard = Vector2::zero();
    dev.jump
        .update(button(GamepadButton::GAMEPAD_BUTTON_RIGHT_FACE_DOWN));
    dev.back
        .update(button(GamepadButton::GAMEPAD_BUTTON_RIGHT_FACE_RIGHT));
    dev.fire
        .update(button(GamepadButton::GAMEPAD_BUTTON_RIGHT_TRIGGER_1));
    dev.reset
        .update(button(GamepadButton::GAMEPAD_BUTTON_MIDDLE_LEFT));
    dev.start
        .update(button(GamepadButton::GAMEPAD_BUTTON_MIDDLE_RIGHT));
}

/// Poll Raylib for keyboard, mouse and gamepad input and update the
/// `PlayerInputs` resource.
pub fn update_input_state(
    mut input: ResMut<PlayerInputs>,
    rl: NonSendMut<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    let keys = input.bindings;
    poll_keyboard(&rl, &keys, input.device_mut(InputDevice::Keyboard));
    for pad in 0..MAX_GAMEPADS {
        poll_gamepad(&rl, pad, input.device_mut(InputDevice::Gamepad(pad)));
    }

    let devices = input.devices;
    let connected = devices.iter().filter(|d| d.connected);
    let (mut submit, mut cancel, mut start) = (false, false, false);
    for d in connected {
        submit |= d.jump.active || d.start.active;
        cancel |= d.back.active;
        start |= d.start.active;
    }
    let pad_down = |b: GamepadButton| {
        (0..MAX_GAMEPADS).any(|pad| rl.is_gamepad_available(pad) && rl.is_gamepad_button_down(pad, b))
    };

    input.submit_all.update(submit);
    input.cancel_all.update(cancel);
    input.start_all.update(start);
    input.escape.update(rl.is_key_down(keys.escape));
    input.debug_toggle.update(rl.is_key_down(keys.debug));
    input.fullscreen_toggle.update(rl.is_key_down(keys.fullscreen));
    input.menu_up.update(
        rl.is_key_down(keys.forward)
            || rl.is_key_down(keys.aim_up)
            || pad_down(GamepadButton::GAMEPAD_BUTTON_LEFT_FACE_UP),
    );
    input.menu_down.update(
        rl.is_key_down(keys.backward)
            || rl.is_key_down(keys.aim_down)
            || pad_down(GamepadButton::GAMEPAD_BUTTON_LEFT_FACE_DOWN),
    );

    if input.debug_toggle.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
}
