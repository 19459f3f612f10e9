//! Event and observer to toggle debug visualization.
//!
//! Emitting a [`SwitchDebugEvent`] flips the presence of the [`DebugMode`]
//! resource and the debug console visibility with it.
use crate::resources::debugconsole::DebugConsole;
use crate::resources::debugmode::DebugMode;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchDebugEvent {}

pub fn switch_debug_observer(
    _trigger: On<SwitchDebugEvent>,
    mut commands: Commands,
    debug_mode: Option<Res<DebugMode>>,
    console: Option<ResMut<DebugConsole>>,
) {
    let enable = debug_mode.is_none();
    if enable {
        commands.insert_resource(DebugMode {});
    } else {
        commands.remove_resource::<DebugMode>();
    }
    if let Some(mut console) = console {
        console.visible = enable;
    }
    info!("Debug mode {}", if enable { "enabled" } else { "disabled" });
}
