//! Audio thread bridge and the game's sound bank.
//!
//! [`setup_audio`] spawns the audio thread and inserts the [`AudioBridge`]
//! plus both message queues. [`queue_sound_bank`] asks the thread to load
//! every effect the game plays. [`shutdown_audio`] stops and joins the thread
//! at exit.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::systems::audio::audio_thread;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::debug;

/// Effect ids used by gameplay, with their file names under `assets/audio`.
pub const SOUND_BANK: &[(&str, &str)] = &[
    (fx::CHARGE_UP, "charge_up.wav"),
    (fx::CHARGE_HOLD, "charge_hold.wav"),
    (fx::THROW, "throw.wav"),
    (fx::EXPLODE, "throw_full.wav"),
    (fx::HIT, "hit.wav"),
    (fx::WALL, "wall.wav"),
    (fx::COLLECT, "collect.wav"),
    (fx::SELECT, "select.wav"),
];

/// Effect ids.
pub mod fx {
    pub const CHARGE_UP: &str = "charge_up";
    pub const CHARGE_HOLD: &str = "charge_hold";
    pub const THROW: &str = "throw";
    pub const EXPLODE: &str = "explode";
    pub const HIT: &str = "hit";
    pub const WALL: &str = "wall";
    pub const COLLECT: &str = "collect";
    pub const SELECT: &str = "select";
}

/// Shared bridge between the ECS world and the audio thread.
#[derive(Resource)]
pub struct AudioBridge {
    /// ECS -> audio thread.
    pub tx_cmd: Sender<AudioCmd>,
    /// Audio thread -> ECS.
    pub rx_msg: Receiver<AudioMessage>,
    pub handle: std::thread::JoinHandle<()>,
}

/// Spawn the audio thread and register bridge resources.
pub fn setup_audio(world: &mut World) {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let (tx_msg, rx_msg) = unbounded::<AudioMessage>();

    let handle = std::thread::spawn(move || audio_thread(rx_cmd, tx_msg));

    world.insert_resource(AudioBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
    world.insert_resource(Messages::<AudioMessage>::default());
    world.insert_resource(Messages::<AudioCmd>::default());
}

/// Write a `LoadFx` command for every entry of [`SOUND_BANK`].
pub fn queue_sound_bank(world: &mut World, base_dir: &str) {
    let Some(mut msgs) = world.get_resource_mut::<Messages<AudioCmd>>() else {
        return;
    };
    for (id, file) in SOUND_BANK {
        msgs.write(AudioCmd::LoadFx {
            id: id.to_string(),
            path: format!("{}/{}", base_dir, file),
        });
    }
    debug!("Queued {} sound effects from {}", SOUND_BANK.len(), base_dir);
}

/// Request shutdown of the audio thread and join it.
pub fn shutdown_audio(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AudioBridge>() {
        let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}
