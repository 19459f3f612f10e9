//! Audio system implementation backed by a dedicated thread and Raylib.
//!
//! This module hosts the background audio thread and the systems that bridge
//! it with the ECS world:
//! - [`audio_thread`] runs on its own OS thread, owns the Raylib audio device,
//!   and processes [`AudioCmd`](crate::events::audio::AudioCmd) messages,
//!   emitting [`AudioMessage`](crate::events::audio::AudioMessage) responses.
//! - [`poll_audio_messages`] non-blockingly drains the audio thread's
//!   receiver into the ECS message queue each frame.
//! - [`forward_audio_cmds`] hands commands written by gameplay systems to the
//!   thread.
//!
//! Sound effects play on named voices. Each voice owns its own `Sound`
//! instance so two players can fire the same effect at once; starting a new
//! effect on a voice stops the previous one.
//!
//! See also: [`crate::events::audio`] and [`crate::resources::audio`].

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;
use bevy_ecs::prelude::{MessageReader, MessageWriter, Messages, Res, ResMut};
use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info, warn};
use raylib::core::audio::{RaylibAudio, Sound};
use rustc_hash::FxHashMap;

/// Drain any pending messages from the audio thread into the ECS
/// [`Messages<AudioMessage>`] mailbox.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Advance the ECS message queue for [`AudioMessage`].
///
/// Run this after [`poll_audio_messages`] in the schedule.
pub fn update_bevy_audio_messages(mut events: ResMut<Messages<AudioMessage>>) {
    events.update();
}

/// Forward ECS AudioCmd messages to the audio thread via the AudioBridge sender.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        // the thread may already be gone during shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for AudioCmd so same-frame readers can observe writes.
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// A playback slot. The sound is reloaded only when the voice switches to a
/// different effect.
struct Voice<'a> {
    fx: String,
    sound: Sound<'a>,
    looped: bool,
    playing: bool,
}

/// Start `fx` on `voice`, loading a fresh `Sound` when the voice last played
/// something else.
fn play_voice<'a, 'v>(
    audio: &'a RaylibAudio,
    voices: &'v mut FxHashMap<String, Voice<'a>>,
    fx_paths: &FxHashMap<String, String>,
    voice: String,
    fx: String,
) -> Option<&'v mut Voice<'a>> {
    if voices.get(&voice).is_some_and(|v| v.fx == fx) {
        return voices.get_mut(&voice);
    }
    let Some(path) = fx_paths.get(&fx) else {
        debug!("[audio] voice '{}' skipped, fx '{}' not loaded", voice, fx);
        return None;
    };
    let sound = match audio.new_sound(path) {
        Ok(sound) => sound,
        Err(e) => {
            warn!("[audio] voice '{}' failed to load '{}': {}", voice, fx, e);
            return None;
        }
    };
    if let Some(old) = voices.remove(&voice) {
        old.sound.stop();
    }
    let slot = voices.entry(voice).or_insert(Voice {
        fx,
        sound,
        looped: false,
        playing: false,
    });
    Some(slot)
}

/// Entry point of the dedicated audio thread.
///
/// Owns every `Sound` handle, reacts to [`AudioCmd`] inputs and reports back
/// with [`AudioMessage`]s. Looped voices restart when they run out.
///
/// Blocks until it receives [`AudioCmd::Shutdown`].
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_evt: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            error!("Failed to initialize audio device: {}", e);
            return;
        }
    };

    info!(
        "[audio] thread starting (id={:?})",
        std::thread::current().id()
    );

    let mut fx_paths: FxHashMap<String, String> = FxHashMap::default();
    let mut voices: FxHashMap<String, Voice> = FxHashMap::default();

    'run: loop {
        for cmd in rx_cmd.try_iter() {
            match cmd {
                AudioCmd::LoadFx { id, path } => {
                    // decode once so a bad path is reported at load time
                    match audio.new_sound(&path) {
                        Ok(_) => {
                            debug!("[audio] fx loaded id='{}' path='{}'", id, path);
                            fx_paths.insert(id.clone(), path);
                            let _ = tx_evt.send(AudioMessage::FxLoaded { id });
                        }
                        Err(e) => {
                            warn!(
                                "[audio] fx load failed id='{}' path='{}' error='{}'",
                                id, path, e
                            );
                            let _ = tx_evt.send(AudioMessage::FxLoadFailed {
                                id,
                                error: e.to_string(),
                            });
                        }
                    }
                }
                AudioCmd::PlayVoice {
                    voice,
                    fx,
                    volume,
                    pitch,
                    looped,
                } => {
                    if let Some(v) = play_voice(&audio, &mut voices, &fx_paths, voice, fx) {
                        v.sound.stop();
                        v.sound.set_volume(volume);
                        v.sound.set_pitch(pitch);
                        v.sound.play();
                        v.looped = looped;
                        v.playing = true;
                    }
                }
                AudioCmd::StopVoice { voice } => {
                    if let Some(v) = voices.get_mut(&voice) {
                        v.sound.stop();
                        v.playing = false;
                        v.looped = false;
                    }
                }
                AudioCmd::Shutdown => {
                    info!("[audio] shutdown requested");
                    break 'run;
                }
            }
        }

        // restart loops, report finished one-shots once
        for (name, v) in voices.iter_mut() {
            if !v.playing || v.sound.is_playing() {
                continue;
            }
            if v.looped {
                v.sound.play();
            } else {
                v.playing = false;
                let _ = tx_evt.send(AudioMessage::VoiceFinished {
                    voice: name.clone(),
                });
            }
        }

        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    voices.clear();
    info!(
        "[audio] thread exiting (id={:?})",
        std::thread::current().id()
    );
}
