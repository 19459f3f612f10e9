//! Audio commands and status messages.
//!
//! [`AudioCmd`] travels from the ECS to the audio thread; [`AudioMessage`]
//! comes back. Both are bevy messages so gameplay systems can write commands
//! with a `MessageWriter<AudioCmd>` and never touch the channel directly.
//!
//! Sound effects are played on named *voices*: `"p1.main"`, `"p1.sub"`,
//! `"p1.explode"` and so on, one per sound source on an actor. Starting a
//! sound on a voice stops whatever that voice was playing.

use bevy_ecs::message::Message;

/// Commands sent *to* the audio thread
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    LoadFx { id: String, path: String },
    PlayVoice {
        voice: String,
        fx: String,
        volume: f32,
        pitch: f32,
        looped: bool,
    },
    StopVoice { voice: String },
    Shutdown,
}

impl AudioCmd {
    /// One-shot effect on a voice at normal pitch.
    pub fn voice(voice: impl Into<String>, fx: impl Into<String>, volume: f32) -> Self {
        AudioCmd::PlayVoice {
            voice: voice.into(),
            fx: fx.into(),
            volume,
            pitch: 1.0,
            looped: false,
        }
    }

    pub fn stop(voice: impl Into<String>) -> Self {
        AudioCmd::StopVoice {
            voice: voice.into(),
        }
    }
}

/// Name of a per-player voice, e.g. `voice_name(0, "main") == "p1.main"`.
pub fn voice_name(player: usize, source: &str) -> String {
    format!("p{}.{}", player + 1, source)
}

/// Events sent *back* from the audio thread
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioMessage {
    FxLoaded { id: String },
    FxLoadFailed { id: String, error: String },
    /// A one-shot voice finished playing.
    VoiceFinished { voice: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_names_are_one_based() {
        assert_eq!(voice_name(0, "main"), "p1.main");
        assert_eq!(voice_name(5, "explode"), "p6.explode");
    }

    #[test]
    fn voice_helper_defaults() {
        let cmd = AudioCmd::voice("p1.sub", "wall", 0.6);
        assert_eq!(
            cmd,
            AudioCmd::PlayVoice {
                voice: "p1.sub".into(),
                fx: "wall".into(),
                volume: 0.6,
                pitch: 1.0,
                looped: false
            }
        );
    }
}
