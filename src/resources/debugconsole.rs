//! On-screen debug console.
//!
//! Systems that want to show live values open a channel once and overwrite
//! its text every frame. The console prints a header followed by every
//! channel, lowest priority first (ties keep creation order).

use bevy_ecs::prelude::Resource;
use log::warn;

#[derive(Clone, Debug, Default)]
pub struct DebugChannel {
    pub priority: i32,
    pub contents: String,
}

#[derive(Resource, Clone, Debug)]
pub struct DebugConsole {
    pub header: String,
    pub channels: Vec<DebugChannel>,
    pub visible: bool,
}

impl Default for DebugConsole {
    fn default() -> Self {
        Self {
            header: "== CLOTHES COMBAT DEBUG ==".to_string(),
            channels: Vec::new(),
            visible: false,
        }
    }
}

impl DebugConsole {
    /// Open a new channel and return its index.
    pub fn create_channel(&mut self, priority: i32) -> usize {
        self.channels.push(DebugChannel {
            priority,
            contents: String::new(),
        });
        self.channels.len() - 1
    }

    pub fn set_channel_text(&mut self, index: usize, text: impl Into<String>) {
        match self.channels.get_mut(index) {
            Some(channel) => channel.contents = text.into(),
            None => warn!("Debug console has no channel {}", index),
        }
    }

    pub fn clear(&mut self) {
        self.channels.clear();
    }

    /// Full console text.
    pub fn text(&self) -> String {
        let mut sorted: Vec<&DebugChannel> = self.channels.iter().collect();
        sorted.sort_by_key(|c| c.priority);
        let mut out = String::with_capacity(self.header.len() + 1);
        out.push_str(&self.header);
        out.push('\n');
        for channel in sorted {
            out.push_str(&channel.contents);
            out.push('\n');
        }
        out
    }
}
