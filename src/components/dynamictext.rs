use bevy_ecs::prelude::Component;
use raylib::prelude::Color;

/// Screen text whose content changes at runtime (labels, counters, the
/// debug console). Drawn with the default raylib font.
#[derive(Component, Clone, Debug)]
pub struct DynamicText {
    pub content: String,
    /// Font size in pixels.
    pub font_size: f32,
    pub color: Color,
    /// Draw centred on the position instead of from the top-left.
    pub centered: bool,
}

impl DynamicText {
    pub fn new(content: impl Into<String>, font_size: f32, color: Color) -> Self {
        Self {
            content: content.into(),
            font_size,
            color,
            centered: false,
        }
    }

    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    pub fn set_content(&mut self, new_content: impl Into<String>) {
        self.content = new_content.into();
    }
}
