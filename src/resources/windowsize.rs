//! Window size resource.
//!
//! The OS window may differ from the internal render resolution. The final
//! blit scales the render target into the window with bars on the short
//! side.

use bevy_ecs::prelude::Resource;
use raylib::prelude::*;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WindowSize {
    pub w: i32,
    pub h: i32,
}

impl WindowSize {
    /// Destination rectangle that fits `game_width`x`game_height` into the
    /// window, centred and with the aspect ratio kept.
    pub fn calculate_letterbox(&self, game_width: u32, game_height: u32) -> Rectangle {
        let (game_w, game_h) = (game_width.max(1) as f32, game_height.max(1) as f32);
        let (window_w, window_h) = (self.w as f32, self.h as f32);
        let scale = (window_w / game_w).min(window_h / game_h);
        let (width, height) = (game_w * scale, game_h * scale);
        Rectangle::new(
            (window_w - width) * 0.5,
            (window_h - height) * 0.5,
            width,
            height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_window_gets_side_bars() {
        let w = WindowSize { w: 1920, h: 720 };
        let r = w.calculate_letterbox(1280, 720);
        assert_eq!(r.width, 1280.0);
        assert_eq!(r.x, 320.0);
    }

    #[test]
    fn tall_window_gets_top_bars() {
        let w = WindowSize { w: 1280, h: 1000 };
        let r = w.calculate_letterbox(1280, 720);
        assert_eq!(r.height, 720.0);
        assert_eq!(r.y, 140.0);
    }
}
