//! Render targets for fixed-resolution split-screen rendering.
//!
//! Every player view is drawn into its own texture ([`ViewTargets`]), the
//! views and the UI are composed into the main [`RenderTarget`] at the
//! internal resolution, and that is finally scaled into the window.
//!
//! Both hold GPU resources and live as NonSend resources on the main thread.

use raylib::ffi::{self, TextureFilter};
use raylib::prelude::*;

/// Columns and rows of the split-screen grid for `count` views.
pub fn split_grid(count: usize) -> (usize, usize) {
    match count {
        0 | 1 => (1, 1),
        2 => (2, 1),
        3 | 4 => (2, 2),
        _ => (3, 2),
    }
}

/// Screen rectangle of view `slot` out of `count`, in a `width`x`height`
/// target.
pub fn viewport_rect(slot: usize, count: usize, width: u32, height: u32) -> Rectangle {
    let (cols, rows) = split_grid(count);
    let w = width as f32 / cols as f32;
    let h = height as f32 / rows as f32;
    let col = slot % cols;
    let row = (slot / cols).min(rows - 1);
    Rectangle {
        x: col as f32 * w,
        y: row as f32 * h,
        width: w,
        height: h,
    }
}

/// Flipped source rectangle for drawing a render texture of the given size.
fn flipped_source(width: f32, height: f32) -> Rectangle {
    Rectangle {
        x: 0.0,
        y: 0.0,
        width,
        height: -height,
    }
}

fn apply_bilinear(texture: &RenderTexture2D) {
    unsafe {
        ffi::SetTextureFilter(
            texture.texture,
            TextureFilter::TEXTURE_FILTER_BILINEAR as i32,
        );
    }
}

/// Composed frame at the internal resolution.
pub struct RenderTarget {
    pub texture: RenderTexture2D,
    pub game_width: u32,
    pub game_height: u32,
}

impl RenderTarget {
    pub fn new(
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = rl
            .load_render_texture(th, width, height)
            .map_err(|e| format!("Failed to create render texture: {}", e))?;
        apply_bilinear(&texture);
        Ok(Self {
            texture,
            game_width: width,
            game_height: height,
        })
    }

    /// Recreate the render texture at a new resolution.
    pub fn recreate(
        &mut self,
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        width: u32,
        height: u32,
    ) -> Result<(), String> {
        let texture = rl
            .load_render_texture(th, width, height)
            .map_err(|e| format!("Failed to recreate render texture: {}", e))?;
        apply_bilinear(&texture);
        self.texture = texture;
        self.game_width = width;
        self.game_height = height;
        Ok(())
    }

    pub fn source_rect(&self) -> Rectangle {
        flipped_source(self.game_width as f32, self.game_height as f32)
    }
}

/// One texture per split-screen view.
pub struct ViewTargets {
    pub views: Vec<RenderTexture2D>,
    pub count: usize,
    pub view_width: u32,
    pub view_height: u32,
}

impl ViewTargets {
    /// Create `count` view textures sized for a `width`x`height` frame.
    pub fn new(
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        count: usize,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let rect = viewport_rect(0, count, width, height);
        let (vw, vh) = (rect.width.max(1.0) as u32, rect.height.max(1.0) as u32);
        let mut views = Vec::with_capacity(count);
        for i in 0..count {
            let texture = rl
                .load_render_texture(th, vw, vh)
                .map_err(|e| format!("Failed to create view texture {}: {}", i, e))?;
            apply_bilinear(&texture);
            views.push(texture);
        }
        Ok(Self {
            views,
            count,
            view_width: vw,
            view_height: vh,
        })
    }

    pub fn source_rect(&self) -> Rectangle {
        flipped_source(self.view_width as f32, self.view_height as f32)
    }
}
