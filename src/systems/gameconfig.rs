//! Game configuration change detection system.
//!
//! Monitors [`GameConfig`] for changes and applies settings to the window,
//! the render targets, the screen size and the physics step.

use crate::resources::gameconfig::GameConfig;
use crate::resources::input::PlayerInputs;
use crate::resources::rendertarget::{RenderTarget, ViewTargets};
use crate::resources::screensize::ScreenSize;
use crate::resources::worldtime::FixedTime;
use bevy_ecs::prelude::*;
use log::{error, info};
use raylib::ffi;

/// System that applies game configuration changes.
///
/// Runs every frame but only acts when [`GameConfig`] was added or modified:
/// - recreates the render target (and the split-screen views) at the new
///   internal resolution
/// - toggles fullscreen when the window disagrees with the config
/// - applies vsync and the target FPS
/// - copies the fixed step into [`FixedTime`]
pub fn apply_gameconfig_changes(
    maybe_config: Option<Res<GameConfig>>,
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    mut render_target: NonSendMut<RenderTarget>,
    mut views: Option<NonSendMut<ViewTargets>>,
    mut screen_size: ResMut<ScreenSize>,
    mut fixed: ResMut<FixedTime>,
) {
    let Some(config) = maybe_config else {
        return;
    };
    if !(config.is_changed() || config.is_added()) {
        return;
    }

    if render_target.game_width != config.render_width
        || render_target.game_height != config.render_height
    {
        info!(
            "Resizing render target: {}x{} -> {}x{}",
            render_target.game_width,
            render_target.game_height,
            config.render_width,
            config.render_height
        );
        if let Err(e) =
            render_target.recreate(&mut rl, &th, config.render_width, config.render_height)
        {
            error!("Failed to resize render target: {}", e);
        } else {
            screen_size.w = config.render_width as i32;
            screen_size.h = config.render_height as i32;
            if let Some(views) = views.as_deref_mut() {
                let count = views.count;
                match ViewTargets::new(
                    &mut rl,
                    &th,
                    count,
                    config.render_width,
                    config.render_height,
                ) {
                    Ok(new_views) => *views = new_views,
                    Err(e) => error!("Failed to resize player views: {}", e),
                }
            }
        }
    }

    if config.fullscreen != rl.is_window_fullscreen() {
        info!("Fullscreen -> {}", config.fullscreen);
        rl.toggle_fullscreen();
    }

    unsafe {
        if config.vsync {
            ffi::SetWindowState(ffi::ConfigFlags::FLAG_VSYNC_HINT as u32);
        } else {
            ffi::ClearWindowState(ffi::ConfigFlags::FLAG_VSYNC_HINT as u32);
        }
    }
    rl.set_target_fps(config.target_fps);

    if (fixed.step - config.fixed_step).abs() > f32::EPSILON {
        fixed.step = config.fixed_step;
        fixed.accumulator = 0.0;
    }

    info!(
        "GameConfig applied: vsync={}, fps={}, step={}",
        config.vsync, config.target_fps, config.fixed_step
    );
}

/// Flip [`GameConfig::fullscreen`] on the fullscreen key and save the choice.
pub fn fullscreen_toggle_system(inputs: Res<PlayerInputs>, mut config: ResMut<GameConfig>) {
    if !inputs.fullscreen_toggle.just_pressed {
        return;
    }
    config.fullscreen = !config.fullscreen;
    if let Err(e) = config.save_to_file() {
        error!("Failed to save config: {}", e);
    }
}
