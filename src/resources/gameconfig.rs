//! Game configuration resource.
//!
//! Manages game settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration. Besides
//! window settings, the file carries every gameplay tuning value so matches can
//! be rebalanced without rebuilding.
//!
//! # Configuration File Format
//!
//! ```ini
//! [render]
//! width = 1280
//! height = 720
//!
//! [window]
//! width = 1280
//! height = 720
//! fullscreen = false
//! vsync = true
//! target_fps = 120
//!
//! [match]
//! player_count = 6
//! win_score = 300
//!
//! [player]
//! base_move_speed = 13
//! jump_force = 11
//!
//! [projectile]
//! self_pickup_time = 1.0
//!
//! [physics]
//! fixed_step = 0.02
//! gravity = 9.81
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::resources::input::InputDevice;

/// Default safe values for startup
const DEFAULT_RENDER_WIDTH: u32 = 1280;
const DEFAULT_RENDER_HEIGHT: u32 = 720;
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 120;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_FULLSCREEN: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Upper bound on players in one match (one split-screen view each).
pub const MAX_PLAYERS: usize = 6;

/// Player controller tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerTuning {
    pub base_move_speed: f32,
    pub strafe_speed_ratio: f32,
    pub back_speed_ratio: f32,
    pub jump_force: f32,
    pub jump_grounded_disable_time: f32,
    pub ground_distance: f32,
    pub max_slope_angle: f32,
    pub standing_velocity_cutoff: f32,
    pub analog_aim_speed: f32,
    pub keyboard_aim_speed: f32,
    pub mouse_aim_speed: f32,
    pub aim_vertical_ratio: f32,
    pub enable_mouse_aim: bool,
    pub enable_keyboard_aim: bool,
    pub enable_analog_aim: bool,
    pub respawn_height: f32,
    pub starting_ammo: i32,
    pub max_charge_time: f32,
    pub cooldown_time: f32,
    pub launch_angle_min: f32,
    pub launch_angle_max: f32,
    pub launch_power_min: f32,
    pub launch_power_max: f32,
    pub screen_shake_amplitude: f32,
    pub screen_shake_frequency: f32,
    pub final_vibration_time: f32,
    pub reticle_levels: usize,
    pub eye_height: f32,
    pub spawn_height: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            base_move_speed: 13.0,
            strafe_speed_ratio: 0.85,
            back_speed_ratio: 0.6,
            jump_force: 11.0,
            jump_grounded_disable_time: 0.1,
            ground_distance: 1.1,
            max_slope_angle: 70.0,
            standing_velocity_cutoff: 0.1,
            analog_aim_speed: 7.0,
            keyboard_aim_speed: 7.0,
            mouse_aim_speed: 5.0,
            aim_vertical_ratio: 0.5,
            enable_mouse_aim: true,
            enable_keyboard_aim: true,
            enable_analog_aim: true,
            respawn_height: -10.0,
            starting_ammo: 3,
            max_charge_time: 1.2,
            cooldown_time: 0.4,
            launch_angle_min: 0.05,
            launch_angle_max: 0.35,
            launch_power_min: 15.0,
            launch_power_max: 35.0,
            screen_shake_amplitude: 0.06,
            screen_shake_frequency: 0.015,
            final_vibration_time: 0.25,
            reticle_levels: 5,
            eye_height: 0.6,
            spawn_height: 0.86,
        }
    }
}

/// Shirt projectile tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileTuning {
    /// Frames per second of the tumbling animation; zero disables it.
    pub falling_anim_fps: f32,
    pub falling_anim_frames: usize,
    pub landing_shrink_ratio: f32,
    pub landing_offset_height: f32,
    pub self_pickup_time: f32,
    pub move_speed: f32,
    pub pickup_range: f32,
    /// Seconds on the inert layer before a shirt can hit players.
    pub arm_delay: f32,
    pub kill_height: f32,
    pub size: f32,
    pub pickup_zone: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            falling_anim_fps: 12.0,
            falling_anim_frames: 4,
            landing_shrink_ratio: 0.6,
            landing_offset_height: 0.2,
            self_pickup_time: 1.0,
            move_speed: 20.0,
            pickup_range: 0.6,
            arm_delay: 0.1,
            kill_height: -50.0,
            size: 0.4,
            pickup_zone: 1.2,
        }
    }
}

/// Match rules and score presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRules {
    pub player_count: usize,
    pub win_score: f32,
    pub score_roulette_time: f32,
    pub border_fade_time: f32,
    pub hud_delay: f32,
    pub ammo_spawn_min: f32,
    pub ammo_spawn_max: f32,
    pub victory_return_delay: f32,
}

impl MatchRules {
    /// Join slots on the player select screen. Each slot needs its own
    /// device, so there are never more slots than devices.
    pub fn join_slots(&self) -> usize {
        self.player_count.min(InputDevice::ALL.len())
    }
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            player_count: MAX_PLAYERS,
            win_score: 300.0,
            score_roulette_time: 0.3,
            border_fade_time: 0.6,
            hud_delay: 2.0,
            ammo_spawn_min: 5.0,
            ammo_spawn_max: 10.0,
            victory_return_delay: 3.0,
        }
    }
}

/// Game configuration resource.
///
/// Stores render resolution, window settings, and gameplay tuning.
/// [`apply_gameconfig_changes`] pushes window settings to raylib whenever the
/// resource changes.
///
/// [`apply_gameconfig_changes`]: crate::systems::gameconfig::apply_gameconfig_changes
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Internal render width in pixels.
    pub render_width: u32,
    /// Internal render height in pixels.
    pub render_height: u32,
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Seconds per physics step.
    pub fixed_step: f32,
    /// Downward acceleration applied to actors.
    pub gravity: f32,
    pub player: PlayerTuning,
    pub projectile: ProjectileTuning,
    pub rules: MatchRules,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! read_float {
    ($ini:expr, $section:expr, $key:expr, $target:expr) => {
        if let Some(v) = $ini.getfloat($section, $key).ok().flatten() {
            $target = v as f32;
        }
    };
}

macro_rules! read_bool {
    ($ini:expr, $section:expr, $key:expr, $target:expr) => {
        if let Some(v) = $ini.getbool($section, $key).ok().flatten() {
            $target = v;
        }
    };
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            render_width: DEFAULT_RENDER_WIDTH,
            render_height: DEFAULT_RENDER_HEIGHT,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            fullscreen: DEFAULT_FULLSCREEN,
            fixed_step: 0.02,
            gravity: 9.81,
            player: PlayerTuning::default(),
            projectile: ProjectileTuning::default(),
            rules: MatchRules::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);

        info!(
            "Loaded config: {}x{} render, {}x{} window, fps={}, vsync={}, fullscreen={}, players={}",
            self.render_width,
            self.render_height,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.fullscreen,
            self.rules.player_count
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [render] section
        if let Some(width) = config.getuint("render", "width").ok().flatten() {
            self.render_width = width as u32;
        }
        if let Some(height) = config.getuint("render", "height").ok().flatten() {
            self.render_height = height as u32;
        }

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        read_bool!(config, "window", "vsync", self.vsync);
        read_bool!(config, "window", "fullscreen", self.fullscreen);

        // [physics] section
        read_float!(config, "physics", "fixed_step", self.fixed_step);
        read_float!(config, "physics", "gravity", self.gravity);
        if self.fixed_step <= 0.0 {
            self.fixed_step = 0.02;
        }

        // [match] section
        let r = &mut self.rules;
        if let Some(n) = config.getuint("match", "player_count").ok().flatten() {
            r.player_count = (n as usize).clamp(1, MAX_PLAYERS);
        }
        read_float!(config, "match", "win_score", r.win_score);
        read_float!(config, "match", "score_roulette_time", r.score_roulette_time);
        read_float!(config, "match", "border_fade_time", r.border_fade_time);
        read_float!(config, "match", "hud_delay", r.hud_delay);
        read_float!(config, "match", "ammo_spawn_min", r.ammo_spawn_min);
        read_float!(config, "match", "ammo_spawn_max", r.ammo_spawn_max);
        read_float!(config, "match", "victory_return_delay", r.victory_return_delay);
        if r.ammo_spawn_max < r.ammo_spawn_min {
            r.ammo_spawn_max = r.ammo_spawn_min;
        }

        // [player] section
        let p = &mut self.player;
        read_float!(config, "player", "base_move_speed", p.base_move_speed);
        read_float!(config, "player", "strafe_speed_ratio", p.strafe_speed_ratio);
        read_float!(config, "player", "back_speed_ratio", p.back_speed_ratio);
        read_float!(config, "player", "jump_force", p.jump_force);
        read_float!(
            config,
            "player",
            "jump_grounded_disable_time",
            p.jump_grounded_disable_time
        );
        read_float!(config, "player", "ground_distance", p.ground_distance);
        read_float!(config, "player", "max_slope_angle", p.max_slope_angle);
        read_float!(
            config,
            "player",
            "standing_velocity_cutoff",
            p.standing_velocity_cutoff
        );
        read_float!(config, "player", "analog_aim_speed", p.analog_aim_speed);
        read_float!(config, "player", "keyboard_aim_speed", p.keyboard_aim_speed);
        read_float!(config, "player", "mouse_aim_speed", p.mouse_aim_speed);
        read_float!(config, "player", "aim_vertical_ratio", p.aim_vertical_ratio);
        read_bool!(config, "player", "enable_mouse_aim", p.enable_mouse_aim);
        read_bool!(config, "player", "enable_keyboard_aim", p.enable_keyboard_aim);
        read_bool!(config, "player", "enable_analog_aim", p.enable_analog_aim);
        read_float!(config, "player", "respawn_height", p.respawn_height);
        if let Some(ammo) = config.getint("player", "starting_ammo").ok().flatten() {
            p.starting_ammo = ammo as i32;
        }
        read_float!(config, "player", "max_charge_time", p.max_charge_time);
        read_float!(config, "player", "cooldown_time", p.cooldown_time);
        read_float!(config, "player", "launch_angle_min", p.launch_angle_min);
        read_float!(config, "player", "launch_angle_max", p.launch_angle_max);
        read_float!(config, "player", "launch_power_min", p.launch_power_min);
        read_float!(config, "player", "launch_power_max", p.launch_power_max);
        read_float!(
            config,
            "player",
            "screen_shake_amplitude",
            p.screen_shake_amplitude
        );
        read_float!(
            config,
            "player",
            "screen_shake_frequency",
            p.screen_shake_frequency
        );
        read_float!(
            config,
            "player",
            "final_vibration_time",
            p.final_vibration_time
        );
        if let Some(n) = config.getuint("player", "reticle_levels").ok().flatten() {
            p.reticle_levels = (n as usize).max(3);
        }

        // [projectile] section
        let s = &mut self.projectile;
        read_float!(config, "projectile", "falling_anim_fps", s.falling_anim_fps);
        if let Some(n) = config
            .getuint("projectile", "falling_anim_frames")
            .ok()
            .flatten()
        {
            s.falling_anim_frames = (n as usize).max(1);
        }
        read_float!(
            config,
            "projectile",
            "landing_shrink_ratio",
            s.landing_shrink_ratio
        );
        read_float!(
            config,
            "projectile",
            "landing_offset_height",
            s.landing_offset_height
        );
        read_float!(config, "projectile", "self_pickup_time", s.self_pickup_time);
        read_float!(config, "projectile", "move_speed", s.move_speed);
        read_float!(config, "projectile", "pickup_range", s.pickup_range);
        read_float!(config, "projectile", "arm_delay", s.arm_delay);
        read_float!(config, "projectile", "kill_height", s.kill_height);
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();
        let mut set = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        // [render] section
        set("render", "width", self.render_width.to_string());
        set("render", "height", self.render_height.to_string());

        // [window] section
        set("window", "width", self.window_width.to_string());
        set("window", "height", self.window_height.to_string());
        set("window", "target_fps", self.target_fps.to_string());
        set("window", "vsync", self.vsync.to_string());
        set("window", "fullscreen", self.fullscreen.to_string());

        set("physics", "fixed_step", self.fixed_step.to_string());
        set("physics", "gravity", self.gravity.to_string());

        let r = &self.rules;
        set("match", "player_count", r.player_count.to_string());
        set("match", "win_score", r.win_score.to_string());
        set("match", "score_roulette_time", r.score_roulette_time.to_string());
        set("match", "border_fade_time", r.border_fade_time.to_string());
        set("match", "hud_delay", r.hud_delay.to_string());
        set("match", "ammo_spawn_min", r.ammo_spawn_min.to_string());
        set("match", "ammo_spawn_max", r.ammo_spawn_max.to_string());
        set("match", "victory_return_delay", r.victory_return_delay.to_string());

        let p = &self.player;
        set("player", "base_move_speed", p.base_move_speed.to_string());
        set("player", "strafe_speed_ratio", p.strafe_speed_ratio.to_string());
        set("player", "back_speed_ratio", p.back_speed_ratio.to_string());
        set("player", "jump_force", p.jump_force.to_string());
        set(
            "player",
            "jump_grounded_disable_time",
            p.jump_grounded_disable_time.to_string(),
        );
        set("player", "ground_distance", p.ground_distance.to_string());
        set("player", "max_slope_angle", p.max_slope_angle.to_string());
        set(
            "player",
            "standing_velocity_cutoff",
            p.standing_velocity_cutoff.to_string(),
        );
        set("player", "analog_aim_speed", p.analog_aim_speed.to_string());
        set("player", "keyboard_aim_speed", p.keyboard_aim_speed.to_string());
        set("player", "mouse_aim_speed", p.mouse_aim_speed.to_string());
        set("player", "aim_vertical_ratio", p.aim_vertical_ratio.to_string());
        set("player", "enable_mouse_aim", p.enable_mouse_aim.to_string());
        set("player", "enable_keyboard_aim", p.enable_keyboard_aim.to_string());
        set("player", "enable_analog_aim", p.enable_analog_aim.to_string());
        set("player", "respawn_height", p.respawn_height.to_string());
        set("player", "starting_ammo", p.starting_ammo.to_string());
        set("player", "max_charge_time", p.max_charge_time.to_string());
        set("player", "cooldown_time", p.cooldown_time.to_string());
        set("player", "launch_angle_min", p.launch_angle_min.to_string());
        set("player", "launch_angle_max", p.launch_angle_max.to_string());
        set("player", "launch_power_min", p.launch_power_min.to_string());
        set("player", "launch_power_max", p.launch_power_max.to_string());
        set(
            "player",
            "screen_shake_amplitude",
            p.screen_shake_amplitude.to_string(),
        );
        set(
            "player",
            "screen_shake_frequency",
            p.screen_shake_frequency.to_string(),
        );
        set(
            "player",
            "final_vibration_time",
            p.final_vibration_time.to_string(),
        );
        set("player", "reticle_levels", p.reticle_levels.to_string());

        let s = &self.projectile;
        set("projectile", "falling_anim_fps", s.falling_anim_fps.to_string());
        set(
            "projectile",
            "falling_anim_frames",
            s.falling_anim_frames.to_string(),
        );
        set(
            "projectile",
            "landing_shrink_ratio",
            s.landing_shrink_ratio.to_string(),
        );
        set(
            "projectile",
            "landing_offset_height",
            s.landing_offset_height.to_string(),
        );
        set("projectile", "self_pickup_time", s.self_pickup_time.to_string());
        set("projectile", "move_speed", s.move_speed.to_string());
        set("projectile", "pickup_range", s.pickup_range.to_string());
        set("projectile", "arm_delay", s.arm_delay.to_string());
        set("projectile", "kill_height", s.kill_height.to_string());

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn defaults_match_controller_reference_values() {
        let c = GameConfig::new();
        assert!(approx_eq(c.player.base_move_speed, 13.0));
        assert!(approx_eq(c.player.strafe_speed_ratio, 0.85));
        assert!(approx_eq(c.player.back_speed_ratio, 0.6));
        assert!(approx_eq(c.player.jump_force, 11.0));
        assert!(approx_eq(c.player.ground_distance, 1.1));
        assert!(approx_eq(c.player.max_slope_angle, 70.0));
        assert!(approx_eq(c.player.respawn_height, -10.0));
        assert_eq!(c.rules.player_count, 6);
        assert!(approx_eq(c.rules.win_score, 300.0));
        assert!(approx_eq(c.rules.score_roulette_time, 0.3));
    }

    #[test]
    fn load_from_str_overrides_only_present_keys() {
        let mut c = GameConfig::new();
        c.load_from_str(
            "[match]\nplayer_count = 2\nwin_score = 60\n[player]\njump_force = 8.5\nenable_mouse_aim = false\n[window]\nwidth = 800\n",
        )
        .unwrap();
        assert_eq!(c.rules.player_count, 2);
        assert!(approx_eq(c.rules.win_score, 60.0));
        assert!(approx_eq(c.player.jump_force, 8.5));
        assert!(!c.player.enable_mouse_aim);
        assert_eq!(c.window_width, 800);
        // untouched
        assert!(approx_eq(c.player.base_move_speed, 13.0));
        assert_eq!(c.window_height, DEFAULT_WINDOW_HEIGHT);
    }

    #[test]
    fn player_count_is_clamped() {
        let mut c = GameConfig::new();
        c.load_from_str("[match]\nplayer_count = 40\n").unwrap();
        assert_eq!(c.rules.player_count, MAX_PLAYERS);
        c.load_from_str("[match]\nplayer_count = 0\n").unwrap();
        assert_eq!(c.rules.player_count, 1);
    }

    #[test]
    fn join_slots_never_outnumber_devices() {
        let mut c = GameConfig::new();
        assert_eq!(c.rules.join_slots(), InputDevice::ALL.len());
        c.rules.player_count = 2;
        assert_eq!(c.rules.join_slots(), 2);
    }

    #[test]
    fn inverted_ammo_interval_is_fixed() {
        let mut c = GameConfig::new();
        c.load_from_str("[match]\nammo_spawn_min = 8\nammo_spawn_max = 2\n")
            .unwrap();
        assert!(approx_eq(c.rules.ammo_spawn_max, 8.0));
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut c = GameConfig::with_path("/nonexistent/clothescombat/config.ini");
        assert!(c.load_from_file().is_err());
        assert!(approx_eq(c.fixed_step, 0.02));
    }
}
