//! Game configuration resource.
//!
//! Manages game settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [render]
//! width = 400
//! height = 400
//!
//! [window]
//! width = 800
//! height = 800
//! fullscreen = false
//! vsync = true
//! target_fps = 60
//!
//! [stage]
//! initial_npcs = 3
//! npc_increment = 2
//! stage_seconds = 30
//! base_speed = 90
//! run_speed = 150
//! steal_range = 50
//! steal_dwell_ms = 1000
//! jump_height = 50
//! jump_ms = 200
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_RENDER_WIDTH: u32 = 400;
const DEFAULT_RENDER_HEIGHT: u32 = 400;
const DEFAULT_WINDOW_WIDTH: u32 = 800;
const DEFAULT_WINDOW_HEIGHT: u32 = 800;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_FULLSCREEN: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const DEFAULT_MAP_PATH: &str = "./assets/maps/city.json";

/// Gameplay numbers of a stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageTuning {
    /// NPCs on the first stage and after every failure.
    pub initial_npcs: u32,
    /// Extra NPCs per cleared stage.
    pub npc_increment: u32,
    /// Countdown start value in seconds.
    pub stage_seconds: i32,
    /// Walking speed in map pixels per second.
    pub base_speed: f32,
    /// Speed while the run modifier is held.
    pub run_speed: f32,
    /// Distance under which an NPC can be stolen from.
    pub steal_range: f32,
    /// Seconds the player may stand next to an NPC before exploding.
    pub steal_dwell: f32,
    /// Jump apex above the take-off point.
    pub jump_height: f32,
    /// Seconds for each leg of the jump.
    pub jump_duration: f32,
}

impl Default for StageTuning {
    fn default() -> Self {
        Self {
            initial_npcs: 3,
            npc_increment: 2,
            stage_seconds: 30,
            base_speed: 90.0,
            run_speed: 150.0,
            steal_range: 50.0,
            steal_dwell: 1.0,
            jump_height: 50.0,
            jump_duration: 0.2,
        }
    }
}

/// Game configuration resource.
///
/// Stores render resolution, window settings and stage tuning.
/// [`apply_gameconfig_changes`](crate::systems::gameconfig::apply_gameconfig_changes)
/// pushes window-related changes to raylib.
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
    /// Stage gameplay numbers.
    pub stage: StageTuning,
    /// Path to the configuration file.
    pub config_path: PathBuf,
    /// Path to the Tiled city map. Set from the command line, not the INI file.
    pub map_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
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
            stage: StageTuning::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            map_path: PathBuf::from(DEFAULT_MAP_PATH),
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
            "Loaded config: {}x{} render, {}x{} window, fps={}, vsync={}, fullscreen={}, stage={:?}",
            self.render_width,
            self.render_height,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.fullscreen,
            self.stage
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
        let uint = |section: &str, key: &str| config.getuint(section, key).ok().flatten();
        let float = |section: &str, key: &str| config.getfloat(section, key).ok().flatten();

        // [render] section
        if let Some(width) = uint("render", "width") {
            self.render_width = width as u32;
        }
        if let Some(height) = uint("render", "height") {
            self.render_height = height as u32;
        }

        // [window] section
        if let Some(width) = uint("window", "width") {
            self.window_width = width as u32;
        }
        if let Some(height) = uint("window", "height") {
            self.window_height = height as u32;
        }
        if let Some(fps) = uint("window", "target_fps") {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }
        if let Some(fullscreen) = config.getbool("window", "fullscreen").ok().flatten() {
            self.fullscreen = fullscreen;
        }

        // [stage] section
        let stage = &mut self.stage;
        if let Some(v) = uint("stage", "initial_npcs") {
            stage.initial_npcs = v as u32;
        }
        if let Some(v) = uint("stage", "npc_increment") {
            stage.npc_increment = v as u32;
        }
        if let Some(v) = uint("stage", "stage_seconds") {
            stage.stage_seconds = v.min(i32::MAX as u64) as i32;
        }
        if let Some(v) = float("stage", "base_speed") {
            stage.base_speed = v as f32;
        }
        if let Some(v) = float("stage", "run_speed") {
            stage.run_speed = v as f32;
        }
        if let Some(v) = float("stage", "steal_range") {
            stage.steal_range = v as f32;
        }
        if let Some(v) = uint("stage", "steal_dwell_ms") {
            stage.steal_dwell = v as f32 / 1000.0;
        }
        if let Some(v) = float("stage", "jump_height") {
            stage.jump_height = v as f32;
        }
        if let Some(v) = uint("stage", "jump_ms") {
            stage.jump_duration = v as f32 / 1000.0;
        }
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stage_rules() {
        let config = GameConfig::new();
        assert_eq!(config.render_width, 400);
        assert_eq!(config.render_height, 400);
        assert_eq!(config.stage.initial_npcs, 3);
        assert_eq!(config.stage.npc_increment, 2);
        assert_eq!(config.stage.stage_seconds, 30);
        assert_eq!(config.stage.base_speed, 90.0);
        assert_eq!(config.stage.run_speed, 150.0);
        assert_eq!(config.stage.steal_range, 50.0);
        assert_eq!(config.stage.steal_dwell, 1.0);
    }

    #[test]
    fn test_load_from_str_overrides_present_keys_only() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[window]\nwidth = 1024\nfullscreen = true\n[stage]\ninitial_npcs = 5\nsteal_dwell_ms = 1500\n")
            .unwrap();
        assert_eq!(config.window_width, 1024);
        assert_eq!(config.window_height, 800);
        assert!(config.fullscreen);
        assert_eq!(config.stage.initial_npcs, 5);
        assert_eq!(config.stage.npc_increment, 2);
        assert!((config.stage.steal_dwell - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = GameConfig::with_path("./definitely/not/here/config.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.render_width, 400);
    }
}
