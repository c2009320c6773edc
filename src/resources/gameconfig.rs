//! Game configuration resource.
//!
//! Settings are read from an INI file. Every value has a safe default, so a
//! missing file or key only logs and keeps the default.
//!
//! # Configuration File Format
//!
//! ```ini
//! [render]
//! width = 640
//! height = 360
//!
//! [window]
//! width = 1280
//! height = 720
//! fullscreen = false
//! vsync = true
//! target_fps = 60
//!
//! [simulation]
//! frame_skip = 8
//! player_animation_frames = 4
//! attack_offset = 32
//! reference_fps = 60
//!
//! [assets]
//! attacks = ./assets/attacks.json
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::resources::simconfig::SimConfig;

const DEFAULT_RENDER_WIDTH: u32 = 640;
const DEFAULT_RENDER_HEIGHT: u32 = 360;
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_FULLSCREEN: bool = false;
pub const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Internal render width in pixels.
    pub render_width: u32,
    /// Internal render height in pixels.
    pub render_height: u32,
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,
    pub vsync: bool,
    pub fullscreen: bool,
    /// Simulation constants shared by all actors.
    pub simulation: SimConfig,
    /// Optional attack template file installed on the player.
    pub attacks_path: Option<PathBuf>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
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
            simulation: SimConfig::default(),
            attacks_path: None,
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
    /// Missing values retain their current values.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded config: {}x{} render, {}x{} window, fps={}, frame_skip={}, attack_offset={}",
            self.render_width,
            self.render_height,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.simulation.frame_skip,
            self.simulation.attack_offset
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        let uint = |section: &str, key: &str| config.getuint(section, key).ok().flatten();
        let float = |section: &str, key: &str| config.getfloat(section, key).ok().flatten();
        let boolean = |section: &str, key: &str| config.getbool(section, key).ok().flatten();

        // [render]
        if let Some(width) = uint("render", "width") {
            self.render_width = width as u32;
        }
        if let Some(height) = uint("render", "height") {
            self.render_height = height as u32;
        }

        // [window]
        if let Some(width) = uint("window", "width") {
            self.window_width = width as u32;
        }
        if let Some(height) = uint("window", "height") {
            self.window_height = height as u32;
        }
        if let Some(fps) = uint("window", "target_fps") {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = boolean("window", "vsync") {
            self.vsync = vsync;
        }
        if let Some(fullscreen) = boolean("window", "fullscreen") {
            self.fullscreen = fullscreen;
        }

        // [simulation]
        if let Some(skip) = uint("simulation", "frame_skip") {
            // zero would make every timer expire immediately
            self.simulation.frame_skip = (skip as u32).max(1);
        }
        if let Some(frames) = uint("simulation", "player_animation_frames") {
            self.simulation.player_animation_frames = (frames as u32).max(1);
        }
        if let Some(offset) = float("simulation", "attack_offset") {
            self.simulation.attack_offset = offset as f32;
        }
        if let Some(fps) = float("simulation", "reference_fps") {
            if fps > 0.0 {
                self.simulation.reference_fps = fps as f32;
            }
        }

        // [assets]
        if let Some(path) = config.get("assets", "attacks") {
            if !path.trim().is_empty() {
                self.attacks_path = Some(PathBuf::from(path.trim()));
            }
        }
    }

    /// Save configuration to the INI file.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("render", "width", Some(self.render_width.to_string()));
        config.set("render", "height", Some(self.render_height.to_string()));

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));
        config.set("window", "fullscreen", Some(self.fullscreen.to_string()));

        let sim = &self.simulation;
        config.set("simulation", "frame_skip", Some(sim.frame_skip.to_string()));
        config.set(
            "simulation",
            "player_animation_frames",
            Some(sim.player_animation_frames.to_string()),
        );
        config.set("simulation", "attack_offset", Some(sim.attack_offset.to_string()));
        config.set("simulation", "reference_fps", Some(sim.reference_fps.to_string()));

        if let Some(path) = &self.attacks_path {
            config.set("assets", "attacks", Some(path.display().to_string()));
        }

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
