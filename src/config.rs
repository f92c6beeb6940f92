//! Game configuration loaded from JSON
//!
//! Every field has a default, so a missing file, a missing key or a
//! partial file all produce a playable configuration. Times are in
//! milliseconds, distances in pixels, speeds in pixels per second.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_CONFIG_PATH: &str = "assets/config/game.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window_width: u32,
    pub window_height: u32,

    pub map_width: i32,
    pub map_height: i32,
    pub grid_size: i32,

    pub mining_ms: f64,
    pub water_gather_ms: f64,
    pub cow_invincible_ms: f64,
    pub campfire_burn_ms: f64,
    pub chest_nav_repeat_ms: f64,

    pub walk_speed: f64,
    pub sprint_speed: f64,
    pub crouch_speed: f64,

    pub world: WorldGenConfig,

    /// Overrides the default `~/.nomads/saves`
    pub save_dir: Option<PathBuf>,
    pub autosave_on_exit: bool,
}

/// How many of each entity the generator scatters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    pub lakes: usize,
    pub rocks: usize,
    pub wood: usize,
    pub cows: usize,
    pub camps: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            window_width: 1280,
            window_height: 720,
            map_width: 4000,
            map_height: 3000,
            grid_size: 64,
            mining_ms: 2000.0,
            water_gather_ms: 2000.0,
            cow_invincible_ms: 500.0,
            campfire_burn_ms: 90_000.0,
            chest_nav_repeat_ms: 120.0,
            walk_speed: 180.0,
            sprint_speed: 300.0,
            crouch_speed: 120.0,
            world: WorldGenConfig::default(),
            save_dir: None,
            autosave_on_exit: true,
        }
    }
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        WorldGenConfig {
            lakes: 5,
            rocks: 30,
            wood: 550,
            cows: 10,
            camps: 6,
        }
    }
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Loads `path` if it exists, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return GameConfig::default();
        }

        match GameConfig::load_from_file(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring {}: {}", path.display(), e);
                GameConfig::default()
            }
        }
    }

    /// Directory holding `savegame.json`
    pub fn save_dir(&self) -> PathBuf {
        match &self.save_dir {
            Some(dir) => dir.clone(),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".nomads")
                .join("saves"),
        }
    }
}
