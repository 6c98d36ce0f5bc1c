//! Game settings
//!
//! Loaded from an optional JSON file; every field falls back to its default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{INITIAL_ENEMY_BURST, SPAWN_INTERVAL};
use crate::error::GameError;

/// Image file names of the three sprites
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteNames {
    pub ship: String,
    pub enemy: String,
    pub bullet: String,
}

impl Default for SpriteNames {
    fn default() -> Self {
        Self {
            ship: "player_ship.png".to_string(),
            enemy: "enemy.png".to_string(),
            bullet: "bullet.png".to_string(),
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for enemy spawn columns
    pub seed: u64,

    // === Spawn policy ===
    /// Enemies spawned together with the ship on the first frame (0 = timer only)
    pub initial_enemy_burst: u32,
    /// Period of the spawn timer
    pub spawn_interval_ms: u64,

    // === Assets ===
    /// Directory sprites are read from
    pub asset_dir: PathBuf,
    pub sprites: SpriteNames,

    // === HUD ===
    /// Log the frame rate once per second
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            initial_enemy_burst: INITIAL_ENEMY_BURST,
            spawn_interval_ms: SPAWN_INTERVAL.as_millis() as u64,
            asset_dir: PathBuf::from("assets"),
            sprites: SpriteNames::default(),
            show_fps: true,
        }
    }
}

impl Settings {
    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
