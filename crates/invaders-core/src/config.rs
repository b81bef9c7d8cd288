//! Game configuration documents.
//!
//! The engine only needs typed fields; this module turns the JSON
//! document shipped with each difficulty into those fields.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::{Difficulty, ProjectileStrategy};
use crate::types::{Bounds, Position};

/// Errors raised while loading or validating a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(rename = "Game")]
    pub game: WorldConfig,
    #[serde(rename = "Player")]
    pub player: PlayerConfig,
    #[serde(rename = "Bunkers", default)]
    pub bunkers: Vec<BunkerConfig>,
    #[serde(rename = "Enemies", default)]
    pub enemies: Vec<EnemyConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub size: Extent,
}

/// An `{x, y}` pair used for both positions and sizes in the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Display colour; only the view uses it.
    #[serde(default)]
    pub colour: String,
    pub speed: f64,
    pub lives: u32,
    pub position: Extent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BunkerConfig {
    pub position: Extent,
    pub size: Extent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyConfig {
    pub position: Extent,
    pub projectile: ProjectileSpec,
}

/// Firing profile names as they appear in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileSpec {
    #[serde(rename = "slow_straight")]
    SlowStraight,
    #[serde(rename = "fast_straight")]
    FastStraight,
}

impl Extent {
    pub fn to_position(self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn to_bounds(self) -> Bounds {
        Bounds::new(self.x, self.y)
    }
}

impl ProjectileSpec {
    pub fn strategy(self) -> ProjectileStrategy {
        match self {
            ProjectileSpec::SlowStraight => ProjectileStrategy::Slow,
            ProjectileSpec::FastStraight => ProjectileStrategy::Fast,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Load the document for a difficulty from `dir`.
    pub fn for_difficulty(dir: impl AsRef<Path>, difficulty: Difficulty) -> Result<Self, ConfigError> {
        Self::load(dir.as_ref().join(difficulty.config_file_name()))
    }

    /// Reject documents the engine cannot be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.game.size;
        if size.x <= 0.0 || size.y <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "world size must be positive, got {}x{}",
                size.x, size.y
            )));
        }
        if self.player.lives == 0 {
            return Err(ConfigError::Invalid("player lives must be at least 1".into()));
        }
        if self.player.speed <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "player speed must be positive, got {}",
                self.player.speed
            )));
        }
        for (i, bunker) in self.bunkers.iter().enumerate() {
            if bunker.size.x <= 0.0 || bunker.size.y <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "bunker {i} has non-positive size {}x{}",
                    bunker.size.x, bunker.size.y
                )));
            }
        }
        Ok(())
    }

    pub fn world_bounds(&self) -> Bounds {
        self.game.size.to_bounds()
    }
}
