//! Enumeration types used throughout the simulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stable kind tag carried by every simulation entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Bunker,
    PlayerProjectile,
    EnemyProjectile,
}

/// Speed and scoring classification of a projectile.
///
/// Enemies carry one as their firing profile; every projectile an enemy
/// fires inherits it. The player's shots are `Normal`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileStrategy {
    /// Player shot: one unit per tick, worth nothing when destroyed.
    #[default]
    Normal,
    /// One unit per tick.
    Slow,
    /// Two units per tick.
    Fast,
}

/// Damage tier of a bunker, derived from its remaining lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BunkerState {
    /// 3 lives.
    #[default]
    Intact,
    /// 2 lives.
    Damaged,
    /// 1 life.
    Critical,
    /// 0 lives.
    Destroyed,
}

/// Render layer. Only the foreground is clamped to the world edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layer {
    Background,
    #[default]
    Foreground,
}

/// Difficulty selection, chosen before the engine is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// The four category-scoped bulk-delete commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BulkDelete {
    SlowProjectiles,
    FastProjectiles,
    SlowAliens,
    FastAliens,
}

/// Terminal state of a game, as seen by the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    #[default]
    InProgress,
    /// No live enemy remains.
    Won,
    /// The player's health reached zero.
    Lost,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Player => "Player",
            EntityKind::Enemy => "Enemy",
            EntityKind::Bunker => "Bunker",
            EntityKind::PlayerProjectile => "PlayerProjectile",
            EntityKind::EnemyProjectile => "EnemyProjectile",
        };
        f.write_str(name)
    }
}

impl ProjectileStrategy {
    /// Distance travelled per tick.
    pub fn speed(self) -> f64 {
        match self {
            ProjectileStrategy::Normal | ProjectileStrategy::Slow => 1.0,
            ProjectileStrategy::Fast => 2.0,
        }
    }
}

impl BunkerState {
    pub fn from_lives(lives: u32) -> Self {
        match lives {
            0 => BunkerState::Destroyed,
            1 => BunkerState::Critical,
            2 => BunkerState::Damaged,
            _ => BunkerState::Intact,
        }
    }

    /// Tier after absorbing one hit.
    pub fn hit(self) -> Self {
        match self {
            BunkerState::Intact => BunkerState::Damaged,
            BunkerState::Damaged => BunkerState::Critical,
            BunkerState::Critical | BunkerState::Destroyed => BunkerState::Destroyed,
        }
    }
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// File name of the configuration document for this difficulty.
    pub fn config_file_name(self) -> &'static str {
        match self {
            Difficulty::Easy => "config_easy.json",
            Difficulty::Medium => "config_medium.json",
            Difficulty::Hard => "config_hard.json",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

impl BulkDelete {
    pub const ALL: [BulkDelete; 4] = [
        BulkDelete::SlowProjectiles,
        BulkDelete::FastProjectiles,
        BulkDelete::SlowAliens,
        BulkDelete::FastAliens,
    ];

    /// Kind of entity this category removes.
    pub fn target_kind(self) -> EntityKind {
        match self {
            BulkDelete::SlowProjectiles | BulkDelete::FastProjectiles => {
                EntityKind::EnemyProjectile
            }
            BulkDelete::SlowAliens | BulkDelete::FastAliens => EntityKind::Enemy,
        }
    }

    /// Strategy an entity must carry to be removed.
    pub fn strategy(self) -> ProjectileStrategy {
        match self {
            BulkDelete::SlowProjectiles | BulkDelete::SlowAliens => ProjectileStrategy::Slow,
            BulkDelete::FastProjectiles | BulkDelete::FastAliens => ProjectileStrategy::Fast,
        }
    }

    /// Points awarded per removed entity.
    pub fn points_per_entity(self) -> u32 {
        match self {
            BulkDelete::SlowProjectiles => 1,
            BulkDelete::FastProjectiles => 2,
            BulkDelete::SlowAliens => 3,
            BulkDelete::FastAliens => 4,
        }
    }

    /// Index into per-category flag arrays.
    pub fn index(self) -> usize {
        match self {
            BulkDelete::SlowProjectiles => 0,
            BulkDelete::FastProjectiles => 1,
            BulkDelete::SlowAliens => 2,
            BulkDelete::FastAliens => 3,
        }
    }
}
