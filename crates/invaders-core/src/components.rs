//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.
//! Every entity also carries an `EntityKind`, a `Position`, `Bounds`
//! and a `Layer`.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Remaining hit points. An entity is alive while `lives > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub lives: u32,
}

/// The player's ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerShip {
    /// Horizontal distance moved per tick while a direction is held.
    pub speed: f64,
}

/// An alien and its firing profile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyProfile {
    /// Strategy handed to every projectile this enemy fires.
    pub strategy: ProjectileStrategy,
    /// Horizontal velocity; flips sign at the side walls.
    pub x_vel: f64,
}

/// A projectile in flight. Direction comes from its `EntityKind`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub strategy: ProjectileStrategy,
}

/// A destructible shield.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bunker {
    pub state: BunkerState,
}
