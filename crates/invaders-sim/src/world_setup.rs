//! Entity factories for building the initial world from a `GameConfig`.
//!
//! The player is spawned directly; bunkers and enemies go through
//! `EntityRecord` so the same code path serves both setup and restore.

use hecs::{Entity, World};

use invaders_core::components::{Health, PlayerShip};
use invaders_core::config::{BunkerConfig, EnemyConfig, GameConfig, PlayerConfig};
use invaders_core::constants::*;
use invaders_core::enums::{EntityKind, Layer};
use invaders_core::types::Bounds;

use crate::record::{BunkerRecord, EnemyRecord, EntityRecord};

/// Populate an empty world. Returns the player and the live list in
/// spawn order: player, bunkers, enemies.
pub fn populate(world: &mut World, config: &GameConfig) -> (Entity, Vec<Entity>) {
    let player = spawn_player(world, &config.player);
    let mut live = vec![player];

    for bunker in &config.bunkers {
        live.extend(bunker_record(bunker).spawn(world));
    }
    for enemy in &config.enemies {
        live.extend(enemy_record(enemy).spawn(world));
    }

    (player, live)
}

/// Spawn the player's ship.
pub fn spawn_player(world: &mut World, config: &PlayerConfig) -> Entity {
    world.spawn((
        EntityKind::Player,
        config.position.to_position(),
        Bounds::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        Layer::Foreground,
        Health {
            lives: config.lives,
        },
        PlayerShip {
            speed: config.speed,
        },
    ))
}

pub fn bunker_record(config: &BunkerConfig) -> EntityRecord {
    EntityRecord::Bunker(BunkerRecord {
        position: config.position.to_position(),
        bounds: config.size.to_bounds(),
        lives: BUNKER_LIVES,
    })
}

/// A fresh enemy, moving left with nothing in flight.
pub fn enemy_record(config: &EnemyConfig) -> EntityRecord {
    EntityRecord::Enemy(EnemyRecord {
        position: config.position.to_position(),
        bounds: Bounds::new(ENEMY_WIDTH, ENEMY_HEIGHT),
        lives: ENEMY_LIVES,
        strategy: config.projectile.strategy(),
        x_vel: ENEMY_INITIAL_X_VEL,
        projectiles: Vec::new(),
    })
}
