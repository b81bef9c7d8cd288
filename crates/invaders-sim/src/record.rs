//! Value records of entity state.
//!
//! A record owns a full copy of one entity's mutable fields and shares
//! nothing with the live world. Records are what the staging queues spawn
//! from and what snapshots are made of.

use hecs::{Entity, World};

use invaders_core::components::{Bunker, EnemyProfile, Health, Projectile};
use invaders_core::constants::*;
use invaders_core::enums::{BunkerState, EntityKind, Layer, ProjectileStrategy};
use invaders_core::types::{Bounds, Position};

use crate::components::Volley;
use crate::lookup;

/// Copy of one simulation entity (never the player).
#[derive(Debug, Clone, PartialEq)]
pub enum EntityRecord {
    Bunker(BunkerRecord),
    Enemy(EnemyRecord),
    PlayerProjectile(ProjectileRecord),
    EnemyProjectile(ProjectileRecord),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BunkerRecord {
    pub position: Position,
    pub bounds: Bounds,
    pub lives: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyRecord {
    pub position: Position,
    pub bounds: Bounds,
    pub lives: u32,
    pub strategy: ProjectileStrategy,
    pub x_vel: f64,
    /// In-flight projectiles, spawned just ahead of the enemy.
    pub projectiles: Vec<ProjectileRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileRecord {
    pub position: Position,
    pub bounds: Bounds,
    pub lives: u32,
    pub strategy: ProjectileStrategy,
}

impl EntityRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRecord::Bunker(_) => EntityKind::Bunker,
            EntityRecord::Enemy(_) => EntityKind::Enemy,
            EntityRecord::PlayerProjectile(_) => EntityKind::PlayerProjectile,
            EntityRecord::EnemyProjectile(_) => EntityKind::EnemyProjectile,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            EntityRecord::Bunker(r) => r.position,
            EntityRecord::Enemy(r) => r.position,
            EntityRecord::PlayerProjectile(r) | EntityRecord::EnemyProjectile(r) => r.position,
        }
    }

    /// Spawn fresh entities from this record.
    /// Returns handles in live-list order: an enemy's projectiles come first.
    pub fn spawn(&self, world: &mut World) -> Vec<Entity> {
        match self {
            EntityRecord::Bunker(r) => vec![world.spawn((
                EntityKind::Bunker,
                r.position,
                r.bounds,
                Layer::Foreground,
                Health { lives: r.lives },
                Bunker {
                    state: BunkerState::from_lives(r.lives),
                },
            ))],
            EntityRecord::Enemy(r) => {
                let mut spawned: Vec<Entity> = r
                    .projectiles
                    .iter()
                    .map(|p| spawn_projectile(world, EntityKind::EnemyProjectile, p))
                    .collect();
                let enemy = world.spawn((
                    EntityKind::Enemy,
                    r.position,
                    r.bounds,
                    Layer::Foreground,
                    Health { lives: r.lives },
                    EnemyProfile {
                        strategy: r.strategy,
                        x_vel: r.x_vel,
                    },
                    Volley {
                        projectiles: spawned.clone(),
                    },
                ));
                spawned.push(enemy);
                spawned
            }
            EntityRecord::PlayerProjectile(r) => {
                vec![spawn_projectile(world, EntityKind::PlayerProjectile, r)]
            }
            EntityRecord::EnemyProjectile(r) => {
                vec![spawn_projectile(world, EntityKind::EnemyProjectile, r)]
            }
        }
    }
}

fn spawn_projectile(world: &mut World, kind: EntityKind, r: &ProjectileRecord) -> Entity {
    world.spawn((
        kind,
        r.position,
        r.bounds,
        Layer::Foreground,
        Health { lives: r.lives },
        Projectile {
            strategy: r.strategy,
        },
    ))
}

/// A fresh player shot at `position`.
pub fn player_projectile(position: Position) -> EntityRecord {
    EntityRecord::PlayerProjectile(ProjectileRecord {
        position,
        bounds: Bounds::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
        lives: PROJECTILE_LIVES,
        strategy: ProjectileStrategy::Normal,
    })
}

/// A fresh enemy shot at `position`.
pub fn enemy_projectile(position: Position, strategy: ProjectileStrategy) -> EntityRecord {
    EntityRecord::EnemyProjectile(ProjectileRecord {
        position,
        bounds: Bounds::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
        lives: PROJECTILE_LIVES,
        strategy,
    })
}

/// Copy a projectile's state.
pub fn capture_projectile(world: &World, entity: Entity) -> Option<ProjectileRecord> {
    let projectile = world.get::<&Projectile>(entity).ok()?;
    Some(ProjectileRecord {
        position: lookup::position_of(world, entity)?,
        bounds: lookup::bounds_of(world, entity)?,
        lives: lookup::lives_of(world, entity)?,
        strategy: projectile.strategy,
    })
}

/// Copy a bunker's state.
pub fn capture_bunker(world: &World, entity: Entity) -> Option<BunkerRecord> {
    Some(BunkerRecord {
        position: lookup::position_of(world, entity)?,
        bounds: lookup::bounds_of(world, entity)?,
        lives: lookup::lives_of(world, entity)?,
    })
}

/// Copy an enemy's state. `projectiles` is the already-copied subset of its
/// volley that belongs in the record.
pub fn capture_enemy(
    world: &World,
    entity: Entity,
    projectiles: Vec<ProjectileRecord>,
) -> Option<EnemyRecord> {
    let profile = world.get::<&EnemyProfile>(entity).ok()?;
    Some(EnemyRecord {
        position: lookup::position_of(world, entity)?,
        bounds: lookup::bounds_of(world, entity)?,
        lives: lookup::lives_of(world, entity)?,
        strategy: profile.strategy,
        x_vel: profile.x_vel,
        projectiles,
    })
}
