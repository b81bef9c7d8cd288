//! Read helpers over single entities.
//!
//! Missing entities and missing components read as `None`, so callers can
//! hold handles that were despawned since they were taken.

use hecs::{Entity, World};

use invaders_core::components::{EnemyProfile, Health, Projectile};
use invaders_core::enums::{EntityKind, ProjectileStrategy};
use invaders_core::types::{Aabb, Bounds, Position};

pub fn kind_of(world: &World, entity: Entity) -> Option<EntityKind> {
    world.get::<&EntityKind>(entity).ok().map(|kind| *kind)
}

pub fn position_of(world: &World, entity: Entity) -> Option<Position> {
    world.get::<&Position>(entity).ok().map(|pos| *pos)
}

pub fn bounds_of(world: &World, entity: Entity) -> Option<Bounds> {
    world.get::<&Bounds>(entity).ok().map(|bounds| *bounds)
}

pub fn lives_of(world: &World, entity: Entity) -> Option<u32> {
    world.get::<&Health>(entity).ok().map(|health| health.lives)
}

pub fn is_alive(world: &World, entity: Entity) -> bool {
    lives_of(world, entity).is_some_and(|lives| lives > 0)
}

pub fn aabb_of(world: &World, entity: Entity) -> Option<Aabb> {
    Some(Aabb::new(position_of(world, entity)?, bounds_of(world, entity)?))
}

/// Firing profile of an enemy, or the strategy a projectile travels with.
pub fn strategy_of(world: &World, entity: Entity) -> Option<ProjectileStrategy> {
    if let Ok(profile) = world.get::<&EnemyProfile>(entity) {
        return Some(profile.strategy);
    }
    world
        .get::<&Projectile>(entity)
        .ok()
        .map(|projectile| projectile.strategy)
}
