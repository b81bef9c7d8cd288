//! Snapshots of the mutable world and the single-slot caretaker that
//! holds one between capture and restore.
//!
//! A `Snapshot` is built entirely from `EntityRecord` values, so nothing
//! in it aliases the live world: restoring spawns fresh entities with
//! fresh handles, and ticks run after a restore cannot reach back into
//! the snapshot.

use std::collections::{HashMap, HashSet};

use hecs::{Entity, World};

use invaders_core::enums::EntityKind;
use invaders_core::types::{Position, SimTime};

use crate::components::Volley;
use crate::lookup;
use crate::pending::StagedChanges;
use crate::record::{self, EntityRecord};

/// Immutable copy of the world state a restore returns to.
///
/// Not `Clone`: restoring consumes it.
#[derive(Debug, PartialEq)]
pub struct Snapshot {
    entities: Vec<EntityRecord>,
    time: SimTime,
    shoot_timer: u32,
    score: u32,
    player_position: Position,
}

/// Scalar engine state captured beside the entities.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScalarState {
    pub time: SimTime,
    pub shoot_timer: u32,
    pub score: u32,
}

impl Snapshot {
    /// Copy the world as it will look after the pending flush: entities
    /// staged for removal are left out and staged spawns are included.
    /// The player is represented only by its position.
    pub(crate) fn capture(
        world: &World,
        live: &[Entity],
        player: Entity,
        staged: &StagedChanges,
        scalars: ScalarState,
    ) -> Self {
        let kept = |entity: Entity| {
            entity != player && !staged.is_staged_for_removal(entity) && world.contains(entity)
        };

        // Enemy projectiles that will be captured through their owner.
        let mut owned: HashSet<Entity> = HashSet::new();
        for &entity in live {
            if !kept(entity) {
                continue;
            }
            if let Ok(volley) = world.get::<&Volley>(entity) {
                owned.extend(volley.projectiles.iter().copied().filter(|&p| kept(p)));
            }
        }

        let mut entities = Vec::with_capacity(live.len());
        let mut enemy_slots: HashMap<Entity, usize> = HashMap::new();

        for &entity in live {
            if !kept(entity) {
                continue;
            }
            let Some(kind) = lookup::kind_of(world, entity) else {
                continue;
            };
            let captured = match kind {
                EntityKind::Player => None,
                EntityKind::Bunker => record::capture_bunker(world, entity).map(EntityRecord::Bunker),
                EntityKind::Enemy => {
                    let projectiles = world
                        .get::<&Volley>(entity)
                        .map(|volley| {
                            volley
                                .projectiles
                                .iter()
                                .filter(|&&p| owned.contains(&p))
                                .filter_map(|&p| record::capture_projectile(world, p))
                                .collect()
                        })
                        .unwrap_or_default();
                    record::capture_enemy(world, entity, projectiles).map(|enemy| {
                        enemy_slots.insert(entity, entities.len());
                        EntityRecord::Enemy(enemy)
                    })
                }
                EntityKind::PlayerProjectile => {
                    record::capture_projectile(world, entity).map(EntityRecord::PlayerProjectile)
                }
                EntityKind::EnemyProjectile => {
                    if owned.contains(&entity) {
                        None
                    } else {
                        record::capture_projectile(world, entity).map(EntityRecord::EnemyProjectile)
                    }
                }
            };
            entities.extend(captured);
        }

        for addition in staged.additions() {
            let slot = addition.owner.and_then(|owner| enemy_slots.get(&owner).copied());
            match (&addition.record, slot) {
                (EntityRecord::EnemyProjectile(projectile), Some(slot)) => {
                    if let Some(EntityRecord::Enemy(enemy)) = entities.get_mut(slot) {
                        enemy.projectiles.push(projectile.clone());
                    }
                }
                (other, _) => entities.push(other.clone()),
            }
        }

        Self {
            entities,
            time: scalars.time,
            shoot_timer: scalars.shoot_timer,
            score: scalars.score,
            player_position: lookup::position_of(world, player).unwrap_or_default(),
        }
    }

    pub fn entities(&self) -> &[EntityRecord] {
        &self.entities
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn shoot_timer(&self) -> u32 {
        self.shoot_timer
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn player_position(&self) -> Position {
        self.player_position
    }

    /// A snapshot with no entities cannot be restored.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of entities a restore spawns, counting in-flight enemy shots.
    pub fn entity_count(&self) -> usize {
        self.entities
            .iter()
            .map(|record| match record {
                EntityRecord::Enemy(enemy) => 1 + enemy.projectiles.len(),
                _ => 1,
            })
            .sum()
    }
}

/// Holds at most one snapshot. Taking it empties the slot, so each
/// snapshot is restored at most once.
#[derive(Debug, Default)]
pub struct Caretaker {
    slot: Option<Snapshot>,
}

impl Caretaker {
    /// Store a snapshot, replacing any earlier one.
    pub fn save(&mut self, snapshot: Snapshot) {
        self.slot = Some(snapshot);
    }

    /// Remove and return the stored snapshot.
    pub fn take(&mut self) -> Option<Snapshot> {
        self.slot.take()
    }

    pub fn has_snapshot(&self) -> bool {
        self.slot.is_some()
    }
}
