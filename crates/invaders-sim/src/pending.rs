//! Entity additions and removals staged during a tick.
//!
//! Nothing enters or leaves the live list while systems iterate it;
//! `StagedChanges::apply` commits everything at the tick boundary.
//! Removals are applied before additions.

use std::collections::HashSet;

use hecs::{Entity, World};

use invaders_core::enums::{EntityKind, ProjectileStrategy};

use crate::components::Volley;
use crate::record::EntityRecord;

/// One staged spawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Addition {
    pub record: EntityRecord,
    /// Enemy whose volley the spawned projectile joins.
    pub owner: Option<Entity>,
}

/// Outcome of one flush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushStats {
    pub added: usize,
    pub removed: usize,
}

#[derive(Debug, Default)]
pub struct StagedChanges {
    additions: Vec<Addition>,
    removals: Vec<Entity>,
    removal_set: HashSet<Entity>,
}

impl StagedChanges {
    pub fn stage_spawn(&mut self, record: EntityRecord, owner: Option<Entity>) {
        self.additions.push(Addition { record, owner });
    }

    /// Stage a removal. Staging the same entity twice is harmless.
    pub fn stage_removal(&mut self, entity: Entity) {
        if self.removal_set.insert(entity) {
            self.removals.push(entity);
        }
    }

    pub fn is_staged_for_removal(&self, entity: Entity) -> bool {
        self.removal_set.contains(&entity)
    }

    pub fn additions(&self) -> &[Addition] {
        &self.additions
    }

    /// Drop every staged spawn.
    pub fn clear_additions(&mut self) {
        self.additions.clear();
    }

    /// Drop staged spawns of `kind` carrying `strategy` and return how many
    /// entities will no longer appear. Shots riding with a dropped enemy
    /// are kept as standalone spawns.
    pub fn cancel_spawns(&mut self, kind: EntityKind, strategy: ProjectileStrategy) -> usize {
        let mut cancelled = 0;
        let mut kept = Vec::with_capacity(self.additions.len());
        for mut addition in self.additions.drain(..) {
            match (&mut addition.record, kind) {
                (EntityRecord::Enemy(enemy), EntityKind::Enemy) if enemy.strategy == strategy => {
                    cancelled += 1;
                    kept.extend(enemy.projectiles.drain(..).map(|p| Addition {
                        record: EntityRecord::EnemyProjectile(p),
                        owner: None,
                    }));
                    continue;
                }
                (EntityRecord::Enemy(enemy), EntityKind::EnemyProjectile) => {
                    let before = enemy.projectiles.len();
                    enemy.projectiles.retain(|p| p.strategy != strategy);
                    cancelled += before - enemy.projectiles.len();
                }
                (EntityRecord::EnemyProjectile(p), EntityKind::EnemyProjectile)
                    if p.strategy == strategy =>
                {
                    cancelled += 1;
                    continue;
                }
                _ => {}
            }
            kept.push(addition);
        }
        self.additions = kept;
        cancelled
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    /// Commit staged changes to the world and the live list, then clear them.
    pub fn apply(&mut self, world: &mut World, live: &mut Vec<Entity>) -> FlushStats {
        let mut stats = FlushStats::default();

        if !self.removals.is_empty() {
            let before = live.len();
            live.retain(|entity| !self.removal_set.contains(entity));
            stats.removed = before - live.len();
            for entity in self.removals.drain(..) {
                let _ = world.despawn(entity);
            }
            self.removal_set.clear();

            // Volleys may still hold handles that were just despawned.
            for (_entity, volley) in world.query_mut::<&mut Volley>() {
                volley.projectiles.retain(|p| live.contains(p));
            }
        }

        for addition in self.additions.drain(..) {
            let spawned = addition.record.spawn(world);
            stats.added += spawned.len();
            if let Some(owner) = addition.owner {
                if let Ok(mut volley) = world.get::<&mut Volley>(owner) {
                    volley.projectiles.extend(spawned.iter().copied());
                }
            }
            live.extend(spawned);
        }

        stats
    }
}
