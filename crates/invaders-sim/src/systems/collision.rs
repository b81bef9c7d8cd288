//! Pairwise collision resolution over the live list.
//!
//! Every pair `(i, j), i < j` is tested once, in live-list order. Eligible
//! overlapping pairs whose members are both alive each lose one life.

use hecs::{Entity, World};

use invaders_core::enums::{EntityKind, ProjectileStrategy};
use invaders_core::types::Aabb;

use crate::lookup;
use crate::rules::{self, PairRule};

/// Points earned by one destructive hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreAward {
    pub target: EntityKind,
    pub points: u32,
}

struct Collider {
    entity: Entity,
    kind: EntityKind,
    strategy: Option<ProjectileStrategy>,
    aabb: Aabb,
}

/// Resolve collisions. Returns awards in the order they were earned.
pub fn run(world: &World, live: &[Entity]) -> Vec<ScoreAward> {
    // Positions do not change during resolution; only health does.
    let colliders: Vec<Collider> = live
        .iter()
        .filter_map(|&entity| {
            Some(Collider {
                entity,
                kind: lookup::kind_of(world, entity)?,
                strategy: lookup::strategy_of(world, entity),
                aabb: lookup::aabb_of(world, entity)?,
            })
        })
        .collect();

    let mut awards = Vec::new();

    for i in 0..colliders.len() {
        for j in (i + 1)..colliders.len() {
            let a = &colliders[i];
            let b = &colliders[j];

            if rules::pair_rule(a.kind, b.kind) == PairRule::Exempt {
                continue;
            }
            if !a.aabb.intersects(&b.aabb) {
                continue;
            }
            if !lookup::is_alive(world, a.entity) || !lookup::is_alive(world, b.entity) {
                continue;
            }

            let a_destroyed = rules::apply_hit(world, a.entity);
            let b_destroyed = rules::apply_hit(world, b.entity);

            if a_destroyed {
                if let Some(points) = rules::score_for(a.kind, a.strategy, b.kind) {
                    awards.push(ScoreAward {
                        target: a.kind,
                        points,
                    });
                }
            }
            if b_destroyed {
                if let Some(points) = rules::score_for(b.kind, b.strategy, a.kind) {
                    awards.push(ScoreAward {
                        target: b.kind,
                        points,
                    });
                }
            }
        }
    }

    awards
}
