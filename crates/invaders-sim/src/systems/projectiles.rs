//! Projectile motion.
//!
//! Player shots travel up, enemy shots travel down, each at its strategy's
//! speed. A shot that reaches the far edge of its travel loses its life.

use hecs::{Entity, World};

use invaders_core::components::{Health, Projectile};
use invaders_core::enums::EntityKind;
use invaders_core::types::{Bounds, Position};

use crate::rules;

pub fn run(world: &mut World, live: &[Entity], world_bounds: Bounds) {
    for &entity in live {
        let spent = {
            let Ok((kind, pos, bounds, health, projectile)) = world
                .query_one_mut::<(&EntityKind, &mut Position, &Bounds, &Health, &Projectile)>(
                    entity,
                )
            else {
                continue;
            };
            if health.lives == 0 {
                continue;
            }
            let speed = projectile.strategy.speed();
            match kind {
                EntityKind::PlayerProjectile => {
                    pos.y -= speed;
                    pos.y <= bounds.height
                }
                EntityKind::EnemyProjectile => {
                    pos.y += speed;
                    pos.y >= world_bounds.height - bounds.height
                }
                _ => false,
            }
        };
        if spent {
            rules::apply_hit(world, entity);
        }
    }
}
