//! Enemy behavior: side-to-side march with a descent at each wall, and
//! random fire while fewer than `ENEMY_MAX_IN_FLIGHT` shots are airborne.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use invaders_core::components::{EnemyProfile, Health};
use invaders_core::constants::*;
use invaders_core::types::{Bounds, Position};

use crate::components::Volley;
use crate::lookup;
use crate::pending::StagedChanges;
use crate::record;

/// Tuning for one enemy pass.
#[derive(Debug, Clone, Copy)]
pub struct EnemyContext {
    pub world_bounds: Bounds,
    /// 1-in-N chance per tick of firing; 0 disables fire.
    pub fire_odds: u32,
}

pub fn run(
    world: &mut World,
    live: &[Entity],
    rng: &mut ChaCha8Rng,
    staged: &mut StagedChanges,
    ctx: EnemyContext,
) {
    for &entity in live {
        // Prune shots that were destroyed; only airborne ones count.
        let in_flight = {
            let view: &World = world;
            let Ok(mut volley) = view.get::<&mut Volley>(entity) else {
                continue;
            };
            volley
                .projectiles
                .retain(|&p| lookup::is_alive(view, p) && !staged.is_staged_for_removal(p));
            volley.projectiles.len()
        };

        let Ok((pos, bounds, health, profile)) = world
            .query_one_mut::<(&mut Position, &Bounds, &Health, &mut EnemyProfile)>(entity)
        else {
            continue;
        };

        if health.lives > 0
            && in_flight < ENEMY_MAX_IN_FLIGHT
            && ctx.fire_odds > 0
            && rng.gen_range(0..ctx.fire_odds) == 0
        {
            let muzzle = Position::new(
                pos.x + bounds.width / 2.0 - PROJECTILE_WIDTH / 2.0,
                pos.y + bounds.height + ENEMY_PROJECTILE_GAP,
            );
            staged.stage_spawn(
                record::enemy_projectile(muzzle, profile.strategy),
                Some(entity),
            );
        }

        if pos.x <= bounds.width || pos.x >= ctx.world_bounds.width - bounds.width - 1.0 {
            pos.y += ENEMY_DESCENT;
            profile.x_vel = -profile.x_vel;
        }
        pos.x += profile.x_vel;
    }
}
