//! Cleanup system: stages removal of destroyed entities.

use hecs::{Entity, World};

use crate::lookup;
use crate::pending::StagedChanges;

/// Stage every dead entity except the player, who stays visible after a loss.
pub fn run(world: &World, live: &[Entity], player: Entity, staged: &mut StagedChanges) {
    for &entity in live {
        if entity == player {
            continue;
        }
        if !lookup::is_alive(world, entity) {
            staged.stage_removal(entity);
        }
    }
}
