//! View system: reads the ECS world and builds a `FrameView`.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use invaders_core::components::Bunker;
use invaders_core::enums::GameOutcome;
use invaders_core::state::{EntityView, FrameView, PendingFlags};
use invaders_core::types::SimTime;

use crate::lookup;

/// Everything outside the world that a frame view reports.
#[derive(Debug, Clone, Copy)]
pub struct FrameMeta {
    pub time: SimTime,
    pub score: u32,
    pub outcome: GameOutcome,
    pub pending: PendingFlags,
}

/// Build a frame view of every renderable, in live-list order.
pub fn build_frame_view(world: &World, live: &[Entity], meta: FrameMeta) -> FrameView {
    FrameView {
        tick: meta.time.tick,
        elapsed_secs: meta.time.elapsed_secs(),
        score: meta.score,
        outcome: meta.outcome,
        entities: live
            .iter()
            .filter_map(|&entity| build_entity(world, entity))
            .collect(),
        pending: meta.pending,
    }
}

fn build_entity(world: &World, entity: Entity) -> Option<EntityView> {
    let health = lookup::lives_of(world, entity)?;
    Some(EntityView {
        id: entity.to_bits().get(),
        kind: lookup::kind_of(world, entity)?,
        strategy: lookup::strategy_of(world, entity),
        position: lookup::position_of(world, entity)?,
        bounds: lookup::bounds_of(world, entity)?,
        health,
        alive: health > 0,
        bunker_state: world.get::<&Bunker>(entity).ok().map(|bunker| bunker.state),
    })
}
