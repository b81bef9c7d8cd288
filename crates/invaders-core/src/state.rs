//! Frame view: the read-only picture of the world handed to the view layer
//! after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{Bounds, Position};

/// Complete visible state after a tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    pub tick: u64,
    /// Whole seconds elapsed.
    pub elapsed_secs: u64,
    pub score: u32,
    pub outcome: GameOutcome,
    /// Renderables in live-list order.
    pub entities: Vec<EntityView>,
    pub pending: PendingFlags,
}

/// One renderable entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    /// Stable handle bits; unique among live entities.
    pub id: u64,
    pub kind: EntityKind,
    /// Firing profile for enemies, strategy for projectiles.
    pub strategy: Option<ProjectileStrategy>,
    pub position: Position,
    pub bounds: Bounds,
    pub health: u32,
    pub alive: bool,
    pub bunker_state: Option<BunkerState>,
}

/// One-shot flags the view polls and then resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingFlags {
    pub delete_slow_projectiles: bool,
    pub delete_fast_projectiles: bool,
    pub delete_slow_aliens: bool,
    pub delete_fast_aliens: bool,
    pub restore: bool,
}

impl PendingFlags {
    pub fn deletion(&self, category: BulkDelete) -> bool {
        match category {
            BulkDelete::SlowProjectiles => self.delete_slow_projectiles,
            BulkDelete::FastProjectiles => self.delete_fast_projectiles,
            BulkDelete::SlowAliens => self.delete_slow_aliens,
            BulkDelete::FastAliens => self.delete_fast_aliens,
        }
    }

    pub fn any_deletion(&self) -> bool {
        BulkDelete::ALL.iter().any(|c| self.deletion(*c))
    }
}
