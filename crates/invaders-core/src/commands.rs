//! Player commands sent from the input collaborator to the engine.
//!
//! Commands are applied immediately; entity additions and removals they
//! cause are staged and take effect at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::BulkDelete;

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    // --- Movement (level-triggered: active while held) ---
    MoveLeft,
    MoveRight,
    StopLeft,
    StopRight,

    // --- Discrete actions (edge-triggered) ---
    /// Fire a player projectile if the cooldown has elapsed.
    Shoot,
    /// Capture the world into the single snapshot slot.
    Snapshot,
    /// Restore the world from the snapshot slot, consuming it.
    Restore,
    /// Remove every live entity of a category (once per game).
    DeleteAll { category: BulkDelete },
}
