//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

use crate::constants::TICKS_PER_SECOND;

/// 2D position in world space (pixels).
/// x grows to the right, y grows downward; (0, 0) is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Size of an entity's bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned bounding box built from a position (top-left) and bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Position,
    pub max: Position,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Ticks elapsed since the game started (or since the restored snapshot's origin).
    pub tick: u64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Aabb {
    pub fn new(position: Position, bounds: Bounds) -> Self {
        Self {
            min: position,
            max: Position::new(position.x + bounds.width, position.y + bounds.height),
        }
    }

    /// Closed-interval overlap test: boxes that share an edge intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

impl SimTime {
    /// Whole seconds elapsed, the unit carried by time notifications.
    pub fn elapsed_secs(&self) -> u64 {
        self.tick / TICKS_PER_SECOND
    }

    /// True when this tick lands on a whole-second boundary.
    pub fn on_second_boundary(&self) -> bool {
        self.tick > 0 && self.tick % TICKS_PER_SECOND == 0
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }
}
