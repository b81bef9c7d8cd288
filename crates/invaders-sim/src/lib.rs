//! Simulation engine for the invaders game.
//!
//! Owns the hecs ECS world, advances it one fixed tick per `update()`,
//! resolves collisions and scoring, and captures/restores the whole
//! mutable world through single-use snapshots.

pub mod components;
pub mod engine;
pub mod lookup;
pub mod memento;
pub mod pending;
pub mod record;
pub mod rules;
pub mod systems;
pub mod world_setup;

pub use engine::{GameEngine, SimConfig};
pub use memento::{Caretaker, Snapshot};

#[cfg(test)]
mod tests;
