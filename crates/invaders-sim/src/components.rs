//! Components that hold entity handles, so they live beside the ECS
//! rather than in the core vocabulary crate.

use hecs::Entity;

/// Projectiles an enemy has fired that are still in flight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Volley {
    pub projectiles: Vec<Entity>,
}
