//! Systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World`) and the
//! ordered live list. They never add or remove entities directly; spawns
//! and despawns go through `StagedChanges`.

pub mod bounds;
pub mod cleanup;
pub mod collision;
pub mod enemy_ai;
pub mod player;
pub mod projectiles;
pub mod view;
