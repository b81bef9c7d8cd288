//! Core types and definitions for the invaders simulation.
//!
//! This crate defines the vocabulary shared across the workspace:
//! geometry, components, commands, configuration documents, observer
//! subjects, frame views, and tuning constants.
//! It has no dependency on the ECS or any presentation framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod observer;
pub mod state;
pub mod types;
