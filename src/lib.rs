//! Clothes Combat library.
//!
//! This module exposes the game's ECS components, resources, systems, and events
//! for use in integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod math;
pub mod resources;
pub mod systems;
