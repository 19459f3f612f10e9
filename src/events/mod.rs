//! Event types and observers used by the game.
//!
//! This module groups the domain events exchanged across systems and the
//! corresponding observers that react to them. Events provide a decoupled
//! way for systems to communicate without tight coupling or direct
//! dependencies.
//!
//! Submodules:
//! - [`audio`] – commands and messages for the background audio thread
//! - [`collision`] – contact and trigger notifications from the physics step
//! - [`gamestate`] – state transition notifications for the high-level game flow
//! - [`menu`] – confirmed main menu entries
//! - [`player`] – hits, wall hits and collected shirts
//! - [`switchdebug`] – toggle debug rendering and diagnostics on/off
//! - [`timer`] – finished [`Timer`](crate::components::timer::Timer) components
//!
//! See each submodule for concrete event data, semantics, and example usage.
pub mod audio;
pub mod collision;
pub mod gamestate;
pub mod menu;
pub mod player;
pub mod switchdebug;
pub mod timer;
