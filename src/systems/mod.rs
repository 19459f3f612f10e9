//! Game systems.
//!
//! This module groups all ECS systems that advance simulation, input, and
//! rendering.
//!
//! Submodules overview
//! - [`actor`] – keep billboard angles in step with headings
//! - [`audio`] – bridge with the audio thread (poll/update message queues)
//! - [`conveyor`] – push actors standing on belts
//! - [`door`] – open and close doors, place their leaves
//! - [`elevator`] – move platforms between stops and drive their doors
//! - [`gameconfig`] – apply configuration changes to the window and timing
//! - [`gamestate`] – check for pending state transitions, escape handling
//! - [`input`] – read hardware input into [`crate::resources::input::PlayerInputs`]
//! - [`menu`] – main menu, player select and victory screens
//! - [`physics`] – integrate bodies, resolve contacts, detect triggers
//! - [`player`] – movement, aim, weapon and hit reactions
//! - [`projectile`] – flying, landing and collected shirts, ammo drops
//! - [`render`] – draw the split-screen views and the UI using Raylib
//! - [`score`] – credit worn colours and end the match
//! - [`stuckto`] – move entities along with their targets
//! - [`time`] – update simulation time and delta, process timers
//! - [`transition`] – advance scene transition bars
//! - [`ui`] – HUD sync and small UI animations

pub mod actor;
pub mod audio;
pub mod conveyor;
pub mod door;
pub mod elevator;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod menu;
pub mod physics;
pub mod player;
pub mod projectile;
pub mod render;
pub mod score;
pub mod stuckto;
pub mod time;
pub mod transition;
pub mod ui;
