//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: input state, timing, rendering
//! handles, match state, and utilities. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `arena` – JSON arena layouts and the built-in arena
//! - `audio` – bridge and channels for the background audio thread
//! - `debugconsole` – text channels shown by the debug overlay
//! - `debugmode` – presence toggles optional debug overlays and logs
//! - `gameconfig` – INI-backed configuration and gameplay tuning
//! - `gamestate` – authoritative and pending high-level game state
//! - `input` – per-device input state and merged menu buttons
//! - `physicsworld` – collider snapshot, contacts and queries
//! - `rendertarget` – fixed-resolution target and split-screen views
//! - `scoreboard` – per-colour score, roulette and view borders
//! - `screensize` – internal render resolution in pixels
//! - `session` – device assignment, palette and winner of the match
//! - `systemsstore` – registry of dynamically-lookup-able systems by name
//! - `windowsize` – OS window size and letterboxing
//! - `worldtime` – simulation time, delta and fixed step
pub mod arena;
pub mod audio;
pub mod debugconsole;
pub mod debugmode;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod physicsworld;
pub mod rendertarget;
pub mod scoreboard;
pub mod screensize;
pub mod session;
pub mod systemsstore;
pub mod windowsize;
pub mod worldtime;
