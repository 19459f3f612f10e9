//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the game world. Components define data and behaviors such as position,
//! physics bodies, colliders, weapons, moving geometry and UI.
//!
//! Submodules overview:
//! - [`actor`] – facing angle, billboard material and conveyor push of players and shirts
//! - [`block`] – visible arena geometry
//! - [`boxcollider`] – axis-aligned box collider and its queries
//! - [`conveyor`] – belt that pushes whatever stands on it
//! - [`curve`] – easing curves shared by animations
//! - [`door`] – sliding double doors and their leaves
//! - [`dynamictext`] – text component for rendering variable strings
//! - [`elevator`] – platform moving between stops and its cabin trigger
//! - [`heading`] – yaw and pitch of an actor
//! - [`layer`] – collision layers and masks
//! - [`menu`] – main menu, player select and victory screens
//! - [`persistent`] – marker for entities that persist across scene changes
//! - [`player`] – player state, movement helpers and camera rig
//! - [`projectile`] – shirt state machine
//! - [`rigidbody`] – velocity and named accelerations
//! - [`screenposition`] – screen-space position for UI elements
//! - [`spawnpoint`] – player and ammo spawnpoints
//! - [`stuckto`] – follow another entity's position
//! - [`timer`] – countdown timer that emits events when finished
//! - [`transition`] – bar wipe between scenes
//! - [`ui`] – HUD parts and small UI animations
//! - [`weapon`] – charge-and-release shirt launcher
//! - [`worldposition`] – position in the 3D world
//! - [`zindex`] – drawing order of UI elements

pub mod actor;
pub mod block;
pub mod boxcollider;
pub mod conveyor;
pub mod curve;
pub mod door;
pub mod dynamictext;
pub mod elevator;
pub mod heading;
pub mod layer;
pub mod menu;
pub mod persistent;
pub mod player;
pub mod projectile;
pub mod rigidbody;
pub mod screenposition;
pub mod spawnpoint;
pub mod stuckto;
pub mod timer;
pub mod transition;
pub mod ui;
pub mod weapon;
pub mod worldposition;
pub mod zindex;
