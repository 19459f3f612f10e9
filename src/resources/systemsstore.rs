//! Scene enter hooks by name.
//!
//! Each [`GameStates`] names its hook through [`GameStates::hook_name`].
//! `main` registers one system per name at startup and the scene-change
//! observer runs it with `commands.run_system`.

use bevy_ecs::prelude::Resource;
use bevy_ecs::system::SystemId;
use log::warn;
use rustc_hash::FxHashMap;

use crate::resources::gamestate::GameStates;

#[derive(Resource, Default)]
pub struct SystemsStore {
    hooks: FxHashMap<&'static str, SystemId>,
}

impl SystemsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` under `name`. A second registration replaces the first.
    pub fn insert(&mut self, name: &'static str, id: SystemId) {
        if self.hooks.insert(name, id).is_some() {
            warn!("Scene hook '{}' registered twice", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<SystemId> {
        self.hooks.get(name).copied()
    }

    /// Hook to run when entering `state`.
    pub fn hook_for(&self, state: GameStates) -> Option<SystemId> {
        state.hook_name().and_then(|name| self.get(name))
    }
}
