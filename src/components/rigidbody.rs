//! Dynamic body moved by the fixed physics step.
//!
//! Accelerations are kept as named, switchable forces. Players turn their
//! `"gravity"` force off while standing on walkable slopes and back on when
//! they jump or slide; shirts keep it on for their whole flight.
//!
//! A frozen body is skipped by integration, so its position can be driven by
//! gameplay code (a collected shirt flying into its player). Entities with a
//! [`BoxCollider`](super::boxcollider::BoxCollider) and no rigid body are
//! static geometry.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;
use rustc_hash::FxHashMap;

/// Force installed by [`RigidBody::with_gravity`].
pub const GRAVITY: &str = "gravity";

#[derive(Clone, Copy, Debug)]
pub struct Force {
    /// Acceleration in metres per second squared.
    pub value: Vector3,
    pub enabled: bool,
}

#[derive(Component, Clone, Debug, Default)]
pub struct RigidBody {
    pub velocity: Vector3,
    pub forces: FxHashMap<&'static str, Force>,
    pub frozen: bool,
    /// Rested on top of a collider during the last step.
    pub grounded: bool,
}

impl RigidBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body pulled down by `gravity`.
    pub fn with_gravity(gravity: f32) -> Self {
        let mut body = Self::new();
        body.set_force(GRAVITY, Vector3::new(0.0, -gravity, 0.0));
        body
    }

    /// Install or replace a force; it starts enabled.
    pub fn set_force(&mut self, name: &'static str, value: Vector3) {
        self.forces.insert(name, Force { value, enabled: true });
    }

    /// Switch a force on or off. Unknown names are ignored.
    pub fn toggle_force(&mut self, name: &str, enabled: bool) {
        if let Some(force) = self.forces.get_mut(name) {
            force.enabled = enabled;
        }
    }

    pub fn is_force_enabled(&self, name: &str) -> bool {
        self.forces.get(name).is_some_and(|f| f.enabled)
    }

    pub fn set_gravity(&mut self, enabled: bool) {
        self.toggle_force(GRAVITY, enabled);
    }

    pub fn uses_gravity(&self) -> bool {
        self.is_force_enabled(GRAVITY)
    }

    /// Sum of the enabled forces.
    pub fn total_acceleration(&self) -> Vector3 {
        self.forces
            .values()
            .filter(|f| f.enabled)
            .fold(Vector3::zero(), |acc, f| acc + f.value)
    }

    /// Stop and leave integration to gameplay code.
    pub fn freeze(&mut self) {
        self.frozen = true;
        self.velocity = Vector3::zero();
    }
}
