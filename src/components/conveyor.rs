//! Conveyor belt component.
//!
//! Conveyors are trigger volumes. Every physics step an actor stays inside,
//! the conveyor overwrites the actor's propel vector with its push.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

#[derive(Component, Clone, Copy, Debug)]
pub struct Conveyor {
    /// Push direction before `flip` is applied.
    pub direction: Vector3,
    pub force: f32,
    pub flip: bool,
}

impl Conveyor {
    pub fn new(direction: Vector3, force: f32) -> Self {
        Self {
            direction: direction.normalized(),
            force,
            flip: false,
        }
    }

    pub fn flipped(mut self, flip: bool) -> Self {
        self.flip = flip;
        self
    }

    /// Velocity handed to actors standing on the belt.
    pub fn push(&self) -> Vector3 {
        let sign = if self.flip { -1.0 } else { 1.0 };
        self.direction * (sign * self.force)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_follows_direction_and_flip() {
        let c = Conveyor::new(Vector3::new(0.0, 0.0, 2.0), 4.0);
        assert!((c.push().z - 4.0).abs() < 1e-5);
        let c = c.flipped(true);
        assert!((c.push().z + 4.0).abs() < 1e-5);
    }
}
