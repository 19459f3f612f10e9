//! Physics callbacks.
//!
//! The fixed-step physics pass triggers [`CollisionEvent`] when two solid
//! colliders start touching and [`TriggerEvent`] while a body overlaps a
//! trigger volume. Gameplay observers (shirts, doors, elevators, conveyors)
//! react to them.

use bevy_ecs::prelude::*;

/// Two solid colliders started touching. `a` is always a body with a
/// [`RigidBody`](crate::components::rigidbody::RigidBody); `b` may be static
/// or another body.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
}

impl CollisionEvent {
    /// The participant that is not `me`, if `me` takes part.
    pub fn other(&self, me: Entity) -> Option<Entity> {
        if self.a == me {
            Some(self.b)
        } else if self.b == me {
            Some(self.a)
        } else {
            None
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriggerPhase {
    Enter,
    /// Sent every physics step while the overlap lasts, including the step
    /// of the enter.
    Stay,
    Exit,
}

/// A body overlaps a trigger volume.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEvent {
    pub trigger: Entity,
    pub other: Entity,
    pub phase: TriggerPhase,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_participant() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let c = world.spawn_empty().id();
        let ev = CollisionEvent { a, b };
        assert_eq!(ev.other(a), Some(b));
        assert_eq!(ev.other(b), Some(a));
        assert_eq!(ev.other(c), None);
    }
}
