//! Sliding doors.
//!
//! [`door_trigger_observer`] counts who stands in a door's trigger volume and
//! [`door_system`] moves the progress and lays the leaves out every physics
//! step.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use raylib::prelude::Vector3;

use crate::components::boxcollider::BoxCollider;
use crate::components::door::{Door, DoorLeaf};
use crate::components::worldposition::WorldPosition;
use crate::events::collision::{TriggerEvent, TriggerPhase};
use crate::resources::worldtime::FixedTime;

pub fn door_trigger_observer(
    trigger: On<TriggerEvent>,
    mut doors: Query<&mut Door>,
    colliders: Query<&BoxCollider>,
) {
    let event = trigger.event();
    let Ok(mut door) = doors.get_mut(event.trigger) else {
        return;
    };
    let Ok(other) = colliders.get(event.other) else {
        return;
    };
    match event.phase {
        TriggerPhase::Enter => door.enter(other.layer),
        TriggerPhase::Exit => door.exit(other.layer),
        TriggerPhase::Stay => {}
    }
}

/// Advance every door and place its leaves.
pub fn door_system(
    fixed: Res<FixedTime>,
    mut doors: Query<(&mut Door, &WorldPosition)>,
    mut leaves: Query<(&DoorLeaf, &mut WorldPosition, &mut BoxCollider), Without<Door>>,
) {
    for (mut door, _) in doors.iter_mut() {
        door.tick(fixed.step);
    }
    for (leaf, mut position, mut collider) in leaves.iter_mut() {
        let Ok((door, door_pos)) = doors.get(leaf.door) else {
            continue;
        };
        let (x, scale) = door.leaf_layout(leaf.side);
        position.pos = door_pos.pos + Vector3::new(x, 0.0, 0.0);
        collider.size.x = door.leaf_size.x * scale;
    }
}
