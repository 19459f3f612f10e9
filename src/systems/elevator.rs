//! Elevator platforms.
//!
//! The platform drives its own door (forced open while it is stopped with the
//! doors open) and the automatic doors at each stop. Actors standing in the
//! cabin trigger are carried by the platform's displacement.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::warn;

use crate::components::actor::Actor;
use crate::components::door::Door;
use crate::components::elevator::{Elevator, ElevatorCabin};
use crate::components::worldposition::WorldPosition;
use crate::events::collision::{TriggerEvent, TriggerPhase};
use crate::resources::worldtime::FixedTime;

pub fn elevator_system(
    fixed: Res<FixedTime>,
    mut elevators: Query<(Entity, &mut Elevator, &mut WorldPosition)>,
    mut doors: Query<&mut Door>,
    mut occupants: Query<&mut WorldPosition, Without<Elevator>>,
) {
    for (entity, mut elevator, mut position) in elevators.iter_mut() {
        let progress = match elevator.door {
            Some(door) => match doors.get(door) {
                Ok(d) => Some(d.progress),
                Err(_) => {
                    warn!("Elevator {:?} lost its door {:?}", entity, door);
                    elevator.door = None;
                    None
                }
            },
            None => None,
        };

        let step = elevator.advance(fixed.step, position.pos, progress);
        if let Some(pos) = step.position {
            position.pos = pos;
        }
        if let Some(delta) = step.displacement {
            elevator.occupants.retain(|e| occupants.contains(*e));
            for occupant in elevator.occupants.iter() {
                if let Ok(mut p) = occupants.get_mut(*occupant) {
                    p.translate(delta);
                }
            }
        }

        let open = elevator.door_open();
        if let Some(door) = elevator.door
            && let Ok(mut d) = doors.get_mut(door)
        {
            d.automatic = false;
            d.is_open = open;
        }
        if let Some(stop) = step.open_stop_door
            && let Ok(mut d) = doors.get_mut(stop)
        {
            d.is_open = true;
        }
        if let Some(stop) = step.close_stop_door
            && let Ok(mut d) = doors.get_mut(stop)
        {
            d.is_open = false;
        }
    }
}

/// Track actors entering and leaving an elevator cabin.
pub fn elevator_cabin_observer(
    trigger: On<TriggerEvent>,
    cabins: Query<&ElevatorCabin>,
    mut elevators: Query<&mut Elevator>,
    actors: Query<(), With<Actor>>,
) {
    let event = trigger.event();
    let Ok(cabin) = cabins.get(event.trigger) else {
        return;
    };
    if !actors.contains(event.other) {
        return;
    }
    let Ok(mut elevator) = elevators.get_mut(cabin.elevator) else {
        return;
    };
    match event.phase {
        TriggerPhase::Enter => elevator.add_occupant(event.other),
        TriggerPhase::Exit => elevator.remove_occupant(event.other),
        TriggerPhase::Stay => {}
    }
}
