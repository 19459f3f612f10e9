use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::components::actor::Actor;
use crate::components::conveyor::Conveyor;
use crate::events::collision::{TriggerEvent, TriggerPhase};

/// Push actors standing on a conveyor belt.
pub fn conveyor_observer(
    trigger: On<TriggerEvent>,
    conveyors: Query<&Conveyor>,
    mut actors: Query<&mut Actor>,
) {
    let event = trigger.event();
    if event.phase != TriggerPhase::Stay {
        return;
    }
    let Ok(conveyor) = conveyors.get(event.trigger) else {
        return;
    };
    if let Ok(mut actor) = actors.get_mut(event.other) {
        actor.propel = conveyor.push();
    }
}
