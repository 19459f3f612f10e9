use bevy_ecs::prelude::*;

use crate::components::actor::Actor;
use crate::components::heading::Heading;

/// Keep every billboard facing angle in sync with its heading.
pub fn update_actor_angles(mut actors: Query<(&mut Actor, &Heading)>) {
    for (mut actor, heading) in actors.iter_mut() {
        actor.update_angle(heading.yaw);
    }
}
