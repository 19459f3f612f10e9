//! Keeps elevator cabins and doors on their platform.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::stuckto::StuckTo;
use crate::components::worldposition::WorldPosition;

/// Snap every rider to its platform. Runs in the fixed step right after the
/// elevators move; riders whose platform is gone stay where they are.
pub fn stuck_to_entity_system(
    mut riders: Query<(Entity, &StuckTo, &mut WorldPosition)>,
    platforms: Query<&WorldPosition, Without<StuckTo>>,
) {
    for (entity, stuck_to, mut position) in riders.iter_mut() {
        match platforms.get(stuck_to.target) {
            Ok(platform) => position.pos = stuck_to.follow(platform.pos),
            Err(_) => debug!("{:?} lost its platform {:?}", entity, stuck_to.target),
        }
    }
}
