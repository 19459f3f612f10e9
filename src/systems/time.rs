//! Time update systems.
//!
//! [`update_world_time`] advances the shared
//! [`WorldTime`](crate::resources::worldtime::WorldTime) once per frame,
//! applying `time_scale` to the provided delta. [`update_timers`] ticks every
//! [`Timer`] component and triggers a [`TimerEvent`] for each one that ends.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::timer::Timer;
use crate::events::timer::TimerEvent;
use crate::resources::worldtime::{FixedTime, WorldTime};

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is expected to be the unscaled frame delta in seconds. The system
/// applies the current `time_scale` and writes both `elapsed` and `delta`.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame_count += 1;
}

/// Feed the frame delta into the fixed-step accumulator and return how many
/// physics steps to run this frame.
pub fn fixed_steps_due(world: &mut World) -> u32 {
    let delta = world.resource::<WorldTime>().delta;
    match world.get_resource_mut::<FixedTime>() {
        Some(mut fixed) => fixed.accumulate(delta),
        None => 0,
    }
}

/// Tick timers; finished ones are removed and announced.
pub fn update_timers(
    mut commands: Commands,
    time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Timer)>,
) {
    for (entity, mut timer) in query.iter_mut() {
        if timer.tick(time.delta) {
            debug!("Timer '{}' on {:?} finished", timer.signal, entity);
            commands.entity(entity).remove::<Timer>();
            commands.trigger(TimerEvent {
                entity,
                signal: timer.signal.clone(),
            });
        }
    }
}
