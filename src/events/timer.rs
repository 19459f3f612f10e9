//! Timer expiration events.
//!
//! When a [`Timer`](crate::components::timer::Timer) reaches its duration,
//! [`update_timers`](crate::systems::time::update_timers) removes it and
//! triggers a [`TimerEvent`] carrying the timer's signal. The match uses
//! this to reveal the HUDs after the countdown and to leave the victory
//! screen.

use bevy_ecs::prelude::*;

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct TimerEvent {
    /// The entity whose timer expired.
    pub entity: Entity,
    pub signal: String,
}
