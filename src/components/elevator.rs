//! Elevator platform component.
//!
//! An elevator shuttles between a list of stops, ping-ponging at the ends.
//! At every stop it waits, opens its own door, holds it, closes it, waits
//! again and travels on. [`Elevator::advance`] runs one frame of that cycle
//! and reports what the surrounding systems must apply.

use bevy_ecs::prelude::{Component, Entity};
use raylib::prelude::Vector3;
use smallvec::SmallVec;

use crate::components::curve::Curve;
use crate::math;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ElevatorStage {
    #[default]
    Arriving,
    Opening,
    Hold,
    Closing,
    Departing,
    Moving,
}

/// What one frame of the cycle changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElevatorStep {
    /// New platform position while moving.
    pub position: Option<Vector3>,
    /// Platform displacement this frame, applied to occupants.
    pub displacement: Option<Vector3>,
    /// Landing door to open at the current stop.
    pub open_stop_door: Option<Entity>,
    pub close_stop_door: Option<Entity>,
}

#[derive(Component, Clone, Debug)]
pub struct Elevator {
    pub stops: Vec<Vector3>,
    pub current_stop: usize,
    pub next_stop: usize,
    pub going_up: bool,
    pub stage: ElevatorStage,
    pub timer: f32,
    pub travel_time: f32,
    pub travel_curve: Curve,
    pub wait_before_open: f32,
    pub wait_after_close: f32,
    pub hold_open_time: f32,
    /// Door carried by the platform.
    pub door: Option<Entity>,
    /// Optional landing door per stop, same indices as `stops`.
    pub stop_doors: Vec<Option<Entity>>,
    pub occupants: SmallVec<[Entity; 8]>,
}

impl Elevator {
    pub fn new(stops: Vec<Vector3>) -> Self {
        Self {
            stops,
            current_stop: 0,
            next_stop: 0,
            going_up: true,
            stage: ElevatorStage::Arriving,
            timer: 0.0,
            travel_time: 3.0,
            travel_curve: Curve::linear(),
            wait_before_open: 0.5,
            wait_after_close: 0.5,
            hold_open_time: 3.0,
            door: None,
            stop_doors: Vec::new(),
            occupants: SmallVec::new(),
        }
    }

    /// Whether the platform door should be open in the current stage.
    pub fn door_open(&self) -> bool {
        matches!(self.stage, ElevatorStage::Opening | ElevatorStage::Hold)
    }

    pub fn add_occupant(&mut self, e: Entity) {
        if !self.occupants.contains(&e) {
            self.occupants.push(e);
        }
    }

    pub fn remove_occupant(&mut self, e: Entity) {
        self.occupants.retain(|o| *o != e);
    }

    fn stop_door(&self, index: usize) -> Option<Entity> {
        self.stop_doors.get(index).copied().flatten()
    }

    /// Pick the next stop, turning around at either end.
    fn choose_next_stop(&mut self) {
        let last = self.stops.len() - 1;
        if self.going_up {
            if self.current_stop >= last {
                self.going_up = false;
                self.next_stop = self.current_stop - 1;
            } else {
                self.next_stop = self.current_stop + 1;
            }
        } else if self.current_stop == 0 {
            self.going_up = true;
            self.next_stop = 1;
        } else {
            self.next_stop = self.current_stop - 1;
        }
    }

    /// Run one frame of the stop cycle.
    ///
    /// `position` is the platform position before the frame and
    /// `door_progress` the platform door's progress (doorless elevators act as
    /// if the door moved instantly).
    pub fn advance(&mut self, dt: f32, position: Vector3, door_progress: Option<f32>) -> ElevatorStep {
        let mut step = ElevatorStep::default();
        self.timer += dt;

        if self.stops.len() >= 2 && self.stage == ElevatorStage::Moving {
            self.choose_next_stop();
            let t = if self.travel_time > 0.0 {
                self.timer / self.travel_time
            } else {
                1.0
            };
            let eased = self.travel_curve.evaluate(math::clamp01(t));
            let new_pos = self.stops[self.current_stop].lerp(self.stops[self.next_stop], eased);
            step.displacement = Some(new_pos - position);
            step.position = Some(new_pos);
        }

        match self.stage {
            ElevatorStage::Arriving => {
                if self.timer >= self.wait_before_open {
                    self.stage = ElevatorStage::Opening;
                    self.timer = 0.0;
                }
            }
            ElevatorStage::Opening => {
                if door_progress.unwrap_or(1.0) >= 1.0 {
                    self.stage = ElevatorStage::Hold;
                    self.timer = 0.0;
                    step.open_stop_door = self.stop_door(self.current_stop);
                }
            }
            ElevatorStage::Hold => {
                if self.timer >= self.hold_open_time {
                    self.stage = ElevatorStage::Closing;
                    self.timer = 0.0;
                }
            }
            ElevatorStage::Closing => {
                if door_progress.unwrap_or(0.0) <= 0.0 {
                    self.stage = ElevatorStage::Departing;
                    self.timer = 0.0;
                    step.close_stop_door = self.stop_door(self.current_stop);
                }
            }
            ElevatorStage::Departing => {
                if self.timer >= self.wait_after_close {
                    self.stage = ElevatorStage::Moving;
                    self.timer = 0.0;
                }
            }
            ElevatorStage::Moving => {
                if self.timer >= self.travel_time {
                    self.stage = ElevatorStage::Arriving;
                    if self.stops.len() >= 2 {
                        self.current_stop = self.next_stop;
                    }
                    self.timer = 0.0;
                }
            }
        }
        step
    }
}

/// Trigger volume riding on an elevator platform. Actors inside become
/// occupants and are carried with the platform.
#[derive(Component, Clone, Copy, Debug)]
pub struct ElevatorCabin {
    pub elevator: Entity,
}
