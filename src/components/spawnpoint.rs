//! Player and ammo spawnpoints.
//!
//! Player spawnpoints are read once when the arena loads. Ammo spawnpoints
//! keep dropping spare shirts at random intervals for the whole match.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

use crate::math;

/// Height above an ammo spawnpoint where spare shirts appear.
pub const AMMO_DROP_HEIGHT: f32 = 1.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpawnKind {
    Player,
    Ammo,
}

#[derive(Component, Clone, Debug)]
pub struct Spawnpoint {
    pub kind: SpawnKind,
    /// Player facing at spawn, in degrees.
    pub yaw: f32,
    /// Lift applied to the floor position so a body spawns standing.
    pub player_height: f32,
    pub ammo_timer: f32,
    pub ammo_interval: f32,
}

impl Spawnpoint {
    pub fn player(yaw: f32, player_height: f32) -> Self {
        Self {
            kind: SpawnKind::Player,
            yaw,
            player_height,
            ammo_timer: 0.0,
            ammo_interval: 0.0,
        }
    }

    pub fn ammo(first_interval: f32) -> Self {
        Self {
            kind: SpawnKind::Ammo,
            yaw: 0.0,
            player_height: 0.0,
            ammo_timer: 0.0,
            ammo_interval: first_interval,
        }
    }

    pub fn spawn_position(&self, floor: Vector3) -> Vector3 {
        floor + math::UP * self.player_height
    }

    /// Advance the ammo timer. Returns true when a shirt should drop; the
    /// caller then sets the next interval.
    pub fn tick_ammo(&mut self, dt: f32) -> bool {
        if self.kind != SpawnKind::Ammo {
            return false;
        }
        self.ammo_timer += dt;
        if self.ammo_timer >= self.ammo_interval {
            self.ammo_timer = 0.0;
            return true;
        }
        false
    }
}

/// Random interval in `[min, max]`.
pub fn random_interval(rng: &mut fastrand::Rng, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    min + rng.f32() * (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_position_is_lifted() {
        let s = Spawnpoint::player(0.0, 0.86);
        let p = s.spawn_position(Vector3::new(1.0, 0.0, 2.0));
        assert!((p.y - 0.86).abs() < 1e-5);
        assert!((p.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn ammo_timer_fires_and_resets() {
        let mut s = Spawnpoint::ammo(1.0);
        assert!(!s.tick_ammo(0.6));
        assert!(s.tick_ammo(0.6));
        assert!(s.ammo_timer.abs() < 1e-6);
    }

    #[test]
    fn player_spawnpoints_never_drop_ammo() {
        let mut s = Spawnpoint::player(0.0, 0.86);
        assert!(!s.tick_ammo(100.0));
    }

    #[test]
    fn random_interval_stays_in_range() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..100 {
            let v = random_interval(&mut rng, 5.0, 10.0);
            assert!((5.0..=10.0).contains(&v));
        }
        assert_eq!(random_interval(&mut rng, 3.0, 3.0), 3.0);
    }
}
