//! Thrown shirt component.
//!
//! A shirt moves through a small state machine: it flies until its swept ray
//! or a contact hits something, tumbles while falling, lies on the floor once
//! it lands, and finally is collected by a player walking over it.

use bevy_ecs::prelude::{Component, Entity};
use raylib::prelude::Vector3;

use crate::components::actor::{Actor, BillboardMaterial};
use crate::resources::gameconfig::ProjectileTuning;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShirtState {
    Flying,
    Falling,
    Grounded,
    /// Being pulled toward the collecting player.
    Collected(Entity),
}

#[derive(Component, Clone, Debug)]
pub struct Projectile {
    pub state: ShirtState,
    /// Latched once the swept ray hit something; no more sweeps after that.
    pub hit: bool,
    /// Spawned by an ammo spawnpoint rather than thrown.
    pub pickup: bool,
    pub owner: Option<Entity>,
    /// Colour index transferred to a player it hits.
    pub team: Option<usize>,
    /// Time left on the inert layer.
    pub arm_timer: f32,
    pub self_pickup_timer: f32,
    pub anim_timer: f32,
    pub anim_frame: usize,
    /// Displacement since the throw; becomes the knockback of a hit.
    pub travel: Vector3,
    pub spawn_position: Vector3,
    pub sensor_enabled: bool,
}

impl Projectile {
    pub fn thrown(owner: Entity, team: usize, tuning: &ProjectileTuning) -> Self {
        Self {
            state: ShirtState::Flying,
            hit: false,
            pickup: false,
            owner: Some(owner),
            team: Some(team),
            arm_timer: tuning.arm_delay,
            self_pickup_timer: tuning.self_pickup_time,
            anim_timer: 0.0,
            anim_frame: 0,
            travel: Vector3::zero(),
            spawn_position: Vector3::zero(),
            sensor_enabled: false,
        }
    }

    /// A spare shirt dropped by an ammo spawnpoint. It counts as lying on
    /// the floor from the start, so it never tumbles or shrinks.
    pub fn pickup() -> Self {
        Self {
            state: ShirtState::Grounded,
            hit: false,
            pickup: true,
            owner: None,
            team: None,
            arm_timer: 0.0,
            self_pickup_timer: 0.0,
            anim_timer: 0.0,
            anim_frame: 0,
            travel: Vector3::zero(),
            spawn_position: Vector3::zero(),
            sensor_enabled: true,
        }
    }

    pub fn with_position(mut self, pos: Vector3) -> Self {
        self.spawn_position = pos;
        self
    }

    pub fn is_armed(&self) -> bool {
        self.arm_timer <= 0.0
    }

    pub fn is_grounded(&self) -> bool {
        self.state == ShirtState::Grounded
    }

    pub fn is_collected(&self) -> bool {
        matches!(self.state, ShirtState::Collected(_))
    }

    /// Switch to tumbling. Only a flying shirt can start falling.
    pub fn start_falling(&mut self, actor: &mut Actor) -> bool {
        if self.state != ShirtState::Flying {
            return false;
        }
        self.state = ShirtState::Falling;
        self.sensor_enabled = true;
        self.anim_frame = 0;
        self.anim_timer = 0.0;
        actor.set_material(BillboardMaterial::Falling(0), None);
        true
    }

    /// Lay the shirt on the floor. Returns false if it already landed.
    pub fn land(&mut self, actor: &mut Actor, tuning: &ProjectileTuning) -> bool {
        if matches!(self.state, ShirtState::Grounded | ShirtState::Collected(_)) {
            return false;
        }
        self.state = ShirtState::Grounded;
        self.sensor_enabled = true;
        actor.set_material(BillboardMaterial::Ground, None);
        actor.visual_scale *= tuning.landing_shrink_ratio;
        actor.visual_offset -= tuning.landing_offset_height;
        true
    }

    pub fn can_be_collected(&self) -> bool {
        self.state == ShirtState::Grounded && self.sensor_enabled && self.self_pickup_timer <= 0.0
    }

    pub fn collect(&mut self, target: Entity) {
        self.state = ShirtState::Collected(target);
        self.sensor_enabled = false;
    }

    /// Advance the tumbling animation. Returns the new frame when it changes.
    pub fn tick_animation(&mut self, dt: f32, fps: f32, frames: usize) -> Option<usize> {
        if self.state != ShirtState::Falling || fps <= 0.0 || frames == 0 {
            return None;
        }
        self.anim_timer += dt;
        let frame_time = 1.0 / fps;
        let mut changed = false;
        while self.anim_timer >= frame_time {
            self.anim_timer -= frame_time;
            self.anim_frame = (self.anim_frame + 1) % frames;
            changed = true;
        }
        changed.then_some(self.anim_frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn some_entity() -> Entity {
        bevy_ecs::world::World::new().spawn_empty().id()
    }

    fn thrown() -> Projectile {
        Projectile::thrown(some_entity(), 2, &ProjectileTuning::default())
    }

    #[test]
    fn thrown_shirt_starts_unarmed() {
        let p = thrown();
        assert!(!p.is_armed());
        assert_eq!(p.team, Some(2));
        assert_eq!(p.state, ShirtState::Flying);
    }

    #[test]
    fn landing_shrinks_once() {
        let t = ProjectileTuning::default();
        let mut p = thrown();
        let mut a = Actor::new(0.0);
        assert!(p.land(&mut a, &t));
        assert!(approx_eq(a.visual_scale, 0.6));
        assert!(approx_eq(a.visual_offset, -0.2));
        assert!(!p.land(&mut a, &t));
        assert!(approx_eq(a.visual_scale, 0.6));
        assert_eq!(a.material, BillboardMaterial::Ground);
        assert!(p.sensor_enabled);
    }

    #[test]
    fn falling_only_from_flight() {
        let mut p = thrown();
        let mut a = Actor::new(0.0);
        assert!(p.start_falling(&mut a));
        assert_eq!(a.material, BillboardMaterial::Falling(0));
        assert!(!p.start_falling(&mut a));
    }

    #[test]
    fn animation_wraps_and_needs_fps() {
        let mut p = thrown();
        let mut a = Actor::new(0.0);
        assert_eq!(p.tick_animation(1.0, 10.0, 4), None);
        p.start_falling(&mut a);
        assert_eq!(p.tick_animation(0.05, 10.0, 4), None);
        assert_eq!(p.tick_animation(0.06, 10.0, 4), Some(1));
        assert_eq!(p.tick_animation(0.3, 10.0, 4), Some(0));
        assert_eq!(p.tick_animation(1.0, 0.0, 4), None);
    }

    #[test]
    fn spare_shirt_is_collectable_without_landing() {
        let t = ProjectileTuning::default();
        let mut p = Projectile::pickup();
        let mut a = Actor::new(0.0);
        assert!(p.is_grounded());
        assert!(p.can_be_collected());
        assert!(!p.land(&mut a, &t));
        assert!(!p.start_falling(&mut a));
        assert!(approx_eq(a.visual_scale, 1.0));
    }

    #[test]
    fn collection_needs_grounded_sensor_and_timer() {
        let t = ProjectileTuning::default();
        let mut p = thrown();
        let mut a = Actor::new(0.0);
        assert!(!p.can_be_collected());
        p.land(&mut a, &t);
        assert!(!p.can_be_collected());
        p.self_pickup_timer = 0.0;
        assert!(p.can_be_collected());
        p.collect(some_entity());
        assert!(p.is_collected());
        assert!(!p.can_be_collected());
    }
}
