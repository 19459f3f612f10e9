//! Collider snapshot used for scene queries.
//!
//! After every physics step [`rebuild_physics_world`] copies the position and
//! collider of every collidable entity into [`PhysicsWorld`]. Raycasts and
//! overlap queries then run against that snapshot without borrowing any
//! component storage, so they can be used from systems that hold mutable
//! queries over the same entities.
//!
//! The resource also remembers which solid contacts and trigger overlaps were
//! active last step, which is what turns raw overlaps into enter/exit events.
//!
//! [`rebuild_physics_world`]: crate::systems::physics::rebuild_physics_world

use bevy_ecs::prelude::{Entity, Resource};
use raylib::prelude::Vector3;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::components::boxcollider::BoxCollider;
use crate::components::layer::{CollisionLayer, LayerMask};

#[derive(Clone, Copy, Debug)]
pub struct ColliderEntry {
    pub entity: Entity,
    pub position: Vector3,
    pub collider: BoxCollider,
    /// Owns a rigid body.
    pub dynamic: bool,
}

impl ColliderEntry {
    pub fn is_solid(&self) -> bool {
        self.collider.enabled && !self.collider.is_trigger
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub point: Vector3,
    pub normal: Vector3,
    pub distance: f32,
    pub layer: CollisionLayer,
    pub is_trigger: bool,
}

#[derive(Resource, Default, Debug)]
pub struct PhysicsWorld {
    pub colliders: Vec<ColliderEntry>,
    /// Solid contacts of the last step, as ordered pairs.
    pub contacts: FxHashSet<(Entity, Entity)>,
    /// `(trigger, other)` overlaps of the last step.
    pub overlaps: FxHashSet<(Entity, Entity)>,
}

/// Order a pair so `(a, b)` and `(b, a)` share a key.
pub fn ordered(a: Entity, b: Entity) -> (Entity, Entity) {
    if a <= b { (a, b) } else { (b, a) }
}

impl PhysicsWorld {
    pub fn clear_snapshot(&mut self) {
        self.colliders.clear();
    }

    pub fn push(&mut self, entry: ColliderEntry) {
        self.colliders.push(entry);
    }

    pub fn entry(&self, entity: Entity) -> Option<&ColliderEntry> {
        self.colliders.iter().find(|c| c.entity == entity)
    }

    /// Nearest enabled collider hit by a ray.
    ///
    /// `direction` need not be normalized. Colliders whose layer is not in
    /// `mask`, the `ignore` entity and (unless `hit_triggers`) trigger
    /// volumes are skipped. Boxes containing the origin never report a hit.
    pub fn raycast(
        &self,
        origin: Vector3,
        direction: Vector3,
        max_distance: f32,
        mask: LayerMask,
        ignore: Option<Entity>,
        hit_triggers: bool,
    ) -> Option<RayHit> {
        let dir = direction.normalized();
        if dir == Vector3::zero() || max_distance <= 0.0 {
            return None;
        }
        let mut best: Option<RayHit> = None;
        for c in &self.colliders {
            if !c.collider.enabled
                || Some(c.entity) == ignore
                || !mask.contains(c.collider.layer)
                || (c.collider.is_trigger && !hit_triggers)
            {
                continue;
            }
            let Some(hit) = c.collider.raycast(c.position, origin, dir, max_distance) else {
                continue;
            };
            if best.is_some_and(|b| b.distance <= hit.distance) {
                continue;
            }
            best = Some(RayHit {
                entity: c.entity,
                point: origin + dir * hit.distance,
                normal: hit.normal,
                distance: hit.distance,
                layer: c.collider.layer,
                is_trigger: c.collider.is_trigger,
            });
        }
        best
    }

    /// Solid colliders overlapping an axis-aligned query box.
    pub fn overlap_box(
        &self,
        center: Vector3,
        size: Vector3,
        mask: LayerMask,
        ignore: Option<Entity>,
    ) -> SmallVec<[Entity; 4]> {
        let query = BoxCollider::new(size.x, size.y, size.z, CollisionLayer::Sensor);
        self.colliders
            .iter()
            .filter(|c| {
                c.is_solid()
                    && Some(c.entity) != ignore
                    && mask.contains(c.collider.layer)
                    && query.overlaps(center, &c.collider, c.position)
            })
            .map(|c| c.entity)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn entry(entity: Entity, pos: Vector3, collider: BoxCollider) -> ColliderEntry {
        ColliderEntry {
            entity,
            position: pos,
            collider,
            dynamic: false,
        }
    }

    #[test]
    fn raycast_returns_nearest_and_respects_mask() {
        let mut world = World::new();
        let near = world.spawn_empty().id();
        let far = world.spawn_empty().id();
        let mut pw = PhysicsWorld::default();
        pw.push(entry(
            far,
            Vector3::new(0.0, 0.0, 10.0),
            BoxCollider::new(2.0, 2.0, 2.0, CollisionLayer::Environment),
        ));
        pw.push(entry(
            near,
            Vector3::new(0.0, 0.0, 5.0),
            BoxCollider::new(2.0, 2.0, 2.0, CollisionLayer::Player),
        ));
        let fwd = Vector3::new(0.0, 0.0, 3.0);
        let hit = pw
            .raycast(Vector3::zero(), fwd, 100.0, LayerMask::ALL, None, false)
            .unwrap();
        assert_eq!(hit.entity, near);
        assert!(approx_eq(hit.distance, 4.0));
        assert!(approx_eq(hit.point.z, 4.0));

        let hit = pw
            .raycast(Vector3::zero(), fwd, 100.0, LayerMask::ground(), None, false)
            .unwrap();
        assert_eq!(hit.entity, far);

        let hit = pw
            .raycast(Vector3::zero(), fwd, 100.0, LayerMask::ALL, Some(near), false)
            .unwrap();
        assert_eq!(hit.entity, far);
    }

    #[test]
    fn triggers_are_opt_in() {
        let mut world = World::new();
        let t = world.spawn_empty().id();
        let mut pw = PhysicsWorld::default();
        pw.push(entry(
            t,
            Vector3::new(0.0, -3.0, 0.0),
            BoxCollider::trigger(2.0, 2.0, 2.0),
        ));
        let down = Vector3::new(0.0, -1.0, 0.0);
        assert!(
            pw.raycast(Vector3::zero(), down, 10.0, LayerMask::ALL, None, false)
                .is_none()
        );
        let hit = pw
            .raycast(Vector3::zero(), down, 10.0, LayerMask::ALL, None, true)
            .unwrap();
        assert!(hit.is_trigger);
    }

    #[test]
    fn disabled_colliders_are_invisible() {
        let mut world = World::new();
        let e = world.spawn_empty().id();
        let mut pw = PhysicsWorld::default();
        pw.push(entry(
            e,
            Vector3::zero(),
            BoxCollider::new(1.0, 1.0, 1.0, CollisionLayer::Ground).with_enabled(false),
        ));
        let hits = pw.overlap_box(Vector3::zero(), Vector3::new(1.0, 1.0, 1.0), LayerMask::ALL, None);
        assert!(hits.is_empty());
    }

    #[test]
    fn overlap_box_finds_floor_under_feet() {
        let mut world = World::new();
        let floor = world.spawn_empty().id();
        let mut pw = PhysicsWorld::default();
        pw.push(entry(
            floor,
            Vector3::new(0.0, -0.5, 0.0),
            BoxCollider::new(10.0, 1.0, 10.0, CollisionLayer::Ground),
        ));
        let hits = pw.overlap_box(
            Vector3::new(0.0, 0.02, 0.0),
            Vector3::new(0.5, 0.1, 0.5),
            LayerMask::ground(),
            None,
        );
        assert_eq!(hits.as_slice(), &[floor]);
    }

    #[test]
    fn ordered_pairs_match() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        assert_eq!(ordered(a, b), ordered(b, a));
    }
}
