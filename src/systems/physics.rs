//! Fixed-step physics.
//!
//! - [`integrate_bodies`] applies forces and moves every rigid body, resolving
//!   it against static solid colliders one axis at a time
//! - [`rebuild_physics_world`] snapshots colliders into
//!   [`PhysicsWorld`] for raycasts and overlap queries
//! - [`detect_contacts`] triggers a [`CollisionEvent`] when two solid
//!   colliders start touching
//! - [`detect_triggers`] triggers [`TriggerEvent`]s for bodies inside
//!   trigger volumes
//!
//! "Static" means a collider on an entity without a [`RigidBody`]: level
//! blocks, door leaves and elevator platforms. Those can still be moved by
//! their own systems; bodies caught inside them are pushed out along the
//! shortest axis.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector3;
use rustc_hash::FxHashSet;

use crate::components::boxcollider::BoxCollider;
use crate::components::rigidbody::RigidBody;
use crate::components::worldposition::WorldPosition;
use crate::events::collision::{CollisionEvent, TriggerEvent, TriggerPhase};
use crate::resources::physicsworld::{ColliderEntry, PhysicsWorld, ordered};
use crate::resources::worldtime::FixedTime;

/// Extra margin around a body when looking for contacts, so resting bodies
/// keep touching the surface they were snapped against.
pub const CONTACT_SKIN: f32 = 0.02;

fn axis(v: Vector3, i: usize) -> f32 {
    match i {
        0 => v.x,
        1 => v.y,
        _ => v.z,
    }
}

fn set_axis(v: &mut Vector3, i: usize, value: f32) {
    match i {
        0 => v.x = value,
        1 => v.y = value,
        _ => v.z = value,
    }
}

struct Solid {
    position: Vector3,
    collider: BoxCollider,
}

/// Smallest push that separates `body` at `pos` from `solid`, as
/// `(axis, signed distance)`.
fn penetration(body: &BoxCollider, pos: Vector3, solid: &Solid) -> (usize, f32) {
    let (a_min, a_max) = body.aabb(pos);
    let (s_min, s_max) = solid.collider.aabb(solid.position);
    let mut best = (1usize, f32::INFINITY);
    for i in 0..3 {
        let push_neg = axis(a_max, i) - axis(s_min, i);
        let push_pos = axis(s_max, i) - axis(a_min, i);
        let (dist, signed) = if push_neg < push_pos {
            (push_neg, -push_neg)
        } else {
            (push_pos, push_pos)
        };
        if dist < best.1.abs() {
            best = (i, signed);
        }
    }
    best
}

/// Move one body by `delta`, resolving against `solids`. Returns the new
/// position and whether the body came to rest on top of something.
fn move_and_resolve(
    collider: &BoxCollider,
    start: Vector3,
    delta: Vector3,
    velocity: &mut Vector3,
    solids: &[Solid],
) -> (Vector3, bool) {
    let mut pos = start;
    let mut grounded = false;
    let blocks = |s: &&Solid| collider.layer.collides_with(s.collider.layer);

    // push out of anything that moved into us
    for solid in solids.iter().filter(blocks) {
        if collider.overlaps(pos, &solid.collider, solid.position) {
            let (i, push) = penetration(collider, pos, solid);
            set_axis(&mut pos, i, axis(pos, i) + push);
            if i == 1 && push > 0.0 {
                grounded = true;
                velocity.y = velocity.y.max(0.0);
            }
        }
    }

    for i in 0..3 {
        let d = axis(delta, i);
        if d == 0.0 {
            continue;
        }
        set_axis(&mut pos, i, axis(pos, i) + d);
        let half = axis(collider.size, i).abs() * 0.5;
        let offset = axis(collider.offset, i);
        for solid in solids.iter().filter(blocks) {
            if !collider.overlaps(pos, &solid.collider, solid.position) {
                continue;
            }
            let (s_min, s_max) = solid.collider.aabb(solid.position);
            if d > 0.0 {
                set_axis(&mut pos, i, axis(s_min, i) - half - offset);
            } else {
                set_axis(&mut pos, i, axis(s_max, i) + half - offset);
                if i == 1 {
                    grounded = true;
                }
            }
            set_axis(velocity, i, 0.0);
        }
    }
    (pos, grounded)
}

/// Integrate velocities and positions of every non-frozen body.
pub fn integrate_bodies(
    fixed: Res<FixedTime>,
    mut bodies: Query<(&mut WorldPosition, &mut RigidBody, Option<&BoxCollider>)>,
    statics: Query<(&WorldPosition, &BoxCollider), Without<RigidBody>>,
) {
    let dt = fixed.step;
    let solids: Vec<Solid> = statics
        .iter()
        .filter(|(_, c)| c.enabled && !c.is_trigger)
        .map(|(p, c)| Solid {
            position: p.pos,
            collider: *c,
        })
        .collect();

    for (mut position, mut rb, collider) in bodies.iter_mut() {
        if rb.frozen {
            continue;
        }
        let acc = rb.total_acceleration();
        rb.velocity += acc * dt;
        rb.grounded = false;

        let delta = rb.velocity * dt;
        match collider {
            Some(c) if c.enabled && !c.is_trigger => {
                let mut velocity = rb.velocity;
                let (pos, grounded) =
                    move_and_resolve(c, position.pos, delta, &mut velocity, &solids);
                position.pos = pos;
                rb.velocity = velocity;
                rb.grounded = grounded;
            }
            _ => position.translate(delta),
        }
    }
}

/// Refresh the collider snapshot used by scene queries.
pub fn rebuild_physics_world(
    mut physics: ResMut<PhysicsWorld>,
    query: Query<(Entity, &WorldPosition, &BoxCollider, Has<RigidBody>)>,
) {
    physics.clear_snapshot();
    for (entity, position, collider, dynamic) in query.iter() {
        physics.push(ColliderEntry {
            entity,
            position: position.pos,
            collider: *collider,
            dynamic,
        });
    }
}

/// Track solid contacts and announce the new ones.
pub fn detect_contacts(mut commands: Commands, mut physics: ResMut<PhysicsWorld>) {
    let mut current: FxHashSet<(Entity, Entity)> = FxHashSet::default();
    let mut began: Vec<CollisionEvent> = Vec::new();
    for a in physics.colliders.iter().filter(|c| c.dynamic && c.is_solid()) {
        let mut inflated = a.collider;
        inflated.size = Vector3::new(
            a.collider.size.x.abs() + 2.0 * CONTACT_SKIN,
            a.collider.size.y.abs() + 2.0 * CONTACT_SKIN,
            a.collider.size.z.abs() + 2.0 * CONTACT_SKIN,
        );
        for b in physics.colliders.iter() {
            if b.entity == a.entity
                || !b.is_solid()
                || !a.collider.layer.collides_with(b.collider.layer)
            {
                continue;
            }
            if !inflated.overlaps(a.position, &b.collider, b.position) {
                continue;
            }
            let key = ordered(a.entity, b.entity);
            if current.insert(key) && !physics.contacts.contains(&key) {
                began.push(CollisionEvent {
                    a: a.entity,
                    b: b.entity,
                });
            }
        }
    }
    physics.contacts = current;
    for event in began {
        commands.trigger(event);
    }
}

/// Track bodies inside trigger volumes and announce enter, stay and exit.
///
/// Exit is only reported while both entities still exist.
pub fn detect_triggers(
    mut commands: Commands,
    mut physics: ResMut<PhysicsWorld>,
    alive: Query<Entity>,
) {
    let mut current: FxHashSet<(Entity, Entity)> = FxHashSet::default();
    for t in physics
        .colliders
        .iter()
        .filter(|c| c.collider.enabled && c.collider.is_trigger)
    {
        for o in physics.colliders.iter() {
            if o.entity == t.entity || !o.dynamic || !o.is_solid() {
                continue;
            }
            if t.collider.overlaps(t.position, &o.collider, o.position) {
                current.insert((t.entity, o.entity));
            }
        }
    }

    let mut events: Vec<TriggerEvent> = Vec::new();
    for &(trigger, other) in current.iter() {
        if !physics.overlaps.contains(&(trigger, other)) {
            events.push(TriggerEvent {
                trigger,
                other,
                phase: TriggerPhase::Enter,
            });
        }
        events.push(TriggerEvent {
            trigger,
            other,
            phase: TriggerPhase::Stay,
        });
    }
    for &(trigger, other) in physics.overlaps.iter() {
        if !current.contains(&(trigger, other))
            && alive.contains(trigger)
            && alive.contains(other)
        {
            events.push(TriggerEvent {
                trigger,
                other,
                phase: TriggerPhase::Exit,
            });
        }
    }
    physics.overlaps = current;
    for event in events {
        commands.trigger(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::layer::CollisionLayer;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn floor() -> Solid {
        Solid {
            position: Vector3::new(0.0, -0.5, 0.0),
            collider: BoxCollider::new(10.0, 1.0, 10.0, CollisionLayer::Ground),
        }
    }

    #[test]
    fn falling_box_lands_on_floor() {
        let body = BoxCollider::new(1.0, 2.0, 1.0, CollisionLayer::Player);
        let mut v = Vector3::new(0.0, -5.0, 0.0);
        let (pos, grounded) = move_and_resolve(
            &body,
            Vector3::new(0.0, 1.05, 0.0),
            Vector3::new(0.0, -0.1, 0.0),
            &mut v,
            &[floor()],
        );
        assert!(grounded);
        assert!(approx_eq(pos.y, 1.0));
        assert!(approx_eq(v.y, 0.0));
    }

    #[test]
    fn walls_stop_sideways_motion_only() {
        let wall = Solid {
            position: Vector3::new(2.0, 1.0, 0.0),
            collider: BoxCollider::new(1.0, 2.0, 10.0, CollisionLayer::Environment),
        };
        let body = BoxCollider::new(1.0, 1.0, 1.0, CollisionLayer::Player);
        let mut v = Vector3::new(10.0, 0.0, 10.0);
        let (pos, _) = move_and_resolve(
            &body,
            Vector3::new(0.9, 1.0, 0.0),
            Vector3::new(0.2, 0.0, 0.2),
            &mut v,
            &[wall],
        );
        assert!(approx_eq(pos.x, 1.0));
        assert!(approx_eq(pos.z, 0.2));
        assert!(approx_eq(v.x, 0.0));
        assert!(approx_eq(v.z, 10.0));
    }

    #[test]
    fn embedded_body_is_pushed_out_the_short_way() {
        let body = BoxCollider::new(1.0, 1.0, 1.0, CollisionLayer::Player);
        let mut v = Vector3::zero();
        let (pos, grounded) = move_and_resolve(
            &body,
            Vector3::new(0.0, 0.3, 0.0),
            Vector3::zero(),
            &mut v,
            &[floor()],
        );
        assert!(grounded);
        assert!(approx_eq(pos.y, 0.5));
    }

    #[test]
    fn ignored_layer_pairs_pass_through() {
        let shirt_wall = Solid {
            position: Vector3::new(0.0, 0.0, 0.0),
            collider: BoxCollider::new(2.0, 2.0, 2.0, CollisionLayer::Player),
        };
        let shirt = BoxCollider::new(0.4, 0.4, 0.4, CollisionLayer::ProjectileInert);
        let mut v = Vector3::new(0.0, 0.0, 20.0);
        let (pos, _) = move_and_resolve(
            &shirt,
            Vector3::new(0.0, 0.0, -1.5),
            Vector3::new(0.0, 0.0, 1.5),
            &mut v,
            &[shirt_wall],
        );
        assert!(approx_eq(pos.z, 0.0));
        assert!(approx_eq(v.z, 20.0));
    }
}
