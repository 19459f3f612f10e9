//! Shirt projectile systems.
//!
//! A thrown shirt flies on the inert layer until armed, raycasts ahead every
//! physics step so fast throws cannot tunnel through walls, and settles on the
//! floor where any player (the thrower only after a short delay) can pick it
//! up again. Touching any player destroys a thrown shirt; only players other
//! than the thrower are hit. Collected shirts fly into their collector and
//! become ammo.
//!
//! Ammo spawnpoints drop pickup shirts through [`spawn_pickup_shirt`].

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use raylib::prelude::{Color, Vector3};

use crate::components::actor::{Actor, BillboardMaterial};
use crate::components::boxcollider::BoxCollider;
use crate::components::heading::Heading;
use crate::components::layer::{CollisionLayer, LayerMask};
use crate::components::player::Player;
use crate::components::projectile::{Projectile, ShirtState};
use crate::components::rigidbody::RigidBody;
use crate::components::spawnpoint::{AMMO_DROP_HEIGHT, SpawnKind, Spawnpoint, random_interval};
use crate::components::worldposition::WorldPosition;
use crate::events::collision::CollisionEvent;
use crate::events::player::{PlayerHitEvent, ShirtCollectedEvent, WallHitEvent};
use crate::math;
use crate::resources::gameconfig::GameConfig;
use crate::resources::physicsworld::PhysicsWorld;
use crate::resources::session::Session;
use crate::resources::worldtime::{FixedTime, WorldTime};

/// Shirts are drawn rotated against the thrower's yaw.
pub const THROWN_YAW_OFFSET: f32 = 95.0;

/// Spawn a shirt leaving `owner`'s hands.
#[allow(clippy::too_many_arguments)]
pub fn spawn_thrown_shirt(
    commands: &mut Commands,
    config: &GameConfig,
    owner: Entity,
    team: usize,
    color: Color,
    position: Vector3,
    yaw: f32,
    velocity: Vector3,
) -> Entity {
    let size = config.projectile.size;
    let mut body = RigidBody::with_gravity(config.gravity);
    body.velocity = velocity;
    commands
        .spawn((
            Projectile::thrown(owner, team, &config.projectile).with_position(position),
            Actor::new(0.0).with_tint(color),
            WorldPosition::from_vec(position),
            Heading::new(yaw + THROWN_YAW_OFFSET),
            body,
            BoxCollider::new(size, size, size, CollisionLayer::ProjectileInert),
        ))
        .id()
}

/// Spawn a spare shirt anyone can collect.
pub fn spawn_pickup_shirt(commands: &mut Commands, config: &GameConfig, position: Vector3) -> Entity {
    let size = config.projectile.size;
    commands
        .spawn((
            Projectile::pickup().with_position(position),
            Actor::new(0.0),
            WorldPosition::from_vec(position),
            Heading::default(),
            RigidBody::with_gravity(config.gravity),
            BoxCollider::new(size, size, size, CollisionLayer::ProjectileInert),
        ))
        .id()
}

/// Physics-step update: arming, look-ahead raycast and pickup zone.
pub fn projectile_fixed_update(
    fixed: Res<FixedTime>,
    config: Res<GameConfig>,
    physics: Res<PhysicsWorld>,
    mut shirts: Query<(
        &mut Projectile,
        &mut Actor,
        &mut WorldPosition,
        &mut RigidBody,
        &mut BoxCollider,
    )>,
) {
    let dt = fixed.step;
    let tuning = &config.projectile;
    for (mut shirt, mut actor, mut position, mut body, mut collider) in shirts.iter_mut() {
        if shirt.is_collected() {
            continue;
        }
        if shirt.arm_timer > 0.0 {
            shirt.arm_timer -= dt;
        }
        if shirt.is_armed() && collider.layer == CollisionLayer::ProjectileInert {
            collider.layer = CollisionLayer::Projectile;
        }
        shirt.travel = position.pos - shirt.spawn_position;

        if !shirt.hit {
            let speed = body.velocity.length();
            let ignore = if shirt.is_armed() { None } else { shirt.owner };
            if speed > 0.0
                && let Some(hit) = physics.raycast(
                    position.pos,
                    body.velocity,
                    speed * dt,
                    LayerMask::projectile_hits(),
                    ignore,
                    false,
                )
            {
                position.pos = hit.point;
                body.velocity = Vector3::zero();
                shirt.hit = true;
                if shirt.is_grounded() {
                    shirt.sensor_enabled = true;
                } else if hit.layer.is_landing_surface() {
                    shirt.land(&mut actor, tuning);
                } else {
                    shirt.start_falling(&mut actor);
                }
            }
        }

        if shirt.can_be_collected() {
            let zone = Vector3::new(tuning.pickup_zone, tuning.pickup_zone, tuning.pickup_zone);
            let players = physics.overlap_box(
                position.pos,
                zone,
                LayerMask::of(&[CollisionLayer::Player]),
                None,
            );
            if let Some(&target) = players.first() {
                shirt.collect(target);
                body.freeze();
                collider.enabled = false;
            }
        }
    }
}

/// Per-frame update: collection flight, timers, falling animation and
/// conveyor pushes.
pub fn projectile_update(
    mut commands: Commands,
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    mut shirts: Query<(Entity, &mut Projectile, &mut Actor, &mut WorldPosition)>,
    targets: Query<&WorldPosition, (With<Player>, Without<Projectile>)>,
) {
    let dt = time.delta;
    let tuning = &config.projectile;
    for (entity, mut shirt, mut actor, mut position) in shirts.iter_mut() {
        if let ShirtState::Collected(target) = shirt.state {
            let Ok(target_pos) = targets.get(target) else {
                commands.entity(entity).despawn();
                continue;
            };
            position.pos = math::move_towards(position.pos, target_pos.pos, tuning.move_speed * dt);
            if position.pos.distance_to(target_pos.pos) <= tuning.pickup_range {
                commands.trigger(ShirtCollectedEvent {
                    player: target,
                    shirt: entity,
                });
                commands.entity(entity).despawn();
            }
            continue;
        }

        shirt.self_pickup_timer = (shirt.self_pickup_timer - dt).max(0.0);
        if let Some(frame) =
            shirt.tick_animation(dt, tuning.falling_anim_fps, tuning.falling_anim_frames)
        {
            actor.set_material(BillboardMaterial::Falling(frame), None);
        }
        if position.pos.y < tuning.kill_height {
            commands.entity(entity).despawn();
            continue;
        }
        if shirt.is_grounded() {
            shirt.sensor_enabled = true;
        }
        let propel = actor.take_propel();
        if propel != Vector3::zero() {
            position.translate(propel * dt);
            if !shirt.is_grounded() {
                shirt.land(&mut actor, tuning);
            }
        }
    }
}

/// Resolve a shirt touching something solid.
pub fn projectile_collision_observer(
    trigger: On<CollisionEvent>,
    mut commands: Commands,
    config: Res<GameConfig>,
    mut shirts: Query<(&mut Projectile, &mut Actor)>,
    colliders: Query<&BoxCollider>,
) {
    let event = trigger.event();
    for (me, other) in [(event.a, event.b), (event.b, event.a)] {
        let Ok((mut shirt, mut actor)) = shirts.get_mut(me) else {
            continue;
        };
        if shirt.is_collected() {
            continue;
        }
        if shirt.is_grounded() {
            shirt.sensor_enabled = true;
            continue;
        }
        let Ok(other_collider) = colliders.get(other) else {
            continue;
        };
        match other_collider.layer {
            CollisionLayer::Player if !shirt.pickup => {
                if shirt.owner != Some(other)
                    && let Some(team) = shirt.team
                {
                    commands.trigger(PlayerHitEvent {
                        victim: other,
                        force: shirt.travel,
                        team,
                    });
                }
                commands.entity(me).try_despawn();
            }
            CollisionLayer::Ground | CollisionLayer::Projectile => {
                if shirt.land(&mut actor, &config.projectile)
                    && let Some(owner) = shirt.owner
                {
                    commands.trigger(WallHitEvent { owner });
                }
            }
            _ => {
                shirt.start_falling(&mut actor);
            }
        }
    }
}

/// Drop spare shirts from ammo spawnpoints at random intervals.
pub fn ammo_spawn_system(
    mut commands: Commands,
    fixed: Res<FixedTime>,
    config: Res<GameConfig>,
    mut session: ResMut<Session>,
    mut spawnpoints: Query<(&mut Spawnpoint, &WorldPosition)>,
) {
    let rules = &config.rules;
    for (mut spawnpoint, position) in spawnpoints.iter_mut() {
        if spawnpoint.kind != SpawnKind::Ammo || !spawnpoint.tick_ammo(fixed.step) {
            continue;
        }
        let drop = position.pos + math::UP * AMMO_DROP_HEIGHT;
        spawn_pickup_shirt(&mut commands, &config, drop);
        spawnpoint.ammo_interval =
            random_interval(&mut session.rng, rules.ammo_spawn_min, rules.ammo_spawn_max);
    }
}
