//! Physics step integration tests: bodies, contacts, triggers, doors,
//! conveyors and elevators.

#![allow(dead_code, unused_imports)]

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use raylib::prelude::Vector3;

use clothescombat::components::actor::Actor;
use clothescombat::components::boxcollider::BoxCollider;
use clothescombat::components::conveyor::Conveyor;
use clothescombat::components::door::{Door, DoorLeaf, DoorSide};
use clothescombat::components::elevator::{Elevator, ElevatorCabin};
use clothescombat::components::layer::CollisionLayer;
use clothescombat::components::rigidbody::RigidBody;
use clothescombat::components::stuckto::StuckTo;
use clothescombat::components::worldposition::WorldPosition;
use clothescombat::events::collision::{CollisionEvent, TriggerEvent, TriggerPhase};
use clothescombat::resources::physicsworld::PhysicsWorld;
use clothescombat::resources::worldtime::{FixedTime, WorldTime};
use clothescombat::systems::conveyor::conveyor_observer;
use clothescombat::systems::door::{door_system, door_trigger_observer};
use clothescombat::systems::elevator::{elevator_cabin_observer, elevator_system};
use clothescombat::systems::physics::{
    detect_contacts, detect_triggers, integrate_bodies, rebuild_physics_world,
};
use clothescombat::systems::stuckto::stuck_to_entity_system;

const EPSILON: f32 = 1e-3;
const STEP: f32 = 0.02;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

#[derive(Resource, Default)]
struct Contacts(Vec<(Entity, Entity)>);

#[derive(Resource, Default)]
struct Triggers(Vec<TriggerPhase>);

fn record_contacts(trigger: On<CollisionEvent>, mut contacts: ResMut<Contacts>) {
    let event = trigger.event();
    contacts.0.push((event.a, event.b));
}

fn record_triggers(trigger: On<TriggerEvent>, mut triggers: ResMut<Triggers>) {
    triggers.0.push(trigger.event().phase);
}

fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(FixedTime::new(STEP));
    world.insert_resource(PhysicsWorld::default());
    world.init_resource::<Contacts>();
    world.init_resource::<Triggers>();
    world
}

fn spawn_floor(world: &mut World) -> Entity {
    world
        .spawn((
            WorldPosition::new(0.0, -0.5, 0.0),
            BoxCollider::new(20.0, 1.0, 20.0, CollisionLayer::Ground),
        ))
        .id()
}

fn spawn_body(world: &mut World, pos: Vector3) -> Entity {
    world
        .spawn((
            WorldPosition::from_vec(pos),
            RigidBody::with_gravity(9.81),
            BoxCollider::new(0.7, 1.7, 0.7, CollisionLayer::Player),
            Actor::default(),
        ))
        .id()
}

fn physics_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            integrate_bodies,
            elevator_system,
            stuck_to_entity_system,
            door_system,
            rebuild_physics_world,
            detect_contacts,
            detect_triggers,
        )
            .chain(),
    );
    schedule
}

fn run_steps(world: &mut World, schedule: &mut Schedule, steps: usize) {
    for _ in 0..steps {
        schedule.run(world);
    }
}

#[test]
fn body_falls_and_rests_on_floor() {
    let mut world = make_world();
    spawn_floor(&mut world);
    let body = spawn_body(&mut world, Vector3::new(0.0, 3.0, 0.0));

    let mut schedule = physics_schedule();
    run_steps(&mut world, &mut schedule, 150);

    let pos = world.get::<WorldPosition>(body).unwrap().pos;
    let rb = world.get::<RigidBody>(body).unwrap();
    assert!(approx_eq(pos.y, 0.85), "resting height was {}", pos.y);
    assert!(rb.grounded);
    assert!(approx_eq(rb.velocity.y, 0.0));
}

#[test]
fn frozen_body_does_not_move() {
    let mut world = make_world();
    let body = spawn_body(&mut world, Vector3::new(0.0, 3.0, 0.0));
    world.get_mut::<RigidBody>(body).unwrap().freeze();

    let mut schedule = physics_schedule();
    run_steps(&mut world, &mut schedule, 20);

    assert!(approx_eq(world.get::<WorldPosition>(body).unwrap().pos.y, 3.0));
}

#[test]
fn wall_stops_horizontal_motion() {
    let mut world = make_world();
    spawn_floor(&mut world);
    world.spawn((
        WorldPosition::new(2.0, 1.5, 0.0),
        BoxCollider::new(1.0, 3.0, 4.0, CollisionLayer::Environment),
    ));
    let body = spawn_body(&mut world, Vector3::new(0.0, 0.85, 0.0));
    world.get_mut::<RigidBody>(body).unwrap().velocity = Vector3::new(5.0, 0.0, 0.0);

    let mut schedule = physics_schedule();
    run_steps(&mut world, &mut schedule, 30);

    // wall face at x = 1.5, body half width 0.35
    let pos = world.get::<WorldPosition>(body).unwrap().pos;
    assert!(approx_eq(pos.x, 1.15), "stopped at {}", pos.x);
}

#[test]
fn new_contact_is_reported_once() {
    let mut world = make_world();
    world.spawn(Observer::new(record_contacts));
    world.flush();
    let floor = spawn_floor(&mut world);
    let body = spawn_body(&mut world, Vector3::new(0.0, 0.85, 0.0));

    let mut schedule = physics_schedule();
    run_steps(&mut world, &mut schedule, 10);

    let contacts = &world.resource::<Contacts>().0;
    assert_eq!(contacts.len(), 1);
    let (a, b) = contacts[0];
    assert!((a == body && b == floor) || (a == floor && b == body));
}

#[test]
fn trigger_reports_enter_stay_and_exit() {
    let mut world = make_world();
    world.spawn(Observer::new(record_triggers));
    world.flush();
    world.spawn((WorldPosition::new(0.0, 1.0, 0.0), BoxCollider::trigger(2.0, 2.0, 2.0)));
    let body = spawn_body(&mut world, Vector3::new(0.0, 1.0, 0.0));
    world.get_mut::<RigidBody>(body).unwrap().freeze();

    let mut schedule = physics_schedule();
    run_steps(&mut world, &mut schedule, 2);
    world.get_mut::<WorldPosition>(body).unwrap().pos = Vector3::new(10.0, 1.0, 0.0);
    run_steps(&mut world, &mut schedule, 1);

    let phases = &world.resource::<Triggers>().0;
    assert_eq!(
        phases,
        &vec![
            TriggerPhase::Enter,
            TriggerPhase::Stay,
            TriggerPhase::Stay,
            TriggerPhase::Exit
        ]
    );
}

fn spawn_door(world: &mut World) -> (Entity, Entity, Entity) {
    let door = world
        .spawn((
            Door::default(),
            WorldPosition::new(0.0, 1.5, 0.0),
            BoxCollider::trigger(3.0, 3.0, 4.0),
        ))
        .id();
    let left = world
        .spawn((
            DoorLeaf { door, side: DoorSide::Left },
            WorldPosition::new(0.0, 1.5, 0.0),
            BoxCollider::new(1.0, 3.0, 0.2, CollisionLayer::Environment),
        ))
        .id();
    let right = world
        .spawn((
            DoorLeaf { door, side: DoorSide::Right },
            WorldPosition::new(0.0, 1.5, 0.0),
            BoxCollider::new(1.0, 3.0, 0.2, CollisionLayer::Environment),
        ))
        .id();
    (door, left, right)
}

#[test]
fn automatic_door_opens_for_player_and_closes_after() {
    let mut world = make_world();
    world.spawn(Observer::new(door_trigger_observer));
    world.flush();
    let (door, left, right) = spawn_door(&mut world);
    let body = spawn_body(&mut world, Vector3::new(0.0, 0.85, 1.0));
    world.get_mut::<RigidBody>(body).unwrap().freeze();

    let mut schedule = physics_schedule();
    run_steps(&mut world, &mut schedule, 40);

    {
        let d = world.get::<Door>(door).unwrap();
        assert_eq!(d.occupancy, 1);
        assert!(d.is_open);
        assert!(approx_eq(d.progress, 1.0));
        let open_x = d.open_x;
        assert!(approx_eq(world.get::<WorldPosition>(left).unwrap().pos.x, -open_x));
        assert!(approx_eq(world.get::<WorldPosition>(right).unwrap().pos.x, open_x));
    }

    world.get_mut::<WorldPosition>(body).unwrap().pos = Vector3::new(10.0, 0.85, 10.0);
    run_steps(&mut world, &mut schedule, 40);

    let d = world.get::<Door>(door).unwrap();
    assert_eq!(d.occupancy, 0);
    assert!(!d.is_open);
    assert!(approx_eq(d.progress, 0.0));
}

#[test]
fn shirts_do_not_open_doors() {
    let mut world = make_world();
    world.spawn(Observer::new(door_trigger_observer));
    world.flush();
    let (door, _, _) = spawn_door(&mut world);
    let mut body = RigidBody::with_gravity(9.81);
    body.freeze();
    world.spawn((
        WorldPosition::new(0.0, 1.0, 1.0),
        body,
        BoxCollider::new(0.3, 0.3, 0.3, CollisionLayer::Projectile),
    ));

    let mut schedule = physics_schedule();
    run_steps(&mut world, &mut schedule, 10);

    let d = world.get::<Door>(door).unwrap();
    assert_eq!(d.occupancy, 0);
    assert!(approx_eq(d.progress, 0.0));
}

#[test]
fn conveyor_sets_propel_on_actor_standing_on_it() {
    let mut world = make_world();
    world.spawn(Observer::new(conveyor_observer));
    world.flush();
    world.spawn((
        Conveyor::new(Vector3::new(1.0, 0.0, 0.0), 6.0).flipped(true),
        WorldPosition::new(0.0, 0.05, 0.0),
        BoxCollider::trigger(4.0, 0.1, 2.0),
    ));
    let body = spawn_body(&mut world, Vector3::new(0.0, 0.85, 0.0));
    world.get_mut::<RigidBody>(body).unwrap().freeze();

    let mut schedule = physics_schedule();
    run_steps(&mut world, &mut schedule, 1);

    let propel = world.get::<Actor>(body).unwrap().propel;
    assert!(approx_eq(propel.x, -6.0));
    assert!(approx_eq(propel.z, 0.0));
}

#[test]
fn elevator_carries_occupants_and_its_cabin() {
    let mut world = make_world();
    world.spawn(Observer::new(elevator_cabin_observer));
    world.flush();

    let mut elevator = Elevator::new(vec![Vector3::zero(), Vector3::new(0.0, 2.0, 0.0)]);
    elevator.travel_time = 1.0;
    elevator.wait_before_open = 0.1;
    elevator.hold_open_time = 0.1;
    elevator.wait_after_close = 0.1;
    let platform = world
        .spawn((
            elevator,
            WorldPosition::new(0.0, 0.0, 0.0),
            BoxCollider::new(3.0, 0.4, 3.0, CollisionLayer::Ground),
        ))
        .id();
    let cabin = world
        .spawn((
            ElevatorCabin { elevator: platform },
            StuckTo::riding(platform, Vector3::new(0.0, 1.45, 0.0)),
            WorldPosition::new(0.0, 1.45, 0.0),
            BoxCollider::trigger(3.0, 2.5, 3.0),
        ))
        .id();
    let rider = spawn_body(&mut world, Vector3::new(0.0, 1.05, 0.0));
    world.get_mut::<RigidBody>(rider).unwrap().freeze();

    let mut schedule = physics_schedule();
    run_steps(&mut world, &mut schedule, 80);

    let e = world.get::<Elevator>(platform).unwrap();
    assert_eq!(e.current_stop, 1);
    assert!(approx_eq(world.get::<WorldPosition>(platform).unwrap().pos.y, 2.0));
    assert!(approx_eq(world.get::<WorldPosition>(cabin).unwrap().pos.y, 3.45));
    assert!(approx_eq(world.get::<WorldPosition>(rider).unwrap().pos.y, 3.05));
    assert!(e.occupants.contains(&rider));
}
