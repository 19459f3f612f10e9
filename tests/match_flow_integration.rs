//! Game flow integration tests: scene hooks, menus, player select, scoring,
//! transitions and the victory screen.

#![allow(dead_code, unused_imports)]

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemId;
use raylib::prelude::Vector3;

use clothescombat::components::door::{Door, DoorLeaf};
use clothescombat::components::elevator::Elevator;
use clothescombat::components::conveyor::Conveyor;
use clothescombat::components::menu::{
    MainMenuScreen, Menu, MenuAction, PlayerSelect, VictoryScreen,
};
use clothescombat::components::persistent::Persistent;
use clothescombat::components::player::Player;
use clothescombat::components::spawnpoint::Spawnpoint;
use clothescombat::components::timer::Timer;
use clothescombat::components::transition::TransitionBars;
use clothescombat::components::ui::{Hud, Reticle};
use clothescombat::components::worldposition::WorldPosition;
use clothescombat::events::audio::AudioCmd;
use clothescombat::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use clothescombat::events::menu::MenuSelectionEvent;
use clothescombat::events::timer::TimerEvent;
use clothescombat::game;
use clothescombat::resources::arena::default_arena;
use clothescombat::resources::debugconsole::DebugConsole;
use clothescombat::resources::gameconfig::GameConfig;
use clothescombat::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use clothescombat::resources::input::{InputDevice, PlayerInputs};
use clothescombat::resources::physicsworld::PhysicsWorld;
use clothescombat::resources::scoreboard::Scoreboard;
use clothescombat::resources::screensize::ScreenSize;
use clothescombat::resources::session::{PALETTE, Session};
use clothescombat::resources::systemsstore::SystemsStore;
use clothescombat::resources::worldtime::WorldTime;
use clothescombat::systems::gamestate::escape_system;
use clothescombat::systems::menu::{
    RETURN_TO_MENU_SIGNAL, main_menu_system, menu_selection_observer, player_select_system,
    victory_system, victory_timer_observer,
};
use clothescombat::systems::score::score_system;
use clothescombat::systems::time::update_timers;
use clothescombat::systems::transition::transition_system;
use clothescombat::systems::ui::{SHOW_HUD_SIGNAL, hud_timer_observer};

fn make_world(delta: f32) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime {
        elapsed: 0.0,
        delta,
        time_scale: 1.0,
        frame_count: 0,
    });
    let mut config = GameConfig::new();
    config.rules.player_count = 2;
    world.insert_resource(config);
    world.insert_resource(ScreenSize { w: 800, h: 600 });
    world.insert_resource(PlayerInputs::default());
    world.insert_resource(Session::new(fastrand::Rng::with_seed(7)));
    world.insert_resource(PhysicsWorld::default());
    world.insert_resource(DebugConsole::default());
    world.insert_resource(default_arena());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.init_resource::<Messages<AudioCmd>>();
    world
}

fn register_hook<M>(
    world: &mut World,
    store: &mut SystemsStore,
    name: &'static str,
    system: impl IntoSystem<(), (), M> + 'static,
) {
    let id: SystemId = world.register_system(system);
    world.entity_mut(id.entity()).insert(Persistent);
    store.insert(name, id);
}

/// Register every scene hook the way the binary does.
fn install_hooks(world: &mut World) {
    let mut store = SystemsStore::new();
    register_hook(world, &mut store, "setup", game::setup);
    register_hook(world, &mut store, "enter_main_menu", game::enter_main_menu);
    register_hook(world, &mut store, "enter_player_select", game::enter_player_select);
    register_hook(world, &mut store, "enter_play", game::enter_play);
    register_hook(world, &mut store, "enter_victory", game::enter_victory);
    world.insert_resource(store);
    world.spawn((Observer::new(observe_gamestate_change_event), Persistent));
    world.flush();
}

fn enter_state(world: &mut World, state: GameStates) {
    world.resource_mut::<NextGameState>().set(state);
    world.trigger(GameStateChangedEvent {});
    world.flush();
}

fn count<T: Component>(world: &mut World) -> usize {
    world.query::<&T>().iter(world).count()
}

fn pending(world: &World) -> NextGameStates {
    *world.resource::<NextGameState>().get()
}

fn run_once<M>(world: &mut World, system: impl IntoSystem<(), (), M> + 'static) {
    let mut schedule = Schedule::default();
    schedule.add_systems(system);
    schedule.run(world);
}

#[test]
fn entering_play_builds_arena_players_and_huds() {
    let mut world = make_world(0.016);
    install_hooks(&mut world);

    enter_state(&mut world, GameStates::Playing);

    assert_eq!(*world.resource::<GameState>().get(), GameStates::Playing);
    assert_eq!(count::<Player>(&mut world), 2);
    assert_eq!(world.resource::<Session>().players.len(), 2);
    assert_eq!(count::<Elevator>(&mut world), 1);
    assert_eq!(count::<Conveyor>(&mut world), 1);
    // standalone door, cabin door and one landing door
    assert_eq!(count::<Door>(&mut world), 3);
    assert_eq!(count::<DoorLeaf>(&mut world), 6);
    assert_eq!(count::<Spawnpoint>(&mut world), 8);
    assert_eq!(world.resource::<Scoreboard>().scores.len(), 2);

    let huds: Vec<Hud> = world.query::<&Hud>().iter(&world).cloned().collect();
    assert_eq!(huds.len(), 2);
    assert!(huds.iter().all(|h| !h.visible));

    let ids: Vec<usize> = world.query::<&Player>().iter(&world).map(|p| p.id).collect();
    assert!(ids.contains(&0) && ids.contains(&1));

    for hud in &huds {
        let color = world.get::<Reticle>(hud.reticle).unwrap().color;
        let expected = PALETTE[hud.slot];
        assert_eq!(
            (color.r, color.g, color.b, color.a),
            (expected.r, expected.g, expected.b, expected.a)
        );
    }
    let show_timer = world
        .query::<&Timer>()
        .iter(&world)
        .any(|t| t.signal == SHOW_HUD_SIGNAL);
    assert!(show_timer);
}

#[test]
fn leaving_play_clears_scene_but_keeps_persistent_entities() {
    let mut world = make_world(0.016);
    install_hooks(&mut world);
    enter_state(&mut world, GameStates::Playing);
    let persistent_before = count::<Persistent>(&mut world);

    enter_state(&mut world, GameStates::MainMenu);

    assert_eq!(count::<Player>(&mut world), 0);
    assert_eq!(count::<Door>(&mut world), 0);
    assert_eq!(count::<MainMenuScreen>(&mut world), 1);
    assert_eq!(count::<Menu>(&mut world), 1);
    assert_eq!(count::<Persistent>(&mut world), persistent_before);
    assert!(world.resource::<Session>().players.is_empty());
}

#[test]
fn setup_goes_to_main_menu() {
    let mut world = make_world(0.016);
    install_hooks(&mut world);

    enter_state(&mut world, GameStates::Setup);

    assert_eq!(pending(&world), NextGameStates::Pending(GameStates::MainMenu));
}

#[test]
fn setup_can_skip_the_menus() {
    let mut world = make_world(0.016);
    world.insert_resource(game::LaunchOptions { skip_menu: true });
    install_hooks(&mut world);

    enter_state(&mut world, GameStates::Setup);

    assert_eq!(pending(&world), NextGameStates::Pending(GameStates::Playing));
}

#[test]
fn main_menu_starts_on_submit_and_moves_selection() {
    let mut world = make_world(0.016);
    install_hooks(&mut world);
    enter_state(&mut world, GameStates::MainMenu);

    world.resource_mut::<PlayerInputs>().submit_all.update(true);
    run_once(&mut world, main_menu_system);
    let started = world.query::<&MainMenuScreen>().single(&world).unwrap().started;
    assert!(started);

    {
        let mut inputs = world.resource_mut::<PlayerInputs>();
        inputs.submit_all.update(false);
        inputs.menu_down.update(true);
    }
    run_once(&mut world, main_menu_system);

    let (active, selected) = world
        .query::<&Menu>()
        .single(&world)
        .map(|m| (m.active, m.selected()))
        .unwrap();
    assert!(active);
    assert_eq!(selected, Some(MenuAction::HowTo));
}

#[test]
fn menu_play_starts_transition_to_player_select() {
    let mut world = make_world(0.016);
    install_hooks(&mut world);
    world.spawn((Observer::new(menu_selection_observer), Persistent));
    world.flush();
    enter_state(&mut world, GameStates::MainMenu);

    let menu = world.query_filtered::<Entity, With<Menu>>().single(&world).unwrap();
    world.trigger(MenuSelectionEvent {
        menu,
        action: MenuAction::Play,
    });
    world.flush();

    let bars = world.query::<&TransitionBars>().single(&world).unwrap().clone();
    assert!(bars.going_in);
    assert!(!bars.wait);
    assert_eq!(bars.next, Some(GameStates::PlayerSelect));
}

#[test]
fn menu_quit_requests_quitting() {
    let mut world = make_world(0.016);
    world.spawn(Observer::new(menu_selection_observer));
    world.flush();
    let menu = world.spawn_empty().id();

    world.trigger(MenuSelectionEvent {
        menu,
        action: MenuAction::Quit,
    });

    assert_eq!(pending(&world), NextGameStates::Pending(GameStates::Quitting));
}

#[test]
fn transition_fires_next_state_once() {
    let mut world = make_world(0.1);
    let mut bars = TransitionBars::new(2);
    bars.reset(true, Some(GameStates::Playing));
    world.spawn(bars);

    let mut schedule = Schedule::default();
    schedule.add_systems(transition_system);
    for _ in 0..4 {
        schedule.run(&mut world);
    }
    assert_eq!(pending(&world), NextGameStates::Unchanged);

    for _ in 0..6 {
        schedule.run(&mut world);
    }
    assert_eq!(pending(&world), NextGameStates::Pending(GameStates::Playing));

    world.resource_mut::<NextGameState>().reset();
    schedule.run(&mut world);
    assert_eq!(pending(&world), NextGameStates::Unchanged);
}

#[test]
fn waiting_transition_does_not_advance() {
    let mut world = make_world(0.5);
    let mut bars = TransitionBars::new(2).waiting();
    bars.reset(true, Some(GameStates::MainMenu));
    world.spawn(bars);

    for _ in 0..10 {
        run_once(&mut world, transition_system);
    }

    assert_eq!(pending(&world), NextGameStates::Unchanged);
}

#[test]
fn devices_join_and_lock_player_select() {
    let mut world = make_world(0.016);
    world.spawn(PlayerSelect::new(2));
    let mut bars = TransitionBars::new(2).waiting();
    bars.reset(true, None);
    world.spawn(bars);

    {
        let mut inputs = world.resource_mut::<PlayerInputs>();
        let keyboard = inputs.device_mut(InputDevice::Keyboard);
        keyboard.connected = true;
        keyboard.jump.update(true);
        let pad = inputs.device_mut(InputDevice::Gamepad(0));
        pad.connected = true;
        pad.jump.update(true);
    }
    run_once(&mut world, player_select_system);

    let ready = world.query::<&PlayerSelect>().single(&world).unwrap().ready;
    assert!(ready);
    let assignments = world.resource::<Session>().assignments.clone();
    assert_eq!(assignments, vec![InputDevice::Keyboard, InputDevice::Gamepad(0)]);
    let bars = world.query::<&TransitionBars>().single(&world).unwrap().clone();
    assert!(!bars.wait);
    assert_eq!(bars.next, Some(GameStates::Playing));
}

#[test]
fn default_config_fills_every_join_slot() {
    let mut world = make_world(0.016);
    world.insert_resource(GameConfig::new());
    install_hooks(&mut world);
    enter_state(&mut world, GameStates::PlayerSelect);

    {
        let mut inputs = world.resource_mut::<PlayerInputs>();
        for device in InputDevice::ALL {
            let input = inputs.device_mut(device);
            input.connected = true;
            input.jump.update(true);
        }
    }
    run_once(&mut world, player_select_system);

    let select = world.query::<&PlayerSelect>().single(&world).unwrap().clone();
    assert_eq!(select.slots.len(), InputDevice::ALL.len());
    assert!(select.ready);
    assert_eq!(
        world.resource::<Session>().assignments.len(),
        InputDevice::ALL.len()
    );

    enter_state(&mut world, GameStates::Playing);
    assert_eq!(count::<Player>(&mut world), InputDevice::ALL.len());
}

#[test]
fn score_reaching_win_score_ends_match() {
    let mut world = make_world(0.5);
    let mut rules = world.resource::<GameConfig>().rules.clone();
    rules.win_score = 1.0;
    world.insert_resource(Scoreboard::new(2, &rules));
    let mut wearer = Player::new(0, InputDevice::Keyboard, Vector3::zero());
    wearer.shirt_team = 1;
    world.spawn(wearer);

    run_once(&mut world, score_system);
    assert!(world.resource::<Session>().winner.is_none());

    run_once(&mut world, score_system);
    assert_eq!(world.resource::<Session>().winner, Some(1));
    assert_eq!(pending(&world), NextGameStates::Pending(GameStates::Victory));
    let scores = &world.resource::<Scoreboard>().scores;
    assert!(scores[1] > scores[0]);
}

#[test]
fn victory_start_returns_to_menu_after_delay() {
    let mut world = make_world(0.016);
    world.spawn(Observer::new(victory_timer_observer));
    world.flush();
    let screen = world.spawn(VictoryScreen::new(1)).id();
    world.spawn(TransitionBars::new(2).waiting());

    world.resource_mut::<PlayerInputs>().start_all.update(true);
    run_once(&mut world, victory_system);

    assert!(world.get::<VictoryScreen>(screen).unwrap().ending);
    assert_eq!(
        world.get::<Timer>(screen).map(|t| t.signal.clone()),
        Some(RETURN_TO_MENU_SIGNAL.to_string())
    );
    assert_eq!(pending(&world), NextGameStates::Unchanged);

    world.resource_mut::<WorldTime>().delta = 5.0;
    run_once(&mut world, update_timers);

    assert_eq!(pending(&world), NextGameStates::Pending(GameStates::MainMenu));
    assert!(world.get::<Timer>(screen).is_none());
}

#[test]
fn hud_timer_reveals_huds() {
    let mut world = make_world(0.016);
    world.spawn(Observer::new(hud_timer_observer));
    world.flush();
    let e = world.spawn_empty().id();
    let hud = world
        .spawn(Hud {
            slot: 0,
            visible: false,
            reticle: e,
            ammo: e,
            popup: e,
            weapon: e,
        })
        .id();

    world.trigger(TimerEvent {
        entity: e,
        signal: "something_else".into(),
    });
    assert!(!world.get::<Hud>(hud).unwrap().visible);

    world.trigger(TimerEvent {
        entity: e,
        signal: SHOW_HUD_SIGNAL.into(),
    });
    assert!(world.get::<Hud>(hud).unwrap().visible);
}

#[test]
fn escape_leaves_arena_and_quits_from_player_select() {
    let mut world = make_world(0.016);
    world.resource_mut::<GameState>().set(GameStates::Playing);
    world.resource_mut::<PlayerInputs>().escape.update(true);
    run_once(&mut world, escape_system);
    assert_eq!(pending(&world), NextGameStates::Pending(GameStates::MainMenu));

    world.resource_mut::<NextGameState>().reset();
    world.resource_mut::<GameState>().set(GameStates::PlayerSelect);
    run_once(&mut world, escape_system);
    assert_eq!(pending(&world), NextGameStates::Pending(GameStates::Quitting));
}

#[test]
fn escape_on_main_menu_reloads_it() {
    let mut world = make_world(0.016);
    install_hooks(&mut world);
    enter_state(&mut world, GameStates::MainMenu);
    world.resource_mut::<PlayerInputs>().escape.update(true);

    run_once(&mut world, escape_system);
    assert_eq!(pending(&world), NextGameStates::Pending(GameStates::MainMenu));

    world.trigger(GameStateChangedEvent {});
    world.flush();
    assert_eq!(*world.resource::<GameState>().get(), GameStates::MainMenu);
    assert_eq!(count::<MainMenuScreen>(&mut world), 1);
    assert_eq!(pending(&world), NextGameStates::Unchanged);
}
