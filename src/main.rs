//! Clothes Combat main entry point.
//!
//! A split-screen arena game for up to six players written in Rust using:
//! - **raylib** for windowing, 3D drawing, input and audio
//! - **bevy_ecs** for entity-component-system architecture
//!
//! Players throw shirts at each other; whoever gets hit wears the thrower's
//! colour, and a colour scores for as long as somebody wears it.
//!
//! # Project Structure
//!
//! - [`components`] – ECS components (players, shirts, colliders, doors, UI, etc.)
//! - [`events`] – Event types (collision, hits, menu, state transitions, etc.)
//! - [`game`] – Scene setup for every game state
//! - [`resources`] – ECS resources (config, input, physics world, scoreboard, etc.)
//! - [`systems`] – ECS systems (physics, players, shirts, menus, rendering, etc.)
//!
//! # Main Loop
//!
//! 1. Initialize the raylib window, the ECS world and its resources, audio
//! 2. Register the scene hooks and observers
//! 3. Run the main loop:
//!    - Per frame: input, aim, weapons, score, UI, menus, audio
//!    - Fixed steps while playing: player and shirt physics, moving
//!      geometry, contact and trigger detection
//!    - Render every player's view and the UI
//! 4. Clean up the audio thread on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config config.ini --skip-menu
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod components;
mod events;
mod game;
mod math;
mod resources;
mod systems;

use crate::components::persistent::Persistent;
use crate::events::gamestate::GameStateChangedEvent;
use crate::events::gamestate::observe_gamestate_change_event;
use crate::events::switchdebug::switch_debug_observer;
use crate::game::LaunchOptions;
use crate::resources::arena::{ArenaLayout, default_arena};
use crate::resources::audio::{queue_sound_bank, setup_audio, shutdown_audio};
use crate::resources::debugconsole::DebugConsole;
use crate::resources::debugmode::DebugMode;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::input::PlayerInputs;
use crate::resources::physicsworld::PhysicsWorld;
use crate::resources::rendertarget::RenderTarget;
use crate::resources::scoreboard::Scoreboard;
use crate::resources::screensize::ScreenSize;
use crate::resources::session::Session;
use crate::resources::systemsstore::SystemsStore;
use crate::resources::windowsize::WindowSize;
use crate::resources::worldtime::{FixedTime, WorldTime};
use crate::systems::actor::update_actor_angles;
use crate::systems::audio::{
    forward_audio_cmds, poll_audio_messages, update_bevy_audio_cmds, update_bevy_audio_messages,
};
use crate::systems::conveyor::conveyor_observer;
use crate::systems::door::{door_system, door_trigger_observer};
use crate::systems::elevator::{elevator_cabin_observer, elevator_system};
use crate::systems::gameconfig::{apply_gameconfig_changes, fullscreen_toggle_system};
use crate::systems::gamestate::{
    check_pending_state, escape_system, state_is_main_menu, state_is_player_select,
    state_is_playing, state_is_victory,
};
use crate::systems::input::update_input_state;
use crate::systems::menu::{
    main_menu_system, menu_selection_observer, player_select_system, victory_system,
    victory_timer_observer,
};
use crate::systems::physics::{detect_contacts, detect_triggers, integrate_bodies, rebuild_physics_world};
use crate::systems::player::{
    player_debug_system, player_fixed_update, player_hit_observer, player_input_system,
    player_weapon_system, shirt_collected_observer, wall_hit_observer,
};
use crate::systems::projectile::{
    ammo_spawn_system, projectile_collision_observer, projectile_fixed_update, projectile_update,
};
use crate::systems::render::render_system;
use crate::systems::score::score_system;
use crate::systems::stuckto::stuck_to_entity_system;
use crate::systems::time::{fixed_steps_due, update_timers, update_world_time};
use crate::systems::transition::transition_system;
use crate::systems::ui::{hud_sync_system, hud_timer_observer, ui_animation_system};
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemId;
use clap::Parser;
use std::path::PathBuf;

/// Clothes Combat
#[derive(Parser)]
#[command(version, about = "Split-screen shirt-throwing arena game")]
struct Cli {
    /// Configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Arena layout in JSON. The built-in arena is used when missing or invalid.
    #[arg(long, value_name = "PATH")]
    arena: Option<PathBuf>,

    /// Skip the menus and start a match with the default devices.
    #[arg(long)]
    skip_menu: bool,
}

fn load_arena(path: Option<&PathBuf>) -> ArenaLayout {
    let Some(path) = path else {
        return default_arena();
    };
    match ArenaLayout::load(path) {
        Ok(arena) => {
            log::info!("Loaded arena '{}' from {}", arena.name, path.display());
            arena
        }
        Err(e) => {
            log::error!("{}. Using the built-in arena", e);
            default_arena()
        }
    }
}

/// Register a scene hook and keep its system entity alive across scenes.
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

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    log::info!("Starting Clothes Combat");
    let mut config = match &cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        log::warn!("{}. Using defaults", e);
    }

    // Window
    let (window_width, window_height) = config.window_size();
    let (mut rl, thread) = raylib::init()
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Clothes Combat")
        .build();
    rl.set_target_fps(config.target_fps);
    // Escape is read as game input
    rl.set_exit_key(None);

    let render_width = config.render_width;
    let render_height = config.render_height;

    let render_target = RenderTarget::new(&mut rl, &thread, render_width, render_height)
        .expect("Failed to create render target");
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(FixedTime::new(config.fixed_step));
    world.insert_resource(PhysicsWorld::default());
    // Internal render resolution
    world.insert_resource(ScreenSize {
        w: render_width as i32,
        h: render_height as i32,
    });
    world.insert_resource(WindowSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    });
    world.insert_resource(PlayerInputs::default());
    world.insert_resource(Session::default());
    world.insert_resource(Scoreboard::new(config.rules.player_count, &config.rules));
    world.insert_resource(DebugConsole::default());
    world.insert_resource(load_arena(cli.arena.as_ref()));
    world.insert_resource(LaunchOptions {
        skip_menu: cli.skip_menu,
    });
    world.insert_resource(config);
    world.insert_non_send_resource(render_target);

    setup_audio(&mut world); // sets up AudioBridge and both message queues
    queue_sound_bank(&mut world, "assets/audio");

    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());

    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);
    world.spawn((Observer::new(observe_gamestate_change_event), Persistent));

    // Scene hooks. Registered systems are entities in bevy_ecs 0.18, so they
    // are marked Persistent to survive scene transitions.
    let mut systems_store = SystemsStore::new();
    register_hook(&mut world, &mut systems_store, "setup", game::setup);
    register_hook(&mut world, &mut systems_store, "enter_main_menu", game::enter_main_menu);
    register_hook(&mut world, &mut systems_store, "enter_player_select", game::enter_player_select);
    register_hook(&mut world, &mut systems_store, "enter_play", game::enter_play);
    register_hook(&mut world, &mut systems_store, "enter_victory", game::enter_victory);
    register_hook(&mut world, &mut systems_store, "quit_game", game::quit_game);
    world.insert_resource(systems_store);

    world.flush();

    {
        let mut next_state = world.resource_mut::<NextGameState>();
        next_state.set(GameStates::Setup);
    }
    world.trigger(GameStateChangedEvent {});

    world.spawn((Observer::new(switch_debug_observer), Persistent));
    world.spawn((Observer::new(menu_selection_observer), Persistent));
    world.spawn((Observer::new(victory_timer_observer), Persistent));
    world.spawn((Observer::new(hud_timer_observer), Persistent));
    world.spawn((Observer::new(door_trigger_observer), Persistent));
    world.spawn((Observer::new(elevator_cabin_observer), Persistent));
    world.spawn((Observer::new(conveyor_observer), Persistent));
    world.spawn((Observer::new(projectile_collision_observer), Persistent));
    world.spawn((Observer::new(player_hit_observer), Persistent));
    world.spawn((Observer::new(wall_hit_observer), Persistent));
    world.spawn((Observer::new(shirt_collected_observer), Persistent));
    world.flush();

    // Physics step, run zero or more times per frame while playing.
    let mut fixed = Schedule::default();
    fixed.add_systems(
        (
            player_fixed_update,
            projectile_fixed_update,
            integrate_bodies,
            elevator_system,
            stuck_to_entity_system,
            door_system,
            ammo_spawn_system,
            rebuild_physics_world,
            detect_contacts,
            detect_triggers,
        )
            .chain(),
    );

    let mut update = Schedule::default();
    update.add_systems(apply_gameconfig_changes);
    update.add_systems(update_input_state.before(fullscreen_toggle_system));
    update.add_systems(fullscreen_toggle_system.before(apply_gameconfig_changes));
    update.add_systems(
        (
            update_bevy_audio_cmds,
            forward_audio_cmds,
            poll_audio_messages,
            update_bevy_audio_messages,
        )
            .chain(),
    );
    update.add_systems(
        (
            player_input_system,
            player_weapon_system,
            projectile_update,
            update_actor_angles,
            score_system,
        )
            .chain()
            .after(update_input_state)
            .run_if(state_is_playing),
    );
    update.add_systems(
        player_debug_system
            .after(player_input_system)
            .run_if(state_is_playing)
            .run_if(resource_exists::<DebugMode>),
    );
    update.add_systems(main_menu_system.after(update_input_state).run_if(state_is_main_menu));
    update.add_systems(player_select_system.after(update_input_state).run_if(state_is_player_select));
    update.add_systems(victory_system.after(update_input_state).run_if(state_is_victory));
    update.add_systems(ui_animation_system);
    update.add_systems(hud_sync_system.after(player_weapon_system));
    update.add_systems(transition_system);
    update.add_systems(update_timers);
    update.add_systems(escape_system.after(update_input_state));
    update.add_systems(
        check_pending_state
            .after(escape_system)
            .after(transition_system)
            .after(score_system),
    );
    update.add_systems(render_system.after(check_pending_state).after(ui_animation_system));

    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");
    fixed
        .initialize(&mut world)
        .expect("Failed to initialize physics schedule");

    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
        && *world.resource::<GameState>().get() != GameStates::Quitting
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        let steps = fixed_steps_due(&mut world);
        if *world.resource::<GameState>().get() == GameStates::Playing {
            for _ in 0..steps {
                fixed.run(&mut world);
            }
        }

        update.run(&mut world);

        world.clear_trackers();

        let (new_w, new_h) = {
            let rl = world.non_send_resource::<raylib::RaylibHandle>();
            (rl.get_screen_width(), rl.get_screen_height())
        };
        {
            let mut window_size = world.resource_mut::<WindowSize>();
            window_size.w = new_w;
            window_size.h = new_h;
        }
    }
    shutdown_audio(&mut world);
}
