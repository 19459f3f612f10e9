//! Scene setup for every game state.
//!
//! Each function here is registered in the
//! [`SystemsStore`](crate::resources::systemsstore::SystemsStore) under the
//! hook name of its [`GameStates`] and runs once when that state is entered,
//! after the previous scene's entities were despawned.
//!
//! - [`setup`] – one-time start-up, moves on to the main menu
//! - [`enter_main_menu`] – title, press-start prompt, menu and info panels
//! - [`enter_player_select`] – one join slot per player
//! - [`enter_play`] – builds the arena, the players and their HUDs
//! - [`enter_victory`] – winner banner
//! - [`quit_game`] – last words before the main loop exits

use bevy_ecs::prelude::*;
use log::{debug, error, info, warn};
use raylib::prelude::{Color, Vector2, Vector3};

use crate::components::actor::Actor;
use crate::components::block::BlockVisual;
use crate::components::boxcollider::BoxCollider;
use crate::components::conveyor::Conveyor;
use crate::components::curve::Curve;
use crate::components::door::{Door, DoorLeaf, DoorSide};
use crate::components::dynamictext::DynamicText;
use crate::components::elevator::{Elevator, ElevatorCabin};
use crate::components::heading::Heading;
use crate::components::layer::CollisionLayer;
use crate::components::menu::{
    MainMenuScreen, Menu, MenuAction, MenuPanel, MenuPanelText, PlayerSelect, PressStartPrompt,
    SelectSlot, VictoryScreen,
};
use crate::components::player::{CameraRig, Player};
use crate::components::rigidbody::RigidBody;
use crate::components::screenposition::ScreenPosition;
use crate::components::spawnpoint::{Spawnpoint, random_interval};
use crate::components::stuckto::StuckTo;
use crate::components::timer::Timer;
use crate::components::transition::TransitionBars;
use crate::components::ui::{
    AmmoCounter, GrowIn, Hud, HudPart, Popup, Reticle, UiAnchor, UiTransform, WeaponSprite, Wiggle,
};
use crate::components::weapon::ChargeWeapon;
use crate::components::worldposition::WorldPosition;
use crate::components::zindex::ZIndex;
use crate::math;
use crate::resources::arena::{ArenaLayout, BlockLayer, DoorDef, SpawnKindDef};
use crate::resources::debugconsole::DebugConsole;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::physicsworld::PhysicsWorld;
use crate::resources::rendertarget::viewport_rect;
use crate::resources::scoreboard::Scoreboard;
use crate::resources::screensize::ScreenSize;
use crate::resources::session::Session;
use crate::systems::menu::SLOT_WIGGLE;
use crate::systems::ui::SHOW_HUD_SIGNAL;

/// Number of bars in every screen transition.
const TRANSITION_BARS: usize = 8;

const GROUND_COLOR: Color = Color { r: 120, g: 130, b: 140, a: 255 };
const WALL_COLOR: Color = Color { r: 190, g: 180, b: 165, a: 255 };
const DOOR_COLOR: Color = Color { r: 110, g: 75, b: 50, a: 255 };
const PLATFORM_COLOR: Color = Color { r: 90, g: 90, b: 110, a: 255 };
const CONVEYOR_COLOR: Color = Color { r: 45, g: 45, b: 50, a: 255 };
/// Height of the trigger volume above an elevator platform.
const CABIN_HEIGHT: f32 = 2.5;

const HOW_TO_TEXT: &str = "Throw shirts at the other players.\n\
Whoever gets hit wears the thrower's colour\n\
and the thrower scores while they wear it.\n\n\
Hold fire to charge, release to throw.\n\
Walk over shirts on the floor to pick them up.";

const CREDITS_TEXT: &str = "Clothes Combat\n\n\
A split-screen shirt fight\n\
Built with raylib and bevy_ecs";

/// Command line switches that affect the scenes.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct LaunchOptions {
    /// Go straight to a match with the default device assignment.
    pub skip_menu: bool,
}

/// Bars that uncover the scene as soon as it starts.
fn opening_bars() -> (TransitionBars, ZIndex) {
    let mut bars = TransitionBars::new(TRANSITION_BARS);
    bars.reset(false, None);
    (bars, ZIndex::TRANSITION)
}

/// Bars hidden until something activates them to cover the scene.
fn closing_bars(next: Option<GameStates>) -> (TransitionBars, ZIndex) {
    let mut bars = TransitionBars::new(TRANSITION_BARS).waiting();
    bars.reset(true, next);
    (bars, ZIndex::TRANSITION)
}

pub fn setup(mut next_state: ResMut<NextGameState>, options: Option<Res<LaunchOptions>>) {
    let skip = options.is_some_and(|o| o.skip_menu);
    if skip {
        info!("Skipping menus");
        next_state.set(GameStates::Playing);
    } else {
        next_state.set(GameStates::MainMenu);
    }
}

pub fn enter_main_menu(
    mut commands: Commands,
    screen_size: Res<ScreenSize>,
    mut session: ResMut<Session>,
) {
    session.reset_match();
    let w = screen_size.w as f32;
    let h = screen_size.h as f32;

    commands.spawn(MainMenuScreen::default());

    let origin = Vector2::new(w * 0.1, h * 0.45);
    commands.spawn((
        Menu::new(
            &[
                (MenuAction::Play, "Play"),
                (MenuAction::HowTo, "How to play"),
                (MenuAction::Credits, "Credits"),
                (MenuAction::Quit, "Quit"),
            ],
            origin,
            36.0,
            48.0,
        )
        .with_colors(Color::LIGHTGRAY, Color::GOLD),
        ScreenPosition::from_vec(origin),
        ZIndex::MENU,
    ));

    commands.spawn((
        DynamicText::new("CLOTHES COMBAT", 64.0, Color::WHITE).centered(),
        ScreenPosition::new(w * 0.5, h * 0.2),
        UiTransform::default(),
        Wiggle::new(2.0, 0.3),
        ZIndex::MENU,
    ));
    commands.spawn((
        PressStartPrompt,
        DynamicText::new("Press start", 32.0, Color::WHITE).centered(),
        ScreenPosition::new(w * 0.5, h * 0.6),
        ZIndex::MENU,
    ));

    for (panel, text) in [(MenuPanel::HowTo, HOW_TO_TEXT), (MenuPanel::Credits, CREDITS_TEXT)] {
        // starts off-screen; main_menu_system slides it in
        let home = Vector2::new(w * 0.45, h * 0.4);
        let mut position = ScreenPosition::from_vec(home);
        position.pos.x += w;
        commands.spawn((
            MenuPanelText { panel },
            DynamicText::new(text, 24.0, Color::RAYWHITE),
            position,
            ZIndex::MENU,
        ));
    }

    commands.spawn(opening_bars());
}

pub fn enter_player_select(
    mut commands: Commands,
    config: Res<GameConfig>,
    screen_size: Res<ScreenSize>,
) {
    let count = config.rules.join_slots();
    let w = screen_size.w as f32;
    let h = screen_size.h as f32;

    commands.spawn(PlayerSelect::new(count));
    commands.spawn((
        DynamicText::new("Join the fight", 48.0, Color::WHITE).centered(),
        ScreenPosition::new(w * 0.5, h * 0.12),
        ZIndex::MENU,
    ));

    let columns = count.min(3).max(1);
    let rows = count.div_ceil(columns);
    for index in 0..count {
        let col = index % columns;
        let row = index / columns;
        let x = w * (col as f32 + 0.5) / columns as f32;
        let y = h * 0.3 + h * 0.55 * (row as f32 + 0.5) / rows as f32;
        commands.spawn((
            SelectSlot { index },
            Wiggle::new(SLOT_WIGGLE, 0.12),
            UiTransform::default(),
            DynamicText::new("Press jump to join", 20.0, Color::WHITE).centered(),
            ScreenPosition::new(x, y),
            ZIndex::MENU,
        ));
    }

    commands.spawn(closing_bars(Some(GameStates::Playing)));
}

/// Spawn a door: the trigger entity that owns the state plus its two leaves.
fn spawn_door(commands: &mut Commands, def: &DoorDef, pos: Vector3) -> Entity {
    let door = Door {
        automatic: def.automatic,
        duration: def.duration,
        curve: def.curve.clone().unwrap_or_else(Curve::linear),
        closed_x: def.closed_x,
        open_x: def.open_x,
        closed_scale: def.closed_scale,
        open_scale: def.open_scale,
        leaf_size: math::from_array(def.leaf_size),
        ..Default::default()
    };
    let [tw, th, td] = def.trigger_size;
    let [lw, lh, ld] = def.leaf_size;
    let entity = commands
        .spawn((door, WorldPosition::from_vec(pos), BoxCollider::trigger(tw, th, td)))
        .id();
    for side in [DoorSide::Left, DoorSide::Right] {
        commands.spawn((
            DoorLeaf { door: entity, side },
            WorldPosition::from_vec(pos),
            BoxCollider::new(lw, lh, ld, CollisionLayer::Environment),
            BlockVisual::new(DOOR_COLOR),
        ));
    }
    entity
}

fn spawn_arena(commands: &mut Commands, arena: &ArenaLayout, config: &GameConfig, session: &mut Session) {
    for block in &arena.blocks {
        let [w, h, d] = block.size;
        let (layer, color) = match block.layer {
            BlockLayer::Ground => (CollisionLayer::Ground, GROUND_COLOR),
            BlockLayer::Environment => (CollisionLayer::Environment, WALL_COLOR),
        };
        let color = block
            .color
            .map(|[r, g, b]| Color::new(r, g, b, 255))
            .unwrap_or(color);
        commands.spawn((
            WorldPosition::from_vec(math::from_array(block.pos)),
            BoxCollider::new(w, h, d, layer),
            BlockVisual::new(color),
        ));
    }

    for def in &arena.doors {
        spawn_door(commands, def, math::from_array(def.pos));
    }

    for def in &arena.elevators {
        let stops: Vec<Vector3> = def.stops.iter().copied().map(math::from_array).collect();
        let Some(&start) = stops.first() else {
            warn!("Skipping elevator without stops");
            continue;
        };
        let [w, h, d] = def.size;
        let mut elevator = Elevator::new(stops);
        elevator.travel_time = def.travel_time;
        elevator.travel_curve = def.travel_curve.clone().unwrap_or_else(Curve::linear);
        elevator.wait_before_open = def.wait_before_open;
        elevator.wait_after_close = def.wait_after_close;
        elevator.hold_open_time = def.hold_open_time;
        let platform = commands
            .spawn((
                WorldPosition::from_vec(start),
                BoxCollider::new(w, h, d, CollisionLayer::Ground),
                BlockVisual::new(PLATFORM_COLOR),
            ))
            .id();

        let cabin_offset = Vector3::new(0.0, (h + CABIN_HEIGHT) * 0.5, 0.0);
        commands.spawn((
            ElevatorCabin { elevator: platform },
            StuckTo::riding(platform, cabin_offset),
            WorldPosition::from_vec(start + cabin_offset),
            BoxCollider::trigger(w, CABIN_HEIGHT, d),
        ));

        elevator.door = def.door.as_ref().map(|door_def| {
            let offset = math::from_array(door_def.pos);
            let door = spawn_door(commands, door_def, start + offset);
            commands
                .entity(door)
                .insert(StuckTo::riding(platform, offset));
            door
        });
        elevator.stop_doors = (0..elevator.stops.len())
            .map(|i| {
                def.stop_doors
                    .get(i)
                    .and_then(|d| d.as_ref())
                    .map(|door_def| spawn_door(commands, door_def, math::from_array(door_def.pos)))
            })
            .collect();
        commands.entity(platform).insert(elevator);
    }

    for def in &arena.conveyors {
        let [w, h, d] = def.size;
        commands.spawn((
            Conveyor::new(math::from_array(def.direction), def.force).flipped(def.flip),
            WorldPosition::from_vec(math::from_array(def.pos)),
            BoxCollider::trigger(w, h, d),
            BlockVisual::new(CONVEYOR_COLOR),
        ));
    }

    let rules = &config.rules;
    for def in &arena.spawnpoints {
        let spawnpoint = match def.kind {
            SpawnKindDef::Player => Spawnpoint::player(def.yaw, config.player.spawn_height),
            SpawnKindDef::Ammo => Spawnpoint::ammo(random_interval(
                &mut session.rng,
                rules.ammo_spawn_min,
                rules.ammo_spawn_max,
            )),
        };
        commands.spawn((spawnpoint, WorldPosition::from_vec(math::from_array(def.pos))));
    }
}

/// HUD of one player, laid out inside their viewport.
fn spawn_hud(commands: &mut Commands, slot: usize, count: usize, config: &GameConfig, screen: &ScreenSize, color: Color) -> Entity {
    let view = viewport_rect(slot, count, screen.w as u32, screen.h as u32);
    let anchor = UiAnchor::Viewport(slot);
    let hud = commands.spawn_empty().id();
    let part = HudPart { hud };

    let reticle = commands
        .spawn((
            Reticle::new(config.player.reticle_levels, color),
            ScreenPosition::new(view.width * 0.5, view.height * 0.5),
            anchor,
            part,
            ZIndex::HUD,
        ))
        .id();
    let popup = commands
        .spawn((
            Popup::default(),
            UiTransform::default(),
            DynamicText::new("SHIRTS", 18.0, color),
            ScreenPosition::new(24.0, view.height - 64.0),
            anchor,
            part,
            ZIndex::HUD,
        ))
        .id();
    let counter = AmmoCounter {
        ammo: config.player.starting_ammo,
    };
    let ammo = commands
        .spawn((
            DynamicText::new(counter.text(), 28.0, Color::WHITE),
            counter,
            ScreenPosition::new(24.0, view.height - 40.0),
            anchor,
            part,
            ZIndex::HUD,
        ))
        .id();
    let weapon = commands
        .spawn((
            WeaponSprite::new(color),
            ScreenPosition::new(view.width * 0.75, view.height - 40.0),
            anchor,
            part,
            ZIndex::HUD,
        ))
        .id();

    commands.entity(hud).insert(Hud {
        slot,
        visible: false,
        reticle,
        ammo,
        popup,
        weapon,
    });
    hud
}

pub fn enter_play(
    mut commands: Commands,
    config: Res<GameConfig>,
    arena: Res<ArenaLayout>,
    screen_size: Res<ScreenSize>,
    mut session: ResMut<Session>,
    mut physics: ResMut<PhysicsWorld>,
    mut console: ResMut<DebugConsole>,
) {
    info!("Entering arena '{}'", arena.name);
    *physics = PhysicsWorld::default();
    console.clear();
    session.reset_match();

    spawn_arena(&mut commands, &arena, &config, &mut session);

    let count = session.player_count(config.rules.player_count);
    let spawns: Vec<_> = arena
        .spawnpoints
        .iter()
        .filter(|s| s.kind == SpawnKindDef::Player)
        .collect();
    if spawns.is_empty() {
        error!("Arena '{}' has no player spawnpoints", arena.name);
        return;
    }
    if spawns.len() < count {
        warn!(
            "Arena '{}' has {} player spawns for {} players; spawns will be shared",
            arena.name,
            spawns.len(),
            count
        );
    }

    let tuning = &config.player;
    let mut colors = Vec::with_capacity(count);
    for slot in 0..count {
        let def = spawns[slot % spawns.len()];
        let floor = math::from_array(def.pos);
        let spawn_at = Spawnpoint::player(def.yaw, tuning.spawn_height).spawn_position(floor);
        let device = session.device_for(slot);
        let outfit = session.roll_outfit();
        let color = session.color(slot);
        colors.push(color);

        let hud = spawn_hud(&mut commands, slot, count, &config, &screen_size, color);
        let player = commands
            .spawn((
                Player::new(slot, device, spawn_at)
                    .with_outfit(outfit)
                    .with_hud(hud),
                ChargeWeapon::new(tuning.starting_ammo, tuning.max_charge_time, tuning.cooldown_time),
                CameraRig::new(tuning.eye_height),
                Actor::new(0.0).with_tint(color),
                WorldPosition::from_vec(spawn_at),
                Heading::new(def.yaw),
                RigidBody::with_gravity(config.gravity),
                BoxCollider::new(0.7, tuning.spawn_height * 2.0, 0.7, CollisionLayer::Player),
            ))
            .id();
        debug!("Player {} on {} at {:?}", slot + 1, device.label(), spawn_at);
        session.players.push(player);
    }

    let w = screen_size.w as f32;
    let mut scoreboard = Scoreboard::new(count, &config.rules).with_track(w * 0.2, w * 0.8);
    scoreboard.report_colors(&colors);
    commands.insert_resource(scoreboard);

    commands.spawn(Timer::new(config.rules.hud_delay, SHOW_HUD_SIGNAL));
    commands.spawn(opening_bars());
}

pub fn enter_victory(
    mut commands: Commands,
    screen_size: Res<ScreenSize>,
    session: Res<Session>,
) {
    let winner = session.winner.unwrap_or_default();
    let w = screen_size.w as f32;
    let h = screen_size.h as f32;
    let screen = VictoryScreen::new(winner);

    commands.spawn((
        DynamicText::new(screen.title(), 72.0, session.color(winner)).centered(),
        ScreenPosition::new(w * 0.5, h * 0.4),
        UiTransform {
            scale: 0.0,
            ..Default::default()
        },
        GrowIn::new(0.6, 1.0),
        ZIndex::MENU,
    ));
    commands.spawn((
        DynamicText::new("Press start", 28.0, Color::WHITE).centered(),
        ScreenPosition::new(w * 0.5, h * 0.7),
        ZIndex::MENU,
    ));
    commands.spawn(screen);
    commands.spawn(closing_bars(None));
}

pub fn quit_game(session: Res<Session>) {
    match session.winner {
        Some(winner) => info!("Quitting. Last winner: player {}", winner + 1),
        None => info!("Quitting"),
    }
}
