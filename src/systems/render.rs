//! Split-screen renderer.
//!
//! Each frame runs in three passes:
//! 1. every player's view is drawn in 3D into its own texture in
//!    [`ViewTargets`]
//! 2. the views, the HUDs and the screen UI are composed into the
//!    fixed-resolution [`RenderTarget`], UI sorted by [`ZIndex`]
//! 3. the render target is letterboxed into the window
//!
//! Rendering needs the raylib handle and the GPU targets at the same time as
//! plain queries, so [`render_system`] is exclusive: it takes the non-send
//! resources out of the world, snapshots what it draws and puts them back.

use bevy_ecs::prelude::*;
use log::warn;
use raylib::prelude::*;

use crate::components::actor::{Actor, BillboardMaterial};
use crate::components::block::BlockVisual;
use crate::components::boxcollider::BoxCollider;
use crate::components::conveyor::Conveyor;
use crate::components::dynamictext::DynamicText;
use crate::components::heading::Heading;
use crate::components::menu::{MainMenuScreen, Menu, PlayerSelect, SelectSlot};
use crate::components::player::{CameraRig, Player};
use crate::components::projectile::Projectile;
use crate::components::screenposition::ScreenPosition;
use crate::components::transition::TransitionBars;
use crate::components::ui::{AmmoCounter, Hud, HudPart, Reticle, UiAnchor, UiTransform, WeaponSprite};
use crate::components::worldposition::WorldPosition;
use crate::components::zindex::ZIndex;
use crate::math;
use crate::resources::debugconsole::DebugConsole;
use crate::resources::debugmode::DebugMode;
use crate::resources::rendertarget::{RenderTarget, ViewTargets, viewport_rect};
use crate::resources::scoreboard::Scoreboard;
use crate::resources::session::Session;
use crate::resources::windowsize::WindowSize;

const SKY: Color = Color {
    r: 120,
    g: 180,
    b: 230,
    a: 255,
};
const SKIN: Color = Color {
    r: 240,
    g: 200,
    b: 160,
    a: 255,
};
const FIELD_OF_VIEW: f32 = 70.0;
const BODY_RADIUS: f32 = 0.35;
const RETICLE_BASE: f32 = 6.0;
const BORDER_WIDTH: f32 = 6.0;
const SCORE_TRACK_Y: f32 = 22.0;
const SCORE_ICON_RADIUS: f32 = 10.0;

/// Top-left corner that a [`UiAnchor`] measures from.
pub fn anchor_origin(anchor: UiAnchor, views: usize, width: u32, height: u32) -> Vector2 {
    match anchor {
        UiAnchor::Screen => Vector2::zero(),
        UiAnchor::Viewport(slot) => {
            let rect = viewport_rect(slot, views.max(1), width, height);
            Vector2::new(rect.x, rect.y)
        }
    }
}

/// Rectangle of transition bar `i` out of `count` on a `width`x`height`
/// screen.
pub fn bar_rect(bars: &TransitionBars, i: usize, width: f32, height: f32) -> Rectangle {
    let h = height / bars.bars.len().max(1) as f32;
    Rectangle {
        x: bars.bar_offset(i, width),
        y: i as f32 * h,
        width,
        height: h.ceil(),
    }
}

struct View {
    entity: Entity,
    slot: usize,
    camera: Camera3D,
}

struct BlockDraw {
    center: Vector3,
    size: Vector3,
    visual: BlockVisual,
    push: Option<Vector3>,
}

struct ActorDraw {
    entity: Entity,
    pos: Vector3,
    height: f32,
    facing: Vector3,
    tint: Color,
    material: BillboardMaterial,
    scale: f32,
    offset: f32,
    shirt: bool,
}

struct WireDraw {
    center: Vector3,
    size: Vector3,
    trigger: bool,
}

/// Everything the 3D pass needs, copied out of the world.
#[derive(Default)]
struct Scene {
    views: Vec<View>,
    blocks: Vec<BlockDraw>,
    actors: Vec<ActorDraw>,
    wires: Vec<WireDraw>,
}

enum UiShape {
    Text {
        text: String,
        size: f32,
        color: Color,
        centered: bool,
        rotation: f32,
        scale: f32,
    },
    Reticle {
        radius: f32,
        color: Color,
    },
    Weapon {
        color: Color,
        lowered: bool,
    },
    Panel {
        width: f32,
        height: f32,
        color: Color,
    },
}

struct UiDraw {
    z: ZIndex,
    pos: Vector2,
    shape: UiShape,
}

fn collect_scene(world: &mut World) -> Scene {
    let debug = world.contains_resource::<DebugMode>();
    let mut scene = Scene::default();

    let mut players = world.query::<(Entity, &Player, &WorldPosition, &Heading, &CameraRig)>();
    for (entity, player, position, heading, rig) in players.iter(world) {
        let eye = position.pos + Vector3::new(0.0, rig.offset, 0.0);
        scene.views.push(View {
            entity,
            slot: player.id,
            camera: Camera3D::perspective(
                eye,
                eye + heading.look(),
                math::UP,
                FIELD_OF_VIEW,
            ),
        });
    }
    scene.views.sort_by_key(|v| v.slot);

    let mut blocks = world.query::<(&WorldPosition, &BoxCollider, &BlockVisual, Option<&Conveyor>)>();
    for (position, collider, visual, conveyor) in blocks.iter(world) {
        scene.blocks.push(BlockDraw {
            center: position.pos + collider.offset,
            size: collider.size,
            visual: *visual,
            push: conveyor.map(|c| c.push()),
        });
    }

    let mut actors = world.query::<(
        Entity,
        &Actor,
        &WorldPosition,
        Option<&BoxCollider>,
        Has<Projectile>,
    )>();
    for (entity, actor, position, collider, shirt) in actors.iter(world) {
        scene.actors.push(ActorDraw {
            entity,
            pos: position.pos,
            height: collider.map(|c| c.size.y).unwrap_or(1.0),
            facing: math::yaw_forward(actor.shader_angle - actor.rotation_offset),
            tint: actor.tint,
            material: actor.material,
            scale: actor.visual_scale,
            offset: actor.visual_offset,
            shirt,
        });
    }

    if debug {
        let mut colliders = world.query::<(&WorldPosition, &BoxCollider)>();
        for (position, collider) in colliders.iter(world) {
            if !collider.enabled {
                continue;
            }
            scene.wires.push(WireDraw {
                center: position.pos + collider.offset,
                size: collider.size,
                trigger: collider.is_trigger,
            });
        }
    }
    scene
}

fn draw_block<D: RaylibDraw3D>(d3: &mut D, block: &BlockDraw) {
    let s = block.size;
    d3.draw_cube(block.center, s.x, s.y, s.z, block.visual.color);
    d3.draw_cube_wires(block.center, s.x, s.y, s.z, block.visual.edge_color(0.35));
    if let Some(push) = block.push {
        let dir = push.normalized();
        let top = block.center + Vector3::new(0.0, s.y * 0.5 + 0.02, 0.0);
        let half = s.x.max(s.z) * 0.4;
        d3.draw_line_3D(
            top - dir * half,
            top + dir * half,
            Color::YELLOW,
        );
    }
}

fn draw_actor<D: RaylibDraw3D>(d3: &mut D, actor: &ActorDraw, time: f32) {
    if actor.shirt {
        let base = 0.4 * actor.scale;
        let center = actor.pos + Vector3::new(0.0, actor.offset, 0.0);
        let (w, h) = match actor.material {
            BillboardMaterial::Ground => (base * 1.4, base * 0.15),
            // alternate frames flip the shirt on its side
            BillboardMaterial::Falling(frame) if frame % 2 == 1 => (base * 0.6, base),
            _ => (base, base * 0.8),
        };
        d3.draw_cube(center, w, h, w, actor.tint);
        d3.draw_cube_wires(center, w, h, w, Color::BLACK);
        return;
    }

    let bob = if actor.material == BillboardMaterial::Moving {
        (time * 12.0).sin().abs() * 0.06
    } else {
        0.0
    };
    let feet = Vector3::new(actor.pos.x, actor.pos.y - actor.height * 0.5 + bob, actor.pos.z);
    let body = actor.height * 0.7;
    d3.draw_cylinder(feet, BODY_RADIUS, BODY_RADIUS, body, 12, actor.tint);
    let head = Vector3::new(feet.x, feet.y + body + 0.2, feet.z);
    d3.draw_sphere(head, 0.22, SKIN);
    d3.draw_line_3D(head, head + actor.facing * 0.6, Color::BLACK);
}

fn draw_view(rl: &mut RaylibHandle, th: &RaylibThread, texture: &mut RenderTexture2D, scene: &Scene, view: &View, time: f32) {
    let mut t = rl.begin_texture_mode(th, texture);
    t.clear_background(SKY);
    let mut d3 = t.begin_mode3D(view.camera);
    for block in &scene.blocks {
        draw_block(&mut d3, block);
    }
    for actor in scene.actors.iter().filter(|a| a.entity != view.entity) {
        draw_actor(&mut d3, actor, time);
    }
    for wire in &scene.wires {
        let color = if wire.trigger { Color::YELLOW } else { Color::LIME };
        d3.draw_cube_wires(wire.center, wire.size.x, wire.size.y, wire.size.z, color);
    }
}

fn resolve(pos: Vector2, anchor: Option<&UiAnchor>, views: usize, width: u32, height: u32) -> Vector2 {
    let origin = anchor_origin(anchor.copied().unwrap_or_default(), views, width, height);
    origin + pos
}

fn collect_ui(world: &mut World, views: usize, width: u32, height: u32) -> Vec<UiDraw> {
    let mut out = Vec::new();

    let visible_huds: Vec<Entity> = {
        let mut huds = world.query::<(Entity, &Hud)>();
        huds.iter(world)
            .filter(|(_, hud)| hud.visible)
            .map(|(e, _)| e)
            .collect()
    };
    let hidden = |part: Option<&HudPart>| part.is_some_and(|p| !visible_huds.contains(&p.hud));

    let menu_started = {
        let mut screens = world.query::<&MainMenuScreen>();
        screens.iter(world).any(|s| s.started)
    };

    let mut texts = world.query::<(
        &DynamicText,
        &ScreenPosition,
        Option<&ZIndex>,
        Option<&UiAnchor>,
        Option<&UiTransform>,
        Option<&HudPart>,
        Option<&AmmoCounter>,
    )>();
    for (text, position, z, anchor, transform, part, counter) in texts.iter(world) {
        if hidden(part) || text.color.a == 0 {
            continue;
        }
        let transform = transform.copied().unwrap_or_default();
        let color = match counter {
            Some(c) if c.is_empty() => Color::RED,
            _ => text.color,
        };
        out.push(UiDraw {
            z: z.copied().unwrap_or_default(),
            pos: resolve(position.pos, anchor, views, width, height),
            shape: UiShape::Text {
                text: text.content.clone(),
                size: text.font_size,
                color,
                centered: text.centered,
                rotation: transform.rotation,
                scale: transform.scale,
            },
        });
    }

    let mut reticles = world.query::<(&Reticle, &ScreenPosition, Option<&UiAnchor>, Option<&HudPart>)>();
    for (reticle, position, anchor, part) in reticles.iter(world) {
        if hidden(part) {
            continue;
        }
        out.push(UiDraw {
            z: ZIndex::HUD,
            pos: resolve(position.pos, anchor, views, width, height),
            shape: UiShape::Reticle {
                radius: reticle.radius(RETICLE_BASE),
                color: reticle.color,
            },
        });
    }

    let mut weapons = world.query::<(&WeaponSprite, &ScreenPosition, Option<&UiAnchor>, Option<&HudPart>)>();
    for (sprite, position, anchor, part) in weapons.iter(world) {
        if hidden(part) {
            continue;
        }
        let pos = resolve(position.pos, anchor, views, width, height);
        out.push(UiDraw {
            z: ZIndex::HUD,
            pos: pos + sprite.offset,
            shape: UiShape::Weapon {
                color: sprite.color,
                lowered: sprite.reloading,
            },
        });
    }

    let locked: Vec<(usize, bool)> = {
        let mut selects = world.query::<&PlayerSelect>();
        selects
            .iter(world)
            .flat_map(|s| (0..s.slots.len()).map(|i| (i, s.is_locked(i))).collect::<Vec<_>>())
            .collect()
    };
    let palette = world.resource::<Session>().palette.clone();
    let mut slots = world.query::<(&SelectSlot, &ScreenPosition)>();
    for (slot, position) in slots.iter(world) {
        let filled = locked.iter().any(|(i, l)| *i == slot.index && *l);
        let base = palette.get(slot.index).copied().unwrap_or(Color::WHITE);
        let color = if filled { base } else { base.fade(0.25) };
        out.push(UiDraw {
            z: ZIndex(ZIndex::MENU.0 - 1),
            pos: position.pos,
            shape: UiShape::Panel {
                width: 260.0,
                height: 60.0,
                color,
            },
        });
    }

    if menu_started {
        let mut menus = world.query::<&Menu>();
        for menu in menus.iter(world) {
            for (i, item) in menu.items.iter().enumerate() {
                let color = if i == menu.selected_index {
                    menu.selected_color
                } else {
                    menu.normal_color
                };
                out.push(UiDraw {
                    z: ZIndex::MENU,
                    pos: menu.item_position(i),
                    shape: UiShape::Text {
                        text: item.label.clone(),
                        size: menu.font_size,
                        color,
                        centered: false,
                        rotation: 0.0,
                        scale: 1.0,
                    },
                });
            }
        }
    }

    out.sort_by_key(|d| d.z);
    out
}

fn draw_text_shape<D: RaylibDraw>(d: &mut D, font: &WeakFont, pos: Vector2, shape: &UiShape) {
    let UiShape::Text {
        text,
        size,
        color,
        centered,
        rotation,
        scale,
    } = shape
    else {
        return;
    };
    let size = size * scale;
    let spacing = size / 10.0;
    let measured = measure_text_ex(font, text, size, spacing);
    let origin = if *centered {
        Vector2::new(measured.x * 0.5, measured.y * 0.5)
    } else {
        Vector2::zero()
    };
    d.draw_text_pro(font, text, pos, origin, *rotation, size, spacing, *color);
}

fn draw_ui<D: RaylibDraw>(d: &mut D, font: &WeakFont, item: &UiDraw) {
    let pos = item.pos;
    match &item.shape {
        UiShape::Text { .. } => draw_text_shape(d, font, pos, &item.shape),
        UiShape::Reticle { radius, color } => {
            d.draw_circle_lines(pos.x as i32, pos.y as i32, *radius, *color);
            d.draw_line_ex(
                Vector2::new(pos.x - radius - 4.0, pos.y),
                Vector2::new(pos.x - radius + 2.0, pos.y),
                2.0,
                *color,
            );
            d.draw_line_ex(
                Vector2::new(pos.x + radius - 2.0, pos.y),
                Vector2::new(pos.x + radius + 4.0, pos.y),
                2.0,
                *color,
            );
            d.draw_circle(pos.x as i32, pos.y as i32, 1.5, *color);
        }
        UiShape::Weapon { color, lowered } => {
            let y = if *lowered { pos.y + 50.0 } else { pos.y };
            let body = Rectangle::new(pos.x - 40.0, y - 40.0, 80.0, 90.0);
            d.draw_rectangle_rec(body, *color);
            d.draw_rectangle_rec(Rectangle::new(pos.x - 70.0, y - 40.0, 30.0, 35.0), *color);
            d.draw_rectangle_rec(Rectangle::new(pos.x + 40.0, y - 40.0, 30.0, 35.0), *color);
            d.draw_rectangle_lines_ex(body, 2.0, Color::BLACK);
        }
        UiShape::Panel {
            width,
            height,
            color,
        } => {
            d.draw_rectangle_rec(Rectangle::new(pos.x - width * 0.5, pos.y - height * 0.5, *width, *height), *color);
        }
    }
}

fn draw_scoreboard<D: RaylibDraw>(d: &mut D, board: &Scoreboard, views: &[View], width: u32, height: u32) {
    for view in views {
        let alpha = board.border_alpha(view.slot);
        if alpha <= 0.0 {
            continue;
        }
        if let Some(border) = board.borders.get(view.slot) {
            let rect = viewport_rect(view.slot, views.len(), width, height);
            d.draw_rectangle_lines_ex(rect, BORDER_WIDTH, border.color.fade(alpha));
        }
    }

    d.draw_line_ex(
        Vector2::new(board.start_x, SCORE_TRACK_Y),
        Vector2::new(board.end_x, SCORE_TRACK_Y),
        4.0,
        Color::WHITE.fade(0.7),
    );
    d.draw_rectangle_rec(
        Rectangle::new(board.end_x - 2.0, SCORE_TRACK_Y - 14.0, 4.0, 28.0),
        Color::WHITE,
    );
    for i in board.draw_order() {
        let x = board.icon_x(i);
        let color = board.colors.get(i).copied().unwrap_or(Color::WHITE);
        d.draw_circle(x as i32, SCORE_TRACK_Y as i32, SCORE_ICON_RADIUS, color);
        d.draw_circle_lines(x as i32, SCORE_TRACK_Y as i32, SCORE_ICON_RADIUS, Color::BLACK);
    }
}

fn draw_transitions<D: RaylibDraw>(d: &mut D, bars: &[TransitionBars], palette: &[Color], width: u32, height: u32) {
    for transition in bars {
        for i in 0..transition.bars.len() {
            if !transition.is_visible(i) {
                continue;
            }
            let color = palette
                .get(i % palette.len().max(1))
                .copied()
                .unwrap_or(Color::BLACK);
            d.draw_rectangle_rec(bar_rect(transition, i, width as f32, height as f32), color);
        }
    }
}

/// Draw the frame. See the module docs for the passes.
pub fn render_system(world: &mut World) {
    let Some(mut rl) = world.remove_non_send_resource::<RaylibHandle>() else {
        warn!("render_system: RaylibHandle missing");
        return;
    };
    let Some(th) = world.remove_non_send_resource::<RaylibThread>() else {
        world.insert_non_send_resource(rl);
        return;
    };
    let Some(mut target) = world.remove_non_send_resource::<RenderTarget>() else {
        world.insert_non_send_resource(rl);
        world.insert_non_send_resource(th);
        return;
    };
    let mut views = world.remove_non_send_resource::<ViewTargets>();

    let (width, height) = (target.game_width, target.game_height);
    let time = rl.get_time() as f32;
    let scene = collect_scene(world);
    let view_count = scene.views.len();
    let ui = collect_ui(world, view_count, width, height);
    let bars: Vec<TransitionBars> = {
        let mut q = world.query::<&TransitionBars>();
        q.iter(world).cloned().collect()
    };
    let palette = world.resource::<Session>().palette.clone();
    let console = world
        .get_resource::<DebugConsole>()
        .filter(|c| c.visible)
        .map(|c| c.text());
    let window = *world.resource::<WindowSize>();

    // views are rebuilt lazily when the player count changes
    if view_count > 0 && views.as_ref().is_none_or(|v| v.count != view_count) {
        match ViewTargets::new(&mut rl, &th, view_count, width, height) {
            Ok(v) => views = Some(v),
            Err(e) => warn!("{}", e),
        }
    }
    if let Some(targets) = views.as_mut() {
        for (index, view) in scene.views.iter().enumerate() {
            if let Some(texture) = targets.views.get_mut(index) {
                draw_view(&mut rl, &th, texture, &scene, view, time);
            }
        }
    }

    let font = rl.get_font_default();
    let fps = rl.get_fps();
    {
        let mut t = rl.begin_texture_mode(&th, &mut target.texture);
        t.clear_background(Color::BLACK);
        if let Some(targets) = views.as_ref() {
            let source = targets.source_rect();
            for (index, texture) in targets.views.iter().enumerate().take(view_count) {
                let dest = viewport_rect(index, view_count, width, height);
                t.draw_texture_pro(texture, source, dest, Vector2::zero(), 0.0, Color::WHITE);
            }
        }
        if view_count > 0
            && let Some(board) = world.get_resource::<Scoreboard>()
        {
            draw_scoreboard(&mut t, board, &scene.views, width, height);
        }
        for item in &ui {
            draw_ui(&mut t, &font, item);
        }
        draw_transitions(&mut t, &bars, &palette, width, height);
        if let Some(text) = console {
            let fps = format!("FPS: {}", fps);
            t.draw_rectangle(0, 0, 360, 20 + 14 * text.lines().count() as i32, Color::BLACK.fade(0.6));
            t.draw_text(&fps, 8, 4, 10, Color::LIME);
            for (i, line) in text.lines().enumerate() {
                t.draw_text(line, 8, 18 + 14 * i as i32, 10, Color::WHITE);
            }
        }
    }

    {
        let mut d = rl.begin_drawing(&th);
        d.clear_background(Color::BLACK);
        let dest = window.calculate_letterbox(width, height);
        d.draw_texture_pro(&target.texture, target.source_rect(), dest, Vector2::zero(), 0.0, Color::WHITE);
    }

    if let Some(views) = views {
        world.insert_non_send_resource(views);
    }
    world.insert_non_send_resource(target);
    world.insert_non_send_resource(th);
    world.insert_non_send_resource(rl);
}
