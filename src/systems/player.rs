//! Player controller systems.
//!
//! Frame systems read the player's device, run the charge-and-fire cycle,
//! shake the camera and keep the debug channel current. The physics step
//! turns the sampled input into heading and velocity. Observers react to
//! shirts hitting, bouncing off walls and being collected.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use raylib::prelude::{Color, Vector2, Vector3};

use crate::components::actor::{Actor, BillboardMaterial};
use crate::components::boxcollider::BoxCollider;
use crate::components::dynamictext::DynamicText;
use crate::components::heading::Heading;
use crate::components::layer::LayerMask;
use crate::components::player::{
    CameraRig, Player, move_speed, needs_gravity, planar_velocity, project_on_ground,
    resolve_aim, wobble_factor,
};
use crate::components::rigidbody::RigidBody;
use crate::components::screenposition::ScreenPosition;
use crate::components::ui::{FloatUp, Hud, Popup, Reticle, UiAnchor, WeaponSprite};
use crate::components::weapon::ChargeWeapon;
use crate::components::worldposition::WorldPosition;
use crate::components::zindex::ZIndex;
use crate::events::audio::{AudioCmd, voice_name};
use crate::events::player::{PlayerHitEvent, ShirtCollectedEvent, WallHitEvent};
use crate::math;
use crate::resources::audio::fx;
use crate::resources::debugconsole::DebugConsole;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::{InputDevice, PlayerInputs};
use crate::resources::physicsworld::PhysicsWorld;
use crate::resources::scoreboard::Scoreboard;
use crate::resources::session::Session;
use crate::resources::worldtime::WorldTime;
use crate::systems::projectile::spawn_thrown_shirt;

/// Horizontal knockback multiplier applied to a shirt's travel since the throw.
pub const HIT_FORCE_SCALE: f32 = 30.0;
/// Upward kick of a hit.
pub const HIT_LIFT: f32 = 20.0;
/// Height of the feet box under the body.
const FEET_BOX_HEIGHT: f32 = 0.2;
/// Share of the body footprint covered by the feet box.
const FEET_BOX_RATIO: f32 = 0.8;
const MAX_PITCH: f32 = 89.0;

fn play(voice: String, fx: &str, volume: f32, pitch: f32, looped: bool) -> AudioCmd {
    AudioCmd::PlayVoice {
        voice,
        fx: fx.to_string(),
        volume,
        pitch,
        looped,
    }
}

/// Sample each player's device: move and aim axes, jump, reset and the
/// respawn height check.
pub fn player_input_system(
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    inputs: Res<PlayerInputs>,
    mut players: Query<(&mut Player, &mut WorldPosition, &mut RigidBody)>,
) {
    let tuning = &config.player;
    for (mut player, mut position, mut body) in players.iter_mut() {
        let device = inputs.device(player.device);
        player.move_input = device.move_axis;
        let (mouse, keyboard) = if player.device == InputDevice::Keyboard {
            (device.aim_mouse, device.aim_keyboard)
        } else {
            (Vector2::zero(), Vector2::zero())
        };
        player.aim_input = resolve_aim(mouse, keyboard, device.aim_analog, tuning);

        if device.jump.just_pressed && player.on_ground {
            body.set_gravity(true);
            body.velocity.y = tuning.jump_force;
            player.on_ground = false;
            player.bottom_triggered = false;
            player.jump_disable_timer = tuning.jump_grounded_disable_time;
        }

        if device.reset.just_pressed || position.pos.y <= tuning.respawn_height {
            position.pos = player.spawn_point;
            body.velocity = Vector3::zero();
        }

        player.tick_jump_timer(time.delta);
    }
}

/// Charge-and-fire cycle, charge visuals and camera shake.
#[allow(clippy::too_many_arguments)]
pub fn player_weapon_system(
    mut commands: Commands,
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    inputs: Res<PlayerInputs>,
    session: Res<Session>,
    mut audio: MessageWriter<AudioCmd>,
    mut players: Query<(
        Entity,
        &Player,
        &mut ChargeWeapon,
        &mut CameraRig,
        &WorldPosition,
        &Heading,
    )>,
    huds: Query<&Hud>,
    mut reticles: Query<&mut Reticle>,
    mut weapons: Query<&mut WeaponSprite>,
) {
    let tuning = &config.player;
    let dt = time.delta;
    for (entity, player, mut weapon, mut rig, position, heading) in players.iter_mut() {
        let device = inputs.device(player.device);
        let main = voice_name(player.id, "main");
        let sub = voice_name(player.id, "sub");
        let hud = player.hud.and_then(|h| huds.get(h).ok());

        if !weapon.is_firing && device.fire.just_pressed {
            if weapon.begin_charge().is_ok() {
                audio.write(play(main.clone(), fx::CHARGE_UP, 1.0, 1.1, false));
            }
        } else if weapon.is_firing && device.fire.just_released {
            audio.write(AudioCmd::stop(main.clone()));
            audio.write(AudioCmd::stop(sub.clone()));
            if let Some(release) = weapon.release() {
                let t = release.strength;
                let mut direction = heading.look();
                direction.y += math::lerp_f32(tuning.launch_angle_min, tuning.launch_angle_max, t);
                let velocity = direction.normalized()
                    * math::lerp_f32(tuning.launch_power_min, tuning.launch_power_max, t);
                let explode = voice_name(player.id, "explode");
                if release.is_full() {
                    audio.write(play(explode, fx::EXPLODE, 1.0, 1.0, false));
                } else {
                    audio.write(play(explode, fx::THROW, math::lerp_f32(0.1, 0.5, t), 1.0, false));
                }
                spawn_thrown_shirt(
                    &mut commands,
                    &config,
                    entity,
                    player.id,
                    session.color(player.id),
                    position.pos,
                    heading.yaw,
                    velocity,
                );
                rig.start_last_shake(tuning.final_vibration_time);
                if let Some(hud) = hud
                    && let Ok(mut sprite) = weapons.get_mut(hud.weapon)
                {
                    sprite.reload();
                }
            }
        }

        if weapon.tick(dt)
            && let Some(hud) = hud
            && let Ok(mut sprite) = weapons.get_mut(hud.weapon)
        {
            sprite.unreload();
        }

        let levels = tuning.reticle_levels;
        let mut reticle = hud.and_then(|h| reticles.get_mut(h.reticle).ok());
        if weapon.is_firing {
            let level = weapon.reticle_level(levels);
            if let Some(r) = reticle.as_mut() {
                r.set_level(level);
            }
            if levels >= 2 && level == levels - 2 {
                rig.shake_level = 1;
            } else if levels >= 2 && level == levels - 1 {
                rig.shake_level = 2;
                if !weapon.holding_sound {
                    weapon.holding_sound = true;
                    audio.write(play(sub, fx::CHARGE_HOLD, 0.2, 1.2, true));
                }
            }
        } else if rig.shake_level != 0 || reticle.as_ref().is_some_and(|r| r.level != 0) {
            rig.shake_level = 0;
            if let Some(r) = reticle.as_mut() {
                r.set_level(0);
            }
        }

        rig.update_shake(dt, tuning.screen_shake_amplitude, tuning.screen_shake_frequency);
    }
}

/// Write each player's state into their debug console channel.
pub fn player_debug_system(
    mut console: ResMut<DebugConsole>,
    mut players: Query<(&mut Player, &WorldPosition, &Actor)>,
) {
    for (mut player, position, actor) in players.iter_mut() {
        let channel = match player.debug_channel {
            Some(c) => c,
            None => {
                let c = console.create_channel(player.id as i32);
                player.debug_channel = Some(c);
                c
            }
        };
        let text = format!(
            "Player {}\nPosition:      {:>4.1}, {:>4.1}\n\nMove Input:    {:>4.1}, {:>4.1}     Aim Input:     {:>4.1}, {:>4.1}\n\nIsOnGround:    {}\nNormal Angle:  {:.1}\nPropel Vector: {:>4.1}, {:>4.1}, {:>4.1}",
            player.id + 1,
            position.pos.x,
            position.pos.z,
            player.move_input.x,
            player.move_input.y,
            player.aim_input.x,
            player.aim_input.y,
            if player.on_ground { "Yes" } else { "No" },
            player.ground_angle,
            actor.propel.x,
            actor.propel.y,
            actor.propel.z,
        );
        console.set_channel_text(channel, text);
    }
}

/// Physics-step movement: heading, ground check, slope handling and
/// velocity.
pub fn player_fixed_update(
    config: Res<GameConfig>,
    physics: Res<PhysicsWorld>,
    mut players: Query<(
        Entity,
        &mut Player,
        &mut Heading,
        &mut RigidBody,
        &mut Actor,
        &ChargeWeapon,
        &WorldPosition,
        &BoxCollider,
    )>,
) {
    let tuning = &config.player;
    for (entity, mut player, mut heading, mut body, mut actor, weapon, position, collider) in
        players.iter_mut()
    {
        heading.yaw = math::wrap_degrees(heading.yaw + player.aim_input.x);
        heading.pitch = (heading.pitch + player.aim_input.y).clamp(-MAX_PITCH, MAX_PITCH);

        let move_input = player.move_input;
        player.active_speed = move_speed(tuning, move_input);
        player.wobble_factor = wobble_factor(move_input, weapon.charge_ratio());
        let mut velocity = planar_velocity(heading.yaw, move_input, player.active_speed, body.velocity.y);

        let feet = Vector3::new(
            position.pos.x,
            position.pos.y - collider.size.y.abs() * 0.5,
            position.pos.z,
        );
        let feet_box = Vector3::new(
            collider.size.x.abs() * FEET_BOX_RATIO,
            FEET_BOX_HEIGHT,
            collider.size.z.abs() * FEET_BOX_RATIO,
        );
        player.bottom_triggered = player.jump_disable_timer <= 0.0
            && !physics
                .overlap_box(feet, feet_box, LayerMask::ground(), Some(entity))
                .is_empty();

        player.on_ground = false;
        if player.bottom_triggered
            && let Some(hit) = physics.raycast(
                position.pos,
                Vector3::new(0.0, -1.0, 0.0),
                tuning.ground_distance,
                LayerMask::ground(),
                Some(entity),
                false,
            )
        {
            player.on_ground = true;
            player.ground_normal = hit.normal;
            player.ground_angle = math::angle_between(math::UP, hit.normal);
        }

        let gravity = needs_gravity(player.on_ground, player.ground_angle, tuning.max_slope_angle);
        body.set_gravity(gravity);
        player.is_sliding = player.on_ground && gravity;
        if player.on_ground {
            velocity = project_on_ground(velocity, player.ground_normal);
        }

        let propel = actor.take_propel();
        let knockback = std::mem::take(&mut player.knockback);
        body.velocity = velocity + propel + knockback;

        let moving = move_input.length() >= tuning.standing_velocity_cutoff;
        if moving != player.is_moving {
            player.is_moving = moving;
            let material = if moving {
                BillboardMaterial::Moving
            } else {
                BillboardMaterial::Standing
            };
            actor.set_material(material, Some(heading.yaw));
        }
    }
}

/// A shirt struck this player: swap the worn colour and queue the knockback
/// for the next physics step.
pub fn player_hit_observer(
    trigger: On<PlayerHitEvent>,
    config: Res<GameConfig>,
    session: Res<Session>,
    scoreboard: Option<ResMut<Scoreboard>>,
    mut audio: MessageWriter<AudioCmd>,
    mut players: Query<(&mut Player, &mut Actor)>,
) {
    let event = trigger.event();
    let Ok((mut player, mut actor)) = players.get_mut(event.victim) else {
        return;
    };
    let color = session.color(event.team);
    player.shirt_team = event.team;
    player.on_ground = false;
    player.bottom_triggered = false;
    player.jump_disable_timer = config.player.jump_grounded_disable_time;
    actor.tint = color;
    let push = Vector3::new(event.force.x, 0.0, event.force.z);
    player.knockback += push * HIT_FORCE_SCALE + math::UP * HIT_LIFT;
    audio.write(play(voice_name(player.id, "main"), fx::HIT, 1.0, 1.0, false));
    if let Some(mut scoreboard) = scoreboard {
        scoreboard.set_border_color(player.id, color);
    }
}

/// A shirt thrown by this player hit the floor.
pub fn wall_hit_observer(
    trigger: On<WallHitEvent>,
    mut audio: MessageWriter<AudioCmd>,
    players: Query<&Player>,
) {
    if let Ok(player) = players.get(trigger.event().owner) {
        audio.write(play(voice_name(player.id, "main"), fx::WALL, 0.6, 1.0, false));
    }
}

/// A collected shirt reached its player: one more ammo and a "+1" popup.
pub fn shirt_collected_observer(
    trigger: On<ShirtCollectedEvent>,
    mut commands: Commands,
    mut audio: MessageWriter<AudioCmd>,
    mut players: Query<(&Player, &mut ChargeWeapon)>,
    huds: Query<&Hud>,
    mut popups: Query<(&mut Popup, &ScreenPosition, &UiAnchor)>,
) {
    let Ok((player, mut weapon)) = players.get_mut(trigger.event().player) else {
        return;
    };
    weapon.add_ammo(1);
    audio.write(play(voice_name(player.id, "sub"), fx::COLLECT, 0.9, 1.0, false));

    let Some(hud) = player.hud.and_then(|h| huds.get(h).ok()) else {
        return;
    };
    if let Ok((mut popup, position, anchor)) = popups.get_mut(hud.popup) {
        popup.pop();
        let start = Vector2::new(
            position.pos.x + popup.label_offset.x,
            position.pos.y + popup.label_offset.y,
        );
        commands.spawn((
            FloatUp::new(start),
            ScreenPosition::from_vec(start),
            *anchor,
            DynamicText::new("+1", 24.0, Color::WHITE),
            ZIndex::HUD,
        ));
    }
}
