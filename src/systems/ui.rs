//! Screen-space UI systems.
//!
//! Drive the small HUD animations ([`Popup`], [`FloatUp`], [`Wiggle`],
//! [`GrowIn`]) and keep each player's HUD in sync with their weapon.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::dynamictext::DynamicText;
use crate::components::player::Player;
use crate::components::screenposition::ScreenPosition;
use crate::components::ui::{AmmoCounter, FloatUp, GrowIn, Hud, Popup, UiTransform, WeaponSprite, Wiggle};
use crate::components::weapon::ChargeWeapon;
use crate::events::timer::TimerEvent;
use crate::resources::session::Session;
use crate::resources::worldtime::WorldTime;

/// Timer signal that reveals the HUDs once the match starts.
pub const SHOW_HUD_SIGNAL: &str = "show_hud";

/// Advance popups, float-up labels, wiggles and grow-ins.
pub fn ui_animation_system(
    mut commands: Commands,
    time: Res<WorldTime>,
    mut popups: Query<(&mut Popup, &mut UiTransform), Without<Wiggle>>,
    mut floaters: Query<(Entity, &mut FloatUp, &mut ScreenPosition, &mut DynamicText)>,
    mut wiggles: Query<(&mut Wiggle, &mut UiTransform), Without<Popup>>,
    mut growers: Query<(Entity, &mut GrowIn, &mut UiTransform), (Without<Popup>, Without<Wiggle>)>,
) {
    let dt = time.delta;
    for (mut popup, mut transform) in popups.iter_mut() {
        transform.scale = popup.tick(dt);
    }
    for (entity, mut float_up, mut position, mut text) in floaters.iter_mut() {
        let (pos, alpha, done) = float_up.tick(dt);
        if done {
            commands.entity(entity).try_despawn();
            continue;
        }
        position.pos = pos;
        text.color.a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
    for (mut wiggle, mut transform) in wiggles.iter_mut() {
        transform.rotation = wiggle.tick(dt);
    }
    for (entity, mut grow, mut transform) in growers.iter_mut() {
        let (scale, done) = grow.tick(dt);
        transform.scale = scale;
        if done {
            commands.entity(entity).remove::<GrowIn>();
        }
    }
}

/// Copy ammo and weapon state into every player's HUD.
pub fn hud_sync_system(
    time: Res<WorldTime>,
    session: Res<Session>,
    players: Query<(&Player, &ChargeWeapon)>,
    huds: Query<&Hud>,
    mut counters: Query<(&mut AmmoCounter, &mut DynamicText)>,
    mut weapons: Query<&mut WeaponSprite>,
) {
    for (player, weapon) in players.iter() {
        let Some(hud) = player.hud.and_then(|e| huds.get(e).ok()) else {
            continue;
        };
        if let Ok((mut counter, mut text)) = counters.get_mut(hud.ammo)
            && counter.ammo != weapon.ammo
        {
            counter.ammo = weapon.ammo;
            text.set_content(counter.text());
        }
        if let Ok(mut sprite) = weapons.get_mut(hud.weapon) {
            let offset = sprite.wobble.tick(time.delta, player.wobble_factor);
            sprite.offset = offset;
            sprite.color = session.color(player.shirt_team);
        }
    }
}

/// Show every HUD when the match countdown timer fires.
pub fn hud_timer_observer(trigger: On<TimerEvent>, mut huds: Query<&mut Hud>) {
    if trigger.event().signal != SHOW_HUD_SIGNAL {
        return;
    }
    debug!("Showing {} HUDs", huds.iter().count());
    for mut hud in huds.iter_mut() {
        hud.visible = true;
    }
}
