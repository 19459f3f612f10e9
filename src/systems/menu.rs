//! Front-end screen systems.
//!
//! - [`main_menu_system`] – press-start prompt, menu navigation and the
//!   sliding how-to and credits panels
//! - [`menu_selection_observer`] – performs the action of a confirmed entry
//! - [`player_select_system`] – devices join and leave slots
//! - [`victory_system`] / [`victory_timer_observer`] – leave the victory
//!   screen after start is pressed
//!
//! Every screen reads the merged menu buttons of
//! [`PlayerInputs`](crate::resources::input::PlayerInputs); player select
//! also reads each device on its own.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};
use raylib::prelude::Vector2;

use crate::components::dynamictext::DynamicText;
use crate::components::menu::{
    MainMenuScreen, Menu, MenuAction, MenuPanel, MenuPanelText, PlayerSelect, PressStartPrompt,
    SelectSlot, VictoryScreen,
};
use crate::components::screenposition::ScreenPosition;
use crate::components::timer::Timer;
use crate::components::transition::TransitionBars;
use crate::components::ui::Wiggle;
use crate::events::audio::AudioCmd;
use crate::events::menu::MenuSelectionEvent;
use crate::events::timer::TimerEvent;
use crate::resources::audio::fx;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::input::{InputDevice, PlayerInputs};
use crate::resources::screensize::ScreenSize;
use crate::resources::session::Session;
use crate::resources::worldtime::WorldTime;

/// Voice used by menu sounds.
pub const MENU_VOICE: &str = "ui";
/// Timer signal that sends the victory screen back to the main menu.
pub const RETURN_TO_MENU_SIGNAL: &str = "return_to_menu";
/// Wiggle amplitude of a join slot still waiting for a device.
pub const SLOT_WIGGLE: f32 = 4.0;

fn menu_sound(audio: &mut MessageWriter<AudioCmd>) {
    audio.write(AudioCmd::voice(MENU_VOICE, fx::SELECT, 0.8));
}

/// Main menu input and layout.
///
/// Before start is pressed only the prompt shows. Afterwards up/down move
/// the selection and submit confirms it; cancel closes an open panel or
/// goes back to the prompt.
#[allow(clippy::too_many_arguments)]
pub fn main_menu_system(
    mut commands: Commands,
    time: Res<WorldTime>,
    inputs: Res<PlayerInputs>,
    screen_size: Res<ScreenSize>,
    mut audio: MessageWriter<AudioCmd>,
    mut screens: Query<&mut MainMenuScreen>,
    mut menus: Query<(Entity, &mut Menu, &mut ScreenPosition), Without<MenuPanelText>>,
    mut panels: Query<(&MenuPanelText, &mut ScreenPosition), Without<Menu>>,
    mut prompts: Query<&mut DynamicText, With<PressStartPrompt>>,
) {
    let Ok(mut screen) = screens.single_mut() else {
        return;
    };
    let Ok((menu_entity, mut menu, mut menu_pos)) = menus.single_mut() else {
        return;
    };

    if !screen.started {
        if inputs.submit_all.just_pressed {
            screen.started = true;
            menu.active = true;
            menu_sound(&mut audio);
        }
    } else if screen.showing.is_some() {
        if inputs.cancel_all.just_pressed || inputs.submit_all.just_pressed {
            screen.showing = None;
            menu.active = true;
            menu_sound(&mut audio);
        }
    } else if menu.active {
        if inputs.menu_up.just_pressed {
            menu.select_previous();
            menu_sound(&mut audio);
        } else if inputs.menu_down.just_pressed {
            menu.select_next();
            menu_sound(&mut audio);
        } else if inputs.submit_all.just_pressed {
            if let Some(action) = menu.selected() {
                menu.active = false;
                menu_sound(&mut audio);
                commands.trigger(MenuSelectionEvent {
                    menu: menu_entity,
                    action,
                });
            }
        } else if inputs.cancel_all.just_pressed {
            screen.started = false;
            menu.active = false;
        }
    }

    let slides = screen.update(time.delta);
    let width = screen_size.w as f32;
    menu_pos.slide(Vector2::new(
        screen.menu_offset.x * width * slides.menu,
        screen.menu_offset.y * width * slides.menu,
    ));
    menu.origin = menu_pos.pos;
    for (panel, mut pos) in panels.iter_mut() {
        let t = match panel.panel {
            MenuPanel::HowTo => slides.how_to,
            MenuPanel::Credits => slides.credits,
        };
        // hidden panels wait one screen width past their resting place
        pos.slide(Vector2::new(
            screen.panel_offset.x * width * (t - 1.0),
            screen.panel_offset.y * width * (t - 1.0),
        ));
    }
    for mut prompt in prompts.iter_mut() {
        prompt.color.a = if screen.started { 0 } else { 255 };
    }
}

/// Perform the action of a confirmed menu entry.
pub fn menu_selection_observer(
    trigger: On<MenuSelectionEvent>,
    mut next_game_state: ResMut<NextGameState>,
    mut screens: Query<&mut MainMenuScreen>,
    mut bars: Query<&mut TransitionBars>,
) {
    let event = trigger.event();
    debug!("Menu {:?} selected {:?}", event.menu, event.action);
    match event.action {
        MenuAction::Play => {
            for mut transition in bars.iter_mut() {
                transition.reset(true, Some(GameStates::PlayerSelect));
                transition.activate();
            }
        }
        MenuAction::HowTo => {
            for mut screen in screens.iter_mut() {
                screen.showing = Some(MenuPanel::HowTo);
            }
        }
        MenuAction::Credits => {
            for mut screen in screens.iter_mut() {
                screen.showing = Some(MenuPanel::Credits);
            }
        }
        MenuAction::Quit => {
            next_game_state.set(GameStates::Quitting);
        }
    }
}

fn slot_label(device: Option<InputDevice>) -> String {
    match device {
        Some(device) => format!("{} ready", device.label()),
        None => "Press jump to join".to_string(),
    }
}

/// Join screen: jump locks the first free slot to the pressing device, back
/// releases it. Once every slot is locked the assignment is saved and the
/// transition toward the arena starts.
pub fn player_select_system(
    inputs: Res<PlayerInputs>,
    mut session: ResMut<Session>,
    mut audio: MessageWriter<AudioCmd>,
    mut selects: Query<&mut PlayerSelect>,
    mut slots: Query<(&SelectSlot, &mut Wiggle, &mut DynamicText)>,
    mut bars: Query<&mut TransitionBars>,
) {
    let Ok(mut select) = selects.single_mut() else {
        return;
    };
    if select.ready {
        return;
    }

    for device in InputDevice::ALL {
        let input = inputs.device(device);
        if !input.connected {
            continue;
        }
        if input.jump.just_pressed
            && let Some(slot) = select.join(device)
        {
            info!("{} joined as player {}", device.label(), slot + 1);
            menu_sound(&mut audio);
        } else if input.back.just_pressed
            && let Some(slot) = select.leave(device)
        {
            info!("{} left slot {}", device.label(), slot + 1);
        }
    }

    for (slot, mut wiggle, mut text) in slots.iter_mut() {
        let device = select.slots.get(slot.index).copied().flatten();
        wiggle.amplitude = if device.is_some() { 0.0 } else { SLOT_WIGGLE };
        let label = slot_label(device);
        if text.content != label {
            text.set_content(label);
        }
    }

    if select.all_ready() {
        select.ready = true;
        session.save_assignments(select.assignments());
        info!("All {} players ready", select.slots.len());
        for mut transition in bars.iter_mut() {
            transition.reset(true, Some(GameStates::Playing));
            transition.activate();
        }
    }
}

/// Start on the victory screen covers it and arms the return timer.
pub fn victory_system(
    mut commands: Commands,
    inputs: Res<PlayerInputs>,
    config: Res<GameConfig>,
    mut screens: Query<(Entity, &mut VictoryScreen)>,
    mut bars: Query<&mut TransitionBars>,
) {
    let Ok((entity, mut screen)) = screens.single_mut() else {
        return;
    };
    if screen.ending || !(inputs.start_all.just_pressed || inputs.submit_all.just_pressed) {
        return;
    }
    screen.ending = true;
    for mut transition in bars.iter_mut() {
        transition.activate();
    }
    commands.entity(entity).insert(Timer::new(
        config.rules.victory_return_delay,
        RETURN_TO_MENU_SIGNAL,
    ));
}

pub fn victory_timer_observer(trigger: On<TimerEvent>, mut next_game_state: ResMut<NextGameState>) {
    if trigger.event().signal == RETURN_TO_MENU_SIGNAL {
        next_game_state.set(GameStates::MainMenu);
    }
}
