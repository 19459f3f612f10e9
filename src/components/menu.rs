//! Menu and front-end screen components.
//!
//! - [`Menu`] – a vertical list of entries navigated with up/down and
//!   confirmed with submit
//! - [`MainMenuScreen`] – press-start prompt plus the sliding how-to and
//!   credits panels
//! - [`PlayerSelect`] – join slots filled by input devices
//! - [`VictoryScreen`] – winner banner waiting for start

use bevy_ecs::prelude::Component;
use raylib::prelude::{Color, Vector2};

use crate::components::curve::{Curve, Easing};
use crate::math;
use crate::resources::input::InputDevice;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Play,
    HowTo,
    Credits,
    Quit,
}

#[derive(Clone, Debug)]
pub struct MenuItem {
    pub action: MenuAction,
    pub label: String,
}

#[derive(Component, Clone, Debug)]
pub struct Menu {
    pub items: Vec<MenuItem>,
    pub selected_index: usize,
    /// Only an active menu reacts to input.
    pub active: bool,
    pub origin: Vector2,
    pub item_spacing: f32,
    pub font_size: f32,
    pub normal_color: Color,
    pub selected_color: Color,
}

impl Menu {
    pub fn new(labels: &[(MenuAction, &str)], origin: Vector2, font_size: f32, item_spacing: f32) -> Self {
        let items = labels
            .iter()
            .map(|(action, label)| MenuItem {
                action: *action,
                label: label.to_string(),
            })
            .collect();
        Self {
            items,
            selected_index: 0,
            active: false,
            origin,
            item_spacing,
            font_size,
            normal_color: Color::WHITE,
            selected_color: Color::YELLOW,
        }
    }

    pub fn with_colors(mut self, normal: Color, selected: Color) -> Self {
        self.normal_color = normal;
        self.selected_color = selected;
        self
    }

    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected_index = (self.selected_index + 1) % self.items.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.items.is_empty() {
            self.selected_index = (self.selected_index + self.items.len() - 1) % self.items.len();
        }
    }

    /// Highlight the entry bound to `action`, if present.
    pub fn select_action(&mut self, action: MenuAction) {
        if let Some(i) = self.items.iter().position(|it| it.action == action) {
            self.selected_index = i;
        }
    }

    pub fn selected(&self) -> Option<MenuAction> {
        self.items.get(self.selected_index).map(|it| it.action)
    }

    pub fn item_position(&self, index: usize) -> Vector2 {
        Vector2::new(self.origin.x, self.origin.y + index as f32 * self.item_spacing)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuPanel {
    HowTo,
    Credits,
}

/// Slide amounts of the main menu pieces, each in `[0, 1]`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MenuSlides {
    pub menu: f32,
    pub credits: f32,
    pub how_to: f32,
}

/// Text block of a sliding panel.
#[derive(Component, Copy, Clone, Debug)]
pub struct MenuPanelText {
    pub panel: MenuPanel,
}

/// "Press start" prompt shown before the menu opens.
#[derive(Component, Copy, Clone, Debug, Default)]
pub struct PressStartPrompt;

#[derive(Component, Clone, Debug)]
pub struct MainMenuScreen {
    /// Past the press-start prompt.
    pub started: bool,
    pub showing: Option<MenuPanel>,
    pub credits_timer: f32,
    pub how_to_timer: f32,
    pub panel_time: f32,
    pub panel_curve: Curve,
    /// Panel travel as a fraction of the screen width.
    pub panel_offset: Vector2,
    pub menu_offset: Vector2,
    pub slides: MenuSlides,
}

impl Default for MainMenuScreen {
    fn default() -> Self {
        Self {
            started: false,
            showing: None,
            credits_timer: 0.0,
            how_to_timer: 0.0,
            panel_time: 0.4,
            panel_curve: Curve::Ease(Easing::QuadOut),
            panel_offset: Vector2::new(-1.0, 0.0),
            menu_offset: Vector2::new(-0.6, 0.0),
            slides: MenuSlides::default(),
        }
    }
}

impl MainMenuScreen {
    fn step_timer(timer: f32, showing: bool, dt: f32, max: f32) -> f32 {
        if showing {
            (timer + dt).min(max)
        } else {
            (timer - dt).max(0.0)
        }
    }

    /// Advance panel timers. The main menu slides with whichever panel is
    /// further along.
    pub fn update(&mut self, dt: f32) -> MenuSlides {
        let max = self.panel_time;
        self.credits_timer = Self::step_timer(
            self.credits_timer,
            self.showing == Some(MenuPanel::Credits),
            dt,
            max,
        );
        self.how_to_timer = Self::step_timer(
            self.how_to_timer,
            self.showing == Some(MenuPanel::HowTo),
            dt,
            max,
        );
        let ratio = |timer: f32| if max > 0.0 { math::clamp01(timer / max) } else { 0.0 };
        let credits = self.panel_curve.evaluate(ratio(self.credits_timer));
        let how_to = self.panel_curve.evaluate(ratio(self.how_to_timer));
        let menu = if self.credits_timer > self.how_to_timer {
            credits
        } else {
            how_to
        };
        self.slides = MenuSlides {
            menu,
            credits,
            how_to,
        };
        self.slides
    }
}

/// Join screen. Slot `i` becomes player `i` once locked by a device.
#[derive(Component, Clone, Debug)]
pub struct PlayerSelect {
    pub slots: Vec<Option<InputDevice>>,
    /// Everyone joined and the transition toward the arena started.
    pub ready: bool,
}

impl PlayerSelect {
    pub fn new(count: usize) -> Self {
        Self {
            slots: vec![None; count],
            ready: false,
        }
    }

    pub fn is_assigned(&self, device: InputDevice) -> bool {
        self.slots.contains(&Some(device))
    }

    pub fn first_unlocked(&self) -> Option<usize> {
        self.slots.iter().position(|s| s.is_none())
    }

    /// Lock the first free slot to `device`. Devices already holding a slot
    /// are ignored.
    pub fn join(&mut self, device: InputDevice) -> Option<usize> {
        if self.is_assigned(device) {
            return None;
        }
        let slot = self.first_unlocked()?;
        self.slots[slot] = Some(device);
        Some(slot)
    }

    /// Release whatever slot `device` holds.
    pub fn leave(&mut self, device: InputDevice) -> Option<usize> {
        let slot = self.slots.iter().position(|s| *s == Some(device))?;
        self.slots[slot] = None;
        Some(slot)
    }

    pub fn is_locked(&self, slot: usize) -> bool {
        matches!(self.slots.get(slot), Some(Some(_)))
    }

    pub fn all_ready(&self) -> bool {
        !self.slots.is_empty() && self.slots.iter().all(|s| s.is_some())
    }

    pub fn assignments(&self) -> Vec<InputDevice> {
        self.slots.iter().flatten().copied().collect()
    }
}

/// Visual of one join slot.
#[derive(Component, Copy, Clone, Debug)]
pub struct SelectSlot {
    pub index: usize,
}

#[derive(Component, Clone, Debug)]
pub struct VictoryScreen {
    pub winner: usize,
    pub ending: bool,
}

impl VictoryScreen {
    pub fn new(winner: usize) -> Self {
        Self {
            winner,
            ending: false,
        }
    }

    pub fn title(&self) -> String {
        format!("Player {} wins!", self.winner + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn main_menu() -> Menu {
        Menu::new(
            &[
                (MenuAction::Play, "Play"),
                (MenuAction::HowTo, "How to play"),
                (MenuAction::Credits, "Credits"),
                (MenuAction::Quit, "Quit"),
            ],
            Vector2::new(100.0, 200.0),
            30.0,
            40.0,
        )
    }

    #[test]
    fn menu_selection_wraps() {
        let mut m = main_menu();
        m.select_previous();
        assert_eq!(m.selected(), Some(MenuAction::Quit));
        m.select_next();
        assert_eq!(m.selected(), Some(MenuAction::Play));
        m.select_action(MenuAction::Credits);
        assert_eq!(m.selected_index, 2);
        assert!(approx_eq(m.item_position(2).y, 280.0));
    }

    #[test]
    fn panel_timers_clamp() {
        let mut s = MainMenuScreen {
            panel_curve: Curve::linear(),
            ..MainMenuScreen::default()
        };
        s.showing = Some(MenuPanel::Credits);
        let slides = s.update(0.2);
        assert!(approx_eq(slides.credits, 0.5));
        assert!(approx_eq(slides.menu, 0.5));
        s.update(5.0);
        assert!(approx_eq(s.credits_timer, s.panel_time));

        s.showing = Some(MenuPanel::HowTo);
        let slides = s.update(0.1);
        assert!(approx_eq(slides.credits, 0.75));
        assert!(approx_eq(slides.how_to, 0.25));
        assert!(approx_eq(slides.menu, 0.75));

        s.showing = None;
        s.update(5.0);
        assert!(approx_eq(s.credits_timer, 0.0) && approx_eq(s.how_to_timer, 0.0));
    }

    #[test]
    fn devices_join_first_free_slot_once() {
        let mut p = PlayerSelect::new(3);
        assert_eq!(p.join(InputDevice::Gamepad(1)), Some(0));
        assert_eq!(p.join(InputDevice::Gamepad(1)), None);
        assert_eq!(p.join(InputDevice::Keyboard), Some(1));
        assert_eq!(p.leave(InputDevice::Gamepad(1)), Some(0));
        assert_eq!(p.first_unlocked(), Some(0));
        assert_eq!(p.join(InputDevice::Gamepad(0)), Some(0));
        assert!(!p.all_ready());
        assert_eq!(p.join(InputDevice::Gamepad(2)), Some(2));
        assert!(p.all_ready());
        assert_eq!(
            p.assignments(),
            vec![
                InputDevice::Gamepad(0),
                InputDevice::Keyboard,
                InputDevice::Gamepad(2)
            ]
        );
    }

    #[test]
    fn leaving_without_a_slot_is_ignored() {
        let mut p = PlayerSelect::new(2);
        assert_eq!(p.leave(InputDevice::Keyboard), None);
    }
}
