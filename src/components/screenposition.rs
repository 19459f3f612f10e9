//! Screen-space position component.
//!
//! The [`ScreenPosition`] component stores a UI element's position in render
//! target pixels, relative to its [`UiAnchor`](super::ui::UiAnchor). Sliding
//! elements (menus, panels, transition bars, score icons) remember their
//! resting place in `home` and are moved relative to it.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

#[derive(Component, Clone, Copy, Debug)]
pub struct ScreenPosition {
    /// Current position in pixels.
    pub pos: Vector2,
    /// Resting position the element slides away from.
    pub home: Vector2,
}

impl Default for ScreenPosition {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl ScreenPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
            home: Vector2 { x, y },
        }
    }

    pub fn from_vec(pos: Vector2) -> Self {
        Self { pos, home: pos }
    }

    /// Place the element at `home + offset`.
    pub fn slide(&mut self, offset: Vector2) {
        self.pos = self.home + offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn new_sets_home() {
        let pos = ScreenPosition::new(10.0, 20.0);
        assert!(approx_eq(pos.home.x, 10.0));
        assert!(approx_eq(pos.pos.y, 20.0));
    }

    #[test]
    fn slide_is_relative_to_home() {
        let mut pos = ScreenPosition::new(10.0, 20.0);
        pos.slide(Vector2 { x: 5.0, y: -3.0 });
        pos.slide(Vector2 { x: 5.0, y: -3.0 });
        assert!(approx_eq(pos.pos.x, 15.0));
        assert!(approx_eq(pos.pos.y, 17.0));
        pos.slide(Vector2 { x: 0.0, y: 0.0 });
        assert!(approx_eq(pos.pos.x, 10.0));
        assert!(approx_eq(pos.home.x, 10.0));
    }
}
