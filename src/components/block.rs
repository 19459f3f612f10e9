//! Visible arena geometry.
//!
//! Static blocks, door leaves, elevator platforms and conveyor belts carry a
//! [`BlockVisual`] next to their [`BoxCollider`](super::boxcollider::BoxCollider)
//! and are drawn as shaded boxes of the collider's size.

use bevy_ecs::prelude::Component;
use raylib::prelude::Color;

#[derive(Component, Clone, Copy, Debug)]
pub struct BlockVisual {
    pub color: Color,
}

impl BlockVisual {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    /// Edge colour: the face colour darkened by `amount` in `[0, 1]`.
    pub fn edge_color(&self, amount: f32) -> Color {
        let k = 1.0 - amount.clamp(0.0, 1.0);
        Color::new(
            (self.color.r as f32 * k) as u8,
            (self.color.g as f32 * k) as u8,
            (self.color.b as f32 * k) as u8,
            self.color.a,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_darker() {
        let b = BlockVisual::new(Color::new(200, 100, 50, 255));
        let e = b.edge_color(0.5);
        assert_eq!((e.r, e.g, e.b, e.a), (100, 50, 25, 255));
        assert_eq!(b.edge_color(0.0).r, 200);
    }
}
