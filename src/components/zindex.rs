//! Draw order of screen-space elements.
//!
//! Split-screen views are drawn first, then UI entities sorted by
//! [`ZIndex`]: higher values on top. Transition bars sit above everything.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    pub const HUD: ZIndex = ZIndex(10);
    pub const SCORE: ZIndex = ZIndex(20);
    pub const MENU: ZIndex = ZIndex(30);
    pub const TRANSITION: ZIndex = ZIndex(100);
}
