//! Menu selection event.

use bevy_ecs::prelude::*;

use crate::components::menu::MenuAction;

/// An entry of `menu` was confirmed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuSelectionEvent {
    pub menu: Entity,
    pub action: MenuAction,
}
