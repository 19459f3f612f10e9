//! Arena layout data.
//!
//! An arena is described in JSON: static blocks, spawnpoints, doors,
//! elevators and conveyors. [`ArenaLayout::load`] reads a file; when that
//! fails the caller logs the error and falls back to [`default_arena`].
//!
//! ```json
//! {
//!   "name": "Laundromat",
//!   "blocks": [ { "pos": [0, -0.5, 0], "size": [40, 1, 40], "layer": "Ground" } ],
//!   "spawnpoints": [ { "pos": [0, 0, -8], "yaw": 0, "kind": "Player" } ]
//! }
//! ```

use std::path::Path;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::components::curve::{Curve, Easing};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlockLayer {
    /// Walkable: players stand on it and shirts land on it.
    #[default]
    Ground,
    /// Walls and props: shirts bounce off and fall.
    Environment,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockDef {
    pub pos: [f32; 3],
    pub size: [f32; 3],
    #[serde(default)]
    pub layer: BlockLayer,
    #[serde(default)]
    pub color: Option<[u8; 3]>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnKindDef {
    Player,
    Ammo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnDef {
    /// Floor point of the spawn.
    pub pos: [f32; 3],
    #[serde(default)]
    pub yaw: f32,
    pub kind: SpawnKindDef,
}

fn default_true() -> bool {
    true
}

fn default_door_duration() -> f32 {
    0.5
}

fn default_leaf_size() -> [f32; 3] {
    [1.0, 3.0, 0.2]
}

fn default_trigger_size() -> [f32; 3] {
    [3.0, 3.0, 4.0]
}

fn default_closed_x() -> f32 {
    0.5
}

fn default_open_x() -> f32 {
    1.5
}

fn default_scale() -> f32 {
    1.0
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DoorDef {
    /// Door centre. For elevator doors this is relative to the platform.
    pub pos: [f32; 3],
    #[serde(default = "default_true")]
    pub automatic: bool,
    #[serde(default = "default_door_duration")]
    pub duration: f32,
    #[serde(default = "default_trigger_size")]
    pub trigger_size: [f32; 3],
    #[serde(default = "default_leaf_size")]
    pub leaf_size: [f32; 3],
    #[serde(default = "default_closed_x")]
    pub closed_x: f32,
    #[serde(default = "default_open_x")]
    pub open_x: f32,
    #[serde(default = "default_scale")]
    pub closed_scale: f32,
    #[serde(default = "default_scale")]
    pub open_scale: f32,
    #[serde(default)]
    pub curve: Option<Curve>,
}

fn default_travel_time() -> f32 {
    3.0
}

fn default_hold_time() -> f32 {
    3.0
}

fn default_wait() -> f32 {
    0.5
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElevatorDef {
    /// Platform centre at every stop.
    pub stops: Vec<[f32; 3]>,
    pub size: [f32; 3],
    #[serde(default = "default_travel_time")]
    pub travel_time: f32,
    #[serde(default = "default_hold_time")]
    pub hold_open_time: f32,
    #[serde(default = "default_wait")]
    pub wait_before_open: f32,
    #[serde(default = "default_wait")]
    pub wait_after_close: f32,
    #[serde(default)]
    pub travel_curve: Option<Curve>,
    /// Door riding on the platform.
    #[serde(default)]
    pub door: Option<DoorDef>,
    /// Landing door per stop, opened while the platform waits there.
    #[serde(default)]
    pub stop_doors: Vec<Option<DoorDef>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConveyorDef {
    pub pos: [f32; 3],
    pub size: [f32; 3],
    pub direction: [f32; 3],
    pub force: f32,
    #[serde(default)]
    pub flip: bool,
}

#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaLayout {
    pub name: String,
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
    #[serde(default)]
    pub spawnpoints: Vec<SpawnDef>,
    #[serde(default)]
    pub doors: Vec<DoorDef>,
    #[serde(default)]
    pub elevators: Vec<ElevatorDef>,
    #[serde(default)]
    pub conveyors: Vec<ConveyorDef>,
}

impl Default for ArenaLayout {
    fn default() -> Self {
        default_arena()
    }
}

impl ArenaLayout {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read arena {}: {}", path.display(), e))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, String> {
        let layout: ArenaLayout =
            serde_json::from_str(text).map_err(|e| format!("Failed to parse arena: {}", e))?;
        layout.validate()?;
        Ok(layout)
    }

    fn validate(&self) -> Result<(), String> {
        if self.player_spawn_count() == 0 {
            return Err(format!("Arena '{}' has no player spawnpoints", self.name));
        }
        for (i, e) in self.elevators.iter().enumerate() {
            if e.stops.is_empty() {
                return Err(format!("Elevator {} of '{}' has no stops", i, self.name));
            }
        }
        Ok(())
    }

    pub fn player_spawn_count(&self) -> usize {
        self.spawnpoints
            .iter()
            .filter(|s| s.kind == SpawnKindDef::Player)
            .count()
    }
}

fn block(pos: [f32; 3], size: [f32; 3], layer: BlockLayer) -> BlockDef {
    BlockDef {
        pos,
        size,
        layer,
        color: None,
    }
}

fn door(pos: [f32; 3], automatic: bool) -> DoorDef {
    DoorDef {
        pos,
        automatic,
        duration: default_door_duration(),
        trigger_size: default_trigger_size(),
        leaf_size: default_leaf_size(),
        closed_x: default_closed_x(),
        open_x: default_open_x(),
        closed_scale: 1.0,
        open_scale: 1.0,
        curve: Some(Curve::Ease(Easing::QuadInOut)),
    }
}

/// Built-in arena: a walled room split by a wall with a sliding door, a
/// raised deck reached by an elevator, a conveyor strip and six spawns.
pub fn default_arena() -> ArenaLayout {
    use BlockLayer::{Environment, Ground};

    let mut blocks = vec![
        block([0.0, -0.5, 0.0], [40.0, 1.0, 40.0], Ground),
        block([0.0, 2.5, 20.5], [42.0, 6.0, 1.0], Environment),
        block([0.0, 2.5, -20.5], [42.0, 6.0, 1.0], Environment),
        block([20.5, 2.5, 0.0], [1.0, 6.0, 42.0], Environment),
        block([-20.5, 2.5, 0.0], [1.0, 6.0, 42.0], Environment),
        // Dividing wall with a two metre gap for the door.
        block([-11.0, 1.5, 0.0], [18.0, 3.0, 0.4], Environment),
        block([11.0, 1.5, 0.0], [18.0, 3.0, 0.4], Environment),
        // Raised deck in the north-east corner.
        block([14.0, 1.0, 14.0], [8.0, 2.0, 8.0], Ground),
        // Crates to hide behind.
        block([-8.0, 0.75, 8.0], [2.0, 1.5, 2.0], Ground),
        block([-12.0, 0.75, -9.0], [2.0, 1.5, 3.0], Ground),
        block([6.0, 0.5, -10.0], [3.0, 1.0, 1.5], Ground),
    ];
    blocks[7].color = Some([150, 120, 90]);

    let spawnpoints = vec![
        SpawnDef { pos: [-15.0, 0.0, -15.0], yaw: 315.0, kind: SpawnKindDef::Player },
        SpawnDef { pos: [15.0, 0.0, -15.0], yaw: 45.0, kind: SpawnKindDef::Player },
        SpawnDef { pos: [-15.0, 0.0, 15.0], yaw: 225.0, kind: SpawnKindDef::Player },
        SpawnDef { pos: [14.0, 2.0, 14.0], yaw: 135.0, kind: SpawnKindDef::Player },
        SpawnDef { pos: [0.0, 0.0, -8.0], yaw: 0.0, kind: SpawnKindDef::Player },
        SpawnDef { pos: [0.0, 0.0, 8.0], yaw: 180.0, kind: SpawnKindDef::Player },
        SpawnDef { pos: [-4.0, 0.0, -4.0], yaw: 0.0, kind: SpawnKindDef::Ammo },
        SpawnDef { pos: [4.0, 0.0, 4.0], yaw: 0.0, kind: SpawnKindDef::Ammo },
    ];

    let mut landing = door([8.5, 3.5, 15.7], false);
    landing.leaf_size = [0.75, 3.0, 0.2];
    landing.closed_x = 0.75;
    landing.open_x = 2.0;
    let mut cabin = door([0.0, 1.7, -1.5], false);
    cabin.leaf_size = [0.75, 3.0, 0.2];
    cabin.closed_x = 0.75;
    cabin.open_x = 2.0;
    cabin.trigger_size = [3.0, 3.0, 1.0];

    let elevators = vec![ElevatorDef {
        stops: vec![[8.5, -0.2, 14.0], [8.5, 1.8, 14.0]],
        size: [3.0, 0.4, 3.0],
        travel_time: 3.0,
        hold_open_time: 3.0,
        wait_before_open: 0.5,
        wait_after_close: 0.5,
        travel_curve: Some(Curve::Ease(Easing::QuadInOut)),
        door: Some(cabin),
        stop_doors: vec![None, Some(landing)],
    }];

    let conveyors = vec![ConveyorDef {
        pos: [-10.0, 0.05, -4.0],
        size: [12.0, 0.1, 2.0],
        direction: [1.0, 0.0, 0.0],
        force: 6.0,
        flip: false,
    }];

    ArenaLayout {
        name: "Laundromat".to_string(),
        blocks,
        spawnpoints,
        doors: vec![door([0.0, 1.5, 0.0], true)],
        elevators,
        conveyors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_arena_has_six_player_spawns() {
        let a = default_arena();
        assert_eq!(a.player_spawn_count(), 6);
        assert_eq!(a.elevators[0].stop_doors.len(), a.elevators[0].stops.len());
    }

    #[test]
    fn minimal_json_uses_defaults() {
        let text = r#"{
            "name": "Box",
            "blocks": [ { "pos": [0, -0.5, 0], "size": [10, 1, 10] } ],
            "spawnpoints": [ { "pos": [0, 0, 0], "kind": "Player" } ],
            "doors": [ { "pos": [0, 1.5, 3] } ]
        }"#;
        let a = ArenaLayout::from_json(text).unwrap();
        assert_eq!(a.blocks[0].layer, BlockLayer::Ground);
        assert!(a.doors[0].automatic);
        assert_eq!(a.doors[0].duration, 0.5);
        assert!(a.elevators.is_empty());
    }

    #[test]
    fn arena_without_players_is_rejected() {
        let text = r#"{ "name": "Empty" }"#;
        let err = ArenaLayout::from_json(text).unwrap_err();
        assert!(err.contains("no player spawnpoints"));
    }

    #[test]
    fn broken_json_reports_parse_error() {
        let err = ArenaLayout::from_json("{ nope").unwrap_err();
        assert!(err.starts_with("Failed to parse arena"));
    }

    #[test]
    fn default_arena_round_trips_through_json() {
        let a = default_arena();
        let text = serde_json::to_string(&a).unwrap();
        assert_eq!(ArenaLayout::from_json(&text).unwrap(), a);
    }
}
