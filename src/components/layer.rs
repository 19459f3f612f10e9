//! Collision layers and masks.
//!
//! Every collider belongs to one [`CollisionLayer`]. Raycasts and ground checks
//! filter with a [`LayerMask`]; solid contacts are filtered by
//! [`CollisionLayer::collides_with`].

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CollisionLayer {
    /// Walls, props and anything else that is neither floor nor actor.
    #[default]
    Environment,
    /// Walkable floors; shirts landing on it stay put.
    Ground,
    Player,
    /// Armed or landed shirts.
    Projectile,
    /// Trigger volumes (doors, elevators, conveyors).
    Sensor,
    /// Freshly launched shirts that cannot hit players yet.
    ProjectileInert,
}

impl CollisionLayer {
    pub const fn bit(self) -> u32 {
        1 << (self as u32)
    }

    /// Whether two solid colliders on these layers should touch.
    pub fn collides_with(self, other: CollisionLayer) -> bool {
        use CollisionLayer::*;
        !matches!(
            (self, other),
            (Sensor, _) | (_, Sensor) | (ProjectileInert, Player) | (Player, ProjectileInert)
        )
    }

    /// Layers a shirt lands on instead of bouncing off.
    pub fn is_landing_surface(self) -> bool {
        matches!(self, CollisionLayer::Ground | CollisionLayer::Projectile)
    }

    /// Layers ignored by door occupancy counting.
    pub fn ignored_by_doors(self) -> bool {
        matches!(
            self,
            CollisionLayer::Projectile | CollisionLayer::Sensor | CollisionLayer::ProjectileInert
        )
    }
}

/// Bit set of [`CollisionLayer`]s.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    pub fn of(layers: &[CollisionLayer]) -> Self {
        LayerMask(layers.iter().fold(0, |acc, l| acc | l.bit()))
    }

    pub fn contains(self, layer: CollisionLayer) -> bool {
        self.0 & layer.bit() != 0
    }

    /// Surfaces a player can stand on.
    pub fn ground() -> Self {
        Self::of(&[
            CollisionLayer::Ground,
            CollisionLayer::Environment,
        ])
    }

    /// What a flying shirt raycasts against.
    pub fn projectile_hits() -> Self {
        Self::of(&[
            CollisionLayer::Ground,
            CollisionLayer::Environment,
            CollisionLayer::Player,
            CollisionLayer::Projectile,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inert_shirts_pass_through_players() {
        assert!(!CollisionLayer::ProjectileInert.collides_with(CollisionLayer::Player));
        assert!(!CollisionLayer::Player.collides_with(CollisionLayer::ProjectileInert));
        assert!(CollisionLayer::ProjectileInert.collides_with(CollisionLayer::Ground));
        assert!(CollisionLayer::Projectile.collides_with(CollisionLayer::Player));
    }

    #[test]
    fn sensors_never_collide_solidly() {
        assert!(!CollisionLayer::Sensor.collides_with(CollisionLayer::Player));
        assert!(!CollisionLayer::Ground.collides_with(CollisionLayer::Sensor));
    }

    #[test]
    fn masks_contain_their_layers() {
        let m = LayerMask::ground();
        assert!(m.contains(CollisionLayer::Ground));
        assert!(!m.contains(CollisionLayer::Player));
        assert!(LayerMask::ALL.contains(CollisionLayer::Sensor));
        assert!(!LayerMask::NONE.contains(CollisionLayer::Ground));
    }

    #[test]
    fn door_ignore_list() {
        assert!(CollisionLayer::Projectile.ignored_by_doors());
        assert!(CollisionLayer::ProjectileInert.ignored_by_doors());
        assert!(!CollisionLayer::Player.ignored_by_doors());
    }
}
