//! Hero and enemy specialisations of [`MobileEntity`].

use roguelike_core::{
    Actor, EnemyId, EnemySnapshot, Heading, HeroSnapshot, MotionProfile, PatrolWindow,
    SpriteFrame, TilePosition,
};

use crate::motion::MobileEntity;

/// The player-controlled entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Hero {
    pub(crate) body: MobileEntity,
}

impl Hero {
    pub(crate) fn spawn(tile: TilePosition, tile_size: f32, profile: MotionProfile) -> Self {
        Self {
            body: MobileEntity::new(tile, tile_size, profile),
        }
    }

    /// Movement and animation state of the hero.
    #[must_use]
    pub const fn body(&self) -> &MobileEntity {
        &self.body
    }

    /// Tile the hero logically occupies.
    #[must_use]
    pub const fn tile(&self) -> TilePosition {
        self.body.tile()
    }

    /// Whether the hero is still travelling toward its tile.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        self.body.is_moving()
    }

    /// Sprite frame a renderer should draw for the hero.
    #[must_use]
    pub const fn sprite(&self) -> SpriteFrame {
        self.body.sprite(Actor::Hero)
    }

    /// Captures an immutable snapshot of the hero.
    #[must_use]
    pub const fn snapshot(&self) -> HeroSnapshot {
        HeroSnapshot {
            tile: self.body.tile(),
            moving: self.body.is_moving(),
        }
    }
}

/// A patrolling enemy confined to a horizontal window.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) body: MobileEntity,
    pub(crate) window: PatrolWindow,
    pub(crate) heading: Heading,
}

impl Enemy {
    pub(crate) fn spawn(
        id: EnemyId,
        tile: TilePosition,
        window: PatrolWindow,
        tile_size: f32,
        profile: MotionProfile,
    ) -> Self {
        Self {
            id,
            body: MobileEntity::new(tile, tile_size, profile),
            window,
            heading: Heading::Right,
        }
    }

    /// Identifier allocated to the enemy.
    #[must_use]
    pub const fn id(&self) -> EnemyId {
        self.id
    }

    /// Movement and animation state of the enemy.
    #[must_use]
    pub const fn body(&self) -> &MobileEntity {
        &self.body
    }

    /// Tile the enemy logically occupies.
    #[must_use]
    pub const fn tile(&self) -> TilePosition {
        self.body.tile()
    }

    /// Inclusive column range the enemy patrols.
    #[must_use]
    pub const fn window(&self) -> PatrolWindow {
        self.window
    }

    /// Current patrol heading.
    #[must_use]
    pub const fn heading(&self) -> Heading {
        self.heading
    }

    /// Whether the enemy is still travelling toward its tile.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        self.body.is_moving()
    }

    /// Sprite frame a renderer should draw for the enemy.
    #[must_use]
    pub const fn sprite(&self) -> SpriteFrame {
        self.body.sprite(Actor::Enemy)
    }

    /// Captures an immutable snapshot of the enemy.
    #[must_use]
    pub const fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            tile: self.body.tile(),
            heading: self.heading,
            window: self.window,
            moving: self.body.is_moving(),
        }
    }
}
