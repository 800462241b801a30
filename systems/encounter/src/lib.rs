#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Encounter detection between the hero and enemies.

use roguelike_core::{EnemyId, EnemyView, HeroSnapshot, TilePosition};

/// Hero/enemy overlap detected during a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encounter {
    /// First enemy, in spawn order, sharing the hero's tile.
    pub enemy: EnemyId,
    /// Tile on which the overlap happened.
    pub tile: TilePosition,
}

/// Pure system that detects hero/enemy tile overlaps.
#[derive(Debug, Default)]
pub struct EncounterResolver;

impl EncounterResolver {
    /// Returns the first enemy in spawn order occupying the hero's tile.
    ///
    /// Only logical tiles are compared, never pixel positions, so an overlap
    /// is reported as soon as an enemy commits to the hero's tile. At most one
    /// encounter is reported per call since the caller replaces the world in
    /// response.
    #[must_use]
    pub fn resolve(&self, hero: &HeroSnapshot, enemies: &EnemyView) -> Option<Encounter> {
        enemies
            .iter()
            .find(|enemy| enemy.tile == hero.tile)
            .map(|enemy| Encounter {
                enemy: enemy.id,
                tile: hero.tile,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roguelike_core::{EnemySnapshot, Heading, PatrolWindow};

    fn hero_at(x: i32, y: i32) -> HeroSnapshot {
        HeroSnapshot {
            tile: TilePosition::new(x, y),
            moving: false,
        }
    }

    fn enemy(id: u32, x: i32, y: i32) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            tile: TilePosition::new(x, y),
            heading: Heading::Right,
            window: PatrolWindow::new(0, 10),
            moving: true,
        }
    }

    #[test]
    fn no_encounter_when_tiles_differ() {
        let view = EnemyView::from_snapshots(vec![enemy(0, 2, 1), enemy(1, 1, 2)]);
        assert_eq!(EncounterResolver.resolve(&hero_at(1, 1), &view), None);
    }

    #[test]
    fn requires_exact_tile_equality() {
        let view = EnemyView::from_snapshots(vec![enemy(0, 1, 2)]);
        assert_eq!(EncounterResolver.resolve(&hero_at(1, 1), &view), None);
    }

    #[test]
    fn reports_only_the_first_overlap_in_spawn_order() {
        let view = EnemyView::from_snapshots(vec![
            enemy(7, 4, 4),
            enemy(3, 1, 1),
            enemy(5, 1, 1),
        ]);
        let encounter = EncounterResolver
            .resolve(&hero_at(1, 1), &view)
            .expect("hero shares a tile with two enemies");
        assert_eq!(encounter.enemy, EnemyId::new(3));
        assert_eq!(encounter.tile, TilePosition::new(1, 1));
    }

    #[test]
    fn empty_roster_never_collides() {
        assert_eq!(
            EncounterResolver.resolve(&hero_at(1, 1), &EnemyView::default()),
            None
        );
    }
}
