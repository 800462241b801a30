#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative actor state for the roguelike.
//!
//! The world owns the map, the hero and the enemy roster. Nothing outside
//! this crate mutates actors directly: callers submit [`Command`] values to
//! [`apply`] and observe the resulting [`Event`] stream, while the [`query`]
//! module exposes read-only access for systems and adapters.

mod actors;
mod grid;
mod motion;

use log::debug;
use roguelike_core::{
    Command, EnemyBlueprint, EnemyId, Event, GameConfig, MotionProfile, PatrolWindow,
    TilePosition,
};
use thiserror::Error;

pub use actors::{Enemy, Hero};
pub use grid::{Cell, GridError, GridMap};
pub use motion::MobileEntity;

/// Reasons a configuration cannot produce a playable world.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The configured layout is malformed.
    #[error("invalid map layout: {0}")]
    Grid(#[from] GridError),
    /// The hero would start on a blocked or out-of-bounds tile.
    #[error("hero start tile ({}, {}) is not walkable", .0.x(), .0.y())]
    BlockedHeroStart(TilePosition),
    /// An initial enemy would start on a blocked or out-of-bounds tile.
    #[error("enemy start tile ({}, {}) is not walkable", .0.x(), .0.y())]
    BlockedEnemyStart(TilePosition),
    /// An initial enemy would start outside of its own patrol window.
    #[error(
        "enemy start column {} lies outside its patrol window [{}, {}]",
        .tile.x(),
        .window.min(),
        .window.max()
    )]
    EnemyOutsideWindow {
        /// Start tile of the enemy.
        tile: TilePosition,
        /// Patrol window assigned to the enemy.
        window: PatrolWindow,
    },
}

/// Represents the authoritative roguelike world state.
#[derive(Clone, Debug)]
pub struct World {
    grid: GridMap,
    tile_size: f32,
    hero_start: TilePosition,
    hero_motion: MotionProfile,
    enemy_motion: MotionProfile,
    roster: Vec<EnemyBlueprint>,
    hero: Hero,
    enemies: Vec<Enemy>,
    next_enemy_id: u32,
}

impl World {
    /// Builds a world from the provided configuration.
    ///
    /// The layout, hero start and initial roster are validated up front so the
    /// simulation never has to cope with an unplayable map at runtime.
    pub fn new(config: &GameConfig) -> Result<Self, WorldError> {
        let grid = GridMap::from_rows(&config.layout)?;

        if !grid.is_walkable(config.hero_start) {
            return Err(WorldError::BlockedHeroStart(config.hero_start));
        }

        for blueprint in &config.initial_enemies {
            if !grid.is_walkable(blueprint.tile) {
                return Err(WorldError::BlockedEnemyStart(blueprint.tile));
            }
            if !blueprint.window.contains(blueprint.tile.x()) {
                return Err(WorldError::EnemyOutsideWindow {
                    tile: blueprint.tile,
                    window: blueprint.window,
                });
            }
        }

        let mut world = Self {
            hero: Hero::spawn(config.hero_start, config.tile_size, config.hero_motion),
            enemies: Vec::new(),
            grid,
            tile_size: config.tile_size,
            hero_start: config.hero_start,
            hero_motion: config.hero_motion,
            enemy_motion: config.enemy_motion,
            roster: config.initial_enemies.clone(),
            next_enemy_id: 0,
        };
        world.reset_actors();
        Ok(world)
    }

    fn reset_actors(&mut self) {
        self.hero = Hero::spawn(self.hero_start, self.tile_size, self.hero_motion);
        let roster = std::mem::take(&mut self.roster);
        self.enemies = roster
            .iter()
            .map(|blueprint| self.create_enemy(blueprint.tile, blueprint.window))
            .collect();
        self.roster = roster;
    }

    fn create_enemy(&mut self, tile: TilePosition, window: PatrolWindow) -> Enemy {
        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id = self.next_enemy_id.wrapping_add(1);
        Enemy::spawn(id, tile, window, self.tile_size, self.enemy_motion)
    }

    fn is_occupied(&self, tile: TilePosition) -> bool {
        self.hero.tile() == tile || self.enemies.iter().any(|enemy| enemy.tile() == tile)
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });

            if world.hero.body.update() {
                out_events.push(Event::HeroArrived {
                    tile: world.hero.tile(),
                });
            }

            for enemy in &mut world.enemies {
                if enemy.body.update() {
                    out_events.push(Event::EnemyArrived {
                        enemy: enemy.id,
                        tile: enemy.tile(),
                    });
                }
            }
        }
        Command::MoveHero { direction } => {
            if world.hero.is_moving() {
                return;
            }

            let from = world.hero.tile();
            let to = from.step(direction);
            if !world.grid.is_walkable(to) {
                return;
            }

            world.hero.body.begin_move(to);
            out_events.push(Event::HeroMoved { from, to });
        }
        Command::StepEnemy { enemy, heading } => {
            let grid = &world.grid;
            let Some(enemy) = world.enemies.iter_mut().find(|candidate| candidate.id == enemy)
            else {
                return;
            };
            if enemy.is_moving() {
                return;
            }

            enemy.heading = heading;
            let from = enemy.tile();
            let to = from.step_heading(heading);
            if !enemy.window.contains(to.x()) || !grid.is_walkable(to) {
                return;
            }

            enemy.body.begin_move(to);
            out_events.push(Event::EnemyAdvanced {
                enemy: enemy.id,
                from,
                to,
            });
        }
        Command::SpawnEnemy { tile, window } => {
            if !world.grid.is_walkable(tile) || !window.contains(tile.x()) || world.is_occupied(tile)
            {
                return;
            }

            let enemy = world.create_enemy(tile, window);
            debug!(
                "enemy {} spawned at ({}, {}) patrolling [{}, {}]",
                enemy.id.get(),
                tile.x(),
                tile.y(),
                window.min(),
                window.max()
            );
            out_events.push(Event::EnemySpawned {
                enemy: enemy.id,
                tile,
                window,
            });
            world.enemies.push(enemy);
        }
        Command::ResetActors => {
            world.reset_actors();
            out_events.push(Event::ActorsReset);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use roguelike_core::{EnemyView, HeroSnapshot, TilePosition};

    use super::{Enemy, GridMap, Hero, World};

    /// Provides read-only access to the map.
    #[must_use]
    pub fn grid(world: &World) -> &GridMap {
        &world.grid
    }

    /// Side length of a tile in pixels.
    #[must_use]
    pub fn tile_size(world: &World) -> f32 {
        world.tile_size
    }

    /// Reports whether the tile lies inside the map and is walkable.
    #[must_use]
    pub fn is_walkable(world: &World, tile: TilePosition) -> bool {
        world.grid.is_walkable(tile)
    }

    /// Provides read-only access to the hero.
    #[must_use]
    pub fn hero(world: &World) -> &Hero {
        &world.hero
    }

    /// Captures an immutable snapshot of the hero.
    #[must_use]
    pub fn hero_snapshot(world: &World) -> HeroSnapshot {
        world.hero.snapshot()
    }

    /// Provides read-only access to the enemies in spawn order.
    #[must_use]
    pub fn enemies(world: &World) -> &[Enemy] {
        &world.enemies
    }

    /// Captures a read-only view of the enemies in spawn order.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.iter().map(Enemy::snapshot).collect())
    }

    /// Enumerates walkable tiles occupied by neither the hero nor an enemy,
    /// in row-major order.
    #[must_use]
    pub fn free_tiles(world: &World) -> Vec<TilePosition> {
        world
            .grid
            .walkable_tiles()
            .filter(|tile| !world.is_occupied(*tile))
            .collect()
    }
}
