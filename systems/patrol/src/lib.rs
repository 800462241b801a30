#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Patrol system that oscillates enemies left and right inside their windows.
//!
//! Enemies reflect at the edges of their patrol window and at blocked tiles.
//! There is no pursuit: the decision depends only on the enemy's own tile,
//! heading and window.

use roguelike_core::{Command, EnemySnapshot, EnemyView, Heading, TilePosition};

/// Pure system that steers idle enemies.
#[derive(Debug, Default)]
pub struct Patrol;

impl Patrol {
    /// Emits a [`Command::StepEnemy`] for every enemy that is not mid-move.
    ///
    /// Enemies still interpolating toward their tile are skipped so every
    /// decision happens on a settled tile. The world commits the step, or
    /// keeps the enemy in place when the chosen side is blocked too.
    pub fn handle<F>(&self, enemies: &EnemyView, is_walkable: F, out: &mut Vec<Command>)
    where
        F: Fn(TilePosition) -> bool,
    {
        for enemy in enemies.iter().filter(|enemy| !enemy.moving) {
            out.push(Command::StepEnemy {
                enemy: enemy.id,
                heading: decide(enemy, &is_walkable),
            });
        }
    }
}

/// Chooses the heading an idle enemy should step along.
///
/// The enemy keeps its heading while the next tile stays inside the window
/// and is walkable. Otherwise it reflects.
#[must_use]
pub fn decide<F>(enemy: &EnemySnapshot, is_walkable: F) -> Heading
where
    F: Fn(TilePosition) -> bool,
{
    let ahead = enemy.tile.step_heading(enemy.heading);
    if enemy.window.contains(ahead.x()) && is_walkable(ahead) {
        enemy.heading
    } else {
        enemy.heading.reversed()
    }
}
