#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded spawning system responsible for emitting enemy spawn commands.

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use roguelike_core::{Command, PatrolWindow, PatrolWindowPolicy, TilePosition};

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    policy: PatrolWindowPolicy,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided window policy and seed.
    #[must_use]
    pub const fn new(policy: PatrolWindowPolicy, rng_seed: u64) -> Self {
        Self { policy, rng_seed }
    }
}

/// Pure system that picks a free tile uniformly at random for new enemies.
#[derive(Debug)]
pub struct Spawning {
    policy: PatrolWindowPolicy,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            policy: config.policy,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Emits a [`Command::SpawnEnemy`] on a random free tile.
    ///
    /// `free_tiles` must already exclude blocked and occupied tiles. Nothing
    /// is emitted when the slice is empty.
    pub fn handle(&mut self, free_tiles: &[TilePosition], map_width: u32, out: &mut Vec<Command>) {
        let Some(&tile) = free_tiles.choose(&mut self.rng) else {
            return;
        };

        out.push(Command::SpawnEnemy {
            tile,
            window: patrol_window(self.policy, tile.x(), map_width),
        });
    }
}

/// Derives the patrol window of an enemy spawned in `column`.
///
/// Windows never extend past the map's columns.
#[must_use]
pub fn patrol_window(policy: PatrolWindowPolicy, column: i32, map_width: u32) -> PatrolWindow {
    let last_column = i32::try_from(map_width)
        .unwrap_or(i32::MAX)
        .saturating_sub(1)
        .max(0);

    match policy {
        PatrolWindowPolicy::SymmetricClamped { radius } => {
            let radius = i32::try_from(radius).unwrap_or(i32::MAX);
            PatrolWindow::new(
                column.saturating_sub(radius).max(0),
                column.saturating_add(radius).min(last_column),
            )
        }
        PatrolWindowPolicy::FullWidth => PatrolWindow::new(0, last_column),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_window_is_clamped_to_the_map() {
        let policy = PatrolWindowPolicy::SymmetricClamped { radius: 3 };
        assert_eq!(patrol_window(policy, 5, 12), PatrolWindow::new(2, 8));
        assert_eq!(patrol_window(policy, 1, 12), PatrolWindow::new(0, 4));
        assert_eq!(patrol_window(policy, 10, 12), PatrolWindow::new(7, 11));
    }

    #[test]
    fn full_width_window_spans_every_column() {
        assert_eq!(
            patrol_window(PatrolWindowPolicy::FullWidth, 5, 12),
            PatrolWindow::new(0, 11)
        );
    }

    #[test]
    fn no_command_without_free_tiles() {
        let mut spawning = Spawning::new(Config::new(PatrolWindowPolicy::FullWidth, 7));
        let mut commands = Vec::new();
        spawning.handle(&[], 12, &mut commands);
        assert!(commands.is_empty());
    }
}
