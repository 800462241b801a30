//! Layered game configuration: preset, then TOML file, then flags.

use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use roguelike_core::{
    EnemyBlueprint, GameConfig, GameOverPolicy, PatrolWindowPolicy, TilePosition,
};
use serde::Deserialize;

/// Built-in starting points for the configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Preset {
    /// Returns to the menu on game over; spawned enemies patrol a narrow window.
    Classic,
    /// Keeps playing after game over; spawned enemies roam the full width.
    Endless,
}

impl Preset {
    fn config(self) -> GameConfig {
        match self {
            Self::Classic => GameConfig::default(),
            Self::Endless => GameConfig::endless(),
        }
    }
}

/// Optional fields read from a TOML configuration file.
///
/// Durations are expressed in seconds.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigFile {
    tile_size: Option<f32>,
    score_interval_secs: Option<f64>,
    score_increment: Option<u32>,
    spawn_interval_secs: Option<f64>,
    survival_reward_secs: Option<f64>,
    starting_lives: Option<u32>,
    max_lives: Option<u32>,
    game_over_policy: Option<GameOverPolicy>,
    patrol_window_policy: Option<PatrolWindowPolicy>,
    hero_start: Option<TilePosition>,
    initial_enemies: Option<Vec<EnemyBlueprint>>,
    layout: Option<Vec<String>>,
}

impl ConfigFile {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse config toml")
    }

    fn apply(self, config: &mut GameConfig) -> Result<()> {
        if let Some(tile_size) = self.tile_size {
            config.tile_size = tile_size;
        }
        if let Some(secs) = self.score_interval_secs {
            config.score_interval = seconds("score_interval_secs", secs)?;
        }
        if let Some(increment) = self.score_increment {
            config.score_increment = increment;
        }
        if let Some(secs) = self.spawn_interval_secs {
            config.spawn_interval = seconds("spawn_interval_secs", secs)?;
        }
        if let Some(secs) = self.survival_reward_secs {
            config.survival_reward_time = seconds("survival_reward_secs", secs)?;
        }
        if let Some(lives) = self.starting_lives {
            config.starting_lives = lives;
        }
        if let Some(lives) = self.max_lives {
            config.max_lives = lives;
        }
        if let Some(policy) = self.game_over_policy {
            config.game_over_policy = policy;
        }
        if let Some(policy) = self.patrol_window_policy {
            config.patrol_window_policy = policy;
        }
        if let Some(tile) = self.hero_start {
            config.hero_start = tile;
        }
        if let Some(enemies) = self.initial_enemies {
            config.initial_enemies = enemies;
        }
        if let Some(layout) = self.layout {
            config.layout = layout;
        }
        Ok(())
    }
}

fn seconds(field: &str, secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs)
        .with_context(|| format!("`{field}` must be a non-negative number of seconds"))
}

/// Builds the effective configuration from its layers.
///
/// Only the tile size is checked here; the session validates the map and
/// the lives economy when it is built.
pub(crate) fn resolve(
    preset: Preset,
    file: Option<ConfigFile>,
    tile_size: Option<f32>,
) -> Result<GameConfig> {
    let mut config = preset.config();
    if let Some(file) = file {
        file.apply(&mut config)?;
    }
    if let Some(tile_size) = tile_size {
        config.tile_size = tile_size;
    }

    if !config.tile_size.is_finite() || config.tile_size <= 0.0 {
        bail!("tile size must be positive (received {})", config.tile_size);
    }
    Ok(config)
}
