#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game clock that turns elapsed playing time into economy signals.
//!
//! Three independent accumulators drive the score, enemy spawns and the
//! survival bonus. Each resets to zero when it fires, so overshoot within a
//! frame is discarded rather than carried into the next period.

use std::time::Duration;

use roguelike_core::{GameConfig, GameMode};

/// Configuration parameters required to construct the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    score_interval: Duration,
    spawn_interval: Duration,
    survival_reward_time: Duration,
}

impl Config {
    /// Creates a new configuration using the provided cadences.
    #[must_use]
    pub const fn new(
        score_interval: Duration,
        spawn_interval: Duration,
        survival_reward_time: Duration,
    ) -> Self {
        Self {
            score_interval,
            spawn_interval,
            survival_reward_time,
        }
    }

    /// Extracts the clock cadences from a game configuration.
    #[must_use]
    pub fn from_game(config: &GameConfig) -> Self {
        Self::new(
            config.score_interval,
            config.spawn_interval,
            config.survival_reward_time,
        )
    }
}

/// Economy events fired by the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClockSignal {
    /// A score interval elapsed.
    ScoreDue,
    /// A spawn interval elapsed.
    SpawnDue,
    /// The hero survived long enough to earn an extra life.
    SurvivalReward,
}

/// Accumulates playing time and emits [`ClockSignal`]s at fixed intervals.
#[derive(Debug)]
pub struct GameClock {
    config: Config,
    elapsed: Duration,
    score_timer: Duration,
    spawn_timer: Duration,
    survival_timer: Duration,
}

impl GameClock {
    /// Creates a clock with all accumulators at zero.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            elapsed: Duration::ZERO,
            score_timer: Duration::ZERO,
            spawn_timer: Duration::ZERO,
            survival_timer: Duration::ZERO,
        }
    }

    /// Advances the clock by `dt` and pushes every signal that fired.
    ///
    /// Time only accumulates while playing. Signals are emitted in the order
    /// score, spawn, survival, at most once each per call.
    pub fn advance(&mut self, dt: Duration, mode: GameMode, out: &mut Vec<ClockSignal>) {
        if mode != GameMode::Playing {
            return;
        }

        self.elapsed = self.elapsed.saturating_add(dt);

        if accumulate(&mut self.score_timer, dt, self.config.score_interval) {
            out.push(ClockSignal::ScoreDue);
        }
        if accumulate(&mut self.spawn_timer, dt, self.config.spawn_interval) {
            out.push(ClockSignal::SpawnDue);
        }
        if accumulate(
            &mut self.survival_timer,
            dt,
            self.config.survival_reward_time,
        ) {
            out.push(ClockSignal::SurvivalReward);
        }
    }

    /// Clears every accumulator, including the elapsed playing time.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    /// Restarts the survival countdown after the hero loses a life.
    pub fn reset_survival(&mut self) {
        self.survival_timer = Duration::ZERO;
    }

    /// Total playing time since the last full reset.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Time accumulated toward the next score award.
    #[must_use]
    pub const fn score_timer(&self) -> Duration {
        self.score_timer
    }

    /// Time accumulated toward the next spawn attempt.
    #[must_use]
    pub const fn spawn_timer(&self) -> Duration {
        self.spawn_timer
    }

    /// Time accumulated toward the next survival reward.
    #[must_use]
    pub const fn survival_timer(&self) -> Duration {
        self.survival_timer
    }
}

fn accumulate(timer: &mut Duration, dt: Duration, interval: Duration) -> bool {
    *timer = timer.saturating_add(dt);
    if *timer >= interval {
        *timer = Duration::ZERO;
        return true;
    }
    false
}
