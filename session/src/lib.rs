#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game session composing the world with the pure gameplay systems.
//!
//! A [`GameSession`] owns the world, the clock and the score/lives economy.
//! Hosts drive it through three entry points: [`GameSession::tick`] once per
//! frame, [`GameSession::handle_direction_key`] for movement input and
//! [`GameSession::activate_menu_item`] for menu selections. Audio cues are
//! queued for the host and drained with [`GameSession::drain_audio_cues`].

use std::time::Duration;

use log::{debug, info};
use roguelike_core::{
    AudioCue, Command, Direction, Event, GameConfig, GameMode, GameOverPolicy, MenuAction,
};
use roguelike_system_clock::{self as clock, ClockSignal, GameClock};
use roguelike_system_encounter::{Encounter, EncounterResolver};
use roguelike_system_patrol::Patrol;
use roguelike_system_spawning::{self as spawning, Spawning};
use roguelike_world::{self as world, query, World, WorldError};
use thiserror::Error;

/// Reasons a session cannot be created.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The configuration does not describe a playable world.
    #[error("cannot build world: {0}")]
    World(#[from] WorldError),
    /// A game cannot begin with zero lives.
    #[error("starting lives must be at least 1")]
    NoStartingLives,
    /// Lives would begin above the cap that survival rewards respect.
    #[error("starting lives ({starting}) exceed the maximum of {max}")]
    StartingLivesAboveMax {
        /// Configured starting lives.
        starting: u32,
        /// Configured lives cap.
        max: u32,
    },
}

/// Whether the host loop should keep running after a menu selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Keep running.
    Continue,
    /// The player asked to quit.
    Exit,
}

/// Single owner of all mutable game state.
#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    world: World,
    clock: GameClock,
    patrol: Patrol,
    encounters: EncounterResolver,
    spawning: Spawning,
    mode: GameMode,
    score: u32,
    lives: u32,
    audio_enabled: bool,
    music_playing: bool,
    audio_cues: Vec<AudioCue>,
    signals: Vec<ClockSignal>,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl GameSession {
    /// Creates a session in menu mode with a freshly built world.
    ///
    /// `seed` drives the spawn tile choice so runs can be replayed.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, SessionError> {
        if config.starting_lives == 0 {
            return Err(SessionError::NoStartingLives);
        }
        if config.starting_lives > config.max_lives {
            return Err(SessionError::StartingLivesAboveMax {
                starting: config.starting_lives,
                max: config.max_lives,
            });
        }

        let world = World::new(&config)?;
        let clock = GameClock::new(clock::Config::from_game(&config));
        let spawning = Spawning::new(spawning::Config::new(config.patrol_window_policy, seed));

        Ok(Self {
            lives: config.starting_lives,
            config,
            world,
            clock,
            patrol: Patrol,
            encounters: EncounterResolver,
            spawning,
            mode: GameMode::Menu,
            score: 0,
            audio_enabled: true,
            music_playing: false,
            audio_cues: Vec::new(),
            signals: Vec::new(),
            commands: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Advances the simulation by one frame.
    ///
    /// Nothing happens in menu mode. While playing, the clock signals are
    /// applied first, then idle enemies pick their patrol step, then every
    /// entity moves and finally a single hero/enemy encounter is resolved.
    pub fn tick(&mut self, dt: Duration) {
        if self.mode != GameMode::Playing {
            return;
        }

        self.signals.clear();
        self.clock.advance(dt, self.mode, &mut self.signals);
        let signals = std::mem::take(&mut self.signals);
        for signal in &signals {
            self.apply_signal(*signal);
        }
        self.signals = signals;

        let enemies = query::enemy_view(&self.world);
        self.patrol.handle(
            &enemies,
            |tile| query::is_walkable(&self.world, tile),
            &mut self.commands,
        );
        self.commands.push(Command::Tick { dt });
        self.flush_commands();

        let hero = query::hero_snapshot(&self.world);
        let enemies = query::enemy_view(&self.world);
        if let Some(encounter) = self.encounters.resolve(&hero, &enemies) {
            self.on_encounter(encounter);
        }
    }

    /// Handles a movement key expressed as a unit vector.
    ///
    /// Returns `true` when the hero started moving. Input is ignored in menu
    /// mode, while the hero is still moving and when the target is blocked.
    pub fn handle_direction_key(&mut self, dx: i32, dy: i32) -> bool {
        if self.mode != GameMode::Playing {
            return false;
        }
        let Some(direction) = Direction::from_delta(dx, dy) else {
            return false;
        };
        self.move_hero(direction)
    }

    /// Requests a hero move in `direction`, returning whether it started.
    pub fn move_hero(&mut self, direction: Direction) -> bool {
        if self.mode != GameMode::Playing {
            return false;
        }

        self.commands.push(Command::MoveHero { direction });
        self.flush_commands();

        let started = self
            .events
            .iter()
            .any(|event| matches!(event, Event::HeroMoved { .. }));
        if started {
            self.emit(AudioCue::Step);
        }
        started
    }

    /// Applies a menu selection.
    pub fn activate_menu_item(&mut self, action: MenuAction) -> MenuOutcome {
        match action {
            MenuAction::Start => {
                if self.mode == GameMode::Menu {
                    self.mode = GameMode::Playing;
                    info!("game started");
                }
                if self.audio_enabled && !self.music_playing {
                    self.music_playing = true;
                    self.emit(AudioCue::MusicStart);
                }
                MenuOutcome::Continue
            }
            MenuAction::ToggleAudio => {
                self.audio_enabled = !self.audio_enabled;
                if self.audio_enabled {
                    self.music_playing = true;
                    self.emit(AudioCue::MusicStart);
                } else {
                    // Stop must reach the host even though cues are now muted.
                    self.audio_cues.clear();
                    self.music_playing = false;
                    self.audio_cues.push(AudioCue::MusicStop);
                }
                info!(
                    "audio {}",
                    if self.audio_enabled { "enabled" } else { "disabled" }
                );
                MenuOutcome::Continue
            }
            MenuAction::Exit => {
                info!("exit requested");
                MenuOutcome::Exit
            }
        }
    }

    /// Restores score, lives, timers and actors and returns to the menu.
    ///
    /// The audio preference survives the reset.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.clock.reset();
        self.commands.push(Command::ResetActors);
        self.flush_commands();
        self.mode = GameMode::Menu;
    }

    /// Removes and yields the audio cues queued since the last drain.
    pub fn drain_audio_cues(&mut self) -> std::vec::Drain<'_, AudioCue> {
        self.audio_cues.drain(..)
    }

    /// Current mode of the session.
    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    /// Points accumulated in the current game.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Lives remaining in the current game.
    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    /// Whether audio cues are being emitted.
    #[must_use]
    pub const fn audio_enabled(&self) -> bool {
        self.audio_enabled
    }

    /// Read-only access to the world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Read-only access to the economy clock.
    #[must_use]
    pub const fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// Configuration the session was built from.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    fn apply_signal(&mut self, signal: ClockSignal) {
        match signal {
            ClockSignal::ScoreDue => {
                self.score = self.score.saturating_add(self.config.score_increment);
                debug!("score is now {}", self.score);
            }
            ClockSignal::SpawnDue => {
                let free = query::free_tiles(&self.world);
                let width = query::grid(&self.world).width();
                self.spawning.handle(&free, width, &mut self.commands);
                self.flush_commands();
            }
            ClockSignal::SurvivalReward => {
                self.lives = self.lives.saturating_add(1).min(self.config.max_lives);
                info!("survival reward, lives now {}", self.lives);
                self.emit(AudioCue::Powerup);
            }
        }
    }

    fn on_encounter(&mut self, encounter: Encounter) {
        self.emit(AudioCue::Hit);
        self.lives = self.lives.saturating_sub(1);

        if self.lives == 0 {
            info!(
                "game over with score {} (enemy {} at ({}, {}))",
                self.score,
                encounter.enemy.get(),
                encounter.tile.x(),
                encounter.tile.y()
            );
            self.reset();
            if self.config.game_over_policy == GameOverPolicy::ContinueLooping {
                self.mode = GameMode::Playing;
            }
            return;
        }

        info!(
            "hero caught by enemy {}, {} lives left",
            encounter.enemy.get(),
            self.lives
        );
        self.clock.reset_survival();
        self.commands.push(Command::ResetActors);
        self.flush_commands();
    }

    fn emit(&mut self, cue: AudioCue) {
        if !self.audio_enabled {
            return;
        }
        self.audio_cues.push(cue);
    }

    fn flush_commands(&mut self) {
        self.events.clear();
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_menu_with_full_lives() {
        let session = GameSession::new(GameConfig::default(), 1).expect("default config is valid");
        assert_eq!(session.mode(), GameMode::Menu);
        assert_eq!(session.lives(), 3);
        assert_eq!(session.score(), 0);
        assert!(session.audio_enabled());
    }

    #[test]
    fn rejects_unplayable_configuration() {
        let config = GameConfig {
            layout: vec!["###".to_owned(), "#.".to_owned()],
            ..GameConfig::default()
        };
        assert!(matches!(
            GameSession::new(config, 1),
            Err(SessionError::World(WorldError::Grid(_)))
        ));
    }

    #[test]
    fn rejects_lives_outside_the_cap() {
        let none = GameConfig {
            starting_lives: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            GameSession::new(none, 1).err(),
            Some(SessionError::NoStartingLives)
        );

        let above = GameConfig {
            starting_lives: 7,
            max_lives: 5,
            ..GameConfig::default()
        };
        assert_eq!(
            GameSession::new(above, 1).err(),
            Some(SessionError::StartingLivesAboveMax {
                starting: 7,
                max: 5
            })
        );
    }

    #[test]
    fn diagonal_keys_are_ignored() {
        let mut session = GameSession::new(GameConfig::default(), 1).expect("default config is valid");
        let _ = session.activate_menu_item(MenuAction::Start);
        assert!(!session.handle_direction_key(1, 1));
        assert!(!session.handle_direction_key(0, 0));
    }
}
