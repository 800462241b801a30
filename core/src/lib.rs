#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the roguelike engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. The session submits [`Command`]
//! values describing desired actor mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! describing what actually happened. Systems read immutable snapshots such as
//! [`EnemyView`] and respond exclusively with new commands.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Title shown by adapters when the experience boots.
pub const GAME_TITLE: &str = "Roguelike Game";

/// Describes whether the session is showing the menu or simulating play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Menu is displayed; the simulation is frozen and input is ignored.
    Menu,
    /// Gameplay is running and the clock accumulates time.
    Playing,
}

/// Commands that express all permissible actor mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances every mobile entity by a single frame.
    Tick {
        /// Wall-clock time that elapsed since the previous frame.
        dt: Duration,
    },
    /// Requests that the hero start moving one tile in the provided direction.
    MoveHero {
        /// Direction of travel for the attempted move.
        direction: Direction,
    },
    /// Requests that an enemy adopt a heading and step one tile along it.
    StepEnemy {
        /// Identifier of the enemy being steered.
        enemy: EnemyId,
        /// Heading the enemy should adopt before stepping.
        heading: Heading,
    },
    /// Requests that a new enemy be created on the provided tile.
    SpawnEnemy {
        /// Tile the enemy should occupy.
        tile: TilePosition,
        /// Inclusive column range the enemy patrols.
        window: PatrolWindow,
    },
    /// Returns the hero and the enemy roster to their starting configuration.
    ResetActors,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the frame clock advanced.
    TimeAdvanced {
        /// Wall-clock time that elapsed during the frame.
        dt: Duration,
    },
    /// Confirms that the hero committed to a move between two tiles.
    HeroMoved {
        /// Tile the hero occupied before the move.
        from: TilePosition,
        /// Tile the hero is travelling to.
        to: TilePosition,
    },
    /// Reports that the hero finished interpolating onto its tile.
    HeroArrived {
        /// Tile the hero now rests on.
        tile: TilePosition,
    },
    /// Confirms that an enemy committed to a patrol step.
    EnemyAdvanced {
        /// Identifier of the enemy that moved.
        enemy: EnemyId,
        /// Tile the enemy occupied before the step.
        from: TilePosition,
        /// Tile the enemy is travelling to.
        to: TilePosition,
    },
    /// Reports that an enemy finished interpolating onto its tile.
    EnemyArrived {
        /// Identifier of the enemy that arrived.
        enemy: EnemyId,
        /// Tile the enemy now rests on.
        tile: TilePosition,
    },
    /// Confirms that a new enemy joined the roster.
    EnemySpawned {
        /// Identifier allocated to the enemy.
        enemy: EnemyId,
        /// Tile the enemy occupies.
        tile: TilePosition,
        /// Patrol window assigned to the enemy.
        window: PatrolWindow,
    },
    /// Announces that the hero and enemies were returned to their start state.
    ActorsReset,
}

/// Cardinal movement directions available to the hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Converts a unit vector into a direction.
    ///
    /// Returns `None` for the zero vector, diagonals and non-unit inputs.
    #[must_use]
    pub const fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Self::Up),
            (0, 1) => Some(Self::Down),
            (-1, 0) => Some(Self::Left),
            (1, 0) => Some(Self::Right),
            _ => None,
        }
    }

    /// Unit vector of the direction in tile space.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Horizontal patrol heading of an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    /// Patrolling toward decreasing columns.
    Left,
    /// Patrolling toward increasing columns.
    Right,
}

impl Heading {
    /// Column offset applied by a single step, either `-1` or `+1`.
    #[must_use]
    pub const fn step(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }

    /// Heading pointing the opposite way.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Last horizontal direction an entity travelled in, used to mirror sprites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Sprite looks toward decreasing columns.
    Left,
    /// Sprite looks toward increasing columns.
    Right,
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single tile expressed as column and row coordinates.
///
/// Coordinates are signed so that neighbours of edge tiles can be expressed
/// and rejected by walkability checks instead of wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePosition {
    x: i32,
    y: i32,
}

impl TilePosition {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column of the tile.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row of the tile.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Tile adjacent to this one in the provided direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Tile shifted horizontally by the provided heading.
    #[must_use]
    pub const fn step_heading(self, heading: Heading) -> Self {
        Self::new(self.x + heading.step(), self.y)
    }
}

/// Inclusive column range an enemy oscillates within.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatrolWindow {
    min: i32,
    max: i32,
}

impl PatrolWindow {
    /// Creates a patrol window, ordering the bounds if they were swapped.
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Smallest column the enemy may occupy.
    #[must_use]
    pub const fn min(&self) -> i32 {
        self.min
    }

    /// Largest column the enemy may occupy.
    #[must_use]
    pub const fn max(&self) -> i32 {
        self.max
    }

    /// Reports whether the column lies inside the window.
    #[must_use]
    pub const fn contains(&self, column: i32) -> bool {
        self.min <= column && column <= self.max
    }
}

/// Animation channel an entity is playing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimState {
    /// Stationary loop with a decorative vertical bob.
    Idle,
    /// Walk cycle played while interpolating between tiles.
    Walk,
}

/// Kind of actor a sprite belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Actor {
    /// The player-controlled hero.
    Hero,
    /// A patrolling enemy.
    Enemy,
}

/// Enumerated sprite sequence selected by actor, animation state and facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpriteSet {
    /// Actor the sequence belongs to.
    pub actor: Actor,
    /// Animation channel of the sequence.
    pub state: AnimState,
    /// Horizontal orientation of the sequence.
    pub facing: Facing,
}

impl SpriteSet {
    /// Number of distinct sprite sequences.
    pub const COUNT: usize = 8;

    /// Every sprite sequence ordered by [`SpriteSet::index`].
    pub const ALL: [SpriteSet; Self::COUNT] = [
        Self::new(Actor::Hero, AnimState::Idle, Facing::Left),
        Self::new(Actor::Hero, AnimState::Idle, Facing::Right),
        Self::new(Actor::Hero, AnimState::Walk, Facing::Left),
        Self::new(Actor::Hero, AnimState::Walk, Facing::Right),
        Self::new(Actor::Enemy, AnimState::Idle, Facing::Left),
        Self::new(Actor::Enemy, AnimState::Idle, Facing::Right),
        Self::new(Actor::Enemy, AnimState::Walk, Facing::Left),
        Self::new(Actor::Enemy, AnimState::Walk, Facing::Right),
    ];

    /// Creates a sprite sequence key.
    #[must_use]
    pub const fn new(actor: Actor, state: AnimState, facing: Facing) -> Self {
        Self {
            actor,
            state,
            facing,
        }
    }

    /// Dense index into a fixed-size table of [`SpriteSet::COUNT`] entries.
    #[must_use]
    pub const fn index(&self) -> usize {
        let actor = match self.actor {
            Actor::Hero => 0,
            Actor::Enemy => 4,
        };
        let state = match self.state {
            AnimState::Idle => 0,
            AnimState::Walk => 2,
        };
        let facing = match self.facing {
            Facing::Left => 0,
            Facing::Right => 1,
        };
        actor + state + facing
    }

    /// Stable name used by asset manifests, such as `hero_walk_left`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match (self.actor, self.state, self.facing) {
            (Actor::Hero, AnimState::Idle, Facing::Left) => "hero_idle_left",
            (Actor::Hero, AnimState::Idle, Facing::Right) => "hero_idle_right",
            (Actor::Hero, AnimState::Walk, Facing::Left) => "hero_walk_left",
            (Actor::Hero, AnimState::Walk, Facing::Right) => "hero_walk_right",
            (Actor::Enemy, AnimState::Idle, Facing::Left) => "enemy_idle_left",
            (Actor::Enemy, AnimState::Idle, Facing::Right) => "enemy_idle_right",
            (Actor::Enemy, AnimState::Walk, Facing::Left) => "enemy_walk_left",
            (Actor::Enemy, AnimState::Walk, Facing::Right) => "enemy_walk_right",
        }
    }
}

/// Single frame within a sprite sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpriteFrame {
    /// Sequence the frame belongs to.
    pub set: SpriteSet,
    /// Zero-based frame index within the sequence.
    pub frame: usize,
}

impl fmt::Display for SpriteFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.set.name(), self.frame)
    }
}

/// Discrete sound cues a host audio layer may play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// The hero started a move.
    Step,
    /// The hero collided with an enemy.
    Hit,
    /// The hero earned an extra life.
    Powerup,
    /// Background music should start playing.
    MusicStart,
    /// Background music should stop.
    MusicStop,
}

impl AudioCue {
    /// Stable name of the cue.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Step => "step",
            Self::Hit => "hit",
            Self::Powerup => "powerup",
            Self::MusicStart => "music_start",
            Self::MusicStop => "music_stop",
        }
    }
}

/// Actions reachable from the main menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuAction {
    /// Leave the menu and start playing.
    Start,
    /// Toggle whether audio cues are emitted.
    ToggleAudio,
    /// Ask the host to shut down.
    Exit,
}

/// What happens when the last life is lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverPolicy {
    /// Reset everything and return to the menu.
    ResetToMenu,
    /// Reset everything and keep playing immediately.
    ContinueLooping,
}

/// How the patrol window of a freshly spawned enemy is derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatrolWindowPolicy {
    /// Window of `radius` columns on either side of the spawn column, clamped
    /// to the map.
    SymmetricClamped {
        /// Number of columns on each side of the spawn column.
        radius: u32,
    },
    /// Window spanning every column of the map.
    FullWidth,
}

/// Norm used to measure the remaining distance of an interpolated move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DistanceMetric {
    /// Straight-line distance, suitable for entities that move on both axes.
    Euclidean,
    /// Absolute horizontal distance, for entities that only patrol along rows.
    HorizontalOnly,
}

/// Movement and animation tuning of a mobile entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionProfile {
    /// Pixels advanced per frame while moving.
    pub speed: f32,
    /// Animation timer increment per frame while idle.
    pub idle_anim_speed: f32,
    /// Animation timer increment per frame while walking.
    pub walk_anim_speed: f32,
    /// Number of frames in the idle sequence.
    pub idle_frames: usize,
    /// Number of frames in the walk sequence.
    pub walk_frames: usize,
    /// Angular frequency applied to the animation timer for the idle bob.
    pub bob_frequency: f32,
    /// Peak idle bob displacement in pixels.
    pub bob_amplitude: f32,
    /// Norm used to measure distance to the target tile.
    pub metric: DistanceMetric,
}

impl MotionProfile {
    /// Profile used by the hero.
    #[must_use]
    pub const fn hero() -> Self {
        Self {
            speed: 6.0,
            idle_anim_speed: 0.05,
            walk_anim_speed: 0.2,
            idle_frames: 2,
            walk_frames: 2,
            bob_frequency: std::f32::consts::TAU,
            bob_amplitude: 2.0,
            metric: DistanceMetric::Euclidean,
        }
    }

    /// Profile used by enemies.
    #[must_use]
    pub const fn enemy() -> Self {
        Self {
            speed: 4.0,
            idle_anim_speed: 0.05,
            walk_anim_speed: 0.18,
            idle_frames: 2,
            walk_frames: 2,
            bob_frequency: std::f32::consts::TAU,
            bob_amplitude: 2.0,
            metric: DistanceMetric::HorizontalOnly,
        }
    }
}

/// Starting tile and patrol window of an enemy in the initial roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyBlueprint {
    /// Tile the enemy starts on.
    pub tile: TilePosition,
    /// Patrol window assigned to the enemy.
    pub window: PatrolWindow,
}

impl EnemyBlueprint {
    /// Creates a new blueprint.
    #[must_use]
    pub const fn new(tile: TilePosition, window: PatrolWindow) -> Self {
        Self { tile, window }
    }
}

/// Bordered room used when no layout is configured.
pub const DEFAULT_LAYOUT: [&str; 8] = [
    "############",
    "#..........#",
    "#..........#",
    "#..........#",
    "#..........#",
    "#..........#",
    "#..........#",
    "############",
];

/// Complete tuning of a game session.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Side length of a tile in pixels.
    pub tile_size: f32,
    /// Playing time between score awards.
    pub score_interval: Duration,
    /// Points awarded every `score_interval`.
    pub score_increment: u32,
    /// Playing time between enemy spawn attempts.
    pub spawn_interval: Duration,
    /// Playing time without losing a life that earns an extra life.
    pub survival_reward_time: Duration,
    /// Lives granted at the start of every game.
    pub starting_lives: u32,
    /// Upper bound applied when survival rewards add lives.
    pub max_lives: u32,
    /// Behaviour once the last life is lost.
    pub game_over_policy: GameOverPolicy,
    /// Patrol window derivation for spawned enemies.
    pub patrol_window_policy: PatrolWindowPolicy,
    /// Tile the hero starts on and respawns at.
    pub hero_start: TilePosition,
    /// Enemies present at the start of every life.
    pub initial_enemies: Vec<EnemyBlueprint>,
    /// Map rows using `#` for blocked and `.` for walkable tiles.
    pub layout: Vec<String>,
    /// Motion tuning applied to the hero.
    pub hero_motion: MotionProfile,
    /// Motion tuning applied to enemies.
    pub enemy_motion: MotionProfile,
}

impl GameConfig {
    /// Variant that keeps playing after a game over and lets spawned enemies
    /// roam the full map width.
    #[must_use]
    pub fn endless() -> Self {
        Self {
            tile_size: 32.0,
            score_increment: 10,
            game_over_policy: GameOverPolicy::ContinueLooping,
            patrol_window_policy: PatrolWindowPolicy::FullWidth,
            ..Self::default()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: 48.0,
            score_interval: Duration::from_secs(3),
            score_increment: 1,
            spawn_interval: Duration::from_secs(10),
            survival_reward_time: Duration::from_secs(30),
            starting_lives: 3,
            max_lives: 5,
            game_over_policy: GameOverPolicy::ResetToMenu,
            patrol_window_policy: PatrolWindowPolicy::SymmetricClamped { radius: 3 },
            hero_start: TilePosition::new(1, 1),
            initial_enemies: vec![
                EnemyBlueprint::new(TilePosition::new(5, 2), PatrolWindow::new(2, 9)),
                EnemyBlueprint::new(TilePosition::new(7, 5), PatrolWindow::new(4, 9)),
            ],
            layout: DEFAULT_LAYOUT.iter().map(|row| (*row).to_owned()).collect(),
            hero_motion: MotionProfile::hero(),
            enemy_motion: MotionProfile::enemy(),
        }
    }
}

/// Immutable representation of the hero used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeroSnapshot {
    /// Tile the hero logically occupies.
    pub tile: TilePosition,
    /// Whether the hero is still interpolating toward its tile.
    pub moving: bool,
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Tile the enemy logically occupies.
    pub tile: TilePosition,
    /// Current patrol heading.
    pub heading: Heading,
    /// Inclusive column range the enemy patrols.
    pub window: PatrolWindow,
    /// Whether the enemy is still interpolating toward its tile.
    pub moving: bool,
}

/// Read-only snapshot describing all enemies in spawn order.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from snapshots already in spawn order.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<EnemySnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_round_trips_through_unit_vectors() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let (dx, dy) = direction.delta();
            assert_eq!(Direction::from_delta(dx, dy), Some(direction));
        }
    }

    #[test]
    fn direction_rejects_diagonals_and_zero() {
        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(1, 1), None);
        assert_eq!(Direction::from_delta(2, 0), None);
    }

    #[test]
    fn patrol_window_orders_swapped_bounds() {
        let window = PatrolWindow::new(9, 2);
        assert_eq!(window.min(), 2);
        assert_eq!(window.max(), 9);
        assert!(window.contains(2));
        assert!(window.contains(9));
        assert!(!window.contains(10));
    }

    #[test]
    fn sprite_set_indices_cover_the_table_exactly_once() {
        let mut seen = [false; SpriteSet::COUNT];
        for (position, set) in SpriteSet::ALL.iter().enumerate() {
            assert_eq!(set.index(), position);
            assert!(!seen[set.index()]);
            seen[set.index()] = true;
        }
        assert!(seen.iter().all(|entry| *entry));
    }

    #[test]
    fn sprite_frame_formats_as_asset_key() {
        let frame = SpriteFrame {
            set: SpriteSet::new(Actor::Enemy, AnimState::Walk, Facing::Left),
            frame: 1,
        };
        assert_eq!(frame.to_string(), "enemy_walk_left_1");
    }

    #[test]
    fn heading_reversal_flips_step_sign() {
        assert_eq!(Heading::Right.step(), 1);
        assert_eq!(Heading::Right.reversed().step(), -1);
    }

    #[test]
    fn endless_preset_only_overrides_variant_knobs() {
        let classic = GameConfig::default();
        let endless = GameConfig::endless();
        assert_eq!(endless.game_over_policy, GameOverPolicy::ContinueLooping);
        assert_eq!(endless.patrol_window_policy, PatrolWindowPolicy::FullWidth);
        assert_eq!(endless.score_interval, classic.score_interval);
        assert_eq!(endless.layout, classic.layout);
    }
}
