#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for roguelike adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use roguelike_core::{AudioCue, Direction, GameMode, MenuAction, SpriteFrame};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Movement key pressed on this frame, if any.
    pub direction: Option<Direction>,
    /// Menu item clicked on this frame, if any.
    pub menu_action: Option<MenuAction>,
}

/// Verdict returned by the scene update closure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Keep presenting frames.
    Continue,
    /// Close the window and return from the backend.
    Exit,
}

/// Axis-aligned rectangle in screen units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl Rect {
    /// Creates a rectangle from its corner and size.
    #[must_use]
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    /// Reports whether `point` lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.origin + self.size;
        point.x >= self.origin.x && point.y >= self.origin.y && point.x <= max.x && point.y <= max.y
    }
}

/// Single clickable entry of the main menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MenuItem {
    /// Action triggered when the item is clicked.
    pub action: MenuAction,
    /// Screen area covered by the item.
    pub rect: Rect,
}

impl MenuItem {
    /// Text displayed on the item given the current audio preference.
    #[must_use]
    pub const fn label(&self, audio_enabled: bool) -> &'static str {
        match self.action {
            MenuAction::Start => "Start Game",
            MenuAction::ToggleAudio if audio_enabled => "Music: ON",
            MenuAction::ToggleAudio => "Music: OFF",
            MenuAction::Exit => "Exit",
        }
    }
}

/// Placement of the main menu within a window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MenuLayout {
    title_center: Vec2,
    items: [MenuItem; 3],
}

impl MenuLayout {
    /// Window size the menu was designed for.
    pub const REFERENCE_SIZE: Vec2 = Vec2::new(800.0, 600.0);

    const ITEM_SIZE: Vec2 = Vec2::new(200.0, 60.0);
    const ITEM_LEFT: f32 = 300.0;
    const ITEM_TOPS: [f32; 3] = [200.0, 280.0, 360.0];
    const TITLE_TOP: f32 = 120.0;

    /// Lays the menu out in a window of `window_size`, centering the
    /// reference frame when the window is larger or smaller.
    #[must_use]
    pub fn centered(window_size: Vec2) -> Self {
        let offset = (window_size - Self::REFERENCE_SIZE) * 0.5;
        let item = |action: MenuAction, top: f32| MenuItem {
            action,
            rect: Rect::new(offset + Vec2::new(Self::ITEM_LEFT, top), Self::ITEM_SIZE),
        };

        Self {
            title_center: offset + Vec2::new(Self::REFERENCE_SIZE.x * 0.5, Self::TITLE_TOP),
            items: [
                item(MenuAction::Start, Self::ITEM_TOPS[0]),
                item(MenuAction::ToggleAudio, Self::ITEM_TOPS[1]),
                item(MenuAction::Exit, Self::ITEM_TOPS[2]),
            ],
        }
    }

    /// Center of the game title above the items.
    #[must_use]
    pub const fn title_center(&self) -> Vec2 {
        self.title_center
    }

    /// Menu entries from top to bottom.
    #[must_use]
    pub const fn items(&self) -> &[MenuItem; 3] {
        &self.items
    }

    /// Returns the action of the item under `point`, if any.
    #[must_use]
    pub fn hit_test(&self, point: Vec2) -> Option<MenuAction> {
        self.items
            .iter()
            .find(|item| item.rect.contains(point))
            .map(|item| item.action)
    }
}

/// Describes the tile map that adapters draw while playing.
#[derive(Clone, Debug, PartialEq)]
pub struct GridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single tile in pixels.
    pub tile_size: f32,
    walkable: Vec<bool>,
    /// Color used for walkable tiles.
    pub floor_color: Color,
    /// Color used for blocked tiles.
    pub wall_color: Color,
}

impl GridPresentation {
    /// Creates a new grid descriptor from row-major walkability flags.
    ///
    /// Returns an error when the tile size is not positive or when the flag
    /// count does not match the grid dimensions.
    pub fn new(
        columns: u32,
        rows: u32,
        tile_size: f32,
        walkable: Vec<bool>,
        floor_color: Color,
        wall_color: Color,
    ) -> std::result::Result<Self, RenderingError> {
        if tile_size <= 0.0 || !tile_size.is_finite() {
            return Err(RenderingError::InvalidTileSize { tile_size });
        }
        let expected = columns as usize * rows as usize;
        if walkable.len() != expected {
            return Err(RenderingError::TileCountMismatch {
                expected,
                found: walkable.len(),
            });
        }

        Ok(Self {
            columns,
            rows,
            tile_size,
            walkable,
            floor_color,
            wall_color,
        })
    }

    /// Calculates the total width of the grid.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_size
    }

    /// Calculates the total height of the grid.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    /// Reports whether the tile at `column`, `row` is walkable.
    ///
    /// Tiles outside the grid are reported as blocked.
    #[must_use]
    pub fn is_walkable(&self, column: u32, row: u32) -> bool {
        if column >= self.columns || row >= self.rows {
            return false;
        }
        let index = row as usize * self.columns as usize + column as usize;
        self.walkable.get(index).copied().unwrap_or(false)
    }

    /// Screen position of the grid's top-left corner when centered in a
    /// window of `window_size`.
    #[must_use]
    pub fn origin_in(&self, window_size: Vec2) -> Vec2 {
        ((window_size - Vec2::new(self.width(), self.height())) * 0.5).floor()
    }
}

/// Hero or enemy drawn on top of the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorPresentation {
    /// Sprite frame to draw.
    pub frame: SpriteFrame,
    /// Top-left corner relative to the grid origin, idle bob included.
    pub position: Vec2,
    /// Fill color used when no sprite atlas is loaded.
    pub color: Color,
}

impl ActorPresentation {
    /// Creates a new actor descriptor.
    #[must_use]
    pub const fn new(frame: SpriteFrame, position: Vec2, color: Color) -> Self {
        Self {
            frame,
            position,
            color,
        }
    }
}

/// Heads-up display values drawn over the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Hud {
    /// Current score.
    pub score: u32,
    /// Remaining lives.
    pub lives: u32,
}

impl Hud {
    /// Score line as displayed.
    #[must_use]
    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    /// Lives line as displayed.
    #[must_use]
    pub fn lives_text(&self) -> String {
        format!("Lives: {}", self.lives)
    }
}

/// Scene description combining the menu state, the map and its actors.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Whether the menu or the map should be drawn.
    pub mode: GameMode,
    /// Map drawn while playing.
    pub grid: GridPresentation,
    /// Actors drawn in order, hero first.
    pub actors: Vec<ActorPresentation>,
    /// Score and lives.
    pub hud: Hud,
    /// Drives the audio menu label.
    pub audio_enabled: bool,
    /// Cues raised since the previous frame.
    pub audio_cues: Vec<AudioCue>,
}

impl Scene {
    /// Creates a menu scene over the provided grid with no actors.
    #[must_use]
    pub fn new(grid: GridPresentation) -> Self {
        Self {
            mode: GameMode::Menu,
            grid,
            actors: Vec::new(),
            hud: Hud::default(),
            audio_enabled: true,
            audio_cues: Vec::new(),
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Initial window size in pixels.
    pub window_size: Vec2,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, window_size: Vec2, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            window_size,
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting roguelike scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, refreshes the scene before it is drawn
    /// and tells the backend whether to keep going.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameOutcome + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Tiles must have a positive finite size.
    InvalidTileSize {
        /// Provided tile size that failed validation.
        tile_size: f32,
    },
    /// Walkability flags do not cover the grid exactly.
    TileCountMismatch {
        /// Number of tiles implied by the dimensions.
        expected: usize,
        /// Number of flags provided.
        found: usize,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileSize { tile_size } => {
                write!(f, "tile size must be positive (received {tile_size})")
            }
            Self::TileCountMismatch { expected, found } => {
                write!(f, "expected {expected} tile flags, received {found}")
            }
        }
    }
}

impl Error for RenderingError {}
