#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for the roguelike.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! The adapter therefore depends on macroquad without its default `audio`
//! feature and reports audio cues through the log instead of playing them.

mod sprites;

use anyhow::Result;
use glam::Vec2;
use log::{debug, info, warn};
use macroquad::{
    input::{is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton},
    shapes::{draw_rectangle, draw_rectangle_lines},
    text::{draw_text, measure_text},
};
use roguelike_core::{Direction, Facing, GameMode, GAME_TITLE};
use roguelike_rendering::{
    ActorPresentation, Color, FrameInput, FrameOutcome, GridPresentation, Hud, MenuLayout,
    Presentation, RenderingBackend, Scene,
};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

pub use self::sprites::{SpriteAtlas, SpriteManifest};

const MENU_ITEM_FILL: Color = Color::from_rgb_u8(60, 60, 60);
const MENU_ITEM_OUTLINE: Color = Color::from_rgb_u8(200, 200, 200);
const TEXT_COLOR: Color = Color::from_rgb_u8(255, 255, 255);
const TITLE_FONT_SIZE: f32 = 70.0;
const LABEL_FONT_SIZE: f32 = 40.0;
const HUD_FONT_SIZE: f32 = 40.0;
const HUD_MARGIN: f32 = 10.0;

/// Snapshot of edge-triggered keyboard input observed during a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct KeyboardShortcuts {
    /// `Escape` quits the game loop.
    quit_requested: bool,
    /// Arrow keys or `WASD`.
    direction: Option<Direction>,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape);
        let pressed = |primary: KeyCode, alternate: KeyCode| {
            is_key_pressed(primary) || is_key_pressed(alternate)
        };

        let direction = if pressed(KeyCode::Left, KeyCode::A) {
            Some(Direction::Left)
        } else if pressed(KeyCode::Right, KeyCode::D) {
            Some(Direction::Right)
        } else if pressed(KeyCode::Up, KeyCode::W) {
            Some(Direction::Up)
        } else if pressed(KeyCode::Down, KeyCode::S) {
            Some(Direction::Down)
        } else {
            None
        };

        Self {
            quit_requested,
            direction,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    sprite_manifest: Option<PathBuf>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures the sprite manifest loaded when the window opens.
    ///
    /// Without a manifest, or when it fails to load, actors are drawn as
    /// colored squares.
    #[must_use]
    pub fn with_sprite_manifest(mut self, manifest: Option<PathBuf>) -> Self {
        self.sprite_manifest = manifest;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameOutcome + 'static,
    {
        let Self {
            swap_interval,
            sprite_manifest,
        } = self;

        let Presentation {
            window_title,
            window_size,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: window_size.x.round() as i32,
            window_height: window_size.y.round() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let sprite_atlas = sprite_manifest.and_then(|path| load_atlas(&path));
            let background = to_macroquad_color(clear_color);

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    info!("escape pressed, closing window");
                    break;
                }

                macroquad::window::clear_background(background);

                let screen = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let click = is_mouse_button_pressed(MouseButton::Left).then(|| {
                    let (x, y) = mouse_position();
                    Vec2::new(x, y)
                });
                let frame_input = gather_frame_input(scene.mode, screen, keyboard, click);

                let outcome = update_scene(frame_dt, frame_input, &mut scene);
                for cue in scene.audio_cues.drain(..) {
                    debug!("audio cue: {}", cue.name());
                }
                if outcome == FrameOutcome::Exit {
                    break;
                }

                match scene.mode {
                    GameMode::Menu => draw_menu(&scene, screen),
                    GameMode::Playing => {
                        let origin = scene.grid.origin_in(screen);
                        draw_grid(&scene.grid, origin);
                        draw_actors(&scene, origin, sprite_atlas.as_ref());
                        draw_hud(scene.hud);
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn load_atlas(path: &Path) -> Option<SpriteAtlas> {
    let loaded = SpriteManifest::from_path(path).and_then(|manifest| SpriteAtlas::load(&manifest));
    match loaded {
        Ok(atlas) => {
            info!(
                "loaded {} sprite frames from {}",
                atlas.texture_count(),
                path.display()
            );
            Some(atlas)
        }
        Err(error) => {
            warn!("falling back to primitive drawing: {error:#}");
            None
        }
    }
}

fn gather_frame_input(
    mode: GameMode,
    screen: Vec2,
    keyboard: KeyboardShortcuts,
    click: Option<Vec2>,
) -> FrameInput {
    let menu_action = match mode {
        GameMode::Menu => {
            click.and_then(|position| MenuLayout::centered(screen).hit_test(position))
        }
        GameMode::Playing => None,
    };

    FrameInput {
        direction: keyboard.direction,
        menu_action,
    }
}

fn draw_menu(scene: &Scene, screen: Vec2) {
    let layout = MenuLayout::centered(screen);
    draw_centered_text(GAME_TITLE, layout.title_center(), TITLE_FONT_SIZE);

    let fill = to_macroquad_color(MENU_ITEM_FILL);
    let outline = to_macroquad_color(MENU_ITEM_OUTLINE);
    for item in layout.items() {
        let rect = item.rect;
        draw_rectangle(rect.origin.x, rect.origin.y, rect.size.x, rect.size.y, fill);
        draw_rectangle_lines(
            rect.origin.x,
            rect.origin.y,
            rect.size.x,
            rect.size.y,
            2.0,
            outline,
        );
        draw_centered_text(item.label(scene.audio_enabled), rect.center(), LABEL_FONT_SIZE);
    }
}

fn draw_centered_text(text: &str, center: Vec2, font_size: f32) {
    let dimensions = measure_text(text, None, font_size as u16, 1.0);
    draw_text(
        text,
        center.x - dimensions.width * 0.5,
        center.y + dimensions.offset_y * 0.5,
        font_size,
        to_macroquad_color(TEXT_COLOR),
    );
}

fn draw_grid(grid: &GridPresentation, origin: Vec2) {
    for row in 0..grid.rows {
        for column in 0..grid.columns {
            let corner = origin + Vec2::new(column as f32, row as f32) * grid.tile_size;
            draw_rectangle(
                corner.x,
                corner.y,
                grid.tile_size,
                grid.tile_size,
                to_macroquad_color(tile_color(grid, column, row)),
            );
        }
    }
}

fn tile_color(grid: &GridPresentation, column: u32, row: u32) -> Color {
    if grid.is_walkable(column, row) {
        grid.floor_color
    } else {
        grid.wall_color
    }
}

fn draw_actors(scene: &Scene, origin: Vec2, sprite_atlas: Option<&SpriteAtlas>) {
    let size = Vec2::splat(scene.grid.tile_size);
    for actor in &scene.actors {
        let corner = origin + actor.position;
        let drawn = sprite_atlas
            .map(|atlas| atlas.draw(actor.frame, corner, size))
            .transpose();
        match drawn {
            Ok(Some(())) => {}
            Ok(None) => draw_primitive_actor(actor, corner, size.x),
            Err(error) => {
                warn!("{error:#}");
                draw_primitive_actor(actor, corner, size.x);
            }
        }
    }
}

fn draw_primitive_actor(actor: &ActorPresentation, corner: Vec2, tile_size: f32) {
    let inset = tile_size * 0.15;
    let body = tile_size - 2.0 * inset;
    draw_rectangle(
        corner.x + inset,
        corner.y + inset,
        body,
        body,
        to_macroquad_color(actor.color),
    );

    let eye = (tile_size * 0.12).max(2.0);
    let eye_x = eye_offset(actor.frame.set.facing, tile_size, eye);
    draw_rectangle(
        corner.x + eye_x,
        corner.y + tile_size * 0.3,
        eye,
        eye,
        to_macroquad_color(actor.color.lighten(0.8)),
    );
}

fn eye_offset(facing: Facing, tile_size: f32, eye: f32) -> f32 {
    match facing {
        Facing::Left => tile_size * 0.25,
        Facing::Right => tile_size * 0.75 - eye,
    }
}

fn draw_hud(hud: Hud) {
    let color = to_macroquad_color(TEXT_COLOR);
    draw_text(
        &hud.score_text(),
        HUD_MARGIN,
        HUD_MARGIN + HUD_FONT_SIZE * 0.75,
        HUD_FONT_SIZE,
        color,
    );
    draw_text(
        &hud.lives_text(),
        HUD_MARGIN,
        HUD_MARGIN + HUD_FONT_SIZE * 1.75,
        HUD_FONT_SIZE,
        color,
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
