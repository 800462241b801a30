//! Translation of session state into rendering scenes.

use anyhow::{Context, Result};
use roguelike_core::TilePosition;
use roguelike_rendering::{ActorPresentation, Color, GridPresentation, Hud, Scene};
use roguelike_session::GameSession;
use roguelike_world::query;

pub(crate) const CLEAR_COLOR: Color = Color::from_rgb_u8(60, 60, 60);
const FLOOR_COLOR: Color = Color::from_rgb_u8(32, 32, 36);
const WALL_COLOR: Color = Color::from_rgb_u8(80, 80, 80);
const HERO_COLOR: Color = Color::from_rgb_u8(70, 170, 90);
const ENEMY_COLOR: Color = Color::from_rgb_u8(200, 60, 60);

/// Captures the static map of the session's world.
pub(crate) fn grid_presentation(session: &GameSession) -> Result<GridPresentation> {
    let world = session.world();
    let grid = query::grid(world);
    let walkable = (0..grid.height())
        .flat_map(|row| (0..grid.width()).map(move |column| (column, row)))
        .map(|(column, row)| grid.is_walkable(TilePosition::new(column as i32, row as i32)))
        .collect();

    GridPresentation::new(
        grid.width(),
        grid.height(),
        query::tile_size(world),
        walkable,
        FLOOR_COLOR,
        WALL_COLOR,
    )
    .context("failed to describe the map for rendering")
}

/// Refreshes the dynamic parts of `scene` from the session.
pub(crate) fn populate(session: &GameSession, scene: &mut Scene) {
    let world = session.world();

    scene.mode = session.mode();
    scene.audio_enabled = session.audio_enabled();
    scene.hud = Hud {
        score: session.score(),
        lives: session.lives(),
    };

    scene.actors.clear();
    let hero = query::hero(world);
    scene.actors.push(ActorPresentation::new(
        hero.sprite(),
        hero.body().render_position(),
        HERO_COLOR,
    ));
    scene
        .actors
        .extend(query::enemies(world).iter().map(|enemy| {
            ActorPresentation::new(enemy.sprite(), enemy.body().render_position(), ENEMY_COLOR)
        }));
}
