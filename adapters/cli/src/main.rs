#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the roguelike.

mod config;
mod scene;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use roguelike_core::GAME_TITLE;
use roguelike_rendering::{FrameOutcome, MenuLayout, Presentation, RenderingBackend, Scene};
use roguelike_rendering_macroquad::{MacroquadBackend, SpriteManifest};
use roguelike_session::{GameSession, MenuOutcome};
use roguelike_world::query;

use crate::config::{ConfigFile, Preset};

/// Tile-based roguelike with patrolling enemies.
#[derive(Debug, Parser)]
#[command(name = "roguelike", version)]
struct CliArgs {
    /// Built-in configuration to start from.
    #[arg(long, value_enum, default_value_t = Preset::Classic)]
    preset: Preset,
    /// TOML file overriding preset values.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for enemy spawn placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Tile side length in pixels, overriding preset and file.
    #[arg(long)]
    tile_size: Option<f32>,
    /// Sprite manifest to load instead of `assets/sprites.toml`.
    #[arg(long, value_name = "PATH", conflicts_with = "no_sprites")]
    sprites: Option<PathBuf>,
    /// Draw actors as colored squares without loading sprites.
    #[arg(long)]
    no_sprites: bool,
    /// Render as fast as possible instead of waiting for vertical sync.
    #[arg(long)]
    no_vsync: bool,
    /// Validate the configuration, print a summary and exit without opening a window.
    #[arg(long)]
    dry_run: bool,
}

/// Entry point for the roguelike command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let file = args
        .config
        .as_deref()
        .map(ConfigFile::load)
        .transpose()?;
    let config = config::resolve(args.preset, file, args.tile_size)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("starting {:?} preset with seed {seed}", args.preset);

    let mut session = GameSession::new(config, seed).context("failed to start game session")?;

    if args.dry_run {
        let grid = query::grid(session.world());
        println!(
            "{GAME_TITLE}: {}x{} map, {} enemies, {} lives, seed {seed}",
            grid.width(),
            grid.height(),
            query::enemies(session.world()).len(),
            session.lives(),
        );
        return Ok(());
    }

    let mut scene = Scene::new(scene::grid_presentation(&session)?);
    scene::populate(&session, &mut scene);
    let presentation = Presentation::new(
        GAME_TITLE,
        MenuLayout::REFERENCE_SIZE,
        scene::CLEAR_COLOR,
        scene,
    );

    let sprite_manifest = (!args.no_sprites)
        .then(|| args.sprites.unwrap_or_else(SpriteManifest::default_path));
    let backend = MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_sprite_manifest(sprite_manifest);

    backend.run(presentation, move |dt, input, scene| {
        let mut outcome = FrameOutcome::Continue;
        if let Some(action) = input.menu_action {
            if session.activate_menu_item(action) == MenuOutcome::Exit {
                outcome = FrameOutcome::Exit;
            }
        }
        if let Some(direction) = input.direction {
            let _ = session.move_hero(direction);
        }

        session.tick(dt);
        scene::populate(&session, scene);
        scene.audio_cues.extend(session.drain_audio_cues());
        outcome
    })
}
