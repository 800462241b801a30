use std::time::Duration;

use roguelike_core::{
    AudioCue, EnemyBlueprint, GameConfig, GameMode, GameOverPolicy, MenuAction, PatrolWindow,
    TilePosition,
};
use roguelike_session::{GameSession, MenuOutcome, SessionError};
use roguelike_world::query;

const SEED: u64 = 0xfeed_beef;

fn layout(rows: &[&str]) -> Vec<String> {
    rows.iter().map(|row| (*row).to_owned()).collect()
}

fn corridor_with(enemies: Vec<EnemyBlueprint>) -> GameConfig {
    GameConfig {
        layout: layout(&["#######", "#.....#", "#######"]),
        hero_start: TilePosition::new(1, 1),
        initial_enemies: enemies,
        ..GameConfig::default()
    }
}

/// Hero walled into its own cell, three free tiles to the right.
fn sealed_pocket() -> GameConfig {
    GameConfig {
        layout: layout(&["#######", "#.#...#", "#######"]),
        hero_start: TilePosition::new(1, 1),
        initial_enemies: Vec::new(),
        ..GameConfig::default()
    }
}

fn started(config: GameConfig) -> GameSession {
    let mut session = GameSession::new(config, SEED).expect("test config is valid");
    assert_eq!(
        session.activate_menu_item(MenuAction::Start),
        MenuOutcome::Continue
    );
    assert_eq!(session.mode(), GameMode::Playing);
    assert_eq!(
        session.drain_audio_cues().collect::<Vec<_>>(),
        vec![AudioCue::MusicStart]
    );
    session
}

fn enemy_tiles(session: &GameSession) -> Vec<TilePosition> {
    query::enemies(session.world())
        .iter()
        .map(|enemy| enemy.tile())
        .collect()
}

fn hero_tile(session: &GameSession) -> TilePosition {
    query::hero(session.world()).tile()
}

#[test]
fn caught_hero_loses_a_life_and_actors_reset() {
    let mut config = corridor_with(vec![EnemyBlueprint::new(
        TilePosition::new(3, 1),
        PatrolWindow::new(1, 3),
    )]);
    config.score_interval = Duration::from_millis(100);
    let mut session = started(config);

    let mut ticks = 0;
    while session.lives() == 3 {
        session.tick(Duration::from_millis(50));
        ticks += 1;
        assert!(ticks < 60, "enemy never reached the hero");
    }

    assert_eq!(ticks, 13);
    assert_eq!(session.lives(), 2);
    assert_eq!(session.mode(), GameMode::Playing);
    assert_eq!(session.score(), 6);
    assert_eq!(session.clock().survival_timer(), Duration::ZERO);
    assert_eq!(session.clock().score_timer(), Duration::from_millis(50));
    assert_eq!(hero_tile(&session), TilePosition::new(1, 1));
    assert_eq!(enemy_tiles(&session), vec![TilePosition::new(3, 1)]);
    assert_eq!(
        session.drain_audio_cues().collect::<Vec<_>>(),
        vec![AudioCue::Hit]
    );
}

fn stacked_on_hero() -> GameConfig {
    let mut config = corridor_with(vec![
        EnemyBlueprint::new(TilePosition::new(1, 1), PatrolWindow::new(1, 1)),
        EnemyBlueprint::new(TilePosition::new(1, 1), PatrolWindow::new(1, 1)),
    ]);
    config.score_interval = Duration::from_millis(10);
    config
}

#[test]
fn overlapping_enemies_cost_a_single_life_per_tick() {
    let mut session = started(stacked_on_hero());

    session.tick(Duration::from_millis(16));
    assert_eq!(session.lives(), 2);
    session.tick(Duration::from_millis(16));
    assert_eq!(session.lives(), 1);
    assert_eq!(session.score(), 2);
    assert_eq!(session.drain_audio_cues().count(), 2);
}

#[test]
fn losing_the_last_life_resets_to_the_menu() {
    let mut session = started(stacked_on_hero());

    for _ in 0..3 {
        session.tick(Duration::from_millis(16));
    }

    assert_eq!(session.mode(), GameMode::Menu);
    assert_eq!(session.score(), 0);
    assert_eq!(session.lives(), 3);
    assert_eq!(session.clock().elapsed(), Duration::ZERO);
    assert_eq!(hero_tile(&session), TilePosition::new(1, 1));
    assert_eq!(enemy_tiles(&session).len(), 2);
}

#[test]
fn continue_looping_policy_keeps_playing_after_game_over() {
    let mut config = stacked_on_hero();
    config.game_over_policy = GameOverPolicy::ContinueLooping;
    let mut session = started(config);

    for _ in 0..3 {
        session.tick(Duration::from_millis(16));
    }

    assert_eq!(session.mode(), GameMode::Playing);
    assert_eq!(session.score(), 0);
    assert_eq!(session.lives(), 3);
}

#[test]
fn menu_freezes_the_simulation() {
    let mut session = GameSession::new(GameConfig::default(), SEED).expect("default is valid");

    for _ in 0..200 {
        session.tick(Duration::from_millis(100));
    }

    assert_eq!(session.score(), 0);
    assert_eq!(session.clock().elapsed(), Duration::ZERO);
    assert_eq!(enemy_tiles(&session).len(), 2);
}

#[test]
fn movement_input_is_rejected_in_menu() {
    let mut session = GameSession::new(GameConfig::default(), SEED).expect("default is valid");

    assert!(!session.handle_direction_key(1, 0));
    assert_eq!(hero_tile(&session), TilePosition::new(1, 1));
    assert_eq!(session.drain_audio_cues().count(), 0);
}

#[test]
fn movement_input_is_rejected_while_moving() {
    let mut session = started(GameConfig::default());

    assert!(session.handle_direction_key(1, 0));
    assert!(!session.handle_direction_key(0, 1));
    assert_eq!(hero_tile(&session), TilePosition::new(2, 1));

    for _ in 0..8 {
        session.tick(Duration::from_millis(16));
    }

    assert!(session.handle_direction_key(0, 1));
    assert_eq!(hero_tile(&session), TilePosition::new(2, 2));
}

#[test]
fn blocked_moves_emit_no_step_cue() {
    let mut session = started(GameConfig::default());

    assert!(!session.handle_direction_key(-1, 0));
    assert!(!session.handle_direction_key(0, -1));
    assert_eq!(session.drain_audio_cues().count(), 0);

    assert!(session.handle_direction_key(1, 0));
    assert_eq!(
        session.drain_audio_cues().collect::<Vec<_>>(),
        vec![AudioCue::Step]
    );
}

#[test]
fn muted_sessions_emit_no_cues() {
    let mut session = started(GameConfig::default());

    assert_eq!(
        session.activate_menu_item(MenuAction::ToggleAudio),
        MenuOutcome::Continue
    );
    assert!(!session.audio_enabled());
    assert!(session.handle_direction_key(1, 0));
    assert_eq!(
        session.drain_audio_cues().collect::<Vec<_>>(),
        vec![AudioCue::MusicStop]
    );

    let _ = session.activate_menu_item(MenuAction::ToggleAudio);
    assert!(session.audio_enabled());
    assert_eq!(
        session.drain_audio_cues().collect::<Vec<_>>(),
        vec![AudioCue::MusicStart]
    );
}

#[test]
fn music_starts_once_and_follows_the_audio_toggle() {
    let mut session = started(GameConfig::default());

    let _ = session.activate_menu_item(MenuAction::Start);
    assert_eq!(session.drain_audio_cues().count(), 0);

    let _ = session.activate_menu_item(MenuAction::ToggleAudio);
    let _ = session.activate_menu_item(MenuAction::Start);
    assert_eq!(
        session.drain_audio_cues().collect::<Vec<_>>(),
        vec![AudioCue::MusicStop]
    );
}

#[test]
fn muted_start_does_not_play_music() {
    let mut session = GameSession::new(GameConfig::default(), SEED).expect("default is valid");
    let _ = session.activate_menu_item(MenuAction::ToggleAudio);
    assert_eq!(
        session.drain_audio_cues().collect::<Vec<_>>(),
        vec![AudioCue::MusicStop]
    );

    let _ = session.activate_menu_item(MenuAction::Start);
    assert_eq!(session.mode(), GameMode::Playing);
    assert_eq!(session.drain_audio_cues().count(), 0);
}

#[test]
fn starting_lives_above_the_cap_are_rejected() {
    let mut config = sealed_pocket();
    config.starting_lives = 7;
    assert_eq!(
        GameSession::new(config, SEED).err(),
        Some(SessionError::StartingLivesAboveMax {
            starting: 7,
            max: 5
        })
    );

    let mut config = sealed_pocket();
    config.starting_lives = 0;
    assert_eq!(
        GameSession::new(config, SEED).err(),
        Some(SessionError::NoStartingLives)
    );
}

#[test]
fn exit_is_reported_to_the_host() {
    let mut session = GameSession::new(GameConfig::default(), SEED).expect("default is valid");
    assert_eq!(
        session.activate_menu_item(MenuAction::Exit),
        MenuOutcome::Exit
    );
}

#[test]
fn enemies_spawn_on_free_tiles_every_interval() {
    let mut session = started(sealed_pocket());

    for _ in 0..99 {
        session.tick(Duration::from_millis(100));
    }
    assert!(enemy_tiles(&session).is_empty());

    session.tick(Duration::from_millis(100));
    let tiles = enemy_tiles(&session);
    assert_eq!(tiles.len(), 1);
    assert_eq!(tiles[0].y(), 1);
    assert!((3..=5).contains(&tiles[0].x()));
}

#[test]
fn surviving_earns_an_extra_life() {
    let mut session = started(sealed_pocket());

    for _ in 0..300 {
        session.tick(Duration::from_millis(100));
    }

    assert_eq!(session.lives(), 4);
    assert_eq!(session.score(), 10);
    assert!(session.drain_audio_cues().any(|cue| cue == AudioCue::Powerup));
}

#[test]
fn extra_lives_are_capped() {
    let mut config = sealed_pocket();
    config.starting_lives = 5;
    let mut session = started(config);

    for _ in 0..300 {
        session.tick(Duration::from_millis(100));
    }

    assert_eq!(session.lives(), 5);
    assert!(session.drain_audio_cues().any(|cue| cue == AudioCue::Powerup));
}

#[test]
fn explicit_reset_returns_to_menu_and_keeps_audio_preference() {
    let mut session = started(sealed_pocket());
    let _ = session.activate_menu_item(MenuAction::ToggleAudio);
    for _ in 0..150 {
        session.tick(Duration::from_millis(100));
    }
    assert!(session.score() > 0);
    assert!(!enemy_tiles(&session).is_empty());

    session.reset();

    assert_eq!(session.mode(), GameMode::Menu);
    assert_eq!(session.score(), 0);
    assert!(enemy_tiles(&session).is_empty());
    assert!(!session.audio_enabled());
}
