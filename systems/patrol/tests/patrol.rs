use std::time::Duration;

use roguelike_core::{
    Command, EnemyBlueprint, Event, GameConfig, Heading, PatrolWindow, TilePosition,
};
use roguelike_system_patrol::Patrol;
use roguelike_world::{self as world, query, World};

fn patrol_frame(world: &mut World, patrol: &Patrol, events: &mut Vec<Event>) {
    let mut commands = Vec::new();
    patrol.handle(
        &query::enemy_view(world),
        |tile| query::is_walkable(world, tile),
        &mut commands,
    );
    for command in commands {
        world::apply(world, command, events);
    }
    world::apply(
        world,
        Command::Tick {
            dt: Duration::from_millis(16),
        },
        events,
    );
}

fn window_config(start: i32, window: PatrolWindow) -> GameConfig {
    GameConfig {
        hero_start: TilePosition::new(1, 6),
        initial_enemies: vec![EnemyBlueprint::new(TilePosition::new(start, 2), window)],
        ..GameConfig::default()
    }
}

#[test]
fn enemy_at_window_edge_reflects_on_next_decision() {
    let mut world = World::new(&window_config(4, PatrolWindow::new(2, 4))).expect("valid config");
    let patrol = Patrol;
    let mut events = Vec::new();

    patrol_frame(&mut world, &patrol, &mut events);

    let enemy = &query::enemies(&world)[0];
    assert_eq!(enemy.heading(), Heading::Left);
    assert_eq!(enemy.tile(), TilePosition::new(3, 2));
}

#[test]
fn enemy_never_leaves_its_window() {
    let window = PatrolWindow::new(2, 4);
    let mut world = World::new(&window_config(4, window)).expect("valid config");
    let patrol = Patrol;
    let mut events = Vec::new();
    let mut visited = Vec::new();

    for _ in 0..600 {
        patrol_frame(&mut world, &patrol, &mut events);
        let enemy = &query::enemies(&world)[0];
        assert!(window.contains(enemy.tile().x()));
        let left_edge = window.min() as f32 * query::tile_size(&world);
        let right_edge = window.max() as f32 * query::tile_size(&world);
        assert!(enemy.body().pixel().x >= left_edge);
        assert!(enemy.body().pixel().x <= right_edge);
        visited.push(enemy.tile().x());
    }

    for column in 2..=4 {
        assert!(visited.contains(&column), "column {column} never visited");
    }
}

#[test]
fn enemy_bounces_off_walls_inside_a_wide_window() {
    let mut world = World::new(&window_config(2, PatrolWindow::new(0, 11))).expect("valid config");
    let patrol = Patrol;
    let mut events = Vec::new();

    for _ in 0..2_000 {
        patrol_frame(&mut world, &patrol, &mut events);
        let x = query::enemies(&world)[0].tile().x();
        assert!((1..=10).contains(&x), "walls at columns 0 and 11 must reflect");
    }

    let reached = |column: i32| {
        events.iter().any(|event| {
            matches!(event, Event::EnemyAdvanced { to, .. } if to.x() == column)
        })
    };
    assert!(reached(1), "enemy should reach the left wall");
    assert!(reached(10), "enemy should reach the right wall");
}

#[test]
fn boxed_in_enemy_stays_on_its_tile() {
    let mut world = World::new(&window_config(4, PatrolWindow::new(4, 4))).expect("valid config");
    let patrol = Patrol;
    let mut events = Vec::new();

    for _ in 0..10 {
        patrol_frame(&mut world, &patrol, &mut events);
    }

    assert_eq!(query::enemies(&world)[0].tile(), TilePosition::new(4, 2));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::EnemyAdvanced { .. })));
}
