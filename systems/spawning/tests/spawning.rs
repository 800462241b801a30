use std::collections::HashSet;

use roguelike_core::{Command, Event, GameConfig, PatrolWindowPolicy, TilePosition};
use roguelike_system_spawning::{Config, Spawning};
use roguelike_world::{self as world, query, World};

const SEED: u64 = 0x5eed_1234_abcd_0001;

fn spawned_tile(commands: &[Command]) -> TilePosition {
    match commands {
        [Command::SpawnEnemy { tile, .. }] => *tile,
        other => panic!("unexpected commands emitted: {other:?}"),
    }
}

#[test]
fn spawns_land_on_free_tiles_of_the_world() {
    let mut world = World::new(&GameConfig::default()).expect("default config is valid");
    let width = query::grid(&world).width();
    let mut spawning = Spawning::new(Config::new(
        PatrolWindowPolicy::SymmetricClamped { radius: 3 },
        SEED,
    ));

    for _ in 0..20 {
        let free = query::free_tiles(&world);
        let mut commands = Vec::new();
        spawning.handle(&free, width, &mut commands);
        let tile = spawned_tile(&commands);
        assert!(free.contains(&tile));

        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }
        assert!(matches!(events.as_slice(), [Event::EnemySpawned { .. }]));
    }

    let occupied: HashSet<_> = query::enemies(&world)
        .iter()
        .map(|enemy| enemy.tile())
        .collect();
    assert_eq!(occupied.len(), query::enemies(&world).len());
    assert!(!occupied.contains(&query::hero(&world).tile()));
}

#[test]
fn spawn_windows_contain_the_spawn_column() {
    let mut spawning = Spawning::new(Config::new(
        PatrolWindowPolicy::SymmetricClamped { radius: 3 },
        SEED,
    ));
    let free: Vec<_> = (1..11).map(|x| TilePosition::new(x, 3)).collect();

    for _ in 0..50 {
        let mut commands = Vec::new();
        spawning.handle(&free, 12, &mut commands);
        match commands.as_slice() {
            [Command::SpawnEnemy { tile, window }] => {
                assert!(window.contains(tile.x()));
                assert!(window.max() - window.min() <= 6);
            }
            other => panic!("unexpected commands emitted: {other:?}"),
        }
    }
}

#[test]
fn identical_seeds_produce_identical_choices() {
    let free: Vec<_> = (1..11)
        .flat_map(|x| (1..7).map(move |y| TilePosition::new(x, y)))
        .collect();
    let picks = |seed: u64| {
        let mut spawning = Spawning::new(Config::new(PatrolWindowPolicy::FullWidth, seed));
        (0..32)
            .map(|_| {
                let mut commands = Vec::new();
                spawning.handle(&free, 12, &mut commands);
                spawned_tile(&commands)
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(picks(SEED), picks(SEED));
}

#[test]
fn choices_cover_the_candidate_set() {
    let free = vec![
        TilePosition::new(1, 1),
        TilePosition::new(2, 1),
        TilePosition::new(3, 1),
    ];
    let mut spawning = Spawning::new(Config::new(PatrolWindowPolicy::FullWidth, SEED));
    let mut seen = HashSet::new();
    for _ in 0..200 {
        let mut commands = Vec::new();
        spawning.handle(&free, 5, &mut commands);
        let _ = seen.insert(spawned_tile(&commands));
    }
    assert_eq!(seen.len(), free.len());
}
