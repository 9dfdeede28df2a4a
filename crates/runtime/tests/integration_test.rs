//! End-to-end tick flow: snapshot in, queries and commands, outputs and
//! persistence out.

use runtime::{FileFlagRepository, RuntimeBuilder, WorldRuntime};
use world_content::{open_room, two_room_world};
use world_core::{
    Color, CommandError, FlagSpec, Position, RoomName, StructureKind, WorldConfig,
};

fn anchor() -> RoomName {
    "W1N1".parse().unwrap()
}

fn pos(x: u8, y: u8) -> Position {
    Position::new(x, y, anchor()).unwrap()
}

#[test]
fn full_tick_flow_produces_outputs() {
    let mut runtime = WorldRuntime::builder().build().unwrap();
    runtime.begin_tick(two_room_world());

    let name = runtime
        .create_flag(FlagSpec::at(pos(10, 10)).named("rally").color(Color::Blue))
        .unwrap();
    runtime
        .create_construction_site(pos(12, 10), StructureKind::Road)
        .unwrap();

    let path = runtime.find_path(pos(10, 10), pos(14, 10)).unwrap();
    assert_eq!(path.len(), 4);
    assert!(!path.incomplete);

    let output = runtime.end_tick().unwrap();
    assert_eq!(output.tick, 1);
    assert_eq!(output.construction.len(), 1);
    assert_eq!(output.flags.len(), 1);
    assert_eq!(output.flags[0].name(), name);

    // The next tick starts from a drained queue.
    runtime.begin_tick(two_room_world());
    let output = runtime.end_tick().unwrap();
    assert_eq!(output.tick, 2);
    assert!(output.construction.is_empty());
    assert_eq!(output.flags.len(), 1);
}

#[test]
fn commands_against_invisible_rooms_report_codes() {
    let mut runtime = WorldRuntime::builder().build().unwrap();
    runtime.begin_tick(two_room_world());

    let elsewhere = Position::new(5, 5, "E40S40".parse().unwrap()).unwrap();
    assert_eq!(
        runtime.create_flag(FlagSpec::at(elsewhere)),
        Err(CommandError::InvalidTarget)
    );
    assert_eq!(
        runtime.create_construction_site(elsewhere, StructureKind::Spawn),
        Err(CommandError::InvalidTarget)
    );
}

#[test]
fn flags_survive_a_runtime_restart() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("flags.json");

    {
        let mut runtime = RuntimeBuilder::new()
            .with_repository(FileFlagRepository::new(&store).unwrap())
            .build()
            .unwrap();
        runtime.begin_tick(two_room_world());
        runtime
            .create_flag(FlagSpec::at(pos(3, 4)).named("outpost").color(Color::Green))
            .unwrap();
        runtime.end_tick().unwrap();
    }

    let runtime = RuntimeBuilder::new()
        .with_repository(FileFlagRepository::new(&store).unwrap())
        .build()
        .unwrap();
    let flag = runtime.flags().get("outpost").unwrap();
    assert_eq!(flag.color(), Color::Green);
    assert_eq!(flag.position(), pos(3, 4));
}

#[test]
fn configured_defaults_drive_path_searches() {
    let config = WorldConfig {
        max_ops: 10,
        ..WorldConfig::default()
    };
    let mut runtime = WorldRuntime::builder().with_config(config).build().unwrap();
    runtime.begin_tick(world_core::WorldSnapshot::from_rooms([open_room(anchor())]));

    let path = runtime.find_path(pos(0, 0), pos(45, 45)).unwrap();
    assert!(path.incomplete);
    assert!(path.ops_used <= 10);
}

#[test]
fn closest_by_path_picks_the_cheapest_flag() {
    let mut runtime = WorldRuntime::builder().build().unwrap();
    runtime.begin_tick(world_core::WorldSnapshot::from_rooms([open_room(anchor())]));

    for (name, x, y) in [("far", 40, 40), ("near", 12, 12), ("mid", 25, 25)] {
        runtime
            .create_flag(FlagSpec::at(pos(x, y)).named(name))
            .unwrap();
    }

    let flags: Vec<_> = runtime.flags().iter().cloned().collect();
    let closest = runtime
        .find_closest_by_path(pos(10, 10), &flags)
        .expect("open room, something is reachable");
    assert_eq!(closest.name(), "near");
}
