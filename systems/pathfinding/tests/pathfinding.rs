use dungeon_doors_core::{CellCoord, Command, EntityKind, Rotation};
use dungeon_doors_system_pathfinding::Pathfinder;
use dungeon_doors_world::{self as world, query, World};

fn plan(world: &World) -> Option<dungeon_doors_system_pathfinding::TargetPath> {
    Pathfinder::new()
        .shortest_path_to_priority_target(query::room_view(world), &query::entity_view(world))
}

#[test]
fn open_three_by_three_grid_reaches_far_corner_in_four_steps() {
    let world = World::from_layout("╬╬╬\n╬╬╬\n╬╬╬\nA 0 0\nD 2 2\n").expect("layout");

    let path = plan(&world).expect("hostile is reachable");

    assert_eq!(path.len(), 5);
    assert_eq!(path.cells.last(), Some(&CellCoord::new(2, 2)));
    for pair in path.cells.windows(2) {
        assert_eq!(pair[0].manhattan_distance(pair[1]), 1);
    }
}

#[test]
fn stronger_target_wins_over_closer_one() {
    // The level 1 hostile is one step left, the level 5 hostile three steps right.
    let world = World::from_layout("╞═══╡\nA 1 0\nD 0 0 1\nD 4 0 5\n").expect("layout");

    let path = plan(&world).expect("both hostiles reachable");

    assert_eq!(path.target.level.get(), 5);
    assert_eq!(path.len() - 1, 3, "three steps to the level 5 hostile");
    assert_eq!(path.first_step(), Some(CellCoord::new(2, 0)));
}

#[test]
fn goal_outranks_any_hostile() {
    let world = World::from_layout("╞═══╡\nA 2 0\nD 0 0 9\nT 4 0\n").expect("layout");

    let path = plan(&world).expect("goal reachable");

    assert_eq!(path.target.kind, EntityKind::Goal);
    assert_eq!(path.cells.last(), Some(&CellCoord::new(4, 0)));
}

#[test]
fn unreachable_priority_target_falls_back_to_reachable_one() {
    // The goal sits behind a room whose left door is closed.
    let world = World::from_layout("╞═╞╡\nA 0 0\nD 1 0\nT 3 0\n").expect("layout");

    let mut pathfinder = Pathfinder::new();
    let reachable =
        pathfinder.reachable_targets(query::room_view(&world), &query::entity_view(&world));

    assert_eq!(reachable.len(), 1);
    assert_eq!(reachable[0].target.kind, EntityKind::Hostile);
}

#[test]
fn rotation_between_searches_changes_the_route() {
    let mut world = World::from_layout("╞╡\nA 0 0\nD 1 0\n").expect("layout");
    assert!(plan(&world).is_some());

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::RotateRoom {
            cell: CellCoord::new(1, 0),
            rotation: Rotation::Clockwise,
        },
        &mut events,
    );
    assert!(plan(&world).is_none(), "far door closed, edge removed");

    world::apply(
        &mut world,
        Command::RotateRoom {
            cell: CellCoord::new(1, 0),
            rotation: Rotation::CounterClockwise,
        },
        &mut events,
    );
    assert_eq!(plan(&world).map(|path| path.len()), Some(2));
}
