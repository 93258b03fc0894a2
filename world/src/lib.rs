#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Dungeon Doors.
//!
//! The world owns the room grid and the entity registry. It is built once
//! from a text layout and afterwards changes only through [`apply`].

mod entities;
mod layout;
mod rooms;

use dungeon_doors_core::{Command, Event};
use tracing::{debug, info, warn};

pub use layout::LayoutError;

use entities::EntityRegistry;
use rooms::RoomGraph;

/// Represents the authoritative Dungeon Doors world state.
#[derive(Debug)]
pub struct World {
    rooms: RoomGraph,
    entities: EntityRegistry,
}

impl World {
    /// Builds a world from the text layout format.
    ///
    /// Malformed layouts are rejected as a whole; no partial dungeon is
    /// ever produced.
    pub fn from_layout(source: &str) -> Result<Self, LayoutError> {
        let parsed = layout::parse(source)?;
        let world = Self {
            rooms: parsed.rooms,
            entities: EntityRegistry::from_records(parsed.entities),
        };

        let (columns, rows) = world.rooms.dimensions();
        info!(columns, rows, entities = world.entities.len(), "dungeon loaded");
        Ok(world)
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::RotateRoom { cell, rotation } => match world.rooms.rotate(cell, rotation) {
            Some((from, to)) => {
                debug!(?cell, ?rotation, from = from.bits(), to = to.bits(), "room rotated");
                out_events.push(Event::RoomRotated { cell, from, to });
            }
            None => {
                warn!(?cell, "rotation ignored: no room at coordinate");
                out_events.push(Event::RotationRejected { cell });
            }
        },
        Command::MoveEntity { entity, to } => {
            let moved = world
                .rooms
                .lookup(to)
                .and_then(|_| world.entities.move_entity(entity, to));
            match moved {
                Some(from) => out_events.push(Event::EntityMoved { entity, from, to }),
                None => {
                    warn!(entity = entity.get(), ?to, "move ignored");
                    out_events.push(Event::MoveRejected { entity, to });
                }
            }
        }
        Command::DefeatEntity { entity } => {
            let Some(kind) = world.entities.get(entity).map(|found| found.kind()) else {
                warn!(entity = entity.get(), "defeat ignored: unknown entity");
                return;
            };
            if world.entities.set_alive(entity, false) == Some(true) {
                debug!(entity = entity.get(), ?kind, "entity defeated");
                out_events.push(Event::EntityDefeated { entity, kind });
            }
        }
        Command::PromoteEntity { entity } => match world.entities.promote(entity) {
            Some(level) => {
                debug!(entity = entity.get(), level = level.get(), "entity promoted");
                out_events.push(Event::EntityPromoted { entity, level });
            }
            None => warn!(entity = entity.get(), "promotion ignored: unknown entity"),
        },
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use dungeon_doors_core::{
        BoardSnapshot, CellCoord, EntitySnapshot, EntityView, Room, RoomView,
    };

    use super::World;

    /// Grid extents as `(columns, rows)`.
    #[must_use]
    pub fn dimensions(world: &World) -> (u32, u32) {
        world.rooms.dimensions()
    }

    /// Exposes a read-only view of the room grid.
    #[must_use]
    pub fn room_view(world: &World) -> RoomView<'_> {
        world.rooms.view()
    }

    /// Room at the provided coordinate, or `None` for open space.
    #[must_use]
    pub fn room(world: &World, cell: CellCoord) -> Option<Room> {
        world.rooms.lookup(cell)
    }

    /// Rooms currently connected to `cell` through mutually open doors.
    #[must_use]
    pub fn neighbors(world: &World, cell: CellCoord) -> Vec<Room> {
        world.rooms.view().neighbors(cell).collect()
    }

    /// Captures a read-only view of every entity in registry order.
    #[must_use]
    pub fn entity_view(world: &World) -> EntityView {
        EntityView::from_snapshots(world.entities.snapshots())
    }

    /// Snapshot of the player entity.
    #[must_use]
    pub fn player(world: &World) -> Option<EntitySnapshot> {
        world.entities.player().map(|player| player.snapshot())
    }

    /// Alive non-player entities in registry order.
    #[must_use]
    pub fn targets(world: &World) -> Vec<EntitySnapshot> {
        world
            .entities
            .targets()
            .map(|target| target.snapshot())
            .collect()
    }

    /// Captures everything a front end needs to redraw the dungeon.
    #[must_use]
    pub fn board(world: &World) -> BoardSnapshot {
        let (columns, rows) = world.rooms.dimensions();
        BoardSnapshot {
            columns,
            rows,
            rooms: world.rooms.view().iter().collect(),
            entities: world.entities.snapshots(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_doors_core::{CellCoord, DoorMask, EntityId, EntityKind, Rotation};

    const CORRIDOR: &str = "╞═╡\nA 0 0\nD 2 0 2\nT 1 0\n";

    #[test]
    fn load_orders_entities_by_kind_then_level() {
        let world = World::from_layout(CORRIDOR).expect("layout");

        let kinds: Vec<_> = query::entity_view(&world)
            .iter()
            .map(|entity| entity.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![EntityKind::Player, EntityKind::Hostile, EntityKind::Goal]
        );
        assert_eq!(query::player(&world).map(|player| player.cell), Some(CellCoord::new(0, 0)));
        assert_eq!(query::dimensions(&world), (3, 1));
    }

    #[test]
    fn rotation_is_reflected_in_the_next_adjacency_query() {
        let mut world = World::from_layout(CORRIDOR).expect("layout");
        let middle = CellCoord::new(1, 0);
        assert_eq!(query::neighbors(&world, middle).len(), 2);

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::RotateRoom {
                cell: middle,
                rotation: Rotation::Clockwise,
            },
            &mut events,
        );

        assert!(query::neighbors(&world, middle).is_empty());
        assert!(query::neighbors(&world, CellCoord::new(0, 0)).is_empty());
        assert_eq!(
            events,
            vec![Event::RoomRotated {
                cell: middle,
                from: DoorMask::from_bits(0b1010).expect("mask"),
                to: DoorMask::from_bits(0b0101).expect("mask"),
            }]
        );
    }

    #[test]
    fn rotating_open_space_is_rejected() {
        let mut world = World::from_layout(CORRIDOR).expect("layout");
        let mut events = Vec::new();
        let outside = CellCoord::new(0, 3);

        apply(
            &mut world,
            Command::RotateRoom {
                cell: outside,
                rotation: Rotation::CounterClockwise,
            },
            &mut events,
        );

        assert_eq!(events, vec![Event::RotationRejected { cell: outside }]);
        assert!(query::room(&world, outside).is_none());
    }

    #[test]
    fn moves_only_land_in_rooms() {
        let mut world = World::from_layout(CORRIDOR).expect("layout");
        let mut events = Vec::new();
        let player = EntityId::new(0);

        apply(
            &mut world,
            Command::MoveEntity {
                entity: player,
                to: CellCoord::new(2, 0),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::MoveEntity {
                entity: player,
                to: CellCoord::new(3, 0),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::EntityMoved {
                    entity: player,
                    from: CellCoord::new(0, 0),
                    to: CellCoord::new(2, 0),
                },
                Event::MoveRejected {
                    entity: player,
                    to: CellCoord::new(3, 0),
                },
            ]
        );
    }

    #[test]
    fn defeat_is_reported_once_and_promotion_adds_one_level() {
        let mut world = World::from_layout(CORRIDOR).expect("layout");
        let mut events = Vec::new();
        let hostile = EntityId::new(1);

        apply(&mut world, Command::DefeatEntity { entity: hostile }, &mut events);
        apply(&mut world, Command::DefeatEntity { entity: hostile }, &mut events);
        apply(
            &mut world,
            Command::PromoteEntity {
                entity: EntityId::new(0),
            },
            &mut events,
        );

        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            Event::EntityDefeated {
                entity: hostile,
                kind: EntityKind::Hostile,
            }
        );
        assert_eq!(query::player(&world).map(|player| player.level.get()), Some(2));
        assert_eq!(query::targets(&world).len(), 1);
        assert_eq!(query::board(&world).entities.len(), 3);
    }

    #[test]
    fn board_lists_rooms_in_row_major_order() {
        let world = World::from_layout("╔╗\n╚\nA 0 0").expect("layout");
        let board = query::board(&world);

        let cells: Vec<_> = board.rooms.iter().map(|room| room.cell()).collect();
        assert_eq!(
            cells,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(1, 0),
                CellCoord::new(0, 1),
            ]
        );
        assert_eq!((board.columns, board.rows), (2, 2));
    }
}
