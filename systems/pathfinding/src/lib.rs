#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Multi-target breadth-first search over the live door graph.
//!
//! Every invocation sweeps the whole reachable part of the dungeon from the
//! player's room, records the shortest path to each reachable target, and
//! then picks the path to the highest-priority target, not the closest one.

use std::collections::VecDeque;

use dungeon_doors_core::{CellCoord, EntitySnapshot, EntityView, RoomView};
use tracing::debug;

/// Shortest route from the player's room to one target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetPath {
    /// Target reached by the path, as captured before the search.
    pub target: EntitySnapshot,
    /// Rooms visited in order, starting with the player's room and ending
    /// with the target's room.
    pub cells: Vec<CellCoord>,
}

impl TargetPath {
    /// Number of rooms on the path, both endpoints included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the path holds no rooms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// First room beyond the player's own, if the target is elsewhere.
    #[must_use]
    pub fn first_step(&self) -> Option<CellCoord> {
        self.cells.get(1).copied()
    }
}

/// Breadth-first planner with reusable scratch buffers.
#[derive(Debug, Default)]
pub struct Pathfinder {
    visited: Vec<bool>,
    parents: Vec<Option<CellCoord>>,
    queue: VecDeque<CellCoord>,
    matched: Vec<bool>,
}

impl Pathfinder {
    /// Creates a pathfinder with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Path to the highest-priority reachable target, or `None` when the
    /// player cannot reach any alive target.
    ///
    /// Priority is the greatest `(kind, level)` key; equal keys resolve to
    /// the lowest registry index.
    pub fn shortest_path_to_priority_target(
        &mut self,
        rooms: RoomView<'_>,
        entities: &EntityView,
    ) -> Option<TargetPath> {
        let chosen = self
            .reachable_targets(rooms, entities)
            .into_iter()
            .max_by(|left, right| {
                left.target
                    .priority()
                    .cmp(&right.target.priority())
                    .then_with(|| right.target.id.cmp(&left.target.id))
            });

        if let Some(path) = &chosen {
            debug!(
                target = path.target.id.get(),
                kind = ?path.target.kind,
                level = path.target.level.get(),
                rooms = path.len(),
                "priority target selected"
            );
        }

        chosen
    }

    /// Shortest paths to every reachable alive target, in discovery order.
    ///
    /// A target sharing the player's room yields a single-room path.
    pub fn reachable_targets(
        &mut self,
        rooms: RoomView<'_>,
        entities: &EntityView,
    ) -> Vec<TargetPath> {
        let Some(player) = entities.player().filter(|player| player.alive) else {
            return Vec::new();
        };
        let Some(start) = rooms
            .lookup(player.cell)
            .and_then(|room| rooms.index(room.cell()))
        else {
            return Vec::new();
        };

        let targets: Vec<&EntitySnapshot> = entities.targets().collect();
        self.reset(rooms.cell_count(), targets.len());
        self.visited[start] = true;
        self.queue.push_back(player.cell);

        let mut found = Vec::new();
        while let Some(cell) = self.queue.pop_front() {
            for (slot, target) in targets.iter().enumerate() {
                if self.matched[slot] || target.cell != cell {
                    continue;
                }

                self.matched[slot] = true;
                found.push(TargetPath {
                    target: **target,
                    cells: self.trace(rooms, cell),
                });
            }

            for neighbor in rooms.neighbors(cell) {
                let Some(index) = rooms.index(neighbor.cell()) else {
                    continue;
                };

                if self.visited[index] {
                    continue;
                }

                self.visited[index] = true;
                self.parents[index] = Some(cell);
                self.queue.push_back(neighbor.cell());
            }
        }

        found
    }

    fn reset(&mut self, cell_count: usize, target_count: usize) {
        self.visited.clear();
        self.visited.resize(cell_count, false);
        self.parents.clear();
        self.parents.resize(cell_count, None);
        self.queue.clear();
        self.matched.clear();
        self.matched.resize(target_count, false);
    }

    fn trace(&self, rooms: RoomView<'_>, destination: CellCoord) -> Vec<CellCoord> {
        let mut cells = vec![destination];
        let mut current = destination;
        while let Some(parent) = rooms
            .index(current)
            .and_then(|index| self.parents.get(index).copied().flatten())
        {
            cells.push(parent);
            current = parent;
        }
        cells.reverse();
        cells
    }
}
