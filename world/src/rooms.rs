//! Dense room storage owned by the world crate.

use dungeon_doors_core::{CellCoord, DoorMask, Room, RoomView, Rotation};

/// Row-major grid of door masks; `None` marks coordinates without a room.
#[derive(Clone, Debug, Default)]
pub(crate) struct RoomGraph {
    columns: u32,
    rows: u32,
    cells: Vec<Option<DoorMask>>,
}

impl RoomGraph {
    /// Creates a grid of the provided extents containing no rooms.
    pub(crate) fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![None; capacity],
        }
    }

    /// Places a room, returning `false` when the coordinate lies outside the grid.
    pub(crate) fn insert(&mut self, cell: CellCoord, doors: DoorMask) -> bool {
        match self.index(cell).and_then(|index| self.cells.get_mut(index)) {
            Some(slot) => {
                *slot = Some(doors);
                true
            }
            None => false,
        }
    }

    pub(crate) fn lookup(&self, cell: CellCoord) -> Option<Room> {
        self.view().lookup(cell)
    }

    /// Turns a single room, returning the masks before and after.
    ///
    /// Neighbouring masks are untouched; only live adjacency changes.
    pub(crate) fn rotate(
        &mut self,
        cell: CellCoord,
        rotation: Rotation,
    ) -> Option<(DoorMask, DoorMask)> {
        let index = self.index(cell)?;
        let slot = self.cells.get_mut(index)?;
        let before = (*slot)?;
        let after = before.rotated(rotation);
        *slot = Some(after);
        Some((before, after))
    }

    pub(crate) fn view(&self) -> RoomView<'_> {
        RoomView::new(&self.cells, self.columns, self.rows)
    }

    pub(crate) fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        RoomView::new(&self.cells, self.columns, self.rows).index(cell)
    }
}
