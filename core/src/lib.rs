#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Dungeon Doors engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! changed. Systems read immutable views ([`RoomView`], [`EntityView`]) and
//! respond exclusively with new command batches.

use serde::{Deserialize, Serialize};

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Turns the door pattern of a single room by a quarter turn.
    RotateRoom {
        /// Room whose doors should turn.
        cell: CellCoord,
        /// Direction of the quarter turn.
        rotation: Rotation,
    },
    /// Relocates an entity into the provided room.
    ///
    /// Adjacency is not validated; the destination only has to be a room.
    MoveEntity {
        /// Identifier of the entity being moved.
        entity: EntityId,
        /// Room the entity should occupy afterwards.
        to: CellCoord,
    },
    /// Marks an entity as no longer alive.
    DefeatEntity {
        /// Identifier of the entity that lost an encounter.
        entity: EntityId,
    },
    /// Raises an entity's level by exactly one.
    PromoteEntity {
        /// Identifier of the entity that won an encounter.
        entity: EntityId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a room's doors turned.
    RoomRotated {
        /// Room that was rotated.
        cell: CellCoord,
        /// Door mask before the rotation.
        from: DoorMask,
        /// Door mask after the rotation.
        to: DoorMask,
    },
    /// Reports that a rotation targeted a coordinate with no room.
    RotationRejected {
        /// Coordinate named by the rejected command.
        cell: CellCoord,
    },
    /// Confirms that an entity changed rooms.
    EntityMoved {
        /// Identifier of the entity that moved.
        entity: EntityId,
        /// Room occupied before the move.
        from: CellCoord,
        /// Room occupied after the move.
        to: CellCoord,
    },
    /// Reports that a move named an unknown entity or a coordinate with no room.
    MoveRejected {
        /// Identifier named by the rejected command.
        entity: EntityId,
        /// Destination named by the rejected command.
        to: CellCoord,
    },
    /// Confirms that an entity was defeated.
    EntityDefeated {
        /// Identifier of the defeated entity.
        entity: EntityId,
        /// Kind of the defeated entity.
        kind: EntityKind,
    },
    /// Confirms that an entity gained a level.
    EntityPromoted {
        /// Identifier of the promoted entity.
        entity: EntityId,
        /// Level reached after the promotion.
        level: Level,
    },
}

/// Result reported to the host after every turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The game continues.
    Continue,
    /// No target is reachable from the player's room; nothing changed.
    NoPath,
    /// The player is alive and every hostile has been defeated.
    Won,
    /// The player was defeated.
    Lost,
}

impl TurnOutcome {
    /// Reports whether the outcome ends the game.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Cardinal directions a door can face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing row indices (the top door).
    North,
    /// Toward increasing column indices (the right door).
    East,
    /// Toward increasing row indices (the bottom door).
    South,
    /// Toward decreasing column indices (the left door).
    West,
}

impl Direction {
    /// Every direction in door-bit order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Bit occupied by the door facing this direction.
    #[must_use]
    pub const fn door_bit(self) -> u8 {
        match self {
            Self::North => 1,
            Self::East => 2,
            Self::South => 4,
            Self::West => 8,
        }
    }

    /// Direction facing back toward the origin.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }
}

/// Quarter turn applied to a room's door pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    /// Turns the pattern 90° clockwise (top door becomes the right door).
    Clockwise,
    /// Turns the pattern 90° counter-clockwise (top door becomes the left door).
    CounterClockwise,
}

const TILE_SYMBOLS: [(char, u8); 15] = [
    ('╨', 1),
    ('╞', 2),
    ('╥', 4),
    ('╡', 8),
    ('╚', 3),
    ('╔', 6),
    ('╗', 12),
    ('╝', 9),
    ('║', 5),
    ('═', 10),
    ('╠', 7),
    ('╦', 14),
    ('╣', 13),
    ('╩', 11),
    ('╬', 15),
];

/// Four-bit door pattern of a room.
///
/// Bit 0 is the top door, bit 1 the right door, bit 2 the bottom door and
/// bit 3 the left door. Values outside `0..=15` cannot be constructed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DoorMask(u8);

impl DoorMask {
    /// Room with every door closed.
    pub const CLOSED: DoorMask = DoorMask(0);
    /// Room with every door open.
    pub const OPEN: DoorMask = DoorMask(0xF);

    /// Creates a mask from raw bits, rejecting values above `0xF`.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits <= 0xF {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Raw four-bit value.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Reports whether the door facing `direction` is open.
    #[must_use]
    pub const fn has(self, direction: Direction) -> bool {
        self.0 & direction.door_bit() != 0
    }

    /// Reports whether the top door is open.
    #[must_use]
    pub const fn has_top(self) -> bool {
        self.has(Direction::North)
    }

    /// Reports whether the right door is open.
    #[must_use]
    pub const fn has_right(self) -> bool {
        self.has(Direction::East)
    }

    /// Reports whether the bottom door is open.
    #[must_use]
    pub const fn has_bottom(self) -> bool {
        self.has(Direction::South)
    }

    /// Reports whether the left door is open.
    #[must_use]
    pub const fn has_left(self) -> bool {
        self.has(Direction::West)
    }

    /// Pattern turned 90° clockwise: a circular left shift of the four bits.
    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self(((self.0 << 1) & 0xF) | (self.0 >> 3))
    }

    /// Pattern turned 90° counter-clockwise: a circular right shift of the four bits.
    #[must_use]
    pub const fn rotated_left(self) -> Self {
        Self((self.0 >> 1) | ((self.0 << 3) & 0xF))
    }

    /// Pattern turned by the provided quarter turn.
    #[must_use]
    pub const fn rotated(self, rotation: Rotation) -> Self {
        match rotation {
            Rotation::Clockwise => self.rotated_right(),
            Rotation::CounterClockwise => self.rotated_left(),
        }
    }

    /// Resolves a tile symbol from the map format.
    ///
    /// Fifteen box-drawing symbols cover every non-zero mask; a room with no
    /// doors has no symbol.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        TILE_SYMBOLS
            .iter()
            .find(|(candidate, _)| *candidate == symbol)
            .map(|&(_, bits)| Self(bits))
    }

    /// Tile symbol drawing this mask, or `None` for the closed mask.
    #[must_use]
    pub fn symbol(self) -> Option<char> {
        TILE_SYMBOLS
            .iter()
            .find(|(_, bits)| *bits == self.0)
            .map(|&(symbol, _)| symbol)
    }
}

impl TryFrom<u8> for DoorMask {
    type Error = InvalidDoorMask;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::from_bits(bits).ok_or(InvalidDoorMask(bits))
    }
}

impl From<DoorMask> for u8 {
    fn from(mask: DoorMask) -> Self {
        mask.0
    }
}

/// Raw value that does not fit in four bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidDoorMask(pub u8);

impl std::fmt::Display for InvalidDoorMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "door mask {} does not fit in four bits", self.0)
    }
}

impl std::error::Error for InvalidDoorMask {}

/// Location of a single room expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Coordinate one step away in `direction`, if it is non-negative.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        match direction {
            Direction::North => self.row.checked_sub(1).map(|row| Self::new(self.column, row)),
            Direction::East => self
                .column
                .checked_add(1)
                .map(|column| Self::new(column, self.row)),
            Direction::South => self.row.checked_add(1).map(|row| Self::new(self.column, row)),
            Direction::West => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(column, self.row)),
        }
    }
}

/// A room: a fixed coordinate paired with its current door pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    cell: CellCoord,
    doors: DoorMask,
}

impl Room {
    /// Creates a room value.
    #[must_use]
    pub const fn new(cell: CellCoord, doors: DoorMask) -> Self {
        Self { cell, doors }
    }

    /// Coordinate of the room.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Door pattern at the time the value was captured.
    #[must_use]
    pub const fn doors(&self) -> DoorMask {
        self.doors
    }
}

/// Read-only view into the dense room grid.
///
/// Coordinates outside the grid or holding `None` are "no room": open space
/// outside the dungeon, never an error.
#[derive(Clone, Copy, Debug)]
pub struct RoomView<'a> {
    cells: &'a [Option<DoorMask>],
    columns: u32,
    rows: u32,
}

impl<'a> RoomView<'a> {
    /// Captures a new room view backed by the provided row-major cell slice.
    #[must_use]
    pub fn new(cells: &'a [Option<DoorMask>], columns: u32, rows: u32) -> Self {
        Self {
            cells,
            columns,
            rows,
        }
    }

    /// Provides the dimensions of the underlying grid.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Number of cells in the dense grid, rooms or not.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns the room at the provided coordinate, if any.
    #[must_use]
    pub fn lookup(&self, cell: CellCoord) -> Option<Room> {
        self.door_mask(cell).map(|doors| Room::new(cell, doors))
    }

    /// Returns the door mask of the room at the provided coordinate, if any.
    #[must_use]
    pub fn door_mask(&self, cell: CellCoord) -> Option<DoorMask> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }

    /// Rooms currently reachable in one step from the room at `cell`.
    ///
    /// A neighbour is included only when this room's door toward it is open
    /// and the neighbour's facing door is open too. Nothing is cached: the
    /// result always reflects the masks backing this view.
    pub fn neighbors(&self, cell: CellCoord) -> impl Iterator<Item = Room> + 'a {
        let view = *self;
        let mut candidates = [None; 4];
        let mut count = 0;

        if let Some(doors) = view.door_mask(cell) {
            for direction in Direction::ALL {
                if !doors.has(direction) {
                    continue;
                }

                let Some(neighbor) = cell.step(direction).and_then(|next| view.lookup(next))
                else {
                    continue;
                };

                if neighbor.doors().has(direction.opposite()) {
                    candidates[count] = Some(neighbor);
                    count += 1;
                }
            }
        }

        candidates.into_iter().take(count).flatten()
    }

    /// Iterates every room in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Room> + 'a {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(index, doors)| {
                let doors = (*doors)?;
                let columns = usize::try_from(columns).ok().filter(|width| *width > 0)?;
                let column = u32::try_from(index % columns).ok()?;
                let row = u32::try_from(index / columns).ok()?;
                Some(Room::new(CellCoord::new(column, row), doors))
            })
    }

    /// Dense row-major index of the coordinate, if it lies within the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column).filter(|index| *index < self.cells.len())
        } else {
            None
        }
    }
}

/// Unique identifier assigned to an entity.
///
/// Identifiers follow registry order, so comparing two identifiers compares
/// their load-time `(kind, level)` ranking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Kinds of entities that can occupy rooms.
///
/// Declaration order is the priority order used for sorting and target
/// selection: the goal outranks hostiles, which outrank the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    /// The token steered through the dungeon.
    Player,
    /// A monster that must be defeated to win.
    Hostile,
    /// A prize worth reaching but not required for victory.
    Goal,
}

impl EntityKind {
    /// Resolves an entity symbol from the map format.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'A' => Some(Self::Player),
            'D' => Some(Self::Hostile),
            'T' => Some(Self::Goal),
            _ => None,
        }
    }

    /// Symbol used for this kind in the map format.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Player => 'A',
            Self::Hostile => 'D',
            Self::Goal => 'T',
        }
    }

    /// Reports whether every entity of this kind must fall for the player to win.
    #[must_use]
    pub const fn requires_defeat(self) -> bool {
        match self {
            Self::Player | Self::Goal => false,
            Self::Hostile => true,
        }
    }
}

/// Strength of an entity. Always at least one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Level(u32);

impl Level {
    /// Level assigned when the map omits one.
    pub const BASE: Level = Level(1);

    /// Creates a level, rejecting zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        if value == 0 {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Numeric level.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Level one higher than this one.
    #[must_use]
    pub const fn promoted(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::BASE
    }
}

/// Immutable representation of a single entity's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    /// Unique identifier assigned to the entity.
    pub id: EntityId,
    /// Kind of the entity.
    pub kind: EntityKind,
    /// Room currently occupied by the entity.
    pub cell: CellCoord,
    /// Current level of the entity.
    pub level: Level,
    /// Whether the entity is still in play.
    pub alive: bool,
}

impl EntitySnapshot {
    /// Ranking key used for load ordering and target priority.
    #[must_use]
    pub const fn priority(&self) -> (EntityKind, Level) {
        (self.kind, self.level)
    }
}

/// Read-only snapshot describing every entity in registry order.
#[derive(Clone, Debug, Default)]
pub struct EntityView {
    snapshots: Vec<EntitySnapshot>,
}

impl EntityView {
    /// Creates a new entity view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EntitySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.snapshots.iter()
    }

    /// The player entity, if the view contains one.
    #[must_use]
    pub fn player(&self) -> Option<&EntitySnapshot> {
        self.snapshots
            .iter()
            .find(|snapshot| snapshot.kind == EntityKind::Player)
    }

    /// Alive non-player entities in registry order.
    pub fn targets(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.snapshots
            .iter()
            .filter(|snapshot| snapshot.alive && snapshot.kind != EntityKind::Player)
    }

    /// Snapshot of the entity with the provided identifier.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&EntitySnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EntitySnapshot> {
        self.snapshots
    }
}

/// Everything a front end needs to draw the dungeon.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Number of columns in the grid.
    pub columns: u32,
    /// Number of rows in the grid.
    pub rows: u32,
    /// Every room in row-major order.
    pub rooms: Vec<Room>,
    /// Every entity in registry order, dead ones included.
    pub entities: Vec<EntitySnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(bits: u8) -> DoorMask {
        DoorMask::from_bits(bits).expect("four-bit mask")
    }

    #[test]
    fn rotation_round_trips_for_every_mask() {
        for bits in 0..=0xF {
            let original = mask(bits);
            assert_eq!(original.rotated_right().rotated_left(), original);
            assert_eq!(original.rotated_left().rotated_right(), original);

            let mut spun = original;
            for _ in 0..4 {
                spun = spun.rotated_right();
            }
            assert_eq!(spun, original);
        }
    }

    #[test]
    fn rotate_right_is_a_permutation_of_four_bit_values() {
        let mut seen = [false; 16];
        for bits in 0..=0xF {
            let rotated = mask(bits).rotated_right().bits();
            assert!(rotated <= 0xF);
            assert!(!seen[usize::from(rotated)], "collision on {rotated}");
            seen[usize::from(rotated)] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn rotate_right_turns_doors_clockwise() {
        let top_only = mask(1);
        assert!(top_only.rotated_right().has_right());
        assert!(top_only.rotated_right().rotated_right().has_bottom());
        assert!(top_only.rotated_left().has_left());
        assert_eq!(mask(8).rotated_right(), top_only);
        assert_eq!(
            mask(0b0101).rotated(Rotation::Clockwise),
            mask(0b1010),
            "vertical corridor becomes horizontal"
        );
    }

    #[test]
    fn door_mask_rejects_values_above_four_bits() {
        assert_eq!(DoorMask::from_bits(16), None);
        assert_eq!(DoorMask::try_from(0x1F), Err(InvalidDoorMask(0x1F)));
    }

    #[test]
    fn tile_symbols_cover_every_non_zero_mask() {
        for bits in 1..=0xF {
            let symbol = mask(bits).symbol().expect("symbol for non-zero mask");
            assert_eq!(DoorMask::from_symbol(symbol), Some(mask(bits)));
        }
        assert_eq!(DoorMask::CLOSED.symbol(), None);
        assert_eq!(DoorMask::from_symbol('x'), None);
        assert_eq!(DoorMask::from_symbol('╬'), Some(DoorMask::OPEN));
    }

    #[test]
    fn neighbors_require_mutual_consent() {
        // (0,0) opens right, (1,0) opens left and bottom, (1,1) has its top closed.
        let cells = [
            Some(mask(0b0010)),
            Some(mask(0b1100)),
            None,
            Some(mask(0b0010)),
        ];
        let view = RoomView::new(&cells, 2, 2);

        let from_origin: Vec<_> = view.neighbors(CellCoord::new(0, 0)).collect();
        assert_eq!(from_origin, vec![Room::new(CellCoord::new(1, 0), mask(0b1100))]);

        let from_corner: Vec<_> = view
            .neighbors(CellCoord::new(1, 0))
            .map(|room| room.cell())
            .collect();
        assert_eq!(from_corner, vec![CellCoord::new(0, 0)]);

        assert_eq!(view.neighbors(CellCoord::new(1, 1)).count(), 0);
        assert_eq!(view.neighbors(CellCoord::new(0, 1)).count(), 0);
    }

    #[test]
    fn lookup_outside_grid_is_absent() {
        let cells = [Some(DoorMask::OPEN)];
        let view = RoomView::new(&cells, 1, 1);
        assert!(view.lookup(CellCoord::new(0, 0)).is_some());
        assert!(view.lookup(CellCoord::new(1, 0)).is_none());
        assert!(view.lookup(CellCoord::new(0, 7)).is_none());
        assert_eq!(CellCoord::new(0, 0).step(Direction::North), None);
        assert_eq!(CellCoord::new(0, 0).step(Direction::West), None);
    }

    #[test]
    fn entity_view_targets_skip_player_and_dead_entities() {
        let view = EntityView::from_snapshots(vec![
            snapshot(2, EntityKind::Goal, true),
            snapshot(0, EntityKind::Player, true),
            snapshot(1, EntityKind::Hostile, false),
        ]);

        assert_eq!(view.player().map(|player| player.id), Some(EntityId::new(0)));
        let targets: Vec<_> = view.targets().map(|target| target.id).collect();
        assert_eq!(targets, vec![EntityId::new(2)]);
        assert_eq!(view.get(EntityId::new(1)).map(|entity| entity.alive), Some(false));
    }

    #[test]
    fn kind_order_ranks_goal_above_hostiles() {
        assert!(EntityKind::Player < EntityKind::Hostile);
        assert!(EntityKind::Hostile < EntityKind::Goal);
        assert!(Level::BASE < Level::BASE.promoted());
        assert_eq!(Level::new(0), None);
    }

    #[test]
    fn board_snapshot_survives_bincode_and_rejects_wide_masks() {
        let board = BoardSnapshot {
            columns: 1,
            rows: 1,
            rooms: vec![Room::new(CellCoord::new(0, 0), mask(9))],
            entities: vec![snapshot(0, EntityKind::Player, true)],
        };
        let bytes = bincode::serialize(&board).expect("serialize");
        let restored: BoardSnapshot = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, board);

        let wide = bincode::serialize(&0x30_u8).expect("serialize");
        assert!(bincode::deserialize::<DoorMask>(&wide).is_err());
    }

    fn snapshot(id: u32, kind: EntityKind, alive: bool) -> EntitySnapshot {
        EntitySnapshot {
            id: EntityId::new(id),
            kind,
            cell: CellCoord::new(0, 0),
            level: Level::BASE,
            alive,
        }
    }
}
