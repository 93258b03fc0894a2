//! Parser for the text dungeon format.
//!
//! Room rows start with one of the fifteen tile symbols and contribute one
//! room per character. Entity rows start with an entity symbol followed by
//! `x y [level]`. Blank lines are ignored.
//!
//! A room row must start in the first column; indentation is an unknown
//! symbol. `x` is the character index within a room row and `y` counts room
//! rows only, so entity rows and blank lines may sit anywhere without
//! shifting the grid.

use dungeon_doors_core::{CellCoord, DoorMask, EntityKind, Level};
use thiserror::Error;

use crate::{entities::EntityRecord, rooms::RoomGraph};

/// Reasons a dungeon layout fails to load. Every variant is fatal.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A character is neither a tile symbol nor an entity symbol.
    #[error("line {line}, column {column}: unknown symbol `{symbol}`")]
    UnknownSymbol {
        /// One-based line number.
        line: usize,
        /// Zero-based character column.
        column: usize,
        /// Offending character.
        symbol: char,
    },
    /// A record could not be parsed into a symbol, coordinate and level.
    #[error("line {line}: malformed record: {reason}")]
    MalformedRecord {
        /// One-based line number.
        line: usize,
        /// Human-readable description of the defect.
        reason: String,
    },
    /// The layout contains no room rows.
    #[error("layout contains no rooms")]
    MissingRooms,
    /// The layout contains no player record.
    #[error("layout contains no player")]
    MissingPlayer,
    /// The layout contains a second player record.
    #[error("line {line}: a second player is not allowed")]
    DuplicatePlayer {
        /// One-based line number of the extra player.
        line: usize,
    },
    /// An entity was placed where no room exists.
    #[error("line {line}: entity at ({column}, {row}) is outside the dungeon")]
    EntityOutsideDungeon {
        /// One-based line number of the entity record.
        line: usize,
        /// Column named by the record.
        column: u32,
        /// Row named by the record.
        row: u32,
    },
}

/// Fully validated contents of a layout.
#[derive(Debug)]
pub(crate) struct ParsedLayout {
    pub(crate) rooms: RoomGraph,
    pub(crate) entities: Vec<EntityRecord>,
}

pub(crate) fn parse(source: &str) -> Result<ParsedLayout, LayoutError> {
    let mut room_rows: Vec<Vec<DoorMask>> = Vec::new();
    let mut records: Vec<(usize, EntityRecord)> = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let row = raw.trim_end();
        let Some(first) = row.chars().next() else {
            continue;
        };
        let record = row.trim_start();

        if DoorMask::from_symbol(first).is_some() {
            room_rows.push(parse_room_row(row, line)?);
        } else if record
            .chars()
            .next()
            .is_some_and(|symbol| EntityKind::from_symbol(symbol).is_some())
        {
            records.push((line, parse_entity(record, line)?));
        } else {
            return Err(LayoutError::UnknownSymbol {
                line,
                column: 0,
                symbol: first,
            });
        }
    }

    if room_rows.is_empty() {
        return Err(LayoutError::MissingRooms);
    }

    let widest = room_rows.iter().map(Vec::len).max().unwrap_or(0);
    let columns = grid_extent(widest)?;
    let rows = grid_extent(room_rows.len())?;
    let mut rooms = RoomGraph::new(columns, rows);
    for (row, masks) in (0_u32..).zip(&room_rows) {
        for (column, doors) in (0_u32..).zip(masks) {
            let _ = rooms.insert(CellCoord::new(column, row), *doors);
        }
    }

    let mut player_seen = false;
    for (line, record) in &records {
        if record.kind == EntityKind::Player {
            if player_seen {
                return Err(LayoutError::DuplicatePlayer { line: *line });
            }
            player_seen = true;
        }

        if rooms.lookup(record.cell).is_none() {
            return Err(LayoutError::EntityOutsideDungeon {
                line: *line,
                column: record.cell.column(),
                row: record.cell.row(),
            });
        }
    }

    if !player_seen {
        return Err(LayoutError::MissingPlayer);
    }

    Ok(ParsedLayout {
        rooms,
        entities: records.into_iter().map(|(_, record)| record).collect(),
    })
}

fn parse_room_row(row: &str, line: usize) -> Result<Vec<DoorMask>, LayoutError> {
    row.chars()
        .enumerate()
        .map(|(column, symbol)| {
            DoorMask::from_symbol(symbol).ok_or(LayoutError::UnknownSymbol {
                line,
                column,
                symbol,
            })
        })
        .collect()
}

fn parse_entity(record: &str, line: usize) -> Result<EntityRecord, LayoutError> {
    let malformed = |reason: String| LayoutError::MalformedRecord { line, reason };

    let mut fields = record.split_whitespace();
    let symbol = fields.next().unwrap_or_default();
    let mut symbol_chars = symbol.chars();
    let kind = match (symbol_chars.next(), symbol_chars.next()) {
        (Some(first), None) => EntityKind::from_symbol(first),
        _ => None,
    }
    .ok_or_else(|| malformed(format!("`{symbol}` is not an entity symbol")))?;

    let column = parse_coordinate(fields.next(), "x").map_err(malformed)?;
    let row = parse_coordinate(fields.next(), "y").map_err(malformed)?;

    let level = match fields.next() {
        None => Level::BASE,
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .and_then(Level::new)
            .ok_or_else(|| malformed(format!("level `{raw}` is not a positive integer")))?,
    };

    if let Some(extra) = fields.next() {
        return Err(malformed(format!("unexpected trailing field `{extra}`")));
    }

    Ok(EntityRecord {
        kind,
        cell: CellCoord::new(column, row),
        level,
    })
}

fn parse_coordinate(field: Option<&str>, axis: &str) -> Result<u32, String> {
    let raw = field.ok_or_else(|| format!("missing {axis} coordinate"))?;
    raw.parse::<u32>()
        .map_err(|_| format!("{axis} coordinate `{raw}` is not a non-negative integer"))
}

fn grid_extent(length: usize) -> Result<u32, LayoutError> {
    u32::try_from(length).map_err(|_| LayoutError::MalformedRecord {
        line: 0,
        reason: format!("grid extent {length} is too large"),
    })
}
