//! Plain-text presentation of a [`BoardSnapshot`].

use std::fmt::Write as _;

use dungeon_doors_core::{BoardSnapshot, CellCoord, EntityKind, TurnOutcome};

/// Drawn where the grid has no room.
const OPEN_SPACE: char = ' ';
/// Drawn for a room whose doors are all closed.
const SEALED_ROOM: char = '·';

/// Draws the grid with alive entities on top of their rooms, followed by an
/// entity legend.
pub(crate) fn board(board: &BoardSnapshot) -> String {
    let mut output = String::new();

    for row in 0..board.rows {
        for column in 0..board.columns {
            output.push(cell_symbol(board, CellCoord::new(column, row)));
        }
        output.push('\n');
    }

    for entity in &board.entities {
        let status = if entity.alive { "" } else { " (defeated)" };
        let _ = writeln!(
            output,
            "{} #{} at ({}, {}) level {}{status}",
            entity.kind.symbol(),
            entity.id.get(),
            entity.cell.column(),
            entity.cell.row(),
            entity.level.get(),
        );
    }

    output
}

/// Result banner shown once a turn ends the game.
pub(crate) fn banner(outcome: TurnOutcome) -> Option<&'static str> {
    match outcome {
        TurnOutcome::Won => Some("You win!"),
        TurnOutcome::Lost => Some("You lost."),
        TurnOutcome::Continue | TurnOutcome::NoPath => None,
    }
}

fn cell_symbol(board: &BoardSnapshot, cell: CellCoord) -> char {
    // The player is drawn over anything sharing its room.
    let occupant = board
        .entities
        .iter()
        .filter(|entity| entity.alive && entity.cell == cell)
        .min_by_key(|entity| entity.kind != EntityKind::Player);
    if let Some(entity) = occupant {
        return entity.kind.symbol();
    }

    board
        .rooms
        .iter()
        .find(|room| room.cell() == cell)
        .map_or(OPEN_SPACE, |room| room.doors().symbol().unwrap_or(SEALED_ROOM))
}
