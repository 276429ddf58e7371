//! Conversions between the 2-D board and the flat symbol array the
//! move selector consumes.

use super::board::Board;
use super::types::{CELLS, Mark, Move, SIZE};
use tracing::instrument;

/// Symbol for an empty cell in the flat representation.
pub const BLANK: char = '\0';

/// Flat, row-major view of the board.
pub type FlatBoard = [char; CELLS];

/// Maps a cell's contents to its flat symbol.
pub fn mark_to_symbol(mark: Option<Mark>) -> char {
    mark.map_or(BLANK, Mark::symbol)
}

/// Flattens the board row by row.
#[instrument(skip(board))]
pub fn to_flat(board: &Board) -> FlatBoard {
    let mut flat = [BLANK; CELLS];
    for (i, cell) in board.cells().iter().flatten().enumerate() {
        flat[i] = mark_to_symbol(*cell);
    }
    flat
}

/// Maps a flat index (0-8) to board coordinates.
///
/// Returns `None` for indices past the last cell.
pub fn flat_index_to_move(index: usize) -> Option<Move> {
    (index < CELLS).then(|| Move::new(index / SIZE, index % SIZE))
}

/// Maps board coordinates to a flat index, if on the board.
pub fn move_to_flat_index(mv: Move) -> Option<usize> {
    mv.in_bounds().then(|| mv.row * SIZE + mv.col)
}
