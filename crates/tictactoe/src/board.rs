//! 3x3 board storage and line detection.

use super::types::{Mark, Move, SIZE};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Rows, columns and diagonals as (row, col) triples.
const LINES: [[(usize, usize); 3]; 8] = [
    // Rows
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // Columns
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// 3x3 grid of optional marks, row-major.
///
/// The board knows nothing about turns. A cell only changes through
/// [`Board::try_place`] (empty to marked) or [`Board::clear`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Mark>; SIZE]; SIZE],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the mark at (row, col), or `None` for an empty or off-board cell.
    pub fn get(&self, row: usize, col: usize) -> Option<Mark> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Returns the whole grid.
    pub fn cells(&self) -> &[[Option<Mark>; SIZE]; SIZE] {
        &self.cells
    }

    /// True iff the addressed cell holds no mark.
    ///
    /// Off-board coordinates are never empty.
    pub fn is_empty(&self, mv: Move) -> bool {
        mv.in_bounds() && self.cells[mv.row][mv.col].is_none()
    }

    /// Places `mark` if the move is on the board and the cell is empty.
    ///
    /// Returns false and leaves the board untouched otherwise.
    #[instrument(skip(self))]
    pub fn try_place(&mut self, mv: Move, mark: Mark) -> bool {
        if !self.is_empty(mv) {
            return false;
        }
        self.cells[mv.row][mv.col] = Some(mark);
        true
    }

    /// True iff every cell holds a mark.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// True iff any row, column or diagonal is entirely `mark`.
    pub fn has_winning_line(&self, mark: Mark) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|&(r, c)| self.cells[r][c] == Some(mark)))
    }

    /// Returns the mark owning a complete line, if any.
    pub fn winner(&self) -> Option<Mark> {
        Mark::iter().find(|&mark| self.has_winning_line(mark))
    }

    /// Number of marked cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Empties every cell.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.cells = [[None; SIZE]; SIZE];
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            let symbols: Vec<String> = row
                .iter()
                .map(|cell| cell.map_or(".".to_string(), |m| m.to_string()))
                .collect();
            write!(f, "{}", symbols.join("|"))?;
            if r + 1 < SIZE {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}
