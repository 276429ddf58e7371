//! Computer opponent: exhaustive minimax over the flat board.
//!
//! The search plays out every continuation from the given position, so the
//! returned move is optimal. Among equally scored moves the center is
//! preferred, then corners, then edges; remaining ties go to the lowest
//! index. That ordering makes the choice deterministic for a given board.

use super::convert::BLANK;
use super::types::CELLS;
use tracing::{debug, instrument};

/// Score of a win found at depth zero.
const WIN_SCORE: i32 = 10;

/// Flat-index triples forming a line.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // Rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // Columns
    [0, 4, 8], [2, 4, 6],            // Diagonals
];

/// Picks a move for one side given the flat board.
pub trait MoveSelector {
    /// Returns the flat index (0-8) of the chosen move for `mark`.
    ///
    /// Returns `None` if `board` does not have exactly nine cells or has no
    /// empty cell.
    fn best_move(&self, board: &[char], mark: char) -> Option<usize>;
}

/// Full-depth minimax with positional tie-breaking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Minimax;

impl Minimax {
    /// Creates the selector.
    pub fn new() -> Self {
        Self
    }
}

impl MoveSelector for Minimax {
    #[instrument(skip(self, board), fields(cells = board.len()))]
    fn best_move(&self, board: &[char], mark: char) -> Option<usize> {
        let Ok(cells) = <&[char; CELLS]>::try_from(board) else {
            debug!("Rejecting board with wrong cell count");
            return None;
        };
        let mut scratch = *cells;
        let search = Search {
            me: mark,
            opponent: if mark == 'X' { 'O' } else { 'X' },
        };

        let mut best: Option<(usize, i32)> = None;
        for i in 0..CELLS {
            if !is_empty(&scratch, i) {
                continue;
            }
            scratch[i] = search.me;
            let score = search.minimax(&mut scratch, 0, false);
            scratch[i] = cells[i];

            let replace = match best {
                None => true,
                Some((index, best_score)) => {
                    score > best_score
                        || (score == best_score && position_priority(i) > position_priority(index))
                }
            };
            if replace {
                best = Some((i, score));
            }
        }

        debug!(choice = ?best, "Search complete");
        best.map(|(index, _)| index)
    }
}

/// Tie-break rank: center 3, corners 2, edges 1.
pub fn position_priority(index: usize) -> u8 {
    match index {
        4 => 3,
        0 | 2 | 6 | 8 => 2,
        _ => 1,
    }
}

/// Marks fixed for one search.
struct Search {
    me: char,
    opponent: char,
}

impl Search {
    /// Scores the position from `me`'s side; `depth` counts simulated plies.
    fn minimax(&self, board: &mut [char; CELLS], depth: i32, my_turn: bool) -> i32 {
        if has_line(board, self.me) {
            return WIN_SCORE - depth;
        }
        if has_line(board, self.opponent) {
            return depth - WIN_SCORE;
        }
        if (0..CELLS).all(|i| !is_empty(board, i)) {
            return 0;
        }

        let (mark, mut best, pick): (char, i32, fn(i32, i32) -> i32) = if my_turn {
            (self.me, i32::MIN, i32::max)
        } else {
            (self.opponent, i32::MAX, i32::min)
        };

        for i in 0..CELLS {
            if !is_empty(board, i) {
                continue;
            }
            let previous = board[i];
            board[i] = mark;
            best = pick(best, self.minimax(board, depth + 1, !my_turn));
            board[i] = previous;
        }
        best
    }
}

/// Blank cells may arrive as the sentinel or as a space.
fn is_empty(board: &[char; CELLS], index: usize) -> bool {
    board[index] == BLANK || board[index] == ' '
}

fn has_line(board: &[char; CELLS], mark: char) -> bool {
    LINES
        .iter()
        .any(|line| line.iter().all(|&i| board[i] == mark))
}
