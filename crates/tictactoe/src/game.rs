//! Game rules: turn order, move validation and terminal detection.

use super::board::Board;
use super::convert::{self, FlatBoard};
use super::types::{GameStatus, Mark, Move, SIZE};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Reason a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The game has reached a terminal status.
    #[display("game already finished")]
    GameFinished,
    /// The coordinates are off the board.
    #[display("invalid position")]
    InvalidPosition,
    /// The target cell already holds a mark.
    #[display("cell occupied")]
    CellOccupied,
}

impl std::error::Error for MoveError {}

/// Tic-tac-toe game: board, player to move and status.
///
/// X always opens. Once the status is terminal, every move is refused
/// until [`Game::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current_player: Mark,
    status: GameStatus,
}

impl Game {
    /// Creates a game with an empty board and X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Mark::X,
            status: GameStatus::InProgress,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move, or the winner once the game is won.
    pub fn current_player(&self) -> Mark {
        self.current_player
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Places the current player's mark at `mv`.
    ///
    /// On success exactly one cell is filled and the status is updated. A
    /// winning move leaves `current_player` on the winner. Nothing changes
    /// on error.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameFinished`] after a win or draw,
    /// [`MoveError::InvalidPosition`] for off-board coordinates,
    /// [`MoveError::CellOccupied`] when the cell is taken.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn attempt_move(&mut self, mv: Move) -> Result<(), MoveError> {
        if self.status.is_terminal() {
            warn!(status = %self.status, "Move after game end");
            return Err(MoveError::GameFinished);
        }
        if !mv.in_bounds() {
            warn!("Move off the board");
            return Err(MoveError::InvalidPosition);
        }
        if !self.board.try_place(mv, self.current_player) {
            warn!("Move onto occupied cell");
            return Err(MoveError::CellOccupied);
        }

        if self.board.has_winning_line(self.current_player) {
            self.status = GameStatus::won_by(self.current_player);
        } else if self.board.is_full() {
            self.status = GameStatus::Draw;
        } else {
            self.current_player = self.current_player.opponent();
        }

        debug!(status = %self.status, next = %self.current_player, "Move applied");
        Ok(())
    }

    /// Starts over: empty board, X to move, in progress.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board.clear();
        self.current_player = Mark::X;
        self.status = GameStatus::InProgress;
    }

    /// Flat symbol view of the board for a move selector.
    pub fn flat_board(&self) -> FlatBoard {
        convert::to_flat(&self.board)
    }

    /// Captures the persistent state of the game.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            current_player: self.current_player,
            status: self.status,
            cells: *self.board.cells(),
        }
    }

    /// Rebuilds a game from a snapshot.
    ///
    /// Cells are replayed onto a fresh board. The player to move and the
    /// status are taken as stored, not re-derived from the cells.
    #[instrument(skip(snapshot), fields(status = %snapshot.status, current = %snapshot.current_player))]
    pub fn restore(snapshot: &GameSnapshot) -> Self {
        let mut board = Board::new();
        for (row, cells) in snapshot.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if let Some(mark) = cell {
                    board.try_place(Move::new(row, col), *mark);
                }
            }
        }
        Self {
            board,
            current_player: snapshot.current_player,
            status: snapshot.status,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable state of a game, as kept in a session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Player to move (or the winner).
    pub current_player: Mark,
    /// Game status.
    pub status: GameStatus,
    /// Cells in row-major order.
    pub cells: [[Option<Mark>; SIZE]; SIZE],
}

impl From<&Game> for GameSnapshot {
    fn from(game: &Game) -> Self {
        game.snapshot()
    }
}

impl From<&GameSnapshot> for Game {
    fn from(snapshot: &GameSnapshot) -> Self {
        Game::restore(snapshot)
    }
}
