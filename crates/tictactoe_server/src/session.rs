//! Human-versus-computer sessions and the snapshot store behind them.

use derive_more::{Display, Error};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tictactoe::{Game, GameSnapshot, Mark, Minimax, Move, MoveError, MoveSelector, convert};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// Why a human move was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum TurnError {
    /// The computer is to move.
    #[display("not your turn")]
    NotYourTurn,
    /// The game rules refused the move.
    #[display("{_0}")]
    Move(MoveError),
}

impl From<MoveError> for TurnError {
    fn from(err: MoveError) -> Self {
        TurnError::Move(err)
    }
}

/// A game between a human and a move selector.
///
/// The session drives the computer's turns: whenever the computer is to
/// move in a running game, it moves before control returns to the caller.
#[derive(Debug, Clone)]
pub struct GameSession<S = Minimax> {
    game: Game,
    computer: Mark,
    selector: S,
}

impl<S: MoveSelector> GameSession<S> {
    /// Starts a fresh game. If the computer plays X it opens immediately.
    #[instrument(skip(selector))]
    pub fn new(computer: Mark, selector: S) -> Self {
        let mut session = Self {
            game: Game::new(),
            computer,
            selector,
        };
        session.play_computer_turn();
        session
    }

    /// Resumes a stored game without making any move.
    #[instrument(skip(snapshot, selector))]
    pub fn restore(snapshot: &GameSnapshot, computer: Mark, selector: S) -> Self {
        Self {
            game: Game::restore(snapshot),
            computer,
            selector,
        }
    }

    /// Returns the game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// The computer's mark.
    pub fn computer_mark(&self) -> Mark {
        self.computer
    }

    /// The human's mark.
    pub fn human_mark(&self) -> Mark {
        self.computer.opponent()
    }

    /// Captures the game for storage.
    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    /// Applies the human's move, then the computer's reply.
    ///
    /// Returns the computer's move, if it made one.
    ///
    /// # Errors
    ///
    /// [`TurnError::NotYourTurn`] while the computer is to move in a running
    /// game, otherwise any [`MoveError`] from the rules. The game is left
    /// unchanged on error.
    #[instrument(skip(self), fields(human = %self.human_mark()))]
    pub fn play_human(&mut self, mv: Move) -> Result<Option<Move>, TurnError> {
        if !self.game.status().is_terminal() && self.game.current_player() != self.human_mark() {
            warn!("Human moved out of turn");
            return Err(TurnError::NotYourTurn);
        }
        self.game.attempt_move(mv)?;
        Ok(self.play_computer_turn())
    }

    /// Lets the computer move if the game is running and it is its turn.
    ///
    /// Returns the applied move.
    #[instrument(skip(self), fields(computer = %self.computer))]
    pub fn play_computer_turn(&mut self) -> Option<Move> {
        if self.game.status().is_terminal() || self.game.current_player() != self.computer {
            return None;
        }

        let flat = self.game.flat_board();
        let Some(index) = self.selector.best_move(&flat, self.computer.symbol()) else {
            warn!("Selector found no move");
            return None;
        };
        let mv = convert::flat_index_to_move(index)?;
        match self.game.attempt_move(mv) {
            Ok(()) => {
                debug!(%mv, status = %self.game.status(), "Computer moved");
                Some(mv)
            }
            Err(e) => {
                warn!(%mv, error = %e, "Selector chose an illegal move");
                None
            }
        }
    }

    /// Replaces the game with a new one; the computer opens if it plays X.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Option<Move> {
        self.game.reset();
        self.play_computer_turn()
    }
}

/// Session store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Session error: {} at {}:{}", message, file, line)]
pub struct SessionError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SessionError {
    /// Creates a new session error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<serde_json::Error> for SessionError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Snapshot encoding error: {}", err))
    }
}

/// Shared map of session id to JSON-encoded game snapshot.
///
/// Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, String>>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session store");
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<SessionId, String>>, SessionError> {
        self.sessions
            .lock()
            .map_err(|_| SessionError::new("session store lock poisoned"))
    }

    /// Loads the snapshot stored under `id`.
    #[instrument(skip(self))]
    pub fn load(&self, id: &str) -> Result<Option<GameSnapshot>, SessionError> {
        let sessions = self.lock()?;
        match sessions.get(id) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => {
                debug!(session_id = id, "Session not found");
                Ok(None)
            }
        }
    }

    /// Stores `snapshot` under `id`, replacing any previous one.
    #[instrument(skip(self, snapshot))]
    pub fn save(&self, id: &str, snapshot: &GameSnapshot) -> Result<(), SessionError> {
        let json = serde_json::to_string(snapshot)?;
        self.lock()?.insert(id.to_string(), json);
        debug!(session_id = id, "Session saved");
        Ok(())
    }

    /// Drops the session, returning true if it existed.
    #[instrument(skip(self))]
    pub fn remove(&self, id: &str) -> Result<bool, SessionError> {
        Ok(self.lock()?.remove(id).is_some())
    }

    /// Number of stored sessions.
    pub fn len(&self) -> Result<usize, SessionError> {
        Ok(self.lock()?.len())
    }

    /// True if no session is stored.
    pub fn is_empty(&self) -> Result<bool, SessionError> {
        Ok(self.lock()?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe::GameStatus;

    #[test]
    fn test_computer_as_o_waits() {
        let session = GameSession::new(Mark::O, Minimax);
        assert_eq!(session.game().board().occupied(), 0);
        assert_eq!(session.human_mark(), Mark::X);
    }

    #[test]
    fn test_computer_as_x_opens_center() {
        let session = GameSession::new(Mark::X, Minimax);
        assert_eq!(session.game().board().get(1, 1), Some(Mark::X));
        assert_eq!(session.game().current_player(), Mark::O);
    }

    #[test]
    fn test_human_move_gets_reply() {
        let mut session = GameSession::new(Mark::O, Minimax);
        let reply = session.play_human(Move::new(0, 0)).expect("legal move");
        assert_eq!(reply, Some(Move::new(1, 1)));
        assert_eq!(session.game().current_player(), Mark::X);
        assert_eq!(session.game().board().occupied(), 2);
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut session = GameSession::new(Mark::O, Minimax);
        session.play_human(Move::new(0, 0)).expect("legal move");
        let before = session.snapshot();
        assert_eq!(
            session.play_human(Move::new(1, 1)),
            Err(TurnError::Move(MoveError::CellOccupied))
        );
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_out_of_turn_rejected() {
        let mut game = Game::new();
        game.attempt_move(Move::new(0, 0)).expect("legal move");
        let mut session = GameSession::restore(&game.snapshot(), Mark::O, Minimax);
        assert_eq!(session.play_human(Move::new(2, 2)), Err(TurnError::NotYourTurn));
        assert_eq!(TurnError::NotYourTurn.to_string(), "not your turn");
    }

    #[test]
    fn test_finished_game_reports_finished() {
        let mut game = Game::new();
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            game.attempt_move(Move::new(row, col)).expect("legal move");
        }
        let mut session = GameSession::restore(&game.snapshot(), Mark::X, Minimax);
        let err = session.play_human(Move::new(2, 2)).unwrap_err();
        assert_eq!(err.to_string(), "game already finished");
        assert_eq!(session.play_computer_turn(), None);
    }

    #[test]
    fn test_reset_starts_over() {
        let mut session = GameSession::new(Mark::X, Minimax);
        session.play_human(Move::new(0, 0)).expect("legal move");
        let opening = session.reset();
        assert_eq!(opening, Some(Move::new(1, 1)));
        assert_eq!(session.game().board().occupied(), 1);
        assert_eq!(session.game().status(), GameStatus::InProgress);
    }

    #[test]
    fn test_store_round_trip() {
        let store = SessionStore::new();
        assert_eq!(store.load("a").expect("load"), None);

        let mut session = GameSession::new(Mark::O, Minimax);
        session.play_human(Move::new(2, 2)).expect("legal move");
        store.save("a", &session.snapshot()).expect("save");

        let loaded = store.load("a").expect("load").expect("stored");
        assert_eq!(loaded, session.snapshot());
        assert_eq!(store.len().expect("len"), 1);

        let shared = store.clone();
        assert!(shared.remove("a").expect("remove"));
        assert!(store.is_empty().expect("is_empty"));
    }
}
