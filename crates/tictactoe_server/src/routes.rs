//! JSON HTTP API over session-stored games.

use crate::session::{GameSession, SessionError, SessionStore, TurnError};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tictactoe::{GameStatus, Mark, Minimax, Move, MoveError, SIZE};
use tracing::{error, info, instrument, warn};

/// Shared state for all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    store: SessionStore,
    computer: Mark,
}

impl AppState {
    /// Creates handler state over `store`, with the computer playing `computer`.
    pub fn new(store: SessionStore, computer: Mark) -> Self {
        Self { store, computer }
    }

    /// Loads the session, creating and storing a fresh one if absent.
    #[instrument(skip(self))]
    fn open(&self, id: &str) -> Result<GameSession, SessionError> {
        if let Some(snapshot) = self.store.load(id)? {
            return Ok(GameSession::restore(&snapshot, self.computer, Minimax));
        }
        info!(session_id = id, computer = %self.computer, "Starting new game");
        let session = GameSession::new(self.computer, Minimax);
        self.store.save(id, &session.snapshot())?;
        Ok(session)
    }
}

/// Request body for a human move.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Row (0-2).
    pub row: i64,
    /// Column (0-2).
    pub col: i64,
}

/// Game state as rendered to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    /// Player to move, or the winner once won.
    pub current_player: Mark,
    /// Game status.
    pub status: GameStatus,
    /// Cells in row-major order.
    pub board: [[Option<Mark>; SIZE]; SIZE],
    /// Mark played by the computer.
    pub computer_mark: Mark,
    /// The computer's move in response to this request, if any.
    pub last_computer_move: Option<Move>,
    /// Why the request's move was refused.
    pub error: Option<String>,
}

impl GameView {
    fn new(session: &GameSession, last_computer_move: Option<Move>, error: Option<String>) -> Self {
        let game = session.game();
        Self {
            current_player: game.current_player(),
            status: game.status(),
            board: *game.board().cells(),
            computer_mark: session.computer_mark(),
            last_computer_move,
            error,
        }
    }
}

/// Failure of the storage layer behind a request.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub struct ApiError(SessionError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Request failed");
        let body = serde_json::json!({ "error": self.0.message });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/games/{session_id}", get(get_game))
        .route("/games/{session_id}/moves", post(post_move))
        .route("/games/{session_id}/reset", post(post_reset))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

#[instrument(skip(state))]
async fn get_game(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let session = state.open(&session_id)?;
    Ok(Json(GameView::new(&session, None, None)))
}

#[instrument(skip(state))]
async fn post_move(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<MoveRequest>,
) -> Result<(StatusCode, Json<GameView>), ApiError> {
    let mut session = state.open(&session_id)?;

    let result = match (usize::try_from(req.row), usize::try_from(req.col)) {
        (Ok(row), Ok(col)) => session.play_human(Move::new(row, col)),
        _ => Err(TurnError::Move(MoveError::InvalidPosition)),
    };

    match result {
        Ok(reply) => {
            state.store.save(&session_id, &session.snapshot())?;
            info!(session_id = %session_id, reply = ?reply, status = %session.game().status(), "Move accepted");
            Ok((StatusCode::OK, Json(GameView::new(&session, reply, None))))
        }
        Err(e) => {
            warn!(session_id = %session_id, error = %e, "Move rejected");
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(GameView::new(&session, None, Some(e.to_string()))),
            ))
        }
    }
}

#[instrument(skip(state))]
async fn post_reset(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let mut session = state.open(&session_id)?;
    let opening = session.reset();
    state.store.save(&session_id, &session.snapshot())?;
    info!(session_id = %session_id, "Game reset");
    Ok(Json(GameView::new(&session, opening, None)))
}
