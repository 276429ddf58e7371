//! Tests for the HTTP API.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tictactoe::{GameStatus, Mark, Move};
use tictactoe_server::{AppState, GameView, SessionStore, router};
use tower::ServiceExt;

fn app(store: &SessionStore, computer: Mark) -> Router {
    router(AppState::new(store.clone(), computer))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, GameView) {
    let response = app.oneshot(request).await.expect("request served");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body read")
        .to_bytes();
    let view = serde_json::from_slice(&bytes).expect("game view json");
    (status, view)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request")
}

fn post_move(session: &str, row: i64, col: i64) -> Request<Body> {
    Request::post(format!("/games/{session}/moves"))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({ "row": row, "col": col }).to_string(),
        ))
        .expect("request")
}

#[tokio::test]
async fn test_health() {
    let store = SessionStore::new();
    let response = app(&store, Mark::O)
        .oneshot(get("/health"))
        .await
        .expect("request served");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_new_session_is_fresh_game() {
    let store = SessionStore::new();
    let (status, view) = send(app(&store, Mark::O), get("/games/abc")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view.status, GameStatus::InProgress);
    assert_eq!(view.current_player, Mark::X);
    assert_eq!(view.computer_mark, Mark::O);
    assert!(view.board.iter().flatten().all(Option::is_none));
    assert_eq!(store.len().expect("len"), 1);
}

#[tokio::test]
async fn test_computer_as_x_opens() {
    let store = SessionStore::new();
    let (_, view) = send(app(&store, Mark::X), get("/games/abc")).await;
    assert_eq!(view.board[1][1], Some(Mark::X));
    assert_eq!(view.current_player, Mark::O);
}

#[tokio::test]
async fn test_move_gets_reply_and_persists() {
    let store = SessionStore::new();
    let (status, view) = send(app(&store, Mark::O), post_move("s1", 0, 0)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view.board[0][0], Some(Mark::X));
    assert_eq!(view.last_computer_move, Some(Move::new(1, 1)));
    assert_eq!(view.board[1][1], Some(Mark::O));
    assert_eq!(view.error, None);

    let (_, reloaded) = send(app(&store, Mark::O), get("/games/s1")).await;
    assert_eq!(reloaded.board, view.board);
    assert_eq!(reloaded.current_player, Mark::X);
}

#[tokio::test]
async fn test_occupied_cell_rejected() {
    let store = SessionStore::new();
    send(app(&store, Mark::O), post_move("s1", 0, 0)).await;
    let (status, view) = send(app(&store, Mark::O), post_move("s1", 1, 1)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(view.error.as_deref(), Some("cell occupied"));
    assert_eq!(view.status, GameStatus::InProgress);
    assert_eq!(view.board.iter().flatten().filter(|c| c.is_some()).count(), 2);
}

#[tokio::test]
async fn test_negative_and_large_coordinates_rejected() {
    let store = SessionStore::new();
    let (status, view) = send(app(&store, Mark::O), post_move("s1", -1, 0)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(view.error.as_deref(), Some("invalid position"));

    let (_, view) = send(app(&store, Mark::O), post_move("s1", 0, 3)).await;
    assert_eq!(view.error.as_deref(), Some("invalid position"));
    assert!(view.board.iter().flatten().all(Option::is_none));
}

#[tokio::test]
async fn test_human_cannot_beat_computer() {
    let store = SessionStore::new();
    // Play the first empty cell each turn until the game ends.
    let mut view = send(app(&store, Mark::O), get("/games/g")).await.1;
    while view.status == GameStatus::InProgress {
        let (row, col) = (0..3)
            .flat_map(|r| (0..3).map(move |c| (r, c)))
            .find(|&(r, c)| view.board[r][c].is_none())
            .expect("empty cell in running game");
        view = send(app(&store, Mark::O), post_move("g", row as i64, col as i64)).await.1;
    }
    assert_ne!(view.status, GameStatus::XWon);

    let (status, finished) = send(app(&store, Mark::O), post_move("g", 0, 0)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(finished.error.as_deref(), Some("game already finished"));
}

#[tokio::test]
async fn test_reset() {
    let store = SessionStore::new();
    send(app(&store, Mark::O), post_move("s1", 2, 2)).await;
    let request = Request::post("/games/s1/reset")
        .body(Body::empty())
        .expect("request");
    let (status, view) = send(app(&store, Mark::O), request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(view.board.iter().flatten().all(Option::is_none));
    assert_eq!(view.current_player, Mark::X);
    assert_eq!(view.status, GameStatus::InProgress);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let store = SessionStore::new();
    send(app(&store, Mark::O), post_move("a", 0, 0)).await;
    let (_, other) = send(app(&store, Mark::O), get("/games/b")).await;
    assert!(other.board.iter().flatten().all(Option::is_none));
    assert_eq!(store.len().expect("len"), 2);
}
