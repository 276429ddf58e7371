//! Tic-tac-toe against a minimax opponent, served over HTTP or played in a
//! terminal.
//!
//! # Architecture
//!
//! - **Session**: a human-versus-computer game; the computer replies after
//!   every accepted human move
//! - **Store**: JSON snapshots keyed by session id, one game per session
//! - **Routes**: axum JSON API that restores, updates and saves a session
//!   per request
//! - **Play**: line-oriented terminal game
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_server::{AppState, ServerConfig, SessionStore, router};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::load("tictactoe.toml")?;
//! let app = router(AppState::new(SessionStore::new(), *config.computer_mark()));
//! let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
pub mod play;
mod routes;
mod session;

pub use config::{ConfigError, ServerConfig};
pub use routes::{ApiError, AppState, GameView, MoveRequest, router};
pub use session::{GameSession, SessionError, SessionId, SessionStore, TurnError};
