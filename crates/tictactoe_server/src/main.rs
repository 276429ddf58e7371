//! Tic-tac-toe - HTTP server, terminal game and move suggestions.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use tictactoe::{Mark, Minimax, MoveSelector, convert};
use tictactoe_server::{AppState, ServerConfig, SessionStore, play, router};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Serve { config, host, port } => run_server(&config, host, port).await,
        Command::Play {
            config,
            computer_mark,
        } => run_play(&config, computer_mark),
        Command::Suggest { board, mark } => run_suggest(&board, mark),
    }
}

/// Run the HTTP game server
#[instrument(skip_all)]
async fn run_server(config_path: &Path, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = ServerConfig::load(config_path)?.with_overrides(host, port, None);

    let app = router(AppState::new(SessionStore::new(), *config.computer_mark()));
    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port()))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host(), config.port()))?;

    info!(
        host = %config.host(),
        port = config.port(),
        computer = %config.computer_mark(),
        "Server ready"
    );
    axum::serve(listener, app).await?;
    Ok(())
}

/// Run a terminal game on stdin/stdout
#[instrument(skip_all)]
fn run_play(config_path: &Path, computer_mark: Option<Mark>) -> Result<()> {
    let config = ServerConfig::load(config_path)?.with_overrides(None, None, computer_mark);
    let stdin = std::io::stdin();
    play::run(stdin.lock(), std::io::stdout(), *config.computer_mark())?;
    Ok(())
}

/// Print the selector's choice for a board
#[instrument]
fn run_suggest(board: &str, mark: Mark) -> Result<()> {
    let flat = play::parse_board(board).map_err(anyhow::Error::msg)?;
    match Minimax.best_move(&flat, mark.symbol()) {
        Some(index) => {
            let mv = convert::flat_index_to_move(index).context("Index off the board")?;
            println!("{index} {mv}");
        }
        None => println!("-1"),
    }
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
