//! Command-line interface for the tic-tac-toe server.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictactoe::Mark;

/// Tic-tac-toe against an unbeatable minimax opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Play tic-tac-toe against a minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to the TOML config file (optional)
        #[arg(short, long, default_value = "tictactoe.toml")]
        config: PathBuf,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Play in the terminal
    Play {
        /// Path to the TOML config file (optional)
        #[arg(short, long, default_value = "tictactoe.toml")]
        config: PathBuf,

        /// Mark the computer plays, X or O (overrides config)
        #[arg(long)]
        computer_mark: Option<Mark>,
    },

    /// Print the computer's chosen cell index for a board
    Suggest {
        /// Nine cells in row-major order, `.` for blank (e.g. `XX.O.....`)
        board: String,

        /// Mark to move, X or O
        mark: Mark,
    },
}
