//! Line-oriented terminal game against the computer.

use crate::session::GameSession;
use std::io::{BufRead, Write};
use tictactoe::{BLANK, CELLS, FlatBoard, GameStatus, Mark, Minimax, Move};
use tracing::{debug, instrument};

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place a mark at (row, col).
    Place(Move),
    /// Start a new game.
    Reset,
    /// Leave.
    Quit,
}

impl std::str::FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim().to_lowercase();
        match line.as_str() {
            "q" | "quit" | "exit" => return Ok(Command::Quit),
            "r" | "reset" => return Ok(Command::Reset),
            _ => {}
        }
        let parts: Vec<&str> = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .collect();
        match parts.as_slice() {
            [row, col] => {
                let row = row.parse().map_err(|_| format!("bad row: {row}"))?;
                let col = col.parse().map_err(|_| format!("bad column: {col}"))?;
                Ok(Command::Place(Move::new(row, col)))
            }
            _ => Err("expected `row col`, `reset` or `quit`".to_string()),
        }
    }
}

/// Parses a nine-character board such as `"XO..X...."`.
///
/// `.`, `_` and space are blank; `x` and `o` are accepted in either case.
pub fn parse_board(s: &str) -> Result<FlatBoard, String> {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() != CELLS {
        return Err(format!("board must have {CELLS} cells, got {}", chars.len()));
    }
    let mut board = [BLANK; CELLS];
    for (cell, c) in board.iter_mut().zip(chars) {
        *cell = match c {
            '.' | '_' | ' ' => BLANK,
            other => Mark::from_symbol(other)
                .map(Mark::symbol)
                .ok_or_else(|| format!("unexpected cell: {other:?}"))?,
        };
    }
    Ok(board)
}

fn status_line(session: &GameSession) -> String {
    let game = session.game();
    match game.status() {
        GameStatus::InProgress => format!("{} to move", game.current_player()),
        GameStatus::Draw => "Draw!".to_string(),
        status => match status.winner() {
            Some(mark) if mark == session.computer_mark() => format!("{mark} wins. The computer takes it."),
            Some(mark) => format!("{mark} wins. Well played!"),
            None => status.to_string(),
        },
    }
}

fn render(out: &mut impl Write, session: &GameSession) -> std::io::Result<()> {
    writeln!(out, "\n{}\n{}", session.game().board(), status_line(session))
}

/// Runs the game until `quit` or end of input.
#[instrument(skip(input, out))]
pub fn run(input: impl BufRead, mut out: impl Write, computer: Mark) -> std::io::Result<()> {
    let mut session = GameSession::new(computer, Minimax);
    writeln!(
        out,
        "You play {}. Enter `row col` (0-2), `reset` or `quit`.",
        session.human_mark()
    )?;
    render(&mut out, &session)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(Command::Reset) => {
                if let Some(mv) = session.reset() {
                    writeln!(out, "Computer plays {mv}")?;
                }
            }
            Ok(Command::Place(mv)) => match session.play_human(mv) {
                Ok(Some(reply)) => writeln!(out, "Computer plays {reply}")?,
                Ok(None) => {}
                Err(e) => writeln!(out, "Error: {e}")?,
            },
            Err(e) => writeln!(out, "Error: {e}")?,
        }
        render(&mut out, &session)?;
    }
    debug!(status = %session.game().status(), "Terminal game ended");
    Ok(())
}
