//! Tic-tac-toe rules and a deterministic minimax opponent.
//!
//! - [`Board`]: the 3x3 grid with place-if-empty and line detection
//! - [`Game`]: turn order, move validation and terminal status
//! - [`convert`]: the flat symbol view used by move selectors
//! - [`Minimax`]: an exhaustive [`MoveSelector`]
//!
//! # Example
//!
//! ```
//! use tictactoe::{Game, Mark, Minimax, MoveSelector, convert};
//!
//! let mut game = Game::new();
//! let index = Minimax::new()
//!     .best_move(&game.flat_board(), Mark::X.symbol())
//!     .expect("empty board has moves");
//! let mv = convert::flat_index_to_move(index).expect("index on board");
//! game.attempt_move(mv).expect("legal move");
//! assert_eq!(game.board().get(1, 1), Some(Mark::X));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod ai;
mod board;
pub mod convert;
mod game;
mod types;

pub use ai::{Minimax, MoveSelector, position_priority};
pub use board::Board;
pub use convert::{BLANK, FlatBoard};
pub use game::{Game, GameSnapshot, MoveError};
pub use types::{CELLS, GameStatus, Mark, Move, SIZE};
