//! A heuristic look-ahead agent for playing the board game 'Connect 4'
//!
//! The agent expands every move sequence up to a fixed depth, scores the
//! resulting positions with a line-scanning heuristic and backs the scores
//! up the tree with a decaying minimax.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_ai::{board::Board, search::{Search, SearchConfig}};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // X has three in the bottom row, the fourth completes the line
//! let board = Board::from_moves("112233")?;
//! let mut search = Search::new(SearchConfig::default().with_seed(7))?;
//!
//! assert_eq!(search.best_move(&board), 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod evaluator;

pub mod tree;

pub mod search;

pub mod player;

pub mod selfplay;


/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of tokens in a row needed to win
pub const CONNECT: usize = 4;

/// The number of diagonals running in each direction
pub const NUM_DIAGONALS: usize = WIDTH + HEIGHT - 1;

// a win must fit on the board in every direction
const_assert!(CONNECT <= WIDTH && CONNECT <= HEIGHT);
// the longest line is a row, lines are buffered in arrays of this size
const_assert!(HEIGHT <= WIDTH);
