//! Tic-Tac-Toe board model

pub mod board;
pub mod lines;

pub use board::{Board, Cell, GameStatus, Mark};
pub use lines::{LineAnalyzer, WINNING_LINES};
