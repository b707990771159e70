//! Tabular Q-learning for tic-tac-toe
//!
//! This crate provides:
//! - A 3x3 board with move validation and terminal detection
//! - A Q-learning agent with an epsilon-greedy policy
//! - A game engine that runs episodes between any two agents
//! - Self-play training, an exhibition game and head-to-head evaluation
//! - Human, random and minimax opponents

pub mod adapters;
pub mod cli;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;

pub use engine::{Game, GameOutcome, GameRecord, MatchResult, PlayerId, Rewards};
pub use error::{Error, Result};
pub use q_learning::{QLearningAgent, QLearningConfig, QTable};
pub use tictactoe::{Board, Cell, GameStatus, Mark};
