//! Tabular Q-learning
//!
//! The agent keeps one value per (board snapshot, cell) pair and learns
//! from the single reward delivered when an episode ends:
//!
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') − Q(s,a)]
//!
//! where `s` is the board the agent last moved from, `a` the cell it chose,
//! `s'` the final board, and `a'` ranges over the cells that were free in `s`.
//! Boards are used as keys verbatim; symmetric positions are distinct states.
//!
//! ## Usage Example
//!
//! ```no_run
//! use qtictactoe::q_learning::QLearningAgent;
//!
//! let agent = QLearningAgent::new(
//!     0.3, // learning_rate
//!     0.9, // discount_factor
//!     0.4, // epsilon (exploration)
//!     1.0, // default value for unseen pairs
//! )
//! .with_seed(42);
//! ```

pub mod agent;
pub mod config;
pub mod q_table;

pub use agent::QLearningAgent;
pub use config::QLearningConfig;
pub use q_table::QTable;
