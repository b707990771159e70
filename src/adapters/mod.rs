//! Agents that do not learn
//!
//! These implement the [`Agent`](crate::ports::Agent) port so they can take
//! a seat opposite a learning agent.

pub mod human;
pub mod optimal;
pub mod random;

pub use human::HumanAgent;
pub use optimal::OptimalAgent;
pub use random::RandomAgent;
