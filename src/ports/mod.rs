//! Ports (trait boundaries) between the game engine and the agents and
//! observers plugged into it.

pub mod agent;
pub mod observer;

pub use agent::Agent;
pub use observer::Observer;
