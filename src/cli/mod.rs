//! Command-line interface: train two agents by self-play, then play an
//! exhibition game against a human or a built-in opponent.

pub mod output;
pub mod play;
