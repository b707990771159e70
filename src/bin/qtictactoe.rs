//! qtictactoe - learn tic-tac-toe by self-play, then play the result

use anyhow::Result;
use clap::Parser;
use qtictactoe::cli::play::{PlayArgs, execute};

fn main() -> Result<()> {
    execute(PlayArgs::parse())
}
