//! Observer port - abstraction for training observation
//!
//! Observers keep console output and statistics out of the training loop.

use crate::{Result, engine::GameRecord};

/// Observer trait for monitoring training and exhibition games
///
/// # Event Sequence
///
/// 1. `on_training_start(total_games)` - Once at the beginning
/// 2. For each game:
///    - `on_game_start(game_num)`
///    - `on_game_end(game_num, record)`
/// 3. `on_training_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use qtictactoe::{engine::GameRecord, ports::Observer};
///
/// struct CountingObserver {
///     games: usize,
/// }
///
/// impl Observer for CountingObserver {
///     fn on_game_end(&mut self, _game_num: usize, _record: &GameRecord) -> qtictactoe::Result<()> {
///         self.games += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer {
    /// Called when a run of games starts.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a game starts.
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a game ends, after rewards were delivered.
    fn on_game_end(&mut self, _game_num: usize, _record: &GameRecord) -> Result<()> {
        Ok(())
    }

    /// Called when the run of games finishes.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
