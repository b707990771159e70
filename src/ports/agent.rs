//! Agent port - the capability interface every player implements

use crate::{
    Result,
    tictactoe::{Board, Mark},
};

/// Agent trait - unified interface for everything that can take a seat
///
/// The engine is written against this trait only, so learning agents,
/// console players and scripted baselines are interchangeable:
/// - Tabular Q-learning (`QLearningAgent`)
/// - A human at the console (`HumanAgent`)
/// - Baselines (random, minimax)
///
/// # Event Sequence
///
/// For every episode the engine calls:
/// 1. `begin_episode(mark)` once per agent
/// 2. `select_move(board)` on the agent whose turn it is, until the game ends
/// 3. `observe_reward(reward, final_board)` once per agent
///
/// # Examples
///
/// ```no_run
/// use qtictactoe::{ports::Agent, tictactoe::Board};
///
/// struct FirstFree;
///
/// impl Agent for FirstFree {
///     fn select_move(&mut self, board: &Board) -> qtictactoe::Result<usize> {
///         board
///             .available_actions()
///             .first()
///             .copied()
///             .ok_or(qtictactoe::Error::NoValidMoves)
///     }
///
///     fn name(&self) -> &str {
///         "FirstFree"
///     }
/// }
/// ```
pub trait Agent {
    /// Select a move for the given board.
    ///
    /// Returns the cell index (0-8) where the agent places its mark.
    ///
    /// # Errors
    ///
    /// Returns an error if no cell is available or the agent cannot produce
    /// a move at all (e.g. its input stream closed).
    fn select_move(&mut self, board: &Board) -> Result<usize>;

    /// Receive the reward for the agent's most recent move.
    ///
    /// `board` is the board after the episode ended. The default
    /// implementation ignores the reward, which suits non-learning agents.
    fn observe_reward(&mut self, _reward: f64, _board: &Board) {}

    /// Called once before the first move of every episode with the mark the
    /// agent plays for that episode.
    fn begin_episode(&mut self, _mark: Mark) {}

    /// Get the agent's name.
    ///
    /// Used for result lines and summaries.
    fn name(&self) -> &str;

    /// Seed the agent's internal random number generator.
    ///
    /// Pipelines call this when supplied with a deterministic seed.
    /// Stateless agents can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) {}
}
