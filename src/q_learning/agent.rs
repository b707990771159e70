//! Q-learning agent
//!
//! ε-greedy move selection over a [`QTable`] plus a one-step TD update when
//! the episode's reward arrives.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Error, Result,
    ports::Agent,
    q_learning::{
        config::{QLearningConfig, validate_epsilon},
        q_table::QTable,
    },
    tictactoe::{Board, Mark},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular Q-learning agent
///
/// The table persists across episodes for the lifetime of the agent. The
/// board and cell of the agent's latest move are remembered until the next
/// move, because the reward for a move arrives only after the opponent has
/// replied or the game has ended.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    name: String,
    q_table: QTable,
    epsilon: f64,
    rng: StdRng,
    rng_seed: Option<u64>,
    /// Board observed and cell chosen on the latest move of this episode
    last_move: Option<(Board, usize)>,
}

impl QLearningAgent {
    /// Create a new Q-learning agent
    ///
    /// # Arguments
    ///
    /// * `learning_rate` - α parameter (0.0 exclusive to 1.0)
    /// * `discount_factor` - γ parameter (0.0 to 1.0)
    /// * `epsilon` - Exploration rate (0.0 to 1.0)
    /// * `default_value` - Initial Q-value for unseen state-action pairs
    pub fn new(learning_rate: f64, discount_factor: f64, epsilon: f64, default_value: f64) -> Self {
        debug_assert!(
            QLearningConfig {
                learning_rate,
                discount_factor,
                epsilon,
                default_value,
            }
            .validate()
            .is_ok(),
            "Q-learning parameters out of range"
        );
        Self {
            name: "Q-Learning".to_string(),
            q_table: QTable::new(learning_rate, discount_factor, default_value),
            epsilon,
            rng: build_rng(None),
            rng_seed: None,
            last_move: None,
        }
    }

    /// Create an agent from a validated configuration
    pub fn from_config(config: &QLearningConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            config.learning_rate,
            config.discount_factor,
            config.epsilon,
            config.default_value,
        ))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Change the exploration rate; 0 means pure exploitation
    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        validate_epsilon(epsilon)?;
        self.epsilon = epsilon;
        Ok(())
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn q_table_mut(&mut self) -> &mut QTable {
        &mut self.q_table
    }

    /// Stored values for the board's available cells, skipping unseen pairs
    pub fn q_values(&self, board: &Board) -> Vec<(usize, f64)> {
        board
            .available_actions()
            .into_iter()
            .filter_map(|action| self.q_table.get(board, action).map(|q| (action, q)))
            .collect()
    }

    /// Board and cell of the latest move this episode, if any
    pub fn last_move(&self) -> Option<(Board, usize)> {
        self.last_move
    }

    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// ε-greedy action selection with uniform tie-breaking
    fn select_action_epsilon_greedy(&mut self, state: &Board, actions: &[usize]) -> Result<usize> {
        if self.rng.random::<f64>() < self.epsilon {
            // Explore: random action
            return actions.choose(&mut self.rng).copied().ok_or(Error::NoValidMoves);
        }

        // Exploit: uniformly among the maximizers
        let best = self.q_table.best_actions(state, actions);
        let choice = if best.len() > 1 {
            best.choose(&mut self.rng)
        } else {
            best.first()
        };
        choice.copied().ok_or(Error::NoValidMoves)
    }
}

impl Agent for QLearningAgent {
    fn select_move(&mut self, board: &Board) -> Result<usize> {
        let state = *board;
        let actions = state.available_actions();
        if actions.is_empty() {
            return Err(Error::NoValidMoves);
        }

        let action = self.select_action_epsilon_greedy(&state, &actions)?;
        self.last_move = Some((state, action));
        Ok(action)
    }

    /// TD update for the latest move.
    ///
    /// The max is taken over the cells that were free on the board the agent
    /// moved from, looked up at `board`. Without a move this episode the
    /// reward is ignored.
    fn observe_reward(&mut self, reward: f64, board: &Board) {
        let Some((state, action)) = self.last_move else {
            return;
        };
        let actions = state.available_actions();
        self.q_table
            .q_learning_update(state, action, reward, board, &actions);
    }

    fn begin_episode(&mut self, _mark: Mark) {
        self.last_move = None;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
    }
}
