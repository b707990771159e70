//! Q-table implementation for tabular Q-learning

use std::collections::HashMap;

use crate::tictactoe::Board;

/// Q-table mapping (board snapshot, cell) pairs to Q-values
///
/// Entries are created lazily with the default value the first time a
/// pair is read through [`QTable::value`] and are never removed.
#[derive(Debug, Clone)]
pub struct QTable {
    /// Q-values: (state, action_position) -> Q-value
    q_values: HashMap<(Board, usize), f64>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
    /// Initial Q-value for unseen state-action pairs
    default_value: f64,
}

impl QTable {
    /// Create a new Q-table
    pub fn new(learning_rate: f64, discount_factor: f64, default_value: f64) -> Self {
        Self {
            q_values: HashMap::new(),
            learning_rate,
            discount_factor,
            default_value,
        }
    }

    /// Q-value for a state-action pair, inserting the default if unseen
    pub fn value(&mut self, state: &Board, action: usize) -> f64 {
        *self
            .q_values
            .entry((*state, action))
            .or_insert(self.default_value)
    }

    /// Stored Q-value, without creating an entry
    pub fn get(&self, state: &Board, action: usize) -> Option<f64> {
        self.q_values.get(&(*state, action)).copied()
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: Board, action: usize, value: f64) {
        self.q_values.insert((state, action), value);
    }

    /// Maximum Q-value over the given actions in a state (lazily initialized)
    pub fn max_q(&mut self, state: &Board, actions: &[usize]) -> f64 {
        actions
            .iter()
            .map(|&action| self.value(state, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// All actions whose Q-value equals the maximum, in input order
    pub fn best_actions(&mut self, state: &Board, actions: &[usize]) -> Vec<usize> {
        let values: Vec<f64> = actions.iter().map(|&a| self.value(state, a)).collect();
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        actions
            .iter()
            .zip(values)
            .filter(|&(_, q)| q == max)
            .map(|(&action, _)| action)
            .collect()
    }

    /// Q-learning update
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// `next_actions` is the domain of the max; an empty domain contributes 0.
    pub fn q_learning_update(
        &mut self,
        state: Board,
        action: usize,
        reward: f64,
        next_state: &Board,
        next_actions: &[usize],
    ) {
        let current_q = self.value(&state, action);
        let max_next_q = if next_actions.is_empty() {
            0.0
        } else {
            self.max_q(next_state, next_actions)
        };
        let td_target = reward + self.discount_factor * max_next_q;
        let td_error = td_target - current_q;
        let new_q = current_q + self.learning_rate * td_error;
        self.set(state, action, new_q);
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    pub fn default_value(&self) -> f64 {
        self.default_value
    }

    /// Get total number of Q-values stored
    pub fn len(&self) -> usize {
        self.q_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Mark;

    fn state() -> Board {
        Board::new()
    }

    fn next_state() -> Board {
        Board::new().with_move(4, Mark::X).unwrap()
    }

    #[test]
    fn test_qtable_lazy_initialization() {
        let mut qtable = QTable::new(0.5, 0.9, 1.0);
        assert!(qtable.is_empty());
        assert_eq!(qtable.get(&state(), 0), None);

        assert_eq!(qtable.value(&state(), 0), 1.0);
        assert_eq!(qtable.get(&state(), 0), Some(1.0));
        assert_eq!(qtable.len(), 1);
    }

    #[test]
    fn test_qtable_set_get() {
        let mut qtable = QTable::new(0.5, 0.9, 0.0);
        qtable.set(state(), 4, 1.5);
        assert_eq!(qtable.value(&state(), 4), 1.5);
    }

    #[test]
    fn test_max_q() {
        let mut qtable = QTable::new(0.5, 0.9, 0.0);
        qtable.set(state(), 0, 0.5);
        qtable.set(state(), 1, 1.5);
        qtable.set(state(), 2, 0.8);

        assert_eq!(qtable.max_q(&state(), &[0, 1, 2]), 1.5);
    }

    #[test]
    fn test_best_actions_reports_ties() {
        let mut qtable = QTable::new(0.5, 0.9, 0.0);
        qtable.set(state(), 0, 2.0);
        qtable.set(state(), 3, 2.0);
        qtable.set(state(), 5, 1.0);

        assert_eq!(qtable.best_actions(&state(), &[0, 3, 5]), vec![0, 3]);
        assert_eq!(qtable.best_actions(&state(), &[3, 5]), vec![3]);
    }

    #[test]
    fn test_q_learning_update() {
        let mut qtable = QTable::new(0.5, 0.9, 0.0);
        qtable.set(next_state(), 1, 1.0);
        qtable.set(next_state(), 2, 2.0);

        qtable.q_learning_update(state(), 4, 0.0, &next_state(), &[1, 2]);

        // Q(s,4) = 0.0 + 0.5 * (0.0 + 0.9 * 2.0 - 0.0) = 0.9
        let updated_q = qtable.value(&state(), 4);
        assert!((updated_q - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_update_with_empty_domain_uses_reward_only() {
        let mut qtable = QTable::new(1.0, 0.9, 5.0);
        qtable.q_learning_update(state(), 0, -10.0, &next_state(), &[]);
        assert_eq!(qtable.value(&state(), 0), -10.0);
    }
}
