//! Perfect-play opponent (memoized minimax)

use std::collections::HashMap;

use rand::{SeedableRng, random, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Error, Result,
    ports::Agent,
    tictactoe::{Board, Mark},
};

/// Optimal policy agent (minimax)
///
/// Chooses uniformly among the moves with the best game-theoretic value for
/// its mark, so it never loses. The mark comes from `begin_episode` or
/// [`OptimalAgent::with_mark`].
pub struct OptimalAgent {
    name: String,
    mark: Option<Mark>,
    cache: HashMap<(Board, Mark), i32>,
    rng: StdRng,
}

impl OptimalAgent {
    /// Create a new optimal agent
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mark: None,
            cache: HashMap::new(),
            rng: StdRng::seed_from_u64(random()),
        }
    }

    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.mark = Some(mark);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Value of `board` for the side about to place `to_move`:
    /// 1 forced win, 0 draw, -1 forced loss.
    fn negamax(&mut self, board: &Board, to_move: Mark) -> i32 {
        let key = (*board, to_move);
        if let Some(&value) = self.cache.get(&key) {
            return value;
        }

        let value = if board.has_won(to_move.opponent()) {
            -1
        } else if board.has_won(to_move) {
            1
        } else if board.is_full() {
            0
        } else {
            let mut best = i32::MIN;
            for pos in board.available_actions() {
                if let Ok(next) = board.with_move(pos, to_move) {
                    best = best.max(-self.negamax(&next, to_move.opponent()));
                }
            }
            best
        };

        self.cache.insert(key, value);
        value
    }

    /// Evaluate every available move for `mark` and return its minimax value.
    pub fn evaluate_moves(&mut self, board: &Board, mark: Mark) -> Vec<(usize, i32)> {
        let mut moves_with_values = Vec::new();
        for pos in board.available_actions() {
            if let Ok(next) = board.with_move(pos, mark) {
                let value = -self.negamax(&next, mark.opponent());
                moves_with_values.push((pos, value));
            }
        }
        moves_with_values
    }
}

impl Agent for OptimalAgent {
    fn select_move(&mut self, board: &Board) -> Result<usize> {
        let mark = self.mark.ok_or_else(|| Error::InvalidConfiguration {
            message: format!("optimal agent '{}' has no mark assigned", self.name),
        })?;

        let moves_with_values = self.evaluate_moves(board, mark);
        let best_value = moves_with_values
            .iter()
            .map(|&(_, value)| value)
            .max()
            .ok_or(Error::NoValidMoves)?;
        let best_moves: Vec<usize> = moves_with_values
            .into_iter()
            .filter(|&(_, value)| value == best_value)
            .map(|(pos, _)| pos)
            .collect();

        best_moves
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoValidMoves)
    }

    fn begin_episode(&mut self, mark: Mark) {
        self.mark = Some(mark);
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_takes_immediate_win() {
        let mut agent = OptimalAgent::new("Optimal").with_mark(Mark::X).with_seed(1);
        let board = Board::from_string("XX OO    ").unwrap();
        assert_eq!(agent.select_move(&board).unwrap(), 2);
    }

    #[test]
    fn test_blocks_opponent() {
        // O to move must block X on cell 2
        let mut agent = OptimalAgent::new("Optimal").with_mark(Mark::O).with_seed(1);
        let board = Board::from_string("XX  O    ").unwrap();
        assert_eq!(agent.select_move(&board).unwrap(), 2);
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let mut agent = OptimalAgent::new("Optimal");
        let values = agent.evaluate_moves(&Board::new(), Mark::X);
        assert_eq!(values.len(), 9);
        assert_eq!(values.iter().map(|&(_, v)| v).max(), Some(0));
    }

    #[test]
    fn test_requires_mark() {
        let mut agent = OptimalAgent::new("Optimal");
        let err = agent.select_move(&Board::new()).unwrap_err();
        assert!(err.to_string().contains("no mark"));
    }
}
