//! Common test utilities for the qtictactoe test suite.

#![allow(dead_code)]

use qtictactoe::{
    Board, Result,
    ports::Agent,
    tictactoe::{GameStatus, Mark},
};

/// Parse a nine-character board, panicking on malformed input.
pub fn board(s: &str) -> Board {
    Board::from_string(s).unwrap()
}

/// Every board reachable from the empty board with alternating marks,
/// starting with either mark, stopping at terminal positions.
///
/// Each entry pairs the board with the mark whose move it would be.
pub fn reachable_boards() -> Vec<(Board, Mark)> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for first in [Mark::X, Mark::O] {
        let mut stack = vec![(Board::new(), first)];
        while let Some((board, to_move)) = stack.pop() {
            if !seen.insert((board, to_move)) {
                continue;
            }
            out.push((board, to_move));
            if board.status([to_move, to_move.opponent()]) != GameStatus::InProgress {
                continue;
            }
            for pos in board.available_actions() {
                let next = board.with_move(pos, to_move).unwrap();
                stack.push((next, to_move.opponent()));
            }
        }
    }
    out
}

/// Agent that plays a fixed list of cells and records its rewards.
pub struct ScriptedAgent {
    name: String,
    script: Vec<usize>,
    next: usize,
    pub rewards: Vec<f64>,
    pub episodes: usize,
}

impl ScriptedAgent {
    pub fn new(name: &str, script: &[usize]) -> Self {
        Self {
            name: name.to_string(),
            script: script.to_vec(),
            next: 0,
            rewards: Vec::new(),
            episodes: 0,
        }
    }
}

impl Agent for ScriptedAgent {
    fn select_move(&mut self, _board: &Board) -> Result<usize> {
        let position = self.script[self.next];
        self.next += 1;
        Ok(position)
    }

    fn observe_reward(&mut self, reward: f64, _board: &Board) {
        self.rewards.push(reward);
    }

    fn begin_episode(&mut self, _mark: Mark) {
        self.next = 0;
        self.episodes += 1;
    }

    fn name(&self) -> &str {
        &self.name
    }
}
