//! Game engine: runs one episode between two agents and assigns rewards

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::Agent,
    tictactoe::{Board, GameStatus, Mark},
};

/// Marks bound to player 1 and player 2 for every episode
pub const PLAYER_MARKS: [Mark; 2] = [Mark::O, Mark::X];

/// One of the two seats at the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    Player1,
    Player2,
}

impl PlayerId {
    pub fn other(self) -> PlayerId {
        match self {
            PlayerId::Player1 => PlayerId::Player2,
            PlayerId::Player2 => PlayerId::Player1,
        }
    }

    pub fn index(self) -> usize {
        match self {
            PlayerId::Player1 => 0,
            PlayerId::Player2 => 1,
        }
    }
}

/// Reward magnitudes delivered at the end of an episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rewards {
    pub win: f64,
    pub lose: f64,
    pub tie: f64,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            win: 10.0,
            lose: -10.0,
            tie: 0.0,
        }
    }
}

/// Outcome of a game, by seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(PlayerId),
    Draw,
}

/// Win, draw or loss from one seat's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    Win,
    Draw,
    Loss,
}

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub player: PlayerId,
    pub position: usize,
    pub mark: Mark,
}

/// Complete record of a finished episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub starting_player: PlayerId,
    pub player_names: [String; 2],
    pub moves: Vec<Move>,
    pub final_board: Board,
    pub outcome: GameOutcome,
}

impl GameRecord {
    pub fn winner(&self) -> Option<PlayerId> {
        match self.outcome {
            GameOutcome::Win(player) => Some(player),
            GameOutcome::Draw => None,
        }
    }

    pub fn name(&self, player: PlayerId) -> &str {
        &self.player_names[player.index()]
    }

    /// Outcome from `player`'s point of view
    pub fn result_for(&self, player: PlayerId) -> MatchResult {
        match self.outcome {
            GameOutcome::Win(winner) if winner == player => MatchResult::Win,
            GameOutcome::Win(_) => MatchResult::Loss,
            GameOutcome::Draw => MatchResult::Draw,
        }
    }
}

/// One episode: an empty board, two agents and the seat that moves first.
///
/// The mark of each seat is fixed by `PLAYER_MARKS` when the game is built
/// and never changes while it runs.
pub struct Game<'a> {
    board: Board,
    players: [&'a mut dyn Agent; 2],
    marks: [Mark; 2],
    starting_player: PlayerId,
    to_act: PlayerId,
    rewards: Rewards,
    moves: Vec<Move>,
}

impl<'a> Game<'a> {
    /// Create a game whose starting seat is drawn uniformly from `rng`
    pub fn new<R: Rng + ?Sized>(
        player1: &'a mut dyn Agent,
        player2: &'a mut dyn Agent,
        rewards: Rewards,
        rng: &mut R,
    ) -> Self {
        let starting_player = if rng.random_bool(0.5) {
            PlayerId::Player1
        } else {
            PlayerId::Player2
        };
        Self::with_starting_player(player1, player2, rewards, starting_player)
    }

    /// Create a game with an explicit starting seat
    pub fn with_starting_player(
        player1: &'a mut dyn Agent,
        player2: &'a mut dyn Agent,
        rewards: Rewards,
        starting_player: PlayerId,
    ) -> Self {
        Self {
            board: Board::new(),
            players: [player1, player2],
            marks: PLAYER_MARKS,
            starting_player,
            to_act: starting_player,
            rewards,
            moves: Vec::with_capacity(9),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mark(&self, player: PlayerId) -> Mark {
        self.marks[player.index()]
    }

    fn agent(&mut self, player: PlayerId) -> &mut dyn Agent {
        &mut *self.players[player.index()]
    }

    /// Play the episode to completion.
    ///
    /// Each step checks the board with the acting seat's mark first. A
    /// terminal board ends the episode and delivers exactly one reward to
    /// each agent; otherwise the acting seat moves and the turn passes.
    ///
    /// # Errors
    ///
    /// Propagates agent failures and rejects a move on an occupied or
    /// out-of-range cell.
    pub fn play(mut self) -> Result<GameRecord> {
        for player in [PlayerId::Player1, PlayerId::Player2] {
            let mark = self.mark(player);
            self.agent(player).begin_episode(mark);
        }

        loop {
            let actor = self.to_act;
            let other = actor.other();
            let order = [self.mark(actor), self.mark(other)];

            let status = self.board.status(order);
            if status.is_terminal() {
                let outcome = match status {
                    GameStatus::Won(mark) if mark == order[0] => GameOutcome::Win(actor),
                    GameStatus::Won(_) => GameOutcome::Win(other),
                    _ => GameOutcome::Draw,
                };
                self.deliver_rewards(outcome);
                return Ok(self.into_record(outcome));
            }

            self.to_act = other;
            let board = self.board;
            let position = self.agent(actor).select_move(&board)?;
            self.board.place(position, order[0])?;
            self.moves.push(Move {
                player: actor,
                position,
                mark: order[0],
            });
        }
    }

    fn deliver_rewards(&mut self, outcome: GameOutcome) {
        let board = self.board;
        let Rewards { win, lose, tie } = self.rewards;
        match outcome {
            GameOutcome::Win(winner) => {
                self.agent(winner).observe_reward(win, &board);
                self.agent(winner.other()).observe_reward(lose, &board);
            }
            GameOutcome::Draw => {
                self.agent(PlayerId::Player1).observe_reward(tie, &board);
                self.agent(PlayerId::Player2).observe_reward(tie, &board);
            }
        }
    }

    fn into_record(self, outcome: GameOutcome) -> GameRecord {
        GameRecord {
            starting_player: self.starting_player,
            player_names: [
                self.players[0].name().to_string(),
                self.players[1].name().to_string(),
            ],
            moves: self.moves,
            final_board: self.board,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    /// Plays a fixed script and records every reward it receives
    struct Scripted {
        name: &'static str,
        script: Vec<usize>,
        next: usize,
        mark: Option<Mark>,
        rewards: Vec<f64>,
    }

    impl Scripted {
        fn new(name: &'static str, script: Vec<usize>) -> Self {
            Self {
                name,
                script,
                next: 0,
                mark: None,
                rewards: Vec::new(),
            }
        }
    }

    impl Agent for Scripted {
        fn select_move(&mut self, _board: &Board) -> Result<usize> {
            let position = self.script[self.next];
            self.next += 1;
            Ok(position)
        }

        fn observe_reward(&mut self, reward: f64, _board: &Board) {
            self.rewards.push(reward);
        }

        fn begin_episode(&mut self, mark: Mark) {
            self.mark = Some(mark);
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    #[test]
    fn test_starting_player_wins() {
        let mut p1 = Scripted::new("p1", vec![0, 1, 2]);
        let mut p2 = Scripted::new("p2", vec![3, 4]);

        let record = Game::with_starting_player(
            &mut p1,
            &mut p2,
            Rewards::default(),
            PlayerId::Player1,
        )
        .play()
        .unwrap();

        assert_eq!(record.outcome, GameOutcome::Win(PlayerId::Player1));
        assert_eq!(record.final_board.to_string(), "O|O|O\nX|X| \n | | ");
        assert_eq!(record.moves.len(), 5);
        assert_eq!(p1.rewards, vec![10.0]);
        assert_eq!(p2.rewards, vec![-10.0]);
        assert_eq!(p1.mark, Some(Mark::O));
        assert_eq!(p2.mark, Some(Mark::X));
    }

    #[test]
    fn test_second_player_wins_when_player2_starts() {
        let mut p1 = Scripted::new("p1", vec![0, 1, 8]);
        let mut p2 = Scripted::new("p2", vec![3, 4, 5]);

        let record = Game::with_starting_player(
            &mut p1,
            &mut p2,
            Rewards::default(),
            PlayerId::Player2,
        )
        .play()
        .unwrap();

        assert_eq!(record.starting_player, PlayerId::Player2);
        assert_eq!(record.winner(), Some(PlayerId::Player2));
        assert_eq!(record.name(PlayerId::Player2), "p2");
        assert_eq!(record.moves[0].mark, Mark::X);
        assert_eq!(p2.rewards, vec![10.0]);
        assert_eq!(p1.rewards, vec![-10.0]);
    }

    #[test]
    fn test_draw_rewards_both_once() {
        // O|X|O
        // O|X|X
        // X|O|O
        let mut p1 = Scripted::new("p1", vec![0, 2, 3, 7, 8]);
        let mut p2 = Scripted::new("p2", vec![1, 4, 6, 5]);
        let rewards = Rewards {
            win: 1.0,
            lose: -1.0,
            tie: 0.5,
        };

        let record = Game::with_starting_player(&mut p1, &mut p2, rewards, PlayerId::Player1)
            .play()
            .unwrap();

        assert_eq!(record.outcome, GameOutcome::Draw);
        assert!(record.final_board.is_full());
        assert_eq!(p1.rewards, vec![0.5]);
        assert_eq!(p2.rewards, vec![0.5]);
    }

    #[test]
    fn test_occupied_cell_is_an_error() {
        let mut p1 = Scripted::new("p1", vec![4]);
        let mut p2 = Scripted::new("p2", vec![4]);

        let err = Game::with_starting_player(
            &mut p1,
            &mut p2,
            Rewards::default(),
            PlayerId::Player1,
        )
        .play()
        .unwrap_err();

        assert!(matches!(err, crate::Error::InvalidMove { position: 4 }));
    }

    #[test]
    fn test_random_start_uses_both_seats() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut starts = [0usize; 2];
        for _ in 0..200 {
            let mut p1 = Scripted::new("p1", vec![0, 1, 2]);
            let mut p2 = Scripted::new("p2", vec![3, 4, 5]);
            let record = Game::new(&mut p1, &mut p2, Rewards::default(), &mut rng)
                .play()
                .unwrap();
            starts[record.starting_player.index()] += 1;
            assert_eq!(record.winner(), Some(record.starting_player));
        }
        assert!(starts[0] > 50 && starts[1] > 50, "{starts:?}");
    }
}
