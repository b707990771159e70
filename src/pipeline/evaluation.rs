//! Head-to-head evaluation of a (frozen) agent

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    engine::{Game, MatchResult, PlayerId, Rewards},
    ports::Agent,
};

/// Tally of an evaluation run, from the evaluated agent's perspective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl EvaluationResult {
    fn rate(&self, count: usize) -> f64 {
        if self.games > 0 {
            count as f64 / self.games as f64
        } else {
            0.0
        }
    }

    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }
}

/// Play `games` episodes with `agent` in the player 1 seat.
///
/// Rewards are delivered as in training, so a learning agent keeps updating
/// its table unless the caller evaluates a clone. Set ε to 0 beforehand to
/// measure the greedy policy.
pub fn evaluate<R: Rng + ?Sized>(
    agent: &mut dyn Agent,
    opponent: &mut dyn Agent,
    games: usize,
    rewards: Rewards,
    rng: &mut R,
) -> Result<EvaluationResult> {
    let mut result = EvaluationResult {
        games,
        wins: 0,
        draws: 0,
        losses: 0,
    };

    for _ in 0..games {
        let record = Game::new(&mut *agent, &mut *opponent, rewards, rng).play()?;
        match record.result_for(PlayerId::Player1) {
            MatchResult::Win => result.wins += 1,
            MatchResult::Draw => result.draws += 1,
            MatchResult::Loss => result.losses += 1,
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::adapters::{OptimalAgent, RandomAgent};

    #[test]
    fn test_optimal_never_loses_to_random() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut optimal = OptimalAgent::new("Optimal").with_seed(2);
        let mut random = RandomAgent::with_seed("Random", 3);

        let result = evaluate(&mut optimal, &mut random, 200, Rewards::default(), &mut rng).unwrap();

        assert_eq!(result.games, 200);
        assert_eq!(result.wins + result.draws + result.losses, 200);
        assert_eq!(result.losses, 0);
        assert!(result.win_rate() > 0.5, "{result:?}");
    }

    #[test]
    fn test_optimal_self_play_always_draws() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut a = OptimalAgent::new("A").with_seed(5);
        let mut b = OptimalAgent::new("B").with_seed(6);

        let result = evaluate(&mut a, &mut b, 50, Rewards::default(), &mut rng).unwrap();

        assert_eq!(result.draws, 50);
        assert_eq!(result.draw_rate(), 1.0);
    }

    #[test]
    fn test_zero_games() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut a = RandomAgent::with_seed("A", 1);
        let mut b = RandomAgent::with_seed("B", 2);
        let result = evaluate(&mut a, &mut b, 0, Rewards::default(), &mut rng).unwrap();
        assert_eq!(result.loss_rate(), 0.0);
    }
}
