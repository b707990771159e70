//! Self-play training and the exhibition game

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    engine::{Game, GameOutcome, GameRecord, Rewards},
    ports::{Agent, Observer},
    q_learning::{QLearningAgent, QLearningConfig},
};

/// Seed offsets derived from `TrainingConfig::seed`
const PLAYER1_SEED_OFFSET: u64 = 1;
const PLAYER2_SEED_OFFSET: u64 = 2;
const OPPONENT_SEED_OFFSET: u64 = 3;

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of self-play episodes
    pub episodes: usize,

    /// Random seed; drives the start coin and every agent
    pub seed: Option<u64>,

    /// Hyper-parameters shared by both learning agents
    pub agent: QLearningConfig,

    /// Reward magnitudes
    pub rewards: Rewards,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 40_000,
            seed: None,
            agent: QLearningConfig::default(),
            rewards: Rewards::default(),
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        self.agent.validate()?;
        let Rewards { win, lose, tie } = self.rewards;
        if ![win, lose, tie].iter().all(|r| r.is_finite()) {
            return Err(Error::InvalidConfiguration {
                message: format!("rewards must be finite (win={win}, lose={lose}, tie={tie})"),
            });
        }
        Ok(())
    }

    /// Load a configuration from a JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            operation: format!("open config '{}'", path.display()),
            source,
        })?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    fn derived_seed(&self, offset: u64) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(offset))
    }
}

/// Result of a training run, counted per seat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes played
    pub episodes: usize,

    pub player1_wins: usize,

    pub player2_wins: usize,

    pub draws: usize,

    /// Share of episodes ending in a draw
    pub draw_rate: f64,
}

impl TrainingResult {
    pub fn new(episodes: usize, player1_wins: usize, player2_wins: usize, draws: usize) -> Self {
        let draw_rate = if episodes > 0 {
            draws as f64 / episodes as f64
        } else {
            0.0
        };
        Self {
            episodes,
            player1_wins,
            player2_wins,
            draws,
            draw_rate,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Runs self-play episodes between two persistent learning agents, then an
/// exhibition game against a non-learning opponent.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
    exhibition_observers: Vec<Box<dyn Observer>>,
    exhibitions_played: usize,
    rng: StdRng,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self {
            config,
            observers: Vec::new(),
            exhibition_observers: Vec::new(),
            exhibitions_played: 0,
            rng,
        }
    }

    /// Add an observer for the training episodes
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Add an observer for exhibition games
    pub fn with_exhibition_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.exhibition_observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Build the two self-play agents, seeded from the pipeline seed
    pub fn build_agents(&self) -> Result<(QLearningAgent, QLearningAgent)> {
        let mut player1 = QLearningAgent::from_config(&self.config.agent)?.with_name("Player 1");
        let mut player2 = QLearningAgent::from_config(&self.config.agent)?.with_name("Player 2");
        if let Some(seed) = self.config.derived_seed(PLAYER1_SEED_OFFSET) {
            player1.set_rng_seed(seed);
        }
        if let Some(seed) = self.config.derived_seed(PLAYER2_SEED_OFFSET) {
            player2.set_rng_seed(seed);
        }
        Ok((player1, player2))
    }

    /// Play `episodes` fresh games between the same two agents.
    ///
    /// Value tables accumulate across episodes because the agents outlive
    /// every `Game`.
    pub fn train(
        &mut self,
        player1: &mut dyn Agent,
        player2: &mut dyn Agent,
    ) -> Result<TrainingResult> {
        self.config.validate()?;
        let episodes = self.config.episodes;

        for observer in &mut self.observers {
            observer.on_training_start(episodes)?;
        }

        let mut wins = [0usize; 2];
        let mut draws = 0;
        for game_num in 0..episodes {
            let record = self.play_episode(game_num, player1, player2)?;
            match record.outcome {
                GameOutcome::Win(player) => wins[player.index()] += 1,
                GameOutcome::Draw => draws += 1,
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(episodes, wins[0], wins[1], draws))
    }

    /// Freeze exploration on `trained` and play one game against `opponent`.
    ///
    /// The trained agent sits in the player 1 seat. The opponent is reseeded
    /// from the pipeline seed before the first exhibition. Only exhibition
    /// observers are notified.
    pub fn exhibition(
        &mut self,
        trained: &mut QLearningAgent,
        opponent: &mut dyn Agent,
    ) -> Result<GameRecord> {
        trained.set_epsilon(0.0)?;
        let game_num = self.exhibitions_played;
        if game_num == 0 {
            if let Some(seed) = self.config.derived_seed(OPPONENT_SEED_OFFSET) {
                opponent.set_rng_seed(seed);
            }
        }

        self.exhibitions_played += 1;
        for observer in &mut self.exhibition_observers {
            observer.on_game_start(game_num)?;
        }
        let record = Game::new(trained, opponent, self.config.rewards, &mut self.rng).play()?;
        for observer in &mut self.exhibition_observers {
            observer.on_game_end(game_num, &record)?;
        }
        Ok(record)
    }

    fn play_episode(
        &mut self,
        game_num: usize,
        player1: &mut dyn Agent,
        player2: &mut dyn Agent,
    ) -> Result<GameRecord> {
        for observer in &mut self.observers {
            observer.on_game_start(game_num)?;
        }

        let record = Game::new(player1, player2, self.config.rewards, &mut self.rng).play()?;

        for observer in &mut self.observers {
            observer.on_game_end(game_num, &record)?;
        }
        Ok(record)
    }
}
