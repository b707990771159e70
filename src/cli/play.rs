//! Play command - self-play training followed by the exhibition game

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    adapters::{HumanAgent, OptimalAgent, RandomAgent},
    cli::output::{format_number, format_percent, print_kv, print_section},
    engine::{MatchResult, PlayerId},
    pipeline::{
        Agent, ConsoleObserver, EvaluationResult, ProgressObserver, TrainingConfig,
        TrainingPipeline, TrainingResult,
    },
};

/// Who sits opposite the trained agent in the exhibition
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentKind {
    /// Moves typed at the console
    Human,
    /// Minimax; never loses
    Optimal,
    /// Uniformly random cells
    Random,
}

#[derive(Parser, Debug)]
#[command(
    name = "qtictactoe",
    version,
    about = "Train a tabular Q-learning agent by self-play, then play it at tic-tac-toe"
)]
pub struct PlayArgs {
    /// Number of self-play training episodes
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Exploration rate during training (0.0-1.0)
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Learning rate α (0.0 exclusive to 1.0)
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Discount factor γ (0.0-1.0)
    #[arg(long)]
    pub discount: Option<f64>,

    /// Value assumed for unseen (state, action) pairs
    #[arg(long, allow_negative_numbers = true)]
    pub default_value: Option<f64>,

    /// JSON file with a full training configuration; flags override it
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Exhibition opponent
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentKind::Human)]
    pub opponent: OpponentKind,

    /// Number of exhibition games
    #[arg(long, short = 'g', default_value_t = 1)]
    pub games: usize,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the training progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

impl PlayArgs {
    /// Configuration file (or defaults) with command-line overrides applied
    pub fn training_config(&self) -> Result<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => TrainingConfig::load(path)
                .with_context(|| format!("failed to load config '{}'", path.display()))?,
            None => TrainingConfig::default(),
        };

        if let Some(episodes) = self.episodes {
            config.episodes = episodes;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(epsilon) = self.epsilon {
            config.agent.epsilon = epsilon;
        }
        if let Some(learning_rate) = self.learning_rate {
            config.agent.learning_rate = learning_rate;
        }
        if let Some(discount) = self.discount {
            config.agent.discount_factor = discount;
        }
        if let Some(default_value) = self.default_value {
            config.agent.default_value = default_value;
        }

        config.validate().context("invalid training configuration")?;
        Ok(config)
    }
}

#[derive(Debug, Serialize)]
struct SummaryFile<'a> {
    config: &'a TrainingConfig,
    training: &'a TrainingResult,
    q_table_sizes: [usize; 2],
    opponent: OpponentKind,
    exhibition: &'a EvaluationResult,
}

fn write_summary(path: &Path, summary: &SummaryFile<'_>) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create summary file '{}'", path.display()))?;
    to_writer_pretty(file, summary).context("failed to write summary JSON")?;
    Ok(())
}

fn build_opponent(kind: OpponentKind) -> Box<dyn Agent> {
    match kind {
        OpponentKind::Human => Box::new(HumanAgent::stdio()),
        OpponentKind::Optimal => Box::new(OptimalAgent::new("Optimal")),
        OpponentKind::Random => Box::new(RandomAgent::new("Random")),
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    if args.games == 0 {
        bail!("--games must be at least 1");
    }
    let config = args.training_config()?;

    let mut pipeline = TrainingPipeline::new(config.clone());
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if args.opponent == OpponentKind::Human || args.games == 1 {
        pipeline = pipeline.with_exhibition_observer(Box::new(ConsoleObserver::stdout()));
    }

    let (mut player1, mut player2) = pipeline.build_agents()?;

    println!("Training the algo...");
    let training = pipeline.train(&mut player1, &mut player2)?;
    println!("Training is Done!");

    print_section("Training");
    print_kv("Episodes", &format_number(training.episodes));
    print_kv("Player 1 wins", &format_number(training.player1_wins));
    print_kv("Player 2 wins", &format_number(training.player2_wins));
    print_kv("Draws", &format_number(training.draws));
    print_kv("Draw rate", &format_percent(training.draw_rate));
    print_kv("Player 1 Q-values", &format_number(player1.q_table().len()));
    print_kv("Player 2 Q-values", &format_number(player2.q_table().len()));

    let mut opponent = build_opponent(args.opponent);
    let mut exhibition = EvaluationResult {
        games: args.games,
        wins: 0,
        draws: 0,
        losses: 0,
    };
    for _ in 0..args.games {
        let record = pipeline.exhibition(&mut player1, opponent.as_mut())?;
        match record.result_for(PlayerId::Player1) {
            MatchResult::Win => exhibition.wins += 1,
            MatchResult::Draw => exhibition.draws += 1,
            MatchResult::Loss => exhibition.losses += 1,
        }
    }

    if args.games > 1 {
        print_section(&format!("Exhibition vs {}", opponent.name()));
        print_kv("Games", &format_number(exhibition.games));
        print_kv("Wins", &format_percent(exhibition.win_rate()));
        print_kv("Draws", &format_percent(exhibition.draw_rate()));
        print_kv("Losses", &format_percent(exhibition.loss_rate()));
    }

    if let Some(path) = &args.summary {
        let summary = SummaryFile {
            config: &config,
            training: &training,
            q_table_sizes: [player1.q_table().len(), player2.q_table().len()],
            opponent: args.opponent,
            exhibition: &exhibition,
        };
        if let Err(err) = write_summary(path, &summary) {
            eprintln!("Warning: {err:#}");
        }
    }

    Ok(())
}
