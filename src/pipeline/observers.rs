//! Observer implementations for training and exhibition games

use std::io::{self, Write};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Error, Result,
    engine::{GameOutcome, GameRecord, PlayerId},
    ports::Observer,
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    player1_wins: usize,
    player2_wins: usize,
    draws: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            player1_wins: 0,
            player2_wins: 0,
            draws: 0,
        }
    }

    fn message(&self) -> String {
        format!(
            "P1:{} P2:{} D:{}",
            self.player1_wins, self.player2_wins, self.draws
        )
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, record: &GameRecord) -> Result<()> {
        match record.outcome {
            GameOutcome::Win(PlayerId::Player1) => self.player1_wins += 1,
            GameOutcome::Win(PlayerId::Player2) => self.player2_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            // Redrawing the message every episode dominates short runs.
            if game_num.is_multiple_of(100) {
                pb.set_message(self.message());
            }
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks outcome counts and game lengths
#[derive(Debug, Default)]
pub struct MetricsObserver {
    wins: [usize; 2],
    draws: usize,
    total_games: usize,
    move_counts: Vec<usize>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wins(&self, player: PlayerId) -> usize {
        self.wins[player.index()]
    }

    pub fn draws(&self) -> usize {
        self.draws
    }

    pub fn total_games(&self) -> usize {
        self.total_games
    }

    /// Share of games won by the given seat
    pub fn win_rate(&self, player: PlayerId) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.wins(player) as f64 / self.total_games as f64
        }
    }

    /// Average number of moves per game
    pub fn average_game_length(&self) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            self.move_counts.iter().sum::<usize>() as f64 / self.move_counts.len() as f64
        }
    }
}

impl Observer for MetricsObserver {
    fn on_game_end(&mut self, _game_num: usize, record: &GameRecord) -> Result<()> {
        match record.outcome {
            GameOutcome::Win(player) => self.wins[player.index()] += 1,
            GameOutcome::Draw => self.draws += 1,
        }
        self.total_games += 1;
        self.move_counts.push(record.moves.len());
        Ok(())
    }
}

/// Prints the final board and the result line of every game
pub struct ConsoleObserver<W> {
    output: W,
}

impl ConsoleObserver<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}

impl<W: Write> Observer for ConsoleObserver<W> {
    fn on_game_end(&mut self, _game_num: usize, record: &GameRecord) -> Result<()> {
        writeln!(self.output, "{}", record.final_board)?;
        match record.winner() {
            Some(winner) => writeln!(self.output, "\n {} won!", record.name(winner))?,
            None => writeln!(self.output, "It's a tie!")?,
        }
        self.output.flush()?;
        Ok(())
    }
}
