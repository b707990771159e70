//! Training and evaluation pipeline
//!
//! This module provides:
//! - Self-play training between two learning agents
//! - The exhibition game against a non-learning opponent
//! - Head-to-head evaluation
//! - Observers for progress, metrics and console output

pub mod evaluation;
pub mod observers;
pub mod training;

pub use evaluation::{EvaluationResult, evaluate};
pub use observers::{ConsoleObserver, MetricsObserver, ProgressObserver};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Agent, Observer};
