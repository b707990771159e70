//! Hyper-parameters for the Q-learning agent

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Learning rate, discount, exploration and initial value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QLearningConfig {
    /// α, in (0, 1]
    pub learning_rate: f64,
    /// γ, in [0, 1]
    pub discount_factor: f64,
    /// ε, in [0, 1]
    pub epsilon: f64,
    /// Value assumed for a (state, action) pair on first access
    pub default_value: f64,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.3,
            discount_factor: 0.9,
            epsilon: 0.4,
            default_value: 1.0,
        }
    }
}

impl QLearningConfig {
    /// Check every parameter against its admissible range
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(invalid(format!(
                "learning rate {} must be in (0, 1]",
                self.learning_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(invalid(format!(
                "discount factor {} must be in [0, 1]",
                self.discount_factor
            )));
        }
        validate_epsilon(self.epsilon)?;
        if !self.default_value.is_finite() {
            return Err(invalid(format!(
                "default value {} must be finite",
                self.default_value
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_epsilon(epsilon: f64) -> Result<()> {
    if (0.0..=1.0).contains(&epsilon) {
        Ok(())
    } else {
        Err(invalid(format!("epsilon {epsilon} must be in [0, 1]")))
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfiguration { message }
}
