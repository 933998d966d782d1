//! Configuration types for the evolutionary search.

use serde::{Deserialize, Serialize};

/// Top-level search configuration.
///
/// Everything the search needs is a named value here rather than a scattered
/// constant: population size, generation count, construct and board
/// dimensions, the per-evaluation iteration budget, and the two probabilities
/// driving initialization and mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of constructs per generation.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Number of generations to run before stopping.
    #[serde(default = "default_generations")]
    pub generations: usize,
    /// Construct width in cells.
    #[serde(default = "default_construct_size")]
    pub construct_width: usize,
    /// Construct height in cells.
    #[serde(default = "default_construct_size")]
    pub construct_height: usize,
    /// Board width in cells. Must strictly exceed the construct width.
    #[serde(default = "default_board_size")]
    pub board_width: usize,
    /// Board height in cells. Must strictly exceed the construct height.
    #[serde(default = "default_board_size")]
    pub board_height: usize,
    /// Maximum simulation steps per fitness evaluation.
    #[serde(default = "default_iteration_budget")]
    pub iteration_budget: u32,
    /// Probability that a freshly randomized cell starts alive.
    #[serde(default = "default_alive_probability")]
    pub alive_probability: f64,
    /// Per-cell flip probability when mutating a parent into a child.
    #[serde(default = "default_flip_probability")]
    pub flip_probability: f64,
    /// Which fitness signal ranks constructs.
    #[serde(default)]
    pub metric: FitnessMetric,
    /// Random seed for reproducibility. `None` seeds from entropy.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            generations: default_generations(),
            construct_width: default_construct_size(),
            construct_height: default_construct_size(),
            board_width: default_board_size(),
            board_height: default_board_size(),
            iteration_budget: default_iteration_budget(),
            alive_probability: default_alive_probability(),
            flip_probability: default_flip_probability(),
            metric: FitnessMetric::default(),
            random_seed: None,
        }
    }
}

fn default_population_size() -> usize {
    1000
}
fn default_generations() -> usize {
    1000
}
fn default_construct_size() -> usize {
    6
}
fn default_board_size() -> usize {
    50
}
fn default_iteration_budget() -> u32 {
    300
}
fn default_alive_probability() -> f64 {
    0.2
}
fn default_flip_probability() -> f64 {
    0.1
}

/// Fitness signal selection.
///
/// Every evaluation computes both signals; this chooses which one the
/// selection step ranks by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FitnessMetric {
    /// Iteration at which the board state first repeats, or the budget if it
    /// never does. Higher means a longer non-repeating trajectory.
    #[default]
    CycleLength,
    /// Total alive-cell visits accumulated over the run. Rewards constructs
    /// that cover a lot of board before settling.
    VisitedCells,
}

impl SearchConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::InvalidPopulationSize);
        }
        if self.construct_width == 0 || self.construct_height == 0 {
            return Err(ConfigError::InvalidConstructDimensions);
        }
        if self.construct_width >= self.board_width || self.construct_height >= self.board_height {
            return Err(ConfigError::ConstructTooLarge {
                construct: (self.construct_width, self.construct_height),
                board: (self.board_width, self.board_height),
            });
        }
        if self.iteration_budget == 0 {
            return Err(ConfigError::InvalidIterationBudget);
        }
        for (name, value) in [
            ("alive_probability", self.alive_probability),
            ("flip_probability", self.flip_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be non-zero")]
    InvalidPopulationSize,
    #[error("Construct dimensions must be non-zero")]
    InvalidConstructDimensions,
    #[error(
        "Construct {construct:?} must be strictly smaller than the board {board:?} in both dimensions"
    )]
    ConstructTooLarge {
        construct: (usize, usize),
        board: (usize, usize),
    },
    #[error("Iteration budget must be non-zero")]
    InvalidIterationBudget,
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_population() {
        let config = SearchConfig {
            population_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPopulationSize)
        ));
    }

    #[test]
    fn rejects_construct_matching_board() {
        let config = SearchConfig {
            construct_width: 50,
            construct_height: 6,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ConstructTooLarge { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let config = SearchConfig {
            flip_probability: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProbability {
                name: "flip_probability",
                ..
            })
        ));
    }

    #[test]
    fn rejects_zero_budget() {
        let config = SearchConfig {
            iteration_budget: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidIterationBudget)
        ));
    }
}
