//! Configuration schema for the search.

mod config;

pub use config::{ConfigError, FitnessMetric, SearchConfig};
