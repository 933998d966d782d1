//! Life Forge - Evolutionary search for long-lived Game of Life patterns.
//!
//! This crate searches, via a fitness-driven generational loop, for small
//! binary seed patterns ("constructs") that produce long non-repeating
//! dynamics when simulated under Conway's Game of Life rule. A construct's
//! fitness is the number of steps its board runs before revisiting a state,
//! capped by a fixed iteration budget.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration types and validation
//! - `compute`: The board simulator, cycle detection, and the evolutionary
//!   search loop
//!
//! # Example
//!
//! ```rust,no_run
//! use life_forge::{SearchConfig, SearchEngine};
//!
//! let config = SearchConfig {
//!     population_size: 200,
//!     generations: 50,
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let mut engine = SearchEngine::new(config).expect("valid configuration");
//! engine.run_with_callback(|report| {
//!     println!(
//!         "generation {}: avg fitness {:.2}",
//!         report.generation, report.avg_fitness
//!     );
//! });
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{Board, Construct, FitnessEvaluator, Grid, SearchEngine};
pub use schema::{ConfigError, FitnessMetric, SearchConfig};
