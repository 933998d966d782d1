//! Evolutionary search over construct populations.
//!
//! The search system consists of:
//!
//! - **Fitness evaluation** (`fitness`): drops a construct on a fresh board
//!   and simulates until the state repeats or the budget runs out
//! - **Generational loop** (`search`): parallel evaluation, bar-based parent
//!   selection, rank-proportional child quotas, random backfill
//!
//! # Example
//!
//! ```rust,no_run
//! use life_forge::compute::SearchEngine;
//! use life_forge::schema::SearchConfig;
//!
//! let config = SearchConfig {
//!     population_size: 100,
//!     generations: 20,
//!     ..Default::default()
//! };
//!
//! let mut engine = SearchEngine::new(config).expect("valid configuration");
//! engine.run_with_callback(|report| {
//!     println!(
//!         "generation {}: avg fitness {:.2}, bar {:.2}",
//!         report.generation, report.avg_fitness, report.bar
//!     );
//! });
//! ```

mod fitness;
mod search;

pub use fitness::{Evaluation, FitnessEvaluator};
pub use search::{
    FitnessRecord, GenerationReport, SearchEngine, children_quotas, count_parents, rank_records,
};
