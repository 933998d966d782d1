//! Simulation and search computation.

mod board;
mod cycle;
pub mod evolution;
mod grid;

pub use board::Board;
pub use cycle::{CycleDetector, FingerprintFn, default_fingerprint};
pub use evolution::{Evaluation, FitnessEvaluator, FitnessRecord, GenerationReport, SearchEngine};
pub use grid::{Construct, Grid};
