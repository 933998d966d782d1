//! Fitness evaluation for constructs.
//!
//! A construct is dropped onto the center of a fresh board and simulated
//! until the board state repeats or the iteration budget runs out.

use crate::compute::{Board, Construct, CycleDetector};
use crate::schema::{ConfigError, FitnessMetric, SearchConfig};

/// Raw signals produced by one evaluation run.
///
/// Both signals are always computed; [`FitnessMetric`] picks which one a
/// search ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// Iteration at which the board state first repeated, or the budget if
    /// it never did. Always within `[0, iteration_budget]`.
    pub cycle_fitness: u32,
    /// Iteration at which the repeated state was originally recorded, when a
    /// repeat was found. The cycle period is `cycle_fitness - first_seen`.
    pub first_seen: Option<u32>,
    /// Total alive-cell visits accumulated over the run.
    pub total_visits: u64,
}

impl Evaluation {
    /// Score under the given metric.
    pub fn score(&self, metric: FitnessMetric) -> u64 {
        match metric {
            FitnessMetric::CycleLength => u64::from(self.cycle_fitness),
            FitnessMetric::VisitedCells => self.total_visits,
        }
    }
}

/// Drives the simulator and cycle detector to score a single construct.
///
/// Each evaluation allocates its own board and history and shares nothing
/// mutable, so evaluations of independent constructs can run on any number
/// of parallel workers without changing the result.
pub struct FitnessEvaluator {
    board_width: usize,
    board_height: usize,
    iteration_budget: u32,
}

impl FitnessEvaluator {
    /// Create an evaluator for the configured board size and budget.
    ///
    /// Fails fast if the configuration is invalid — in particular when the
    /// construct does not fit strictly inside the board.
    pub fn new(config: &SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            board_width: config.board_width,
            board_height: config.board_height,
            iteration_budget: config.iteration_budget,
        })
    }

    /// Evaluate one construct.
    pub fn evaluate(&self, construct: &Construct) -> Evaluation {
        let mut board = Board::new(self.board_width, self.board_height);
        board.place_centered(&construct.grid);

        // The pre-step state is deliberately not recorded: the first repeat
        // can only be found against states produced by stepping.
        let mut detector = CycleDetector::new();

        for iteration in 0..self.iteration_budget {
            board.step();
            if let Some(first_seen) = detector.check_and_record(board.cells().cells(), iteration) {
                return Evaluation {
                    cycle_fitness: iteration,
                    first_seen: Some(first_seen),
                    total_visits: board.total_visits(),
                };
            }
        }

        Evaluation {
            cycle_fitness: self.iteration_budget,
            first_seen: None,
            total_visits: board.total_visits(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::Grid;
    use proptest::prelude::*;

    fn evaluator(construct: usize, board: usize, budget: u32) -> FitnessEvaluator {
        FitnessEvaluator::new(&SearchConfig {
            population_size: 4,
            construct_width: construct,
            construct_height: construct,
            board_width: board,
            board_height: board,
            iteration_budget: budget,
            ..Default::default()
        })
        .unwrap()
    }

    fn construct_from(width: usize, height: usize, alive: &[(usize, usize)]) -> Construct {
        let mut grid = Grid::empty(width, height);
        for &(x, y) in alive {
            grid.set(x, y, true);
        }
        Construct {
            grid,
            is_child: false,
        }
    }

    #[test]
    fn block_repeats_immediately() {
        // A block is stable: the first step reproduces the placed state,
        // iteration 0 records it, iteration 1 sees it again.
        let block = construct_from(3, 3, &[(0, 0), (1, 0), (0, 1), (1, 1)]);
        let eval = evaluator(3, 10, 5).evaluate(&block);
        assert_eq!(eval.cycle_fitness, 1);
        assert_eq!(eval.first_seen, Some(0));
    }

    #[test]
    fn blinker_scores_its_period() {
        let blinker = construct_from(3, 3, &[(0, 1), (1, 1), (2, 1)]);
        let eval = evaluator(3, 20, 50).evaluate(&blinker);
        assert_eq!(eval.cycle_fitness, 2);
        // Repeat of the state produced at iteration 0: period 2.
        assert_eq!(eval.first_seen, Some(0));
    }

    #[test]
    fn empty_construct_settles_at_once() {
        let empty = construct_from(3, 3, &[]);
        let eval = evaluator(3, 10, 5).evaluate(&empty);
        assert_eq!(eval.cycle_fitness, 1);
        assert_eq!(eval.total_visits, 0);
    }

    #[test]
    fn budget_caps_fitness() {
        // R-pentomino in a cramped 10x10 with a tiny budget: whatever it
        // does, fitness cannot exceed the budget.
        let r_pentomino = construct_from(3, 3, &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)]);
        let eval = evaluator(3, 10, 3).evaluate(&r_pentomino);
        assert!(eval.cycle_fitness <= 3);
    }

    #[test]
    fn block_visit_totals() {
        // Detection happens at iteration 1, after two steps; the four block
        // cells were alive before each step.
        let block = construct_from(3, 3, &[(0, 0), (1, 0), (0, 1), (1, 1)]);
        let eval = evaluator(3, 10, 5).evaluate(&block);
        assert_eq!(eval.total_visits, 8);
        assert_eq!(eval.score(FitnessMetric::VisitedCells), 8);
        assert_eq!(eval.score(FitnessMetric::CycleLength), 1);
    }

    #[test]
    fn oversized_construct_is_a_config_error() {
        let config = SearchConfig {
            construct_width: 10,
            construct_height: 10,
            board_width: 10,
            board_height: 10,
            ..Default::default()
        };
        assert!(matches!(
            FitnessEvaluator::new(&config),
            Err(ConfigError::ConstructTooLarge { .. })
        ));
    }

    proptest! {
        #[test]
        fn fitness_stays_within_budget(bits in proptest::collection::vec(any::<bool>(), 36)) {
            let mut grid = Grid::empty(6, 6);
            for (i, &alive) in bits.iter().enumerate() {
                grid.set(i % 6, i / 6, alive);
            }
            let construct = Construct { grid, is_child: false };
            let eval = evaluator(6, 16, 40).evaluate(&construct);
            prop_assert!(eval.cycle_fitness <= 40);
        }

        #[test]
        fn evaluation_is_deterministic(bits in proptest::collection::vec(any::<bool>(), 36)) {
            let mut grid = Grid::empty(6, 6);
            for (i, &alive) in bits.iter().enumerate() {
                grid.set(i % 6, i / 6, alive);
            }
            let construct = Construct { grid, is_child: false };
            let ev = evaluator(6, 16, 30);
            prop_assert_eq!(ev.evaluate(&construct), ev.evaluate(&construct));
        }
    }
}
