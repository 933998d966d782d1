//! Generational search loop: evaluation, selection, and reproduction.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::compute::Construct;
use crate::schema::{ConfigError, SearchConfig};

use super::fitness::FitnessEvaluator;

/// One construct's score for a generation, tagged with its population index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitnessRecord {
    /// Index into the population that produced this score.
    pub index: usize,
    /// Score under the configured metric.
    pub fitness: u64,
}

/// Aggregate statistics handed to the progress callback after each
/// generation.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Generation number, starting at 0.
    pub generation: usize,
    /// Mean fitness across the whole population.
    pub avg_fitness: f64,
    /// Selection threshold: twice the mean fitness.
    pub bar: f64,
    /// Mean fitness of mutation-produced constructs, 0.0 if there were none.
    pub avg_child_fitness: f64,
    /// Mean fitness of freshly randomized constructs, 0.0 if there were none.
    pub avg_random_fitness: f64,
    /// How many constructs cleared the bar and became parents.
    pub num_parents: usize,
    /// Best fitness in this generation.
    pub generation_best: u64,
    /// The new record holder, present only when the best fitness seen so far
    /// strictly improved this generation.
    pub improved_best: Option<Arc<Construct>>,
    /// Wall-clock time the generation took.
    pub elapsed: Duration,
}

/// Evolutionary search engine over a population of constructs.
///
/// Each generation evaluates every construct in parallel, selects parents
/// whose fitness is at least twice the population mean, hands out child
/// quotas proportional to rank, and backfills the remaining slots with fresh
/// random constructs. The population size is invariant across generations.
///
/// All randomness flows through one seeded generator used only on the
/// coordinating thread; evaluation itself is deterministic, so a fixed seed
/// reproduces the whole run regardless of how many workers rayon uses.
pub struct SearchEngine {
    config: SearchConfig,
    evaluator: FitnessEvaluator,
    rng: StdRng,
    population: Vec<Arc<Construct>>,
    generation: usize,
    best_fitness: Option<u64>,
}

impl SearchEngine {
    /// Create an engine with a freshly randomized initial population.
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        let evaluator = FitnessEvaluator::new(&config)?;
        let seed = config.random_seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let population = (0..config.population_size)
            .map(|_| {
                Arc::new(Construct::random(
                    config.construct_width,
                    config.construct_height,
                    config.alive_probability,
                    &mut rng,
                ))
            })
            .collect();

        Ok(Self {
            config,
            evaluator,
            rng,
            population,
            generation: 0,
            best_fitness: None,
        })
    }

    /// Current population.
    pub fn population(&self) -> &[Arc<Construct>] {
        &self.population
    }

    /// Generations completed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Best fitness seen across all completed generations.
    pub fn best_fitness(&self) -> Option<u64> {
        self.best_fitness
    }

    /// Run one full generation: evaluate, select, reproduce, replace.
    pub fn step_generation(&mut self) -> GenerationReport {
        let start = Instant::now();
        let metric = self.config.metric;
        let evaluator = &self.evaluator;

        // Fork-join over independent constructs; collect preserves order, so
        // the fitness vector is identical for any worker count.
        let fitnesses: Vec<u64> = self
            .population
            .par_iter()
            .map(|construct| evaluator.evaluate(construct).score(metric))
            .collect();

        let population_size = self.population.len();
        let total: u64 = fitnesses.iter().sum();
        let (child_total, child_count) = self
            .population
            .iter()
            .zip(&fitnesses)
            .filter(|(construct, _)| construct.is_child)
            .fold((0u64, 0usize), |(sum, n), (_, &f)| (sum + f, n + 1));
        let random_count = population_size - child_count;

        let avg_fitness = total as f64 / population_size as f64;
        let bar = 2.0 * avg_fitness;
        let avg_child_fitness = guarded_mean(child_total, child_count);
        let avg_random_fitness = guarded_mean(total - child_total, random_count);

        let records = rank_records(&fitnesses);
        let num_parents = count_parents(&records, bar);
        if num_parents == 0 {
            log::debug!(
                "generation {}: no construct reached the bar ({bar:.2}), backfilling with randoms",
                self.generation
            );
        }

        let generation_best = records.first().map_or(0, |r| r.fitness);
        let improved_best = if self.best_fitness.is_none_or(|best| generation_best > best) {
            self.best_fitness = Some(generation_best);
            records
                .first()
                .map(|r| Arc::clone(&self.population[r.index]))
        } else {
            None
        };

        let parents: Vec<Arc<Construct>> = records[..num_parents]
            .iter()
            .map(|r| Arc::clone(&self.population[r.index]))
            .collect();

        // Everything not selected is dropped here; parents survive through
        // their Arc into the next generation.
        self.population = self.assemble_next_generation(&parents);
        debug_assert_eq!(self.population.len(), self.config.population_size);

        let report = GenerationReport {
            generation: self.generation,
            avg_fitness,
            bar,
            avg_child_fitness,
            avg_random_fitness,
            num_parents,
            generation_best,
            improved_best,
            elapsed: start.elapsed(),
        };
        self.generation += 1;
        report
    }

    /// Build the next generation from the selected parents, in rank order:
    /// each parent's quota of mutated children, then the parent itself, then
    /// fresh random constructs for every remaining slot.
    fn assemble_next_generation(&mut self, parents: &[Arc<Construct>]) -> Vec<Arc<Construct>> {
        let size = self.config.population_size;
        let mut next = Vec::with_capacity(size);

        if !parents.is_empty() {
            let (quotas, _leftover) = children_quotas(parents.len(), size - parents.len());
            'fill: for (parent, &quota) in parents.iter().zip(&quotas) {
                for _ in 0..quota {
                    if next.len() == size {
                        break 'fill;
                    }
                    next.push(Arc::new(Construct::child_of(
                        parent,
                        self.config.flip_probability,
                        &mut self.rng,
                    )));
                }
                if next.len() == size {
                    break 'fill;
                }
                next.push(Arc::clone(parent));
            }
        }

        // The remaining slots equal the quota leftover in the normal case,
        // and the whole population when no construct cleared the bar.
        while next.len() < size {
            next.push(Arc::new(Construct::random(
                self.config.construct_width,
                self.config.construct_height,
                self.config.alive_probability,
                &mut self.rng,
            )));
        }

        next
    }

    /// Run the configured number of generations, invoking `callback` with
    /// each generation's report.
    pub fn run_with_callback<F>(&mut self, mut callback: F)
    where
        F: FnMut(&GenerationReport),
    {
        for _ in 0..self.config.generations {
            let report = self.step_generation();
            callback(&report);
        }
    }

    /// Run the configured number of generations without progress reporting.
    pub fn run(&mut self) {
        self.run_with_callback(|_| {});
    }
}

/// Mean that reports 0.0 for an empty group instead of dividing by zero.
fn guarded_mean(total: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

/// Rank fitness values descending. Ties break by ascending population index
/// so that ranking is deterministic.
pub fn rank_records(fitnesses: &[u64]) -> Vec<FitnessRecord> {
    let mut records: Vec<FitnessRecord> = fitnesses
        .iter()
        .enumerate()
        .map(|(index, &fitness)| FitnessRecord { index, fitness })
        .collect();
    records.sort_by(|a, b| b.fitness.cmp(&a.fitness).then(a.index.cmp(&b.index)));
    records
}

/// Count how many of the ranked records clear the selection bar. The walk
/// stops at the first record below the bar.
pub fn count_parents(records: &[FitnessRecord], bar: f64) -> usize {
    records
        .iter()
        .take_while(|r| r.fitness as f64 >= bar)
        .count()
}

/// Proportional child quotas for ranked parents.
///
/// With `harmonic = sum(1/i)` over ranks `1..=num_parents` and
/// `multiplier = floor((num_children - num_parents) / harmonic)`, rank `i`
/// receives `floor(multiplier / i) + 1` children. Higher ranks get more,
/// every parent gets at least one, and the allocation never exceeds
/// `num_children` when `num_children >= num_parents`. Returns the quotas and
/// the unallocated remainder, which the caller fills with fresh randoms.
pub fn children_quotas(num_parents: usize, num_children: usize) -> (Vec<usize>, usize) {
    debug_assert!(num_parents > 0);
    let harmonic: f64 = (1..=num_parents).map(|i| 1.0 / i as f64).sum();
    let spare = num_children.saturating_sub(num_parents);
    let multiplier = (spare as f64 / harmonic).floor() as usize;

    let quotas: Vec<usize> = (1..=num_parents).map(|i| multiplier / i + 1).collect();
    let allocated: usize = quotas.iter().sum();
    (quotas, num_children.saturating_sub(allocated))
}
