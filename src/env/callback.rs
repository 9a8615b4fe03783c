//! Observer hooks around the evolutionary loop.
//!
//! Callbacks let a caller watch state that the engine otherwise
//! overwrites between generations. The environment fires them at four
//! points: once per initial population (`on_start`), around every
//! inner generation (`on_generation_start` / `on_generation_end`), and
//! once per surviving population (`on_end`).
//!
//! Callbacks are observers only — they must not panic under normal
//! operation, since the engine wraps them in no recovery logic.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::EvoError;
use crate::genome::{Gene, Population};
use crate::pool::GenePool;

/// Observer interface consumed by
/// [`Environment`](crate::env::Environment).
///
/// All hooks default to no-ops; implement the ones of interest.
pub trait Callback<G: Gene> {
    /// Called once per initial population, after breeding and initial
    /// evaluation.
    fn on_start(&mut self, _population: &Population<G>) {}

    /// Called at the start of each inner generation with the current
    /// parents.
    fn on_generation_start(&mut self, _population: &Population<G>) {}

    /// Called at the end of each inner generation with the selected
    /// survivors.
    fn on_generation_end(&mut self, _population: &Population<G>) {}

    /// Called once per surviving population when the run finishes.
    fn on_end(&mut self, _population: &Population<G>) {}
}

/// Tracks the best and worst individual of every generation.
///
/// The tracked individuals are copies, appended in generation order —
/// the population's insertion-order guarantee turns them into a
/// fitness history.
#[derive(Debug, Clone)]
pub struct BestWorst<G: Gene> {
    /// Best individual of each generation, in order.
    pub best: Population<G>,
    /// Worst individual of each generation, in order.
    pub worst: Population<G>,
}

impl<G: Gene> BestWorst<G> {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            best: Population::new(),
            worst: Population::new(),
        }
    }
}

impl<G: Gene> Default for BestWorst<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Gene> Callback<G> for BestWorst<G> {
    fn on_start(&mut self, _population: &Population<G>) {
        self.best = Population::new();
        self.worst = Population::new();
    }

    fn on_generation_end(&mut self, population: &Population<G>) {
        if let (Some(best), Some(worst)) = (population.best(), population.worst()) {
            self.best.push(best.clone());
            self.worst.push(worst.clone());
        }
    }
}

/// Records best, average and worst fitness per generation.
#[derive(Debug, Clone, Default)]
pub struct FitnessTracker {
    /// Best fitness per generation.
    pub best: Vec<f64>,
    /// Mean fitness per generation.
    pub average: Vec<f64>,
    /// Worst fitness per generation.
    pub worst: Vec<f64>,
}

impl FitnessTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    fn record<G: Gene>(&mut self, population: &Population<G>) {
        if let (Some(best), Some(worst)) = (population.best(), population.worst()) {
            self.best.push(best.fitness());
            self.worst.push(worst.fitness());
            self.average.push(population.mean_fitness());
        }
    }
}

impl<G: Gene> Callback<G> for FitnessTracker {
    fn on_start(&mut self, _population: &Population<G>) {
        self.best.clear();
        self.average.clear();
        self.worst.clear();
    }

    fn on_generation_start(&mut self, population: &Population<G>) {
        self.record(population);
    }

    fn on_end(&mut self, population: &Population<G>) {
        self.record(population);
    }
}

/// Measures gene diversity per generation.
///
/// For each locus, diversity is `1 - Σ (count_v / n)²` over the allele
/// values `v` present at that locus — zero when the whole population
/// agrees, approaching one when every individual differs. The reported
/// value is the mean over loci, rescaled by `k / (k - 1)` for a pool of
/// `k` alleles so that a uniformly random population scores close
/// to 1.
///
/// Requires genomes of constant length over a finite allele set
/// (integer or boolean pools).
#[derive(Debug, Clone)]
pub struct Diversity {
    allele_count: usize,
    history: Vec<f64>,
}

impl Diversity {
    /// Creates a diversity tracker for the given pool.
    ///
    /// # Errors
    /// Returns [`EvoError::InvalidConfig`] when the pool has no finite
    /// allele count (metric or tree-structured pools) or fewer than two
    /// alleles.
    pub fn new<P: GenePool>(pool: &P) -> Result<Self, EvoError> {
        match pool.allele_count() {
            Some(count) if count >= 2 => Ok(Self { allele_count: count, history: Vec::new() }),
            Some(_) => Err(EvoError::InvalidConfig(
                "diversity is meaningless for pools with fewer than two alleles".into(),
            )),
            None => Err(EvoError::InvalidConfig(
                "diversity requires a finite allele set of constant-length genomes".into(),
            )),
        }
    }

    /// Scaled mean gene diversity per generation, in `[0, 1]`.
    pub fn diversity(&self) -> &[f64] {
        &self.history
    }
}

impl<G: Gene + Eq + Hash> Callback<G> for Diversity {
    fn on_start(&mut self, _population: &Population<G>) {
        self.history.clear();
    }

    fn on_generation_end(&mut self, population: &Population<G>) {
        if population.is_empty() {
            return;
        }
        let length = population[0].genes().len();
        let n = population.size() as f64;
        let mut total = 0.0;
        for locus in 0..length {
            let mut counts: HashMap<&G, usize> = HashMap::new();
            for individual in population.iter() {
                *counts.entry(&individual.genes()[locus]).or_insert(0) += 1;
            }
            let homogeneity: f64 =
                counts.values().map(|&c| (c as f64 / n).powi(2)).sum();
            total += 1.0 - homogeneity;
        }
        let scale = self.allele_count as f64 / (self.allele_count - 1) as f64;
        self.history.push(scale * total / length as f64);
    }
}
