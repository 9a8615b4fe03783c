//! Selection operators.
//!
//! Selection decides which individuals (or whole populations) survive
//! into the next step of the pipeline. All selection here is
//! maximizing: higher fitness wins.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection
//!   Schemes Used in Genetic Algorithms"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used
//!   in Evolutionary Algorithms"

use rand::RngCore;

use super::iteration::Iteration;
use super::operator::Operator;
use crate::error::EvoError;
use crate::genome::{Community, Gene, Individual, Population};

/// Tournament selection.
///
/// Each tournament draws `size` distinct individuals uniformly at
/// random and keeps a copy of the fittest (first-encountered maximum on
/// ties). One tournament is held per individual in the input
/// population, so the output has the same size as the input.
///
/// Higher `size` means stronger selection pressure; `size = 1` is a
/// uniform random copy.
#[derive(Debug, Clone, Copy)]
pub struct Tournament {
    size: usize,
}

impl Tournament {
    /// Creates a tournament of the given size.
    ///
    /// # Panics
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "tournament size must be at least 1");
        Self { size }
    }
}

impl<G: Gene> Operator<Population<G>> for Tournament {
    fn iteration(&self) -> Iteration {
        Iteration::NRandomBatches { batch_size: self.size, total: None }
    }

    fn arity(&self) -> (usize, usize) {
        (self.size, 1)
    }

    fn apply(&self, batch: &Population<G>, _rng: &mut dyn RngCore) -> Population<G> {
        let winner = batch.best().expect("tournament batches are never empty");
        Population::from(vec![winner.clone()])
    }
}

/// Truncation selection: keep the best `out_size` of every `in_size`
/// individuals.
///
/// The input is consumed in consecutive chunks of `in_size`; each chunk
/// is sorted descending by fitness and the top `out_size` copies are
/// kept.
#[derive(Debug, Clone, Copy)]
pub struct Best {
    in_size: usize,
    out_size: usize,
}

impl Best {
    /// Creates a truncation selection cutting `in_size` down to
    /// `out_size`.
    ///
    /// # Errors
    /// Returns [`EvoError::InvalidConfig`] if `out_size` exceeds
    /// `in_size` or either is zero.
    pub fn new(in_size: usize, out_size: usize) -> Result<Self, EvoError> {
        if in_size == 0 || out_size == 0 {
            return Err(EvoError::InvalidConfig(
                "selection sizes must be at least 1".into(),
            ));
        }
        if in_size < out_size {
            return Err(EvoError::InvalidConfig(format!(
                "cannot select the best {out_size} out of only {in_size}"
            )));
        }
        Ok(Self { in_size, out_size })
    }
}

impl<G: Gene> Operator<Population<G>> for Best {
    fn iteration(&self) -> Iteration {
        Iteration::Straight { batch_size: self.in_size }
    }

    fn arity(&self) -> (usize, usize) {
        (self.in_size, self.out_size)
    }

    fn apply(&self, batch: &Population<G>, _rng: &mut dyn RngCore) -> Population<G> {
        let mut ranked: Vec<Individual<G>> = batch.iter().cloned().collect();
        ranked.sort_by(|a, b| {
            b.fitness()
                .partial_cmp(&a.fitness())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(self.out_size);
        Population::from(ranked)
    }
}

/// Population-level truncation selection by mean fitness.
///
/// Sorts the populations of a community descending by their mean
/// individual fitness and keeps the top `out_size`.
#[derive(Debug, Clone, Copy)]
pub struct BestMean {
    in_size: usize,
    out_size: usize,
}

impl BestMean {
    /// Creates a population selection cutting `in_size` populations
    /// down to `out_size`.
    ///
    /// # Errors
    /// Returns [`EvoError::InvalidConfig`] if `out_size` exceeds
    /// `in_size` or either is zero.
    pub fn new(in_size: usize, out_size: usize) -> Result<Self, EvoError> {
        if in_size == 0 || out_size == 0 {
            return Err(EvoError::InvalidConfig(
                "selection sizes must be at least 1".into(),
            ));
        }
        if in_size < out_size {
            return Err(EvoError::InvalidConfig(format!(
                "cannot select the best {out_size} populations out of only {in_size}"
            )));
        }
        Ok(Self { in_size, out_size })
    }
}

impl<G: Gene> Operator<Community<G>> for BestMean {
    fn iteration(&self) -> Iteration {
        Iteration::Straight { batch_size: self.in_size }
    }

    fn arity(&self) -> (usize, usize) {
        (self.in_size, self.out_size)
    }

    fn apply(&self, batch: &Community<G>, _rng: &mut dyn RngCore) -> Community<G> {
        let mut ranked: Vec<Population<G>> = batch.iter().cloned().collect();
        ranked.sort_by(|a, b| {
            b.mean_fitness()
                .partial_cmp(&a.mean_fitness())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(self.out_size);
        Community::from(ranked)
    }
}
