//! Integration operators: merging offspring into a parent population.
//!
//! Integration operators run at the community level over a
//! two-population batch `(offspring, parents)` and return the single
//! merged population.
//!
//! # References
//!
//! - De Jong (1975), *An Analysis of the Behavior of a Class of Genetic
//!   Adaptive Systems* (crowding)

use rand::seq::index;
use rand::RngCore;

use super::iteration::Iteration;
use super::operator::Operator;
use crate::genome::{Community, Gene};

/// Target size of a merged population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSize {
    /// Match the parent population's size.
    Parents,
    /// Match the offspring population's size.
    Offspring,
    /// An explicit size.
    Exactly(usize),
}

/// Merge preferring offspring.
///
/// Takes offspring first, in order, truncating when there are more than
/// the target size; any remaining slots are filled with parents in
/// their original order.
#[derive(Debug, Clone, Copy)]
pub struct OffspringFirst {
    size: TargetSize,
}

impl OffspringFirst {
    /// Creates a merge with the given target size.
    ///
    /// # Panics
    /// Panics if an explicit target size is zero.
    pub fn new(size: TargetSize) -> Self {
        if let TargetSize::Exactly(n) = size {
            assert!(n > 0, "explicit merge size must be at least 1");
        }
        Self { size }
    }
}

impl Default for OffspringFirst {
    /// Merges to the parent population's size.
    fn default() -> Self {
        Self::new(TargetSize::Parents)
    }
}

impl<G: Gene> Operator<Community<G>> for OffspringFirst {
    fn iteration(&self) -> Iteration {
        Iteration::Straight { batch_size: 2 }
    }

    fn arity(&self) -> (usize, usize) {
        (2, 1)
    }

    fn apply(&self, batch: &Community<G>, _rng: &mut dyn RngCore) -> Community<G> {
        let offspring = &batch[0];
        let parents = &batch[1];
        let target = match self.size {
            TargetSize::Parents => parents.size(),
            TargetSize::Offspring => offspring.size(),
            TargetSize::Exactly(n) => n,
        };
        assert!(
            target <= offspring.size() + parents.size(),
            "populations of {} and {} are too small to merge into {target}",
            offspring.size(),
            parents.size()
        );

        if offspring.size() >= target {
            return Community::from(vec![offspring.slice(0..target)]);
        }
        let mut merged = offspring.clone();
        merged.integrate(parents.slice(0..target - offspring.size()));
        Community::from(vec![merged])
    }
}

/// Crowding merge.
///
/// The merged population starts as a copy of the parents. For each
/// offspring, `crowding_factor` distinct parents are sampled; the
/// sampled parent **most similar** to the offspring (highest count of
/// equal gene positions, against the original parent population) is
/// replaced in place. Replacing the nearest neighbour keeps population
/// diversity higher than random replacement.
#[derive(Debug, Clone, Copy)]
pub struct Crowded {
    crowding_factor: usize,
}

impl Crowded {
    /// Creates a crowding merge comparing each offspring to
    /// `crowding_factor` sampled parents.
    ///
    /// # Panics
    /// Panics if `crowding_factor` is zero.
    pub fn new(crowding_factor: usize) -> Self {
        assert!(crowding_factor > 0, "crowding factor must be at least 1");
        Self { crowding_factor }
    }
}

impl<G: Gene> Operator<Community<G>> for Crowded {
    fn iteration(&self) -> Iteration {
        Iteration::Straight { batch_size: 2 }
    }

    fn arity(&self) -> (usize, usize) {
        (2, 1)
    }

    fn apply(&self, batch: &Community<G>, rng: &mut dyn RngCore) -> Community<G> {
        let offspring = &batch[0];
        let parents = &batch[1];
        assert!(
            self.crowding_factor <= parents.size(),
            "crowding factor {} exceeds the parent population of {}",
            self.crowding_factor,
            parents.size()
        );

        let mut merged = parents.clone();
        for child in offspring.iter() {
            let sampled = index::sample(rng, parents.size(), self.crowding_factor);
            let mut replaced = None;
            let mut best_similarity = 0;
            for parent_index in sampled {
                let similarity = child
                    .genes()
                    .iter()
                    .zip(parents[parent_index].genes())
                    .filter(|(a, b)| a == b)
                    .count();
                if replaced.is_none() || similarity > best_similarity {
                    best_similarity = similarity;
                    replaced = Some(parent_index);
                }
            }
            let index = replaced.expect("crowding factor is at least 1");
            merged.replace(index, child.clone());
        }
        Community::from(vec![merged])
    }
}
