//! Population initialization.

use rand::RngCore;

use crate::error::EvoError;
use crate::genome::{Individual, Population};
use crate::pool::GenePool;

/// Creates fresh individuals from a gene pool.
///
/// A breeder is a thin wrapper pairing a pool with the act of filling a
/// population; the environment uses it to set up the initial parent
/// populations.
#[derive(Debug, Clone)]
pub struct Breeder<P: GenePool> {
    pool: P,
}

impl<P: GenePool> Breeder<P> {
    /// Creates a breeder drawing genomes from `pool`.
    pub fn new(pool: P) -> Self {
        Self { pool }
    }

    /// The underlying gene pool.
    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// Breeds a population of `size` fresh, unevaluated individuals.
    pub fn breed(
        &self,
        size: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Population<P::Allele>, EvoError> {
        let mut population = Population::new();
        for _ in 0..size {
            population.push(Individual::new(self.pool.random_genome(rng)?));
        }
        Ok(population)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::IntegerPool;
    use crate::random::create_rng;

    #[test]
    fn test_breed_produces_requested_size() {
        let breeder = Breeder::new(IntegerPool::new(5, 0, 10));
        let mut rng = create_rng(42);
        let population = breeder.breed(20, &mut rng).unwrap();
        assert_eq!(population.size(), 20);
        assert!(population.iter().all(|ind| !ind.fitted()));
        assert!(population.iter().all(|ind| ind.genes().len() == 5));
    }

    #[test]
    fn test_breed_zero_is_empty() {
        let breeder = Breeder::new(IntegerPool::new(5, 0, 10));
        let mut rng = create_rng(42);
        assert!(breeder.breed(0, &mut rng).unwrap().is_empty());
    }
}
