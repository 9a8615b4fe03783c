//! Gene pools: factories for random genomes.
//!
//! A gene pool defines the set of alleles a genome can be built from
//! and knows how to draw a fresh random genome. Three representations
//! are provided:
//!
//! - [`IntegerPool`]: fixed-length genomes of uniform integers.
//! - [`NumberPool`]: fixed-length genomes of uniform reals.
//! - [`GpPool`](crate::gp::GpPool): typed expression trees for genetic
//!   programming.
//!
//! Pools are immutable configuration; the random source is passed into
//! every draw.

use rand::{Rng, RngCore};

use crate::error::EvoError;
use crate::genome::Gene;

/// Factory abstraction for random genome creation.
///
/// # Errors
///
/// Genome creation is infallible for the numeric pools; the GP pool
/// reports a [`lookup failure`](EvoError::UnknownAlleleType) when a
/// requested node type has no registered allele.
pub trait GenePool {
    /// The allele type produced by this pool.
    type Allele: Gene;

    /// Draws a fresh random genome.
    fn random_genome(&self, rng: &mut dyn RngCore) -> Result<Vec<Self::Allele>, EvoError>;

    /// The number of distinct alleles a single gene can take, when that
    /// number is finite and meaningful (used by the diversity
    /// callback). `None` for metric and tree-structured pools.
    fn allele_count(&self) -> Option<usize> {
        None
    }
}

/// Pool of constant-length integer genomes with genes drawn uniformly
/// from `[lower, upper]` (both inclusive).
#[derive(Debug, Clone, Copy)]
pub struct IntegerPool {
    length: usize,
    lower: i64,
    upper: i64,
}

impl IntegerPool {
    /// Creates a pool for genomes of `length` integers in
    /// `[lower, upper]`.
    ///
    /// # Panics
    /// Panics if `lower > upper`.
    pub fn new(length: usize, lower: i64, upper: i64) -> Self {
        assert!(lower <= upper, "integer pool bounds are inverted");
        Self { length, lower, upper }
    }

    /// Lower bound (inclusive).
    pub fn lower(&self) -> i64 {
        self.lower
    }

    /// Upper bound (inclusive).
    pub fn upper(&self) -> i64 {
        self.upper
    }
}

impl GenePool for IntegerPool {
    type Allele = i64;

    fn random_genome(&self, rng: &mut dyn RngCore) -> Result<Vec<i64>, EvoError> {
        Ok((0..self.length)
            .map(|_| rng.random_range(self.lower..=self.upper))
            .collect())
    }

    fn allele_count(&self) -> Option<usize> {
        Some((self.upper - self.lower + 1) as usize)
    }
}

/// Pool of constant-length real-valued genomes with genes drawn
/// uniformly from `[lower, upper)`.
#[derive(Debug, Clone, Copy)]
pub struct NumberPool {
    length: usize,
    lower: f64,
    upper: f64,
}

impl NumberPool {
    /// Creates a pool for genomes of `length` reals in `[lower, upper)`.
    ///
    /// # Panics
    /// Panics if `lower >= upper`.
    pub fn new(length: usize, lower: f64, upper: f64) -> Self {
        assert!(lower < upper, "number pool bounds are inverted or empty");
        Self { length, lower, upper }
    }
}

impl GenePool for NumberPool {
    type Allele = f64;

    fn random_genome(&self, rng: &mut dyn RngCore) -> Result<Vec<f64>, EvoError> {
        Ok((0..self.length)
            .map(|_| rng.random_range(self.lower..self.upper))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_integer_pool_respects_bounds() {
        let pool = IntegerPool::new(50, -3, 3);
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let genome = pool.random_genome(&mut rng).unwrap();
            assert_eq!(genome.len(), 50);
            assert!(genome.iter().all(|&g| (-3..=3).contains(&g)));
        }
    }

    #[test]
    fn test_integer_pool_reaches_both_bounds() {
        let pool = IntegerPool::new(1000, 0, 1);
        let mut rng = create_rng(42);
        let genome = pool.random_genome(&mut rng).unwrap();
        assert!(genome.contains(&0));
        assert!(genome.contains(&1));
    }

    #[test]
    fn test_integer_pool_allele_count() {
        assert_eq!(IntegerPool::new(5, 0, 101).allele_count(), Some(102));
    }

    #[test]
    fn test_number_pool_respects_bounds() {
        let pool = NumberPool::new(50, 0.0, 101.0);
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let genome = pool.random_genome(&mut rng).unwrap();
            assert_eq!(genome.len(), 50);
            assert!(genome.iter().all(|&g| (0.0..101.0).contains(&g)));
        }
    }

    #[test]
    fn test_number_pool_has_no_allele_count() {
        assert_eq!(NumberPool::new(5, 0.0, 1.0).allele_count(), None);
    }

    #[test]
    #[should_panic(expected = "bounds")]
    fn test_inverted_bounds_panic() {
        IntegerPool::new(5, 10, 0);
    }
}
