//! Mutation operators for vector genomes.
//!
//! All mutations work element-wise on a copy of the input individual
//! and leave untouched genomes with their cached fitness intact: the
//! gene vector is only written when at least one locus is actually hit.
//!
//! The GP tree mutation lives with the rest of the genetic-programming
//! code in [`crate::gp`].
//!
//! # References
//!
//! - Schwefel (1981), *Numerical Optimization of Computer Models*
//!   (self-adaptive step sizes)
//! - Beyer & Schwefel (2002), "Evolution strategies — A comprehensive
//!   introduction"

use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};

use super::iteration::Iteration;
use super::operator::Operator;
use crate::genome::Population;

/// Draws the loci hit by a per-gene mutation probability.
fn mutation_hits(length: usize, prob: f64, rng: &mut dyn RngCore) -> Vec<usize> {
    (0..length).filter(|_| rng.random_bool(prob)).collect()
}

/// Boolean mutation: flips each gene independently with probability
/// `prob`.
#[derive(Debug, Clone, Copy)]
pub struct BitFlip {
    prob: f64,
}

impl BitFlip {
    /// Creates a bit-flip mutation with per-gene probability `prob`.
    ///
    /// # Panics
    /// Panics if `prob` lies outside `[0, 1]`.
    pub fn new(prob: f64) -> Self {
        assert!((0.0..=1.0).contains(&prob), "mutation probability must lie in [0, 1]");
        Self { prob }
    }
}

impl Operator<Population<bool>> for BitFlip {
    fn iteration(&self) -> Iteration {
        Iteration::Single
    }

    fn arity(&self) -> (usize, usize) {
        (1, 1)
    }

    fn apply(&self, batch: &Population<bool>, rng: &mut dyn RngCore) -> Population<bool> {
        let mut ind = batch[0].clone();
        let hits = mutation_hits(ind.genes().len(), self.prob, rng);
        if !hits.is_empty() {
            let genes = ind.genes_mut();
            for i in hits {
                genes[i] = !genes[i];
            }
        }
        Population::from(vec![ind])
    }
}

/// Integer mutation: replaces each gene independently, with probability
/// `prob`, by a uniform draw from `[lowest, highest]` (both inclusive).
#[derive(Debug, Clone, Copy)]
pub struct UniformInt {
    prob: f64,
    lowest: i64,
    highest: i64,
}

impl UniformInt {
    /// Creates a uniform integer mutation.
    ///
    /// # Panics
    /// Panics if `prob` lies outside `[0, 1]` or the bounds are
    /// inverted.
    pub fn new(prob: f64, lowest: i64, highest: i64) -> Self {
        assert!((0.0..=1.0).contains(&prob), "mutation probability must lie in [0, 1]");
        assert!(lowest <= highest, "mutation bounds are inverted");
        Self { prob, lowest, highest }
    }
}

impl Operator<Population<i64>> for UniformInt {
    fn iteration(&self) -> Iteration {
        Iteration::Single
    }

    fn arity(&self) -> (usize, usize) {
        (1, 1)
    }

    fn apply(&self, batch: &Population<i64>, rng: &mut dyn RngCore) -> Population<i64> {
        let mut ind = batch[0].clone();
        let hits = mutation_hits(ind.genes().len(), self.prob, rng);
        if !hits.is_empty() {
            let genes = ind.genes_mut();
            for i in hits {
                genes[i] = rng.random_range(self.lowest..=self.highest);
            }
        }
        Population::from(vec![ind])
    }
}

/// Real-valued mutation: replaces each gene independently, with
/// probability `prob`, by a uniform draw from `[lowest, highest)`.
#[derive(Debug, Clone, Copy)]
pub struct UniformNumber {
    prob: f64,
    lowest: f64,
    highest: f64,
}

impl UniformNumber {
    /// Creates a uniform real-valued mutation.
    ///
    /// # Panics
    /// Panics if `prob` lies outside `[0, 1]` or the bounds are
    /// inverted or empty.
    pub fn new(prob: f64, lowest: f64, highest: f64) -> Self {
        assert!((0.0..=1.0).contains(&prob), "mutation probability must lie in [0, 1]");
        assert!(lowest < highest, "mutation bounds are inverted or empty");
        Self { prob, lowest, highest }
    }
}

impl Operator<Population<f64>> for UniformNumber {
    fn iteration(&self) -> Iteration {
        Iteration::Single
    }

    fn arity(&self) -> (usize, usize) {
        (1, 1)
    }

    fn apply(&self, batch: &Population<f64>, rng: &mut dyn RngCore) -> Population<f64> {
        let mut ind = batch[0].clone();
        let hits = mutation_hits(ind.genes().len(), self.prob, rng);
        if !hits.is_empty() {
            let genes = ind.genes_mut();
            for i in hits {
                genes[i] = rng.random_range(self.lowest..self.highest);
            }
        }
        Population::from(vec![ind])
    }
}

/// Gaussian mutation: adds, with probability `prob` per gene, a draw
/// from `Normal(mu, sigma)`.
///
/// # Self-adaptation
///
/// With [`with_alpha`](Self::with_alpha) set, the operator implements
/// the classic (μ,λ)-ES step-size adaptation: each individual carries
/// its own step size (seeded from `sigma` on first contact), the noise
/// uses that current step size, and afterwards the step size is
/// multiplied by `alpha` or `1/alpha` with equal probability. Step
/// sizes travel with the individual through selection, so successful
/// step sizes propagate.
#[derive(Debug, Clone, Copy)]
pub struct NormalPerturbation {
    prob: f64,
    mu: f64,
    sigma: f64,
    alpha: Option<f64>,
}

impl NormalPerturbation {
    /// Creates a Gaussian mutation with per-gene probability `prob`,
    /// mean `mu` and standard deviation `sigma`.
    ///
    /// # Panics
    /// Panics if `prob` lies outside `[0, 1]` or `sigma` is negative.
    pub fn new(prob: f64, mu: f64, sigma: f64) -> Self {
        assert!((0.0..=1.0).contains(&prob), "mutation probability must lie in [0, 1]");
        assert!(sigma >= 0.0, "standard deviation must be non-negative");
        Self { prob, mu, sigma, alpha: None }
    }

    /// Enables self-adaptive step sizes with multiplier `alpha`.
    ///
    /// # Panics
    /// Panics if `alpha` is not strictly positive.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        assert!(alpha > 0.0, "step-size multiplier must be positive");
        self.alpha = Some(alpha);
        self
    }
}

impl Operator<Population<f64>> for NormalPerturbation {
    fn iteration(&self) -> Iteration {
        Iteration::Single
    }

    fn arity(&self) -> (usize, usize) {
        (1, 1)
    }

    fn apply(&self, batch: &Population<f64>, rng: &mut dyn RngCore) -> Population<f64> {
        let mut ind = batch[0].clone();

        // noise uses the step size as carried in; the multiplicative
        // update only affects the next application
        let sigma = match self.alpha {
            Some(_) => ind.step_size().unwrap_or(self.sigma),
            None => self.sigma,
        };
        if let Some(alpha) = self.alpha {
            let factor = if rng.random_bool(0.5) { alpha } else { 1.0 / alpha };
            ind.set_step_size(sigma * factor);
        }

        let hits = mutation_hits(ind.genes().len(), self.prob, rng);
        if !hits.is_empty() {
            let normal = Normal::new(self.mu, sigma)
                .expect("sigma is validated non-negative at construction");
            let genes = ind.genes_mut();
            for i in hits {
                genes[i] += normal.sample(rng);
            }
        }
        Population::from(vec![ind])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::Individual;
    use crate::random::create_rng;

    // ---- BitFlip ----

    #[test]
    fn test_bit_flip_probability_one_inverts_everything() {
        let pop = Population::from(vec![Individual::new(vec![true, false, true])]);
        let mut rng = create_rng(42);
        let mutated = BitFlip::new(1.0).process(&pop, &mut rng);
        assert_eq!(mutated[0].genes(), &[false, true, false]);
    }

    #[test]
    fn test_bit_flip_probability_zero_keeps_fitness() {
        let mut ind = Individual::new(vec![true; 8]);
        ind.set_fitness(3.0);
        let pop = Population::from(vec![ind]);
        let mut rng = create_rng(42);
        let mutated = BitFlip::new(0.0).process(&pop, &mut rng);
        assert!(mutated[0].fitted(), "an untouched genome keeps its cached fitness");
        assert_eq!(mutated[0].genes(), &[true; 8]);
    }

    // ---- UniformInt ----

    #[test]
    fn test_uniform_int_respects_bounds() {
        let pop = Population::from(vec![Individual::new(vec![500i64; 100])]);
        let mut rng = create_rng(42);
        let mutated = UniformInt::new(1.0, -5, 5).process(&pop, &mut rng);
        assert!(mutated[0].genes().iter().all(|&g| (-5..=5).contains(&g)));
    }

    #[test]
    fn test_uniform_int_hits_roughly_prob_share() {
        let pop = Population::from(vec![Individual::new(vec![999i64; 1000])]);
        let mut rng = create_rng(42);
        let mutated = UniformInt::new(0.1, 0, 10).process(&pop, &mut rng);
        let changed = mutated[0].genes().iter().filter(|&&g| g != 999).count();
        assert!((50..200).contains(&changed), "expected ~100 mutated loci, got {changed}");
    }

    #[test]
    fn test_uniform_int_marks_mutated_unevaluated() {
        let mut ind = Individual::new(vec![0i64; 50]);
        ind.set_fitness(1.0);
        let pop = Population::from(vec![ind]);
        let mut rng = create_rng(42);
        let mutated = UniformInt::new(1.0, 5, 5).process(&pop, &mut rng);
        assert!(!mutated[0].fitted());
    }

    // ---- UniformNumber ----

    #[test]
    fn test_uniform_number_respects_bounds() {
        let pop = Population::from(vec![Individual::new(vec![1000.0f64; 100])]);
        let mut rng = create_rng(42);
        let mutated = UniformNumber::new(1.0, -1.0, 1.0).process(&pop, &mut rng);
        assert!(mutated[0].genes().iter().all(|&g| (-1.0..1.0).contains(&g)));
    }

    // ---- NormalPerturbation ----

    #[test]
    fn test_normal_perturbation_changes_values() {
        let pop = Population::from(vec![Individual::new(vec![0.0f64; 100])]);
        let mut rng = create_rng(42);
        let mutated = NormalPerturbation::new(1.0, 0.0, 1.0).process(&pop, &mut rng);
        let moved = mutated[0].genes().iter().filter(|&&g| g != 0.0).count();
        assert_eq!(moved, 100);
        // mean of 100 standard normal draws stays near zero
        let mean: f64 = mutated[0].genes().iter().sum::<f64>() / 100.0;
        assert!(mean.abs() < 0.5, "unexpected mean {mean}");
    }

    #[test]
    fn test_normal_perturbation_zero_sigma_is_shift_free() {
        let pop = Population::from(vec![Individual::new(vec![1.0f64; 10])]);
        let mut rng = create_rng(42);
        let mutated = NormalPerturbation::new(1.0, 0.0, 0.0).process(&pop, &mut rng);
        assert_eq!(mutated[0].genes(), &[1.0; 10]);
    }

    #[test]
    fn test_self_adaptive_step_size_updates_multiplicatively() {
        let op = NormalPerturbation::new(1.0, 0.0, 1.0).with_alpha(1.3);
        let pop = Population::from(vec![Individual::new(vec![0.0f64; 4])]);
        let mut rng = create_rng(42);
        let once = op.process(&pop, &mut rng);
        let step = once[0].step_size().expect("self-adaptive mutation must set a step size");
        assert!(
            (step - 1.3).abs() < 1e-12 || (step - 1.0 / 1.3).abs() < 1e-12,
            "first update must multiply the initial sigma by alpha or 1/alpha, got {step}"
        );

        let twice = op.process(&once, &mut rng);
        let next = twice[0].step_size().unwrap();
        let ratio = next / step;
        assert!(
            (ratio - 1.3).abs() < 1e-12 || (ratio - 1.0 / 1.3).abs() < 1e-12,
            "subsequent updates keep multiplying, got ratio {ratio}"
        );
    }

    #[test]
    fn test_without_alpha_no_step_size_is_stored() {
        let pop = Population::from(vec![Individual::new(vec![0.0f64; 4])]);
        let mut rng = create_rng(42);
        let mutated = NormalPerturbation::new(1.0, 0.0, 1.0).process(&pop, &mut rng);
        assert!(mutated[0].step_size().is_none());
    }

    #[test]
    #[should_panic(expected = "probability")]
    fn test_out_of_range_probability_panics() {
        UniformInt::new(1.5, 0, 1);
    }
}
