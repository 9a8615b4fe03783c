//! Reproduction and recombination operators.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//!   (multi-point crossover)
//! - Schwefel (1981), *Numerical Optimization of Computer Models*
//!   (discrete recombination in evolution strategies)

use rand::seq::index;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::iteration::Iteration;
use super::operator::Operator;
use crate::genome::{Community, Gene, Individual, Population};

/// Identity reproduction: clones every member unchanged.
///
/// Works at both container levels, covering the degenerate strategy
/// slots (e.g. a one-population community that is "recombined" into
/// itself).
#[derive(Debug, Clone, Copy, Default)]
pub struct Replicate;

impl Replicate {
    /// Creates the identity operator.
    pub fn new() -> Self {
        Self
    }
}

impl<G: Gene> Operator<Population<G>> for Replicate {
    fn iteration(&self) -> Iteration {
        Iteration::Single
    }

    fn arity(&self) -> (usize, usize) {
        (1, 1)
    }

    fn apply(&self, batch: &Population<G>, _rng: &mut dyn RngCore) -> Population<G> {
        batch.clone()
    }
}

impl<G: Gene> Operator<Community<G>> for Replicate {
    fn iteration(&self) -> Iteration {
        Iteration::Single
    }

    fn arity(&self) -> (usize, usize) {
        (1, 1)
    }

    fn apply(&self, batch: &Community<G>, _rng: &mut dyn RngCore) -> Community<G> {
        batch.clone()
    }
}

/// Multi-point crossover: two parents in, two offspring out.
///
/// With the configured probability, `npoints` distinct cut points are
/// drawn in `1..length` and sorted; together with the fixed boundaries
/// `0` and `length` they partition both genomes into `npoints + 1`
/// segments. Segments are swapped alternately between the parents,
/// starting with segment `npoints % 2` — so the leading segment always
/// stays with its own parent. Otherwise (or when `npoints` is zero)
/// both parents are returned as unmodified copies.
#[derive(Debug, Clone, Copy)]
pub struct Crossover {
    npoints: usize,
    probability: f64,
}

impl Crossover {
    /// Creates an `npoints`-point crossover applied with the given
    /// probability.
    ///
    /// # Panics
    /// Panics if `probability` lies outside `[0, 1]`.
    pub fn new(npoints: usize, probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "crossover probability must lie in [0, 1]"
        );
        Self { npoints, probability }
    }
}

impl<G: Gene> Operator<Population<G>> for Crossover {
    fn iteration(&self) -> Iteration {
        Iteration::Straight { batch_size: 2 }
    }

    fn arity(&self) -> (usize, usize) {
        (2, 2)
    }

    fn apply(&self, batch: &Population<G>, rng: &mut dyn RngCore) -> Population<G> {
        let first = &batch[0];
        let second = &batch[1];
        let length = first.genes().len();
        assert_eq!(
            length,
            second.genes().len(),
            "crossover requires equal-length genomes"
        );

        if self.npoints == 0 || !rng.random_bool(self.probability) {
            return batch.clone();
        }
        assert!(
            self.npoints < length,
            "cannot place {} distinct cut points in a genome of length {length}",
            self.npoints
        );

        // cut points in 1..length, distinct and sorted, plus boundaries
        let mut points: Vec<usize> = index::sample(rng, length - 1, self.npoints)
            .into_iter()
            .map(|p| p + 1)
            .collect();
        points.sort_unstable();
        points.insert(0, 0);
        points.push(length);

        let mut genes1 = first.genes().to_vec();
        let mut genes2 = second.genes().to_vec();
        let start = self.npoints % 2;
        for segment in (start..=self.npoints).step_by(2) {
            for i in points[segment]..points[segment + 1] {
                std::mem::swap(&mut genes1[i], &mut genes2[i]);
            }
        }

        let mut off1 = first.clone();
        let mut off2 = second.clone();
        off1.set_genes(genes1);
        off2.set_genes(genes2);
        Population::from(vec![off1, off2])
    }
}

/// Discrete recombination: mixes `in_size` parents into one offspring.
///
/// The gene positions are shuffled and divided into `in_size`
/// near-equal shares (the first `length % in_size` shares hold one
/// extra position); parent *k* contributes its genes at the positions
/// of share *k*. All parents must share one genome length, and the mix
/// only behaves as described while `in_size` does not exceed that
/// length.
///
/// The default iteration feeds consecutive parent groups with the
/// configured probability; the strategy engine rebinds it to repeated
/// random sampling via [`with_iteration`](Self::with_iteration).
#[derive(Debug, Clone, Copy)]
pub struct DiscreteRecombination {
    in_size: usize,
    iteration: Iteration,
}

impl DiscreteRecombination {
    /// Creates a recombination of `in_size` parents applied to each
    /// parent group with the given probability.
    ///
    /// # Panics
    /// Panics if `in_size` is zero or `probability` lies outside
    /// `[0, 1]`.
    pub fn new(in_size: usize, probability: f64) -> Self {
        assert!(in_size > 0, "recombination needs at least one parent");
        assert!(
            (0.0..=1.0).contains(&probability),
            "recombination probability must lie in [0, 1]"
        );
        Self {
            in_size,
            iteration: Iteration::RandomStraight { batch_size: in_size, probability },
        }
    }

    /// Rebinds the iteration policy driving this operator.
    pub fn with_iteration(mut self, iteration: Iteration) -> Self {
        self.iteration = iteration;
        self
    }
}

impl<G: Gene> Operator<Population<G>> for DiscreteRecombination {
    fn iteration(&self) -> Iteration {
        self.iteration
    }

    fn arity(&self) -> (usize, usize) {
        (self.in_size, 1)
    }

    fn apply(&self, batch: &Population<G>, rng: &mut dyn RngCore) -> Population<G> {
        if self.in_size == 1 {
            return batch.clone();
        }
        let length = batch[0].genes().len();
        for parent in batch.iter() {
            assert_eq!(
                parent.genes().len(),
                length,
                "discrete recombination requires equal-length genomes"
            );
        }

        let mut shares = vec![length / self.in_size; self.in_size];
        for extra in shares.iter_mut().take(length % self.in_size) {
            *extra += 1;
        }

        let mut positions: Vec<usize> = (0..length).collect();
        positions.shuffle(rng);

        let mut genes = batch[0].genes().to_vec();
        let mut offset = 0;
        for (parent, &share) in batch.iter().zip(&shares) {
            for &pos in &positions[offset..offset + share] {
                genes[pos] = parent.genes()[pos].clone();
            }
            offset += share;
        }
        Population::from(vec![Individual::new(genes)])
    }
}

/// Population-level recombination: assembles `out_size` offspring
/// populations, each mixed from `group_size` parent populations.
///
/// For every offspring population, `group_size` parents are drawn with
/// replacement from the input community; each drawn parent contributes
/// a near-equal share of individuals (shares split as in
/// [`DiscreteRecombination`]), sampled without replacement from within
/// that parent. All input populations must have the same size, which is
/// also the size of every offspring population.
#[derive(Debug, Clone, Copy)]
pub struct EquiMix {
    in_size: usize,
    out_size: usize,
    group_size: usize,
}

impl EquiMix {
    /// Creates a mix of `in_size` parent populations into `out_size`
    /// offspring populations, `group_size` parents per offspring.
    ///
    /// # Panics
    /// Panics if any count is zero.
    pub fn new(in_size: usize, out_size: usize, group_size: usize) -> Self {
        assert!(
            in_size > 0 && out_size > 0 && group_size > 0,
            "population mix counts must be at least 1"
        );
        Self { in_size, out_size, group_size }
    }
}

impl<G: Gene> Operator<Community<G>> for EquiMix {
    fn iteration(&self) -> Iteration {
        Iteration::Straight { batch_size: self.in_size }
    }

    fn arity(&self) -> (usize, usize) {
        (self.in_size, self.out_size)
    }

    fn apply(&self, batch: &Community<G>, rng: &mut dyn RngCore) -> Community<G> {
        let population_size = batch[0].size();
        for population in batch.iter() {
            assert_eq!(
                population.size(),
                population_size,
                "population mix requires equally sized populations"
            );
        }

        let mut shares = vec![population_size / self.group_size; self.group_size];
        for extra in shares.iter_mut().take(population_size % self.group_size) {
            *extra += 1;
        }

        let mut offspring = Community::new();
        for _ in 0..self.out_size {
            let mut mixed = Population::new();
            for &share in &shares {
                let parent = &batch[rng.random_range(0..batch.size())];
                let picked = index::sample(rng, population_size, share).into_vec();
                mixed.integrate(parent.subset(&picked));
            }
            offspring.push(mixed);
        }
        offspring
    }
}
