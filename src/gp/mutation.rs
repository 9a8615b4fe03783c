//! Point mutation for tree genomes.

use std::sync::Arc;

use rand::{Rng, RngCore};

use super::node::GpNode;
use super::pool::GpPool;
use crate::genome::Population;
use crate::ops::{Iteration, Operator};

/// Subtree-replacing point mutation.
///
/// With the configured probability, one node of the tree is chosen
/// uniformly; the contiguous slice holding its subtree is replaced by a
/// freshly drawn subtree of the same return type, with a height drawn
/// uniformly from `[min_height, max_height]`. Otherwise the individual
/// is returned as an unmodified copy.
#[derive(Debug, Clone)]
pub struct PointMutation {
    pool: Arc<GpPool>,
    min_height: usize,
    max_height: usize,
    prob: f64,
}

impl PointMutation {
    /// Creates a point mutation drawing replacement subtrees from
    /// `pool`.
    ///
    /// # Panics
    /// Panics if the height bounds are inverted or `prob` lies outside
    /// `[0, 1]`.
    pub fn new(pool: Arc<GpPool>, min_height: usize, max_height: usize, prob: f64) -> Self {
        assert!(min_height <= max_height, "subtree height bounds are inverted");
        assert!((0.0..=1.0).contains(&prob), "mutation probability must lie in [0, 1]");
        Self { pool, min_height, max_height, prob }
    }

    /// Returns the end (exclusive) of the subtree starting at `index`
    /// in a prefix-encoded genome.
    fn subtree_end(genes: &[GpNode], index: usize) -> usize {
        let mut end = index + 1;
        let mut pending = genes[index].arg_count();
        while pending > 0 {
            pending = pending - 1 + genes[end].arg_count();
            end += 1;
        }
        end
    }
}

impl Operator<Population<GpNode>> for PointMutation {
    fn iteration(&self) -> Iteration {
        Iteration::Single
    }

    fn arity(&self) -> (usize, usize) {
        (1, 1)
    }

    fn apply(&self, batch: &Population<GpNode>, rng: &mut dyn RngCore) -> Population<GpNode> {
        if !rng.random_bool(self.prob) {
            return batch.clone();
        }

        let individual = &batch[0];
        let genes = individual.genes();
        let index = rng.random_range(0..genes.len());
        let end = Self::subtree_end(genes, index);

        let height = rng.random_range(self.min_height..=self.max_height);
        let replacement = self
            .pool
            .random_subtree(genes[index].rtype(), height, rng)
            .expect("replacement subtrees only request types present in the original tree's pool");

        let mut spliced = Vec::with_capacity(genes.len() - (end - index) + replacement.len());
        spliced.extend_from_slice(&genes[..index]);
        spliced.extend(replacement);
        spliced.extend_from_slice(&genes[end..]);

        let mut mutated = individual.clone();
        mutated.set_genes(spliced);
        Population::from(vec![mutated])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::Individual;
    use crate::gp::{GpType, GpValue};
    use crate::random::create_rng;

    fn pool() -> Arc<GpPool> {
        let mut pool = GpPool::new(1, 3);
        pool.push_function("add", GpType::Number, &[GpType::Number, GpType::Number], |a| {
            GpValue::Number(a[0].number().unwrap() + a[1].number().unwrap())
        });
        pool.push_function("neg", GpType::Number, &[GpType::Number], |a| {
            GpValue::Number(-a[0].number().unwrap())
        });
        pool.push_terminals([GpValue::Number(1.0), GpValue::Number(2.0)]);
        Arc::new(pool)
    }

    fn is_well_formed(genes: &[GpNode]) -> bool {
        let mut pending = 1usize;
        for node in genes {
            if pending == 0 {
                return false;
            }
            pending = pending - 1 + node.arg_count();
        }
        pending == 0
    }

    #[test]
    fn test_subtree_end_spans_whole_subtrees() {
        use crate::pool::GenePool;
        let pool = pool();
        let mut rng = create_rng(42);
        for _ in 0..50 {
            let genes = pool.random_genome(&mut rng).unwrap();
            for index in 0..genes.len() {
                let end = PointMutation::subtree_end(&genes, index);
                assert!(end <= genes.len());
                assert!(is_well_formed(&genes[index..end]), "slice is not a complete subtree");
            }
        }
    }

    #[test]
    fn test_mutation_keeps_genome_well_formed() {
        use crate::pool::GenePool;
        let pool = pool();
        let op = PointMutation::new(pool.clone(), 1, 2, 1.0);
        let mut rng = create_rng(42);
        for _ in 0..50 {
            let population =
                Population::from(vec![Individual::new(pool.random_genome(&mut rng).unwrap())]);
            let mutated = op.process(&population, &mut rng);
            assert_eq!(mutated.size(), 1);
            assert!(is_well_formed(mutated[0].genes()), "mutation broke the encoding");
            assert!(!mutated[0].fitted());
        }
    }

    #[test]
    fn test_mutation_preserves_root_type() {
        use crate::pool::GenePool;
        let pool = pool();
        let op = PointMutation::new(pool.clone(), 1, 1, 1.0);
        let mut rng = create_rng(42);
        let population =
            Population::from(vec![Individual::new(pool.random_genome(&mut rng).unwrap())]);
        let before = population[0].genes()[0].rtype();
        let mutated = op.process(&population, &mut rng);
        assert_eq!(mutated[0].genes()[0].rtype(), before);
    }

    #[test]
    fn test_zero_probability_copies_with_fitness() {
        use crate::pool::GenePool;
        let pool = pool();
        let op = PointMutation::new(pool.clone(), 1, 1, 0.0);
        let mut rng = create_rng(42);
        let mut individual = Individual::new(pool.random_genome(&mut rng).unwrap());
        individual.set_fitness(3.0);
        let population = Population::from(vec![individual]);
        let copy = op.process(&population, &mut rng);
        assert_eq!(copy, population);
        assert!(copy[0].fitted());
    }
}
