//! The operator contract.

use rand::RngCore;

use super::iteration::Iteration;
use crate::genome::Container;

/// An evolutionary operator over a container type.
///
/// Operators are immutable configuration plus a transformation with a
/// fixed input/output cardinality. [`process`](Operator::process)
/// splits the container into batches according to the operator's bound
/// [`Iteration`], feeds each batch to [`apply`](Operator::apply), and
/// concatenates the results into a new container of the same kind.
///
/// The container type is part of the operator's type: an operator
/// working on individuals implements `Operator<Population<G>>`, one
/// working on whole populations implements `Operator<Community<G>>`.
/// Which level an operator runs at is therefore fixed at construction,
/// never decided per call.
///
/// # Arity contract
///
/// [`arity`](Operator::arity) declares `(in_size, out_size)`. Every
/// batch passed to `apply` must contain exactly `in_size` members and
/// every result exactly `out_size`. A mismatch is a precondition bug in
/// the surrounding pipeline — `process` asserts both directions and
/// panics rather than attempting recovery.
///
/// # Statelessness
///
/// Operators hold no mutable state; the random source passed into each
/// call is the only source of variation between invocations.
pub trait Operator<C: Container>: Send + Sync {
    /// The iteration policy used to split the input container.
    fn iteration(&self) -> Iteration;

    /// Declared `(in_size, out_size)` cardinality of one
    /// [`apply`](Operator::apply) call.
    fn arity(&self) -> (usize, usize);

    /// Transforms one batch of exactly `in_size` members into exactly
    /// `out_size` members.
    fn apply(&self, batch: &C, rng: &mut dyn RngCore) -> C;

    /// Applies the operator to a whole container.
    ///
    /// # Panics
    /// Panics if the iteration produces a batch whose size differs from
    /// the declared `in_size`, or if `apply` returns a container whose
    /// size differs from the declared `out_size`.
    fn process(&self, container: &C, rng: &mut dyn RngCore) -> C {
        let (in_size, out_size) = self.arity();
        let mut result = C::empty();
        for batch in self.iteration().batches(container, rng) {
            assert_eq!(
                batch.size(),
                in_size,
                "operator received a batch of {} members but declares in_size {}",
                batch.size(),
                in_size
            );
            let produced = self.apply(&batch, rng);
            assert_eq!(
                produced.size(),
                out_size,
                "operator produced {} members but declares out_size {}",
                produced.size(),
                out_size
            );
            result.integrate(produced);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::{Individual, Population};
    use crate::random::create_rng;

    /// Doubles every gene; used to exercise the default `process`.
    struct Doubler;

    impl Operator<Population<i64>> for Doubler {
        fn iteration(&self) -> Iteration {
            Iteration::Single
        }

        fn arity(&self) -> (usize, usize) {
            (1, 1)
        }

        fn apply(&self, batch: &Population<i64>, _rng: &mut dyn RngCore) -> Population<i64> {
            let mut ind = batch[0].clone();
            for gene in ind.genes_mut() {
                *gene *= 2;
            }
            Population::from(vec![ind])
        }
    }

    /// Deliberately violates its declared out_size.
    struct Liar;

    impl Operator<Population<i64>> for Liar {
        fn iteration(&self) -> Iteration {
            Iteration::Single
        }

        fn arity(&self) -> (usize, usize) {
            (1, 2)
        }

        fn apply(&self, batch: &Population<i64>, _rng: &mut dyn RngCore) -> Population<i64> {
            batch.clone()
        }
    }

    fn population(values: &[i64]) -> Population<i64> {
        values.iter().map(|&v| Individual::new(vec![v])).collect()
    }

    #[test]
    fn test_process_concatenates_batch_results() {
        let pop = population(&[1, 2, 3]);
        let mut rng = create_rng(42);
        let result = Doubler.process(&pop, &mut rng);
        let genes: Vec<i64> = result.iter().map(|ind| ind.genes()[0]).collect();
        assert_eq!(genes, vec![2, 4, 6]);
    }

    #[test]
    fn test_process_leaves_input_untouched() {
        let pop = population(&[1, 2]);
        let mut rng = create_rng(42);
        let _ = Doubler.process(&pop, &mut rng);
        assert_eq!(pop[0].genes(), &[1]);
    }

    #[test]
    #[should_panic(expected = "out_size")]
    fn test_output_arity_violation_panics() {
        let pop = population(&[1]);
        let mut rng = create_rng(42);
        Liar.process(&pop, &mut rng);
    }
}
