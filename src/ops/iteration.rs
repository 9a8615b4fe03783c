//! Iteration strategies: slicing containers into operator batches.
//!
//! Every operator is bound to one [`Iteration`] variant that decides
//! which sub-batches of a container the operator sees and in which
//! order. The variants mirror the classic traversal policies of
//! generational evolutionary algorithms: element-wise passes, fixed
//! chunking, probabilistic thinning, and repeated random sampling.

use rand::seq::index;
use rand::{Rng, RngCore};

use crate::genome::Container;

/// Policy for splitting a container into operator batches.
///
/// A policy is pure configuration; [`batches`](Iteration::batches)
/// realizes the finite batch sequence for one container, drawing any
/// randomness from the supplied source. Re-invoking restarts the
/// traversal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Iteration {
    /// One element per batch, in container order.
    Single,

    /// Like [`Single`](Iteration::Single), but each element is kept
    /// only with the given probability.
    RandomSingle {
        /// Per-element keep probability in `[0, 1]`.
        probability: f64,
    },

    /// Consecutive fixed-size chunks, in order. The final chunk may be
    /// short when the container size is not a multiple of `batch_size`.
    Straight {
        /// Number of elements per batch.
        batch_size: usize,
    },

    /// Like [`Straight`](Iteration::Straight), but each chunk is kept
    /// only with the given probability.
    RandomStraight {
        /// Number of elements per batch.
        batch_size: usize,
        /// Per-chunk keep probability in `[0, 1]`.
        probability: f64,
    },

    /// Draws `total` batches of `batch_size` distinct elements each:
    /// sampling is without replacement within a batch but with
    /// replacement across batches, so an element may appear in several
    /// batches.
    NRandomBatches {
        /// Number of distinct elements per batch.
        batch_size: usize,
        /// Number of batches to draw; `None` draws one batch per
        /// container element.
        total: Option<usize>,
    },
}

impl Iteration {
    /// Realizes the batch sequence for `container`.
    ///
    /// # Panics
    /// Panics if a random-batch `batch_size` exceeds the container
    /// size, or if a probability lies outside `[0, 1]`.
    pub fn batches<C: Container>(&self, container: &C, rng: &mut dyn RngCore) -> Vec<C> {
        let n = container.size();
        match *self {
            Iteration::Single => (0..n).map(|i| container.subset(&[i])).collect(),
            Iteration::RandomSingle { probability } => (0..n)
                .filter(|_| rng.random_bool(probability))
                .map(|i| container.subset(&[i]))
                .collect(),
            Iteration::Straight { batch_size } => (0..n)
                .step_by(batch_size.max(1))
                .map(|start| container.subset(&chunk_indices(start, batch_size, n)))
                .collect(),
            Iteration::RandomStraight { batch_size, probability } => (0..n)
                .step_by(batch_size.max(1))
                .filter(|_| rng.random_bool(probability))
                .map(|start| container.subset(&chunk_indices(start, batch_size, n)))
                .collect(),
            Iteration::NRandomBatches { batch_size, total } => {
                assert!(
                    batch_size <= n,
                    "cannot draw batches of {batch_size} distinct elements from a container of {n}"
                );
                let total = total.unwrap_or(n);
                (0..total)
                    .map(|_| container.subset(&index::sample(rng, n, batch_size).into_vec()))
                    .collect()
            }
        }
    }
}

/// Indices of the chunk starting at `start`, clamped to the container
/// size.
fn chunk_indices(start: usize, batch_size: usize, n: usize) -> Vec<usize> {
    (start..(start + batch_size).min(n)).collect()
}
