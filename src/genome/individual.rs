//! A single candidate solution.

use std::fmt;

/// Marker trait for gene (allele) types.
///
/// Implemented for every type that is cloneable, comparable and thread
/// safe — in particular `i64`, `f64`, `bool` and [`GpNode`](crate::gp::GpNode),
/// as well as any user-defined allele type with the same properties.
pub trait Gene: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

impl<T: Clone + PartialEq + fmt::Debug + Send + Sync + 'static> Gene for T {}

/// One candidate solution: a gene vector plus its cached fitness.
///
/// The genes are exclusively owned by the individual; cloning an
/// individual clones the vector, so no two individuals ever share gene
/// storage.
///
/// # Fitness staleness
///
/// `fitness` is only meaningful while `fitted` is set. Any mutable
/// access to the genes ([`genes_mut`](Self::genes_mut),
/// [`set_genes`](Self::set_genes)) clears the flag, so a stale value can
/// never be silently reused: [`Fitness`](crate::fitness::Fitness) skips
/// exactly those individuals whose flag is still set. Shared access via
/// [`genes`](Self::genes) cannot mutate and leaves the flag untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual<G: Gene> {
    genes: Vec<G>,
    fitness: f64,
    fitted: bool,
    step_size: Option<f64>,
}

impl<G: Gene> Individual<G> {
    /// Creates an unevaluated individual from a gene vector.
    pub fn new(genes: Vec<G>) -> Self {
        Self {
            genes,
            fitness: 0.0,
            fitted: false,
            step_size: None,
        }
    }

    /// Shared access to the genes.
    pub fn genes(&self) -> &[G] {
        &self.genes
    }

    /// Mutable access to the genes. Marks the individual unevaluated.
    pub fn genes_mut(&mut self) -> &mut Vec<G> {
        self.fitted = false;
        &mut self.genes
    }

    /// Replaces the gene vector wholesale. Marks the individual
    /// unevaluated.
    pub fn set_genes(&mut self, genes: Vec<G>) {
        self.fitted = false;
        self.genes = genes;
    }

    /// The cached fitness. Meaningful only while [`fitted`](Self::fitted)
    /// returns `true`.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Stores an evaluated fitness and marks the individual evaluated.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
        self.fitted = true;
    }

    /// Whether the cached fitness matches the current genes.
    pub fn fitted(&self) -> bool {
        self.fitted
    }

    /// Auxiliary state for self-adaptive step-size mutation.
    ///
    /// `None` until a self-adaptive mutation operator first touches the
    /// individual; see
    /// [`NormalPerturbation`](crate::ops::mutation::NormalPerturbation).
    pub fn step_size(&self) -> Option<f64> {
        self.step_size
    }

    /// Stores the self-adaptive mutation step size.
    pub fn set_step_size(&mut self, step_size: f64) {
        self.step_size = Some(step_size);
    }
}

impl<G: Gene> fmt::Display for Individual<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fitted {
            write!(f, "Individual(fitness={}, genes={:?})", self.fitness, self.genes)
        } else {
            write!(f, "Individual(unevaluated, genes={:?})", self.genes)
        }
    }
}
