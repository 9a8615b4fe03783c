//! Fitness evaluation.

use crate::genome::{Gene, Individual, Population};

/// Wraps a user-supplied fitness function and applies it to
/// populations.
///
/// The engine treats the function as an external collaborator: a pure
/// mapping from an individual to a score, where **higher is better**.
/// Evaluation skips individuals whose cached fitness is still valid
/// (see [`Individual::fitted`]), so a genome is never re-scored unless
/// its genes changed.
pub struct Fitness<G: Gene> {
    method: Box<dyn Fn(&Individual<G>) -> f64 + Send + Sync>,
}

impl<G: Gene> Fitness<G> {
    /// Wraps an evaluation function.
    ///
    /// # Examples
    ///
    /// ```
    /// use evostrat::fitness::Fitness;
    /// use evostrat::genome::Individual;
    ///
    /// // reward genomes close to zero
    /// let fitness = Fitness::new(|ind: &Individual<i64>| {
    ///     -ind.genes().iter().map(|&g| (g * g) as f64).sum::<f64>()
    /// });
    /// ```
    pub fn new(method: impl Fn(&Individual<G>) -> f64 + Send + Sync + 'static) -> Self {
        Self {
            method: Box::new(method),
        }
    }

    /// Evaluates every unevaluated individual in the population and
    /// stores the result on the individual.
    pub fn evaluate(&self, population: &mut Population<G>) {
        for individual in population.iter_mut() {
            if !individual.fitted() {
                let value = (self.method)(individual);
                individual.set_fitness(value);
            }
        }
    }

    /// Evaluates a single individual unconditionally.
    pub fn evaluate_individual(&self, individual: &mut Individual<G>) {
        let value = (self.method)(individual);
        individual.set_fitness(value);
    }
}

impl<G: Gene> std::fmt::Debug for Fitness<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Fitness")
    }
}
