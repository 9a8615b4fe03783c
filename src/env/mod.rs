//! The environment: execution of the nested evolutionary loop.
//!
//! [`Environment`] pairs a [`Breeder`] with a [`Fitness`] and drives a
//! [`Strategy`] through its two-level generational loop:
//!
//! ```text
//! INIT ─→ breed initial populations, evaluate, on_start
//! for each community generation:
//!     population reproduction ─→ offspring populations
//!     for each generation, for each offspring population:
//!         on_generation_start
//!         reproduction → mutation → evaluate
//!         integration (offspring, parents) → selection
//!         on_generation_end
//!     [+ parent populations]  population selection
//! DONE ─→ on_end, return the surviving community
//! ```
//!
//! The engine is single-threaded and synchronous: every operator,
//! fitness evaluation and callback runs to completion before the next
//! step. A cooperative cancellation flag, checked at generation
//! boundaries, is the only way to stop a run early.

mod callback;

pub use callback::{BestWorst, Callback, Diversity, FitnessTracker};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::breeding::Breeder;
use crate::error::EvoError;
use crate::fitness::Fitness;
use crate::genome::Community;
use crate::ops::Operator;
use crate::pool::GenePool;
use crate::random::create_rng;
use crate::strategy::Strategy;

/// Orchestrates evolutionary runs.
///
/// # Examples
///
/// ```
/// use evostrat::breeding::Breeder;
/// use evostrat::env::Environment;
/// use evostrat::fitness::Fitness;
/// use evostrat::genome::Individual;
/// use evostrat::pool::NumberPool;
/// use evostrat::strategy::Strategy;
///
/// let breeder = Breeder::new(NumberPool::new(3, -5.0, 5.0));
/// let fitness = Fitness::new(|ind: &Individual<f64>| {
///     -ind.genes().iter().map(|g| g * g).sum::<f64>()
/// });
/// let strategy = Strategy::from_string("(5/2+20)^10").unwrap();
///
/// let environment = Environment::new(breeder, fitness).with_seed(42);
/// let result = environment.execute(&strategy, &mut []).unwrap();
/// assert_eq!(result[0].size(), 5);
/// ```
#[derive(Debug)]
pub struct Environment<P: GenePool> {
    breeder: Breeder<P>,
    fitness: Fitness<P::Allele>,
    seed: Option<u64>,
}

impl<P: GenePool> Environment<P> {
    /// Creates an environment from a breeder and a fitness function.
    pub fn new(breeder: Breeder<P>, fitness: Fitness<P::Allele>) -> Self {
        Self { breeder, fitness, seed: None }
    }

    /// Sets the random seed for reproducible runs.
    ///
    /// Without a seed, each run draws a fresh one.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Executes the strategy and returns the surviving populations.
    ///
    /// In single-population mode the returned community holds exactly
    /// one population.
    ///
    /// # Errors
    /// Returns a configuration error before any evolution runs when
    /// the strategy's counts are invalid, and propagates lookup
    /// failures from genome breeding.
    pub fn execute(
        &self,
        strategy: &Strategy<P::Allele>,
        callbacks: &mut [&mut dyn Callback<P::Allele>],
    ) -> Result<Community<P::Allele>, EvoError> {
        self.execute_with_cancel(strategy, callbacks, None)
    }

    /// Executes the strategy with a cooperative cancellation flag.
    ///
    /// The flag is checked at every generation boundary; once set, the
    /// run stops and returns the parent populations of the last
    /// completed community generation.
    pub fn execute_with_cancel(
        &self,
        strategy: &Strategy<P::Allele>,
        callbacks: &mut [&mut dyn Callback<P::Allele>],
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<Community<P::Allele>, EvoError> {
        strategy.validate()?;
        let mut rng = match self.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        let is_cancelled =
            |flag: &Option<Arc<AtomicBool>>| matches!(flag, Some(f) if f.load(Ordering::Relaxed));

        let mut parent_populations = Community::new();
        for _ in 0..strategy.init_populations() {
            let mut population =
                self.breeder.breed(strategy.init_individuals(), &mut rng)?;
            self.fitness.evaluate(&mut population);
            for callback in callbacks.iter_mut() {
                callback.on_start(&population);
            }
            parent_populations.push(population);
        }

        'community: for community_generation in 0..strategy.population_generations() {
            if is_cancelled(&cancel) {
                log::debug!("run cancelled before community generation {community_generation}");
                break 'community;
            }
            let mut offspring_populations =
                strategy.population_reproduction().process(&parent_populations, &mut rng);

            for generation in 0..strategy.generations() {
                if is_cancelled(&cancel) {
                    log::debug!("run cancelled in community generation {community_generation}");
                    break 'community;
                }
                log::trace!(
                    "community generation {community_generation}, generation {generation}"
                );
                for index in 0..offspring_populations.size() {
                    let parents = offspring_populations[index].clone();
                    for callback in callbacks.iter_mut() {
                        callback.on_generation_start(&parents);
                    }

                    let offspring = strategy.reproduction().process(&parents, &mut rng);
                    let mut offspring = strategy.mutation().process(&offspring, &mut rng);
                    self.fitness.evaluate(&mut offspring);

                    let merged = strategy
                        .integration()
                        .process(&Community::from(vec![offspring, parents]), &mut rng);
                    let survivors = strategy.selection().process(&merged[0], &mut rng);

                    for callback in callbacks.iter_mut() {
                        callback.on_generation_end(&survivors);
                    }
                    offspring_populations.replace(index, survivors);
                }
            }

            if strategy.select_parent_populations() {
                offspring_populations.integrate(parent_populations.clone());
            }
            parent_populations =
                strategy.population_selection().process(&offspring_populations, &mut rng);
            log::debug!(
                "community generation {community_generation} selected {} populations",
                parent_populations.size()
            );
        }

        for population in parent_populations.iter() {
            for callback in callbacks.iter_mut() {
                callback.on_end(population);
            }
        }
        Ok(parent_populations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::Fitness;
    use crate::genome::Individual;
    use crate::ops::mutation::UniformInt;
    use crate::ops::reproduction::Crossover;
    use crate::ops::selection::Tournament;
    use crate::pool::{IntegerPool, NumberPool};

    const TARGET: [i64; 5] = [4, 74, 43, 23, 0];

    fn negative_mse_fitness() -> Fitness<i64> {
        Fitness::new(|ind: &Individual<i64>| {
            -ind.genes()
                .iter()
                .zip(TARGET)
                .map(|(&g, t)| ((g - t) as f64).powi(2))
                .sum::<f64>()
                / TARGET.len() as f64
        })
    }

    fn real_sphere_fitness() -> Fitness<f64> {
        Fitness::new(|ind: &Individual<f64>| -ind.genes().iter().map(|g| g * g).sum::<f64>())
    }

    #[test]
    fn test_synchronous_process_improves_on_initial_best() {
        let breeder = Breeder::new(IntegerPool::new(5, 0, 101));
        let environment = Environment::new(breeder, negative_mse_fitness()).with_seed(42);
        let strategy = Strategy::new(
            Tournament::new(3),
            Crossover::new(1, 0.7),
            UniformInt::new(0.01, 0, 100),
            100,
            100,
        );

        let mut tracker = FitnessTracker::new();
        let result = environment.execute(&strategy, &mut [&mut tracker]).unwrap();

        assert_eq!(result.size(), 1);
        assert_eq!(result[0].size(), 100);
        // 100 generation starts plus the final on_end record
        assert_eq!(tracker.best.len(), 101);
        let initial = tracker.best[0];
        let last = *tracker.best.last().unwrap();
        assert!(
            last >= initial,
            "final best {last} fell below the initial best {initial}"
        );
    }

    #[test]
    fn test_plus_strategy_best_is_non_decreasing() {
        let breeder = Breeder::new(NumberPool::new(5, 0.0, 101.0));
        let environment = Environment::new(breeder, real_sphere_fitness()).with_seed(42);
        let strategy = Strategy::from_string("(10/2+40)^5").unwrap();

        let mut tracker: BestWorst<f64> = BestWorst::new();
        let result = environment.execute(&strategy, &mut [&mut tracker]).unwrap();

        assert_eq!(result[0].size(), 10);
        assert_eq!(tracker.best.size(), 5);
        let history = tracker.best.fitness_values();
        for window in history.windows(2) {
            assert!(
                window[1] >= window[0],
                "plus selection keeps the best: {history:?}"
            );
        }
    }

    #[test]
    fn test_two_level_strategy_shapes() {
        let breeder = Breeder::new(NumberPool::new(4, -1.0, 1.0));
        let environment = Environment::new(breeder, real_sphere_fitness()).with_seed(7);
        let strategy = Strategy::from_string("[2/2,4(5/2+20)^3]^2").unwrap();

        let mut tracker: BestWorst<f64> = BestWorst::new();
        let result = environment.execute(&strategy, &mut [&mut tracker]).unwrap();

        assert_eq!(result.size(), 2, "population selection cuts back to pop_mu");
        for population in result.iter() {
            assert_eq!(population.size(), 5);
            assert!(population.iter().all(Individual::fitted));
        }
        // 2 community generations x 3 generations x 4 offspring populations
        assert_eq!(tracker.best.size(), 24);
    }

    #[test]
    fn test_same_seed_reproduces_the_run() {
        let strategy = Strategy::from_string("(5/2+20)^10").unwrap();
        let run = |seed: u64| {
            let breeder = Breeder::new(NumberPool::new(3, -5.0, 5.0));
            Environment::new(breeder, real_sphere_fitness())
                .with_seed(seed)
                .execute(&strategy, &mut [])
                .unwrap()
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }

    #[test]
    fn test_preset_cancellation_returns_initial_populations() {
        let breeder = Breeder::new(NumberPool::new(3, -5.0, 5.0));
        let environment = Environment::new(breeder, real_sphere_fitness()).with_seed(42);
        let strategy = Strategy::from_string("(5/2+20)^1000").unwrap();

        let cancel = Arc::new(AtomicBool::new(true));
        let mut tracker: BestWorst<f64> = BestWorst::new();
        let result = environment
            .execute_with_cancel(&strategy, &mut [&mut tracker], Some(cancel))
            .unwrap();

        assert_eq!(result.size(), 1);
        assert_eq!(result[0].size(), 5);
        assert!(
            tracker.best.is_empty(),
            "no generation may run once the flag is set"
        );
    }

    #[test]
    fn test_invalid_strategy_is_rejected_before_running() {
        let breeder = Breeder::new(IntegerPool::new(5, 0, 10));
        let environment = Environment::new(breeder, negative_mse_fitness());
        let strategy = Strategy::new(
            Tournament::new(3),
            Crossover::new(1, 0.7),
            UniformInt::new(0.1, 0, 10),
            0,
            10,
        );
        assert!(matches!(
            environment.execute(&strategy, &mut []),
            Err(EvoError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_result_individuals_are_evaluated() {
        let breeder = Breeder::new(IntegerPool::new(5, 0, 101));
        let environment = Environment::new(breeder, negative_mse_fitness()).with_seed(1);
        let strategy = Strategy::new(
            Tournament::new(2),
            Crossover::new(1, 0.5),
            UniformInt::new(0.05, 0, 101),
            10,
            3,
        );
        let result = environment.execute(&strategy, &mut []).unwrap();
        assert!(result[0].iter().all(Individual::fitted));
    }
}
