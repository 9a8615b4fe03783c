//! Evolutionary algorithm framework.
//!
//! Builds and runs evolutionary experiments over populations of
//! candidate solutions — integer or real vectors as well as typed
//! genetic-programming trees — evaluated by a user-supplied fitness
//! function (higher is better):
//!
//! - **Genomes & containers** ([`genome`]): [`Individual`](genome::Individual)
//!   with staleness-tracked fitness, ordered [`Population`](genome::Population)
//!   and [`Community`](genome::Community) containers.
//! - **Gene pools** ([`pool`], [`gp`]): random-genome factories for
//!   integer, real and tree representations.
//! - **Operators** ([`ops`]): selection, reproduction, mutation and
//!   integration with declared input/output cardinalities, driven by
//!   pluggable iteration policies.
//! - **Strategies** ([`strategy`]): a full run parameterization, built
//!   from explicit operators or parsed from Schwefel's ES notation
//!   (`a/b{,+}c(d/e{,+}f)^g`, optionally `[...]^h`).
//! - **Environment** ([`env`]): the nested two-level evolutionary loop
//!   with observer callbacks and cooperative cancellation.
//!
//! # Example
//!
//! A (5/2+20) evolution strategy minimizing the sphere function:
//!
//! ```
//! use evostrat::breeding::Breeder;
//! use evostrat::env::{BestWorst, Environment};
//! use evostrat::fitness::Fitness;
//! use evostrat::genome::Individual;
//! use evostrat::pool::NumberPool;
//! use evostrat::strategy::Strategy;
//!
//! let breeder = Breeder::new(NumberPool::new(5, -10.0, 10.0));
//! let fitness = Fitness::new(|ind: &Individual<f64>| {
//!     -ind.genes().iter().map(|g| g * g).sum::<f64>()
//! });
//! let strategy = Strategy::from_string("(5/2+20)^30").unwrap();
//!
//! let mut tracker: BestWorst<f64> = BestWorst::new();
//! let environment = Environment::new(breeder, fitness).with_seed(42);
//! let result = environment.execute(&strategy, &mut [&mut tracker]).unwrap();
//!
//! let initial = tracker.best[0].fitness();
//! let best = result[0].best().unwrap().fitness();
//! assert!(best >= initial);
//! ```
//!
//! # References
//!
//! - Schwefel (1977), *Numerische Optimierung von Computer-Modellen
//!   mittels der Evolutionsstrategie*
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Koza (1992), *Genetic Programming*

pub mod breeding;
pub mod env;
pub mod error;
pub mod fitness;
pub mod genome;
pub mod gp;
pub mod ops;
pub mod pool;
pub mod random;
pub mod strategy;

pub use error::EvoError;
