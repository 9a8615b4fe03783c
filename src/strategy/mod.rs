//! Strategy: the full parameterization of an evolutionary run.
//!
//! A [`Strategy`] bundles the trip counts of the nested evolutionary
//! loop with the operator instances bound to each phase. It can be
//! built two ways:
//!
//! - **Directly**, wiring explicit operator instances via
//!   [`Strategy::new`] and the `with_*` builders — the classic
//!   generational GA setup.
//! - **From an ES signature string** via [`Strategy::from_string`],
//!   which derives the full operator pipeline (truncation selection,
//!   discrete recombination, self-adaptive Gaussian mutation) from
//!   Schwefel's notation.
//!
//! Strategies are immutable once built; the environment only reads
//! them.

mod signature;

pub use signature::Signature;

use std::fmt;

use crate::error::EvoError;
use crate::genome::{Community, Gene, Population};
use crate::ops::integration::{OffspringFirst, TargetSize};
use crate::ops::mutation::NormalPerturbation;
use crate::ops::reproduction::{DiscreteRecombination, EquiMix, Replicate};
use crate::ops::selection::{Best, BestMean};
use crate::ops::{Iteration, Operator};

/// Step-size multiplier of the self-adaptive mutation built by
/// [`Strategy::from_string`].
const DEFAULT_ALPHA: f64 = 1.3;

/// Trip counts and bound operators of an evolutionary run.
///
/// See the [module documentation](self) for the two construction
/// paths.
pub struct Strategy<G: Gene> {
    init_individuals: usize,
    generations: usize,
    init_populations: usize,
    population_generations: usize,
    select_parent_populations: bool,
    selection: Box<dyn Operator<Population<G>>>,
    reproduction: Box<dyn Operator<Population<G>>>,
    mutation: Box<dyn Operator<Population<G>>>,
    integration: Box<dyn Operator<Community<G>>>,
    population_selection: Box<dyn Operator<Community<G>>>,
    population_reproduction: Box<dyn Operator<Community<G>>>,
}

impl<G: Gene> Strategy<G> {
    /// Creates a single-population strategy from explicit operators.
    ///
    /// Defaults: offspring-first integration sized to the parent
    /// population, one population, one community generation, identity
    /// population-level operators, and no parent-population
    /// reselection. Use the `with_*` builders to adjust.
    pub fn new(
        selection: impl Operator<Population<G>> + 'static,
        reproduction: impl Operator<Population<G>> + 'static,
        mutation: impl Operator<Population<G>> + 'static,
        init_individuals: usize,
        generations: usize,
    ) -> Self {
        Self {
            init_individuals,
            generations,
            init_populations: 1,
            population_generations: 1,
            select_parent_populations: false,
            selection: Box::new(selection),
            reproduction: Box::new(reproduction),
            mutation: Box::new(mutation),
            integration: Box::new(OffspringFirst::default()),
            population_selection: Box::new(Replicate::new()),
            population_reproduction: Box::new(Replicate::new()),
        }
    }

    /// Replaces the integration operator.
    pub fn with_integration(mut self, integration: impl Operator<Community<G>> + 'static) -> Self {
        self.integration = Box::new(integration);
        self
    }

    /// Sets the number of initial populations.
    pub fn with_init_populations(mut self, init_populations: usize) -> Self {
        self.init_populations = init_populations;
        self
    }

    /// Sets the number of community generations.
    pub fn with_population_generations(mut self, population_generations: usize) -> Self {
        self.population_generations = population_generations;
        self
    }

    /// Includes the parent populations in population-level selection.
    pub fn with_parent_population_selection(mut self, select: bool) -> Self {
        self.select_parent_populations = select;
        self
    }

    /// Replaces the population-level selection operator.
    pub fn with_population_selection(
        mut self,
        selection: impl Operator<Community<G>> + 'static,
    ) -> Self {
        self.population_selection = Box::new(selection);
        self
    }

    /// Replaces the population-level reproduction operator.
    pub fn with_population_reproduction(
        mut self,
        reproduction: impl Operator<Community<G>> + 'static,
    ) -> Self {
        self.population_reproduction = Box::new(reproduction);
        self
    }

    /// Validates the trip counts.
    ///
    /// # Errors
    /// Returns [`EvoError::InvalidConfig`] when any count is zero.
    pub fn validate(&self) -> Result<(), EvoError> {
        if self.init_individuals == 0 {
            return Err(EvoError::InvalidConfig("init_individuals must be at least 1".into()));
        }
        if self.generations == 0 {
            return Err(EvoError::InvalidConfig("generations must be at least 1".into()));
        }
        if self.init_populations == 0 {
            return Err(EvoError::InvalidConfig("init_populations must be at least 1".into()));
        }
        if self.population_generations == 0 {
            return Err(EvoError::InvalidConfig(
                "population_generations must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Individuals per initial population (μ).
    pub fn init_individuals(&self) -> usize {
        self.init_individuals
    }

    /// Inner generations per community generation.
    pub fn generations(&self) -> usize {
        self.generations
    }

    /// Number of initial populations (μ at population level).
    pub fn init_populations(&self) -> usize {
        self.init_populations
    }

    /// Number of community generations.
    pub fn population_generations(&self) -> usize {
        self.population_generations
    }

    /// Whether parent populations compete in population-level
    /// selection.
    pub fn select_parent_populations(&self) -> bool {
        self.select_parent_populations
    }

    /// The individual-level selection operator.
    pub fn selection(&self) -> &dyn Operator<Population<G>> {
        self.selection.as_ref()
    }

    /// The individual-level reproduction operator.
    pub fn reproduction(&self) -> &dyn Operator<Population<G>> {
        self.reproduction.as_ref()
    }

    /// The individual-level mutation operator.
    pub fn mutation(&self) -> &dyn Operator<Population<G>> {
        self.mutation.as_ref()
    }

    /// The integration operator merging offspring and parents.
    pub fn integration(&self) -> &dyn Operator<Community<G>> {
        self.integration.as_ref()
    }

    /// The population-level selection operator.
    pub fn population_selection(&self) -> &dyn Operator<Community<G>> {
        self.population_selection.as_ref()
    }

    /// The population-level reproduction operator.
    pub fn population_reproduction(&self) -> &dyn Operator<Community<G>> {
        self.population_reproduction.as_ref()
    }
}

impl Strategy<f64> {
    /// Builds a complete strategy from an ES signature string.
    ///
    /// The derived pipeline follows the multimembered evolution
    /// strategy: discrete recombination of ρ parents produces λ
    /// offspring, Gaussian mutation with self-adaptive step sizes
    /// (α = 1.3) perturbs them, and truncation selection cuts back to μ
    /// — with parents competing when the signature says `+`. The
    /// two-level form wires mean-fitness population selection and
    /// equal-share population mixing on top.
    ///
    /// # Errors
    /// Returns [`EvoError::InvalidSignature`] for strings that do not
    /// match the grammar and [`EvoError::InvalidConfig`] for
    /// signatures with inconsistent counts (zero values, ρ exceeding
    /// μ, or λ too small for comma selection).
    pub fn from_string(signature: &str) -> Result<Self, EvoError> {
        let parsed = Signature::parse(signature)?;
        if parsed.ind_rho > parsed.ind_mu {
            return Err(EvoError::InvalidConfig(format!(
                "mixing proportion {} exceeds the parent count {}",
                parsed.ind_rho, parsed.ind_mu
            )));
        }

        let selection_pool = if parsed.ind_parents_included {
            parsed.ind_lambda + parsed.ind_mu
        } else {
            parsed.ind_lambda
        };
        let population_selection_pool = if parsed.pop_parents_included {
            parsed.pop_lambda + parsed.pop_mu
        } else {
            parsed.pop_lambda
        };

        let strategy = Self {
            init_individuals: parsed.ind_mu,
            generations: parsed.ind_gamma,
            init_populations: parsed.pop_mu,
            population_generations: parsed.pop_gamma,
            select_parent_populations: parsed.pop_parents_included,
            selection: Box::new(Best::new(selection_pool, parsed.ind_mu)?),
            reproduction: Box::new(
                DiscreteRecombination::new(parsed.ind_rho, 1.0).with_iteration(
                    Iteration::NRandomBatches {
                        batch_size: parsed.ind_rho,
                        total: Some(parsed.ind_lambda),
                    },
                ),
            ),
            mutation: Box::new(NormalPerturbation::new(1.0, 0.0, 1.0).with_alpha(DEFAULT_ALPHA)),
            integration: Box::new(OffspringFirst::new(TargetSize::Exactly(selection_pool))),
            population_selection: Box::new(BestMean::new(
                population_selection_pool,
                parsed.pop_mu,
            )?),
            population_reproduction: Box::new(EquiMix::new(
                parsed.pop_mu,
                parsed.pop_lambda,
                parsed.pop_rho,
            )),
        };
        log::debug!(
            "parsed strategy {signature:?}: {}/{}{}{} individuals, {}/{}{}{} populations, {} x {} generations",
            parsed.ind_mu,
            parsed.ind_rho,
            if parsed.ind_parents_included { "+" } else { "," },
            parsed.ind_lambda,
            parsed.pop_mu,
            parsed.pop_rho,
            if parsed.pop_parents_included { "+" } else { "," },
            parsed.pop_lambda,
            parsed.pop_gamma,
            parsed.ind_gamma,
        );
        Ok(strategy)
    }
}

impl<G: Gene> fmt::Debug for Strategy<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy")
            .field("init_individuals", &self.init_individuals)
            .field("generations", &self.generations)
            .field("init_populations", &self.init_populations)
            .field("population_generations", &self.population_generations)
            .field("select_parent_populations", &self.select_parent_populations)
            .finish_non_exhaustive()
    }
}
