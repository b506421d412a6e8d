//! Weekly-routine GA problem definition.
//!
//! Implements `u_metaheur::ga::GaProblem` for routine optimization.
//! Bridges the encoder and the fitness evaluator to the generic GA
//! framework; nothing else in the crate knows the engine's API.

use std::sync::{Mutex, MutexGuard};

use log::{debug, error};
use rand::Rng;
use u_metaheur::ga::GaProblem;

use super::chromosome::WeekChromosome;
use super::operators::GeneticOperators;
use super::stats::{PopulationShape, PopulationStats};
use crate::encoding::{gene_space, GeneSpace};
use crate::error::{ConfigError, EncodingError};
use crate::fitness;
use crate::settings::RoutineConfig;

/// GA problem definition for weekly routine optimization.
///
/// Fitness is the negated schedule score, since the engine minimizes.
///
/// # Example
/// ```no_run
/// use u_routine::ga::RoutineGaProblem;
/// use u_routine::settings::RoutineConfig;
/// use u_metaheur::ga::{GaConfig, GaRunner};
///
/// let config = RoutineConfig::load("routine.yaml")?;
/// let problem = RoutineGaProblem::new(config)?;
/// let result = GaRunner::run(&problem, &GaConfig::default())?;
/// println!("best score: {}", -result.best_fitness);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct RoutineGaProblem {
    config: RoutineConfig,
    space: GeneSpace,
    operators: GeneticOperators,
    violations: Mutex<ViolationLog>,
    stats: Mutex<PopulationStats>,
}

/// Encoding violations seen during evaluation.
#[derive(Debug, Default)]
struct ViolationLog {
    count: usize,
    first: Option<EncodingError>,
}

impl RoutineGaProblem {
    /// Creates a problem from a validated configuration.
    pub fn new(config: RoutineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let space = gene_space(&config)?;
        Ok(Self {
            config,
            space,
            operators: GeneticOperators::default(),
            violations: Mutex::new(ViolationLog::default()),
            stats: Mutex::new(PopulationStats::default()),
        })
    }

    /// Enables per-generation average tracking for a run with this layout.
    pub fn with_population_shape(mut self, shape: PopulationShape) -> Self {
        self.stats = Mutex::new(PopulationStats::new(Some(shape)));
        self
    }

    /// Sets the genetic operators.
    pub fn with_operators(mut self, operators: GeneticOperators) -> Self {
        self.operators = operators;
        self
    }

    pub fn config(&self) -> &RoutineConfig {
        &self.config
    }

    pub fn gene_space(&self) -> &GeneSpace {
        &self.space
    }

    /// Schedule score of a chromosome (higher = better).
    ///
    /// Chromosomes outside the gene space are rejected even if the catalog
    /// could decode them.
    pub fn score(&self, chromosome: &WeekChromosome) -> Result<f64, EncodingError> {
        self.space.check(&chromosome.genes)?;
        fitness::evaluate(&chromosome.genes, &self.config)
    }

    /// Number of evaluations that hit an encoding violation.
    pub fn violation_count(&self) -> usize {
        self.violations().count
    }

    /// Takes the recorded violations, resetting the log.
    ///
    /// Returns `None` when every evaluated chromosome was legal.
    pub fn take_violations(&self) -> Option<EncodingError> {
        let log = std::mem::take(&mut *self.violations());
        log.first.map(|first| EncodingError::ContractViolations {
            count: log.count,
            first: Box::new(first),
        })
    }

    /// Takes the mean population score per generation, index 0 being the
    /// initial population.
    ///
    /// Empty unless [`with_population_shape`](Self::with_population_shape)
    /// was set.
    pub fn take_average_history(&self) -> Vec<f64> {
        self.stats().take_averages()
    }

    fn stats(&self) -> MutexGuard<'_, PopulationStats> {
        self.stats
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn violations(&self) -> MutexGuard<'_, ViolationLog> {
        self.violations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record_violation(&self, err: EncodingError) {
        error!("rejecting chromosome: {err}");
        let mut log = self.violations();
        log.count += 1;
        log.first.get_or_insert(err);
    }
}

impl GaProblem for RoutineGaProblem {
    type Individual = WeekChromosome;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> WeekChromosome {
        WeekChromosome::random(&self.space, rng)
    }

    fn evaluate(&self, individual: &WeekChromosome) -> f64 {
        let score = match self.score(individual) {
            Ok(score) => score,
            Err(err) => {
                self.record_violation(err);
                f64::NEG_INFINITY
            }
        };
        self.stats().record(score);
        -score
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &WeekChromosome,
        parent2: &WeekChromosome,
        rng: &mut R,
    ) -> Vec<WeekChromosome> {
        let (c1, c2) = self.operators.crossover(parent1, parent2, rng);
        vec![c1, c2]
    }

    fn mutate<R: Rng>(&self, individual: &mut WeekChromosome, rng: &mut R) {
        self.operators.mutate(individual, &self.space, rng);
    }

    fn on_generation(&self, generation: usize, best_fitness: f64) {
        self.stats().flush();
        debug!("generation {generation}: best score {:.4}", -best_fitness);
    }
}
