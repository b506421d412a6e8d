//! One optimization run, end to end.
//!
//! Builds the GA problem from a [`RoutineConfig`], runs `u-metaheur`'s
//! [`GaRunner`] with the experiment's [`SearchConfig`], and decodes the
//! best chromosome for reporting. The engine owns population state,
//! operators scheduling and seeding; this module only wires it up.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use log::{debug, info};
use serde::Serialize;
use u_metaheur::ga::GaRunner;

use crate::encoding::decode;
use crate::error::{ConfigError, Result};
use crate::fitness::{breakdown, FitnessBreakdown};
use crate::ga::{PopulationShape, RoutineGaProblem};
use crate::models::{DecodedSchedule, Genome};
use crate::settings::{RoutineConfig, SearchConfig};

/// Result of a search run.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// Best genome found.
    pub best_genome: Genome,
    /// `best_genome` decoded to group names.
    pub schedule: DecodedSchedule,
    /// Weighted score of the best genome (higher = better).
    pub best_score: f64,
    /// Per-criterion scores of the best genome.
    pub breakdown: FitnessBreakdown,
    /// Generations executed.
    pub generations: usize,
    /// Whether the run was stopped through the cancel flag.
    pub cancelled: bool,
    /// Best score after each generation (index 0 = initial population).
    pub score_history: Vec<f64>,
    /// Mean population score after each generation, aligned with
    /// `score_history`.
    pub average_history: Vec<f64>,
}

impl SearchOutcome {
    /// First generation whose best score reached `threshold`.
    pub fn generation_reaching(&self, threshold: f64) -> Option<usize> {
        self.score_history.iter().position(|s| *s >= threshold)
    }
}

/// Runs a search to completion.
pub fn run_search(routine: &RoutineConfig, search: &SearchConfig) -> Result<SearchOutcome> {
    run_search_with_cancel(routine, search, None)
}

/// Runs a search that stops early once `cancel` is set.
///
/// Fails before searching on invalid configuration, and after searching if
/// any evaluated chromosome left the gene space.
pub fn run_search_with_cancel(
    routine: &RoutineConfig,
    search: &SearchConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<SearchOutcome> {
    search.validate()?;
    let ga_config = search.to_ga_config();
    let problem = RoutineGaProblem::new(routine.clone())?
        .with_operators(search.operators())
        .with_population_shape(PopulationShape {
            population: ga_config.population_size,
            elites: (ga_config.population_size as f64 * ga_config.elite_ratio) as usize,
        });

    if routine.availability.blocked_days().next().is_some() {
        debug!("availability criterion is enforced by the gene space and will score 1.0");
    }
    info!(
        "searching {} candidate weeks: population {}, {} generations, {} selection, seed {:?}",
        problem.gene_space().size(),
        search.population,
        search.generations,
        search.selection,
        search.random_seed
    );

    let result = GaRunner::run_with_cancel(&problem, &ga_config, cancel)
        .map_err(ConfigError::InvalidSearch)?;

    if let Some(err) = problem.take_violations() {
        return Err(err.into());
    }

    let best_genome = result.best.genes;
    let schedule = decode(&best_genome, routine)?;
    let breakdown = breakdown(&schedule, routine);
    let score_history: Vec<f64> = result.fitness_history.iter().map(|f| -f).collect();
    let average_history = problem.take_average_history();

    info!(
        "best score {:.4} after {} generations",
        breakdown.total, result.generations
    );

    Ok(SearchOutcome {
        best_genome,
        schedule,
        best_score: breakdown.total,
        breakdown,
        generations: result.generations,
        cancelled: result.cancelled,
        score_history,
        average_history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::gene_space;
    use crate::error::Error;
    use crate::fitness::evaluate;
    use crate::models::{Availability, FitnessWeights, GroupCatalog, Preferences, Weekday};
    use crate::settings::SelectionKind;

    fn routine() -> RoutineConfig {
        RoutineConfig::new(
            GroupCatalog::new(["Pecho", "Espalda", "Piernas", "Hombros", "Brazos", "Cardio", "Descanso"]),
            FitnessWeights {
                diversity: 0.3,
                rest_spacing: 0.3,
                availability: 0.2,
                user_prefs: 0.2,
            },
        )
        .with_availability(Availability::new().with_minutes(Weekday::Sun, 0))
        .with_preferences(
            Preferences::default()
                .with_cardio_per_week(2)
                .with_legs_bonus(0.1),
        )
    }

    fn search() -> SearchConfig {
        SearchConfig::default()
            .with_population(40)
            .with_generations(60)
            .with_seed(42)
            .with_parallel(false)
    }

    #[test]
    fn test_outcome_consistent() {
        let routine = routine();
        let outcome = run_search(&routine, &search()).unwrap();

        let space = gene_space(&routine).unwrap();
        assert!(space.contains(&outcome.best_genome));
        assert_eq!(outcome.schedule, decode(&outcome.best_genome, &routine).unwrap());
        assert_eq!(outcome.best_score, evaluate(&outcome.best_genome, &routine).unwrap());
        assert_eq!(outcome.schedule.get(Weekday::Sun), Some("Descanso"));
        assert_eq!(outcome.breakdown.availability, 1.0);
        assert_eq!(outcome.generations, 60);
        assert_eq!(outcome.score_history.len(), 61);
        assert!(!outcome.cancelled);
    }

    #[test]
    fn test_history_non_decreasing() {
        let outcome = run_search(&routine(), &search()).unwrap();
        for w in outcome.score_history.windows(2) {
            assert!(w[1] >= w[0]);
        }
        assert_eq!(outcome.score_history.last().copied(), Some(outcome.best_score));
    }

    #[test]
    fn test_average_history_aligned_with_best() {
        let outcome = run_search(&routine(), &search().with_parallel(true)).unwrap();
        assert_eq!(outcome.average_history.len(), outcome.generations + 1);
        for (avg, best) in outcome.average_history.iter().zip(&outcome.score_history) {
            assert!(*avg <= best + 1e-12, "average {avg} above best {best}");
            assert!(*avg >= 0.0);
        }
    }

    #[test]
    fn test_seeded_runs_reproducible() {
        let a = run_search(&routine(), &search()).unwrap();
        let b = run_search(&routine(), &search()).unwrap();
        assert_eq!(a.best_genome, b.best_genome);
        assert_eq!(a.score_history, b.score_history);
    }

    #[test]
    fn test_finds_good_week() {
        let outcome = run_search(
            &routine(),
            &search()
                .with_population(60)
                .with_generations(150)
                .with_selection(SelectionKind::Tournament),
        )
        .unwrap();
        // A perfect week exists (score 1.0); the search should get close.
        assert!(outcome.best_score > 0.9, "score {}", outcome.best_score);
        assert!(outcome.generation_reaching(outcome.best_score).is_some());
    }

    #[test]
    fn test_all_selections_run() {
        for selection in [SelectionKind::Tournament, SelectionKind::Roulette, SelectionKind::Rank] {
            let outcome = run_search(
                &routine(),
                &search().with_generations(10).with_selection(selection),
            )
            .unwrap();
            assert!(outcome.best_score.is_finite());
        }
    }

    #[test]
    fn test_invalid_configs_fail_before_search() {
        let mut bad_routine = routine();
        bad_routine.catalog.rest_group = "Off".to_string();
        assert!(matches!(
            run_search(&bad_routine, &search()),
            Err(Error::Config(ConfigError::MissingRestGroup(_)))
        ));

        assert!(matches!(
            run_search(&routine(), &search().with_population(1)),
            Err(Error::Config(ConfigError::InvalidSearch(_)))
        ));
    }

    #[test]
    fn test_cancelled_run() {
        let cancel = Arc::new(AtomicBool::new(true));
        let outcome = run_search_with_cancel(&routine(), &search(), Some(cancel)).unwrap();
        assert!(outcome.cancelled);
        assert_eq!(outcome.generations, 0);
        assert_eq!(outcome.score_history.len(), 1);
        assert_eq!(outcome.average_history.len(), 1);
    }
}
