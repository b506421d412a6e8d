//! Experiment configuration for the GA engine.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};
use u_metaheur::ga::{GaConfig, Selection};

use super::FileFormat;
use crate::error::ConfigError;
use crate::ga::operators::{CrossoverType, GeneticOperators, MutationType};

/// Parent selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionKind {
    /// k-way tournament (size from `tournament_k`).
    Tournament,
    /// Fitness-proportionate (roulette wheel).
    Roulette,
    /// Linear ranking.
    Rank,
}

impl FromStr for SelectionKind {
    type Err = ConfigError;

    /// Accepts `tournament`, `roulette` (alias `rws`) and `rank`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tournament" => Ok(SelectionKind::Tournament),
            "roulette" | "rws" => Ok(SelectionKind::Roulette),
            "rank" => Ok(SelectionKind::Rank),
            other => Err(ConfigError::InvalidSearch(format!(
                "unknown selection '{other}' (expected tournament, roulette/rws or rank)"
            ))),
        }
    }
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectionKind::Tournament => "tournament",
            SelectionKind::Roulette => "roulette",
            SelectionKind::Rank => "rank",
        };
        f.write_str(name)
    }
}

/// Parameters of one search run.
///
/// Field names match the experiment files (`population`, `generations`,
/// `crossover_prob`, ...). The run always executes the full generation
/// budget; stagnation-based early stopping is disabled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchConfig {
    /// Individuals per generation.
    pub population: usize,
    /// Number of generations.
    pub generations: usize,
    /// Probability of recombining a selected pair.
    pub crossover_prob: f64,
    /// Probability of mutating an offspring.
    pub mutation_prob: f64,
    /// Parent selection strategy.
    pub selection: SelectionKind,
    /// Tournament size (tournament selection only).
    pub tournament_k: usize,
    /// Recombination operator.
    pub crossover_type: CrossoverType,
    /// Mutation operator.
    pub mutation_type: MutationType,
    /// Seed for reproducible runs. `None` draws a random seed.
    pub random_seed: Option<u64>,
    /// Individuals carried unchanged into the next generation.
    pub keep_elitism: usize,
    /// Evaluate the population in parallel.
    pub parallel: bool,
}

#[derive(Debug, Deserialize)]
struct RawSearchConfig {
    population: usize,
    generations: usize,
    crossover_prob: f64,
    mutation_prob: f64,
    #[serde(default = "default_selection")]
    selection: String,
    #[serde(default = "default_tournament_k")]
    tournament_k: usize,
    #[serde(default)]
    crossover_type: Option<String>,
    #[serde(default)]
    mutation_type: Option<String>,
    #[serde(default)]
    random_seed: Option<u64>,
    #[serde(default = "default_keep_elitism")]
    keep_elitism: usize,
    #[serde(default = "default_parallel")]
    parallel: bool,
}

fn default_selection() -> String {
    "tournament".to_string()
}

fn default_tournament_k() -> usize {
    3
}

fn default_keep_elitism() -> usize {
    1
}

fn default_parallel() -> bool {
    true
}

impl TryFrom<RawSearchConfig> for SearchConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSearchConfig) -> Result<Self, Self::Error> {
        let config = Self {
            population: raw.population,
            generations: raw.generations,
            crossover_prob: raw.crossover_prob,
            mutation_prob: raw.mutation_prob,
            selection: raw.selection.parse()?,
            tournament_k: raw.tournament_k,
            crossover_type: match raw.crossover_type {
                Some(name) => name.parse()?,
                None => CrossoverType::SinglePoint,
            },
            mutation_type: match raw.mutation_type {
                Some(name) => name.parse()?,
                None => MutationType::RandomReset,
            },
            // A zero seed means "unseeded" in experiment files.
            random_seed: raw.random_seed.filter(|s| *s != 0),
            keep_elitism: raw.keep_elitism,
            parallel: raw.parallel,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            population: 50,
            generations: 100,
            crossover_prob: 0.9,
            mutation_prob: 0.1,
            selection: SelectionKind::Tournament,
            tournament_k: 3,
            crossover_type: CrossoverType::SinglePoint,
            mutation_type: MutationType::RandomReset,
            random_seed: None,
            keep_elitism: 1,
            parallel: true,
        }
    }
}

impl SearchConfig {
    /// Sets population size.
    pub fn with_population(mut self, n: usize) -> Self {
        self.population = n;
        self
    }

    /// Sets the generation budget.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets crossover and mutation probabilities.
    pub fn with_rates(mut self, crossover_prob: f64, mutation_prob: f64) -> Self {
        self.crossover_prob = crossover_prob;
        self.mutation_prob = mutation_prob;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: SelectionKind) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Loads and validates an experiment file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("loading search configuration from {}", path.display());
        let raw: RawSearchConfig = super::read_file(path)?;
        Self::try_from(raw)
    }

    /// Parses and validates an experiment document.
    pub fn from_str(text: &str, format: FileFormat) -> Result<Self, ConfigError> {
        let raw: RawSearchConfig = super::read_str(text, format)?;
        Self::try_from(raw)
    }

    /// Validates the parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::InvalidSearch(msg));
        if self.population < 2 {
            return invalid(format!("population must be at least 2, got {}", self.population));
        }
        if self.generations == 0 {
            return invalid("generations must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.crossover_prob) {
            return invalid(format!("crossover_prob must be in [0, 1], got {}", self.crossover_prob));
        }
        if !(0.0..=1.0).contains(&self.mutation_prob) {
            return invalid(format!("mutation_prob must be in [0, 1], got {}", self.mutation_prob));
        }
        if self.selection == SelectionKind::Tournament && self.tournament_k == 0 {
            return invalid("tournament_k must be at least 1".to_string());
        }
        if self.keep_elitism >= self.population {
            return invalid(format!(
                "keep_elitism ({}) must be smaller than population ({})",
                self.keep_elitism, self.population
            ));
        }
        Ok(())
    }

    /// Genetic operators for this experiment.
    pub fn operators(&self) -> GeneticOperators {
        GeneticOperators {
            crossover_type: self.crossover_type,
            mutation_type: self.mutation_type,
        }
    }

    /// Engine configuration for this experiment.
    pub fn to_ga_config(&self) -> GaConfig {
        let selection = match self.selection {
            SelectionKind::Tournament => Selection::Tournament(self.tournament_k),
            SelectionKind::Roulette => Selection::Roulette,
            SelectionKind::Rank => Selection::Rank,
        };
        // Slightly above the exact ratio so the engine's truncating
        // conversion keeps exactly `keep_elitism` individuals.
        let elite_ratio = if self.keep_elitism == 0 {
            0.0
        } else {
            (self.keep_elitism as f64 + 0.5) / self.population as f64
        };

        let mut config = GaConfig::default()
            .with_population_size(self.population)
            .with_max_generations(self.generations)
            .with_selection(selection)
            .with_elite_ratio(elite_ratio)
            .with_crossover_rate(self.crossover_prob)
            .with_mutation_rate(self.mutation_prob)
            .with_stagnation_limit(0)
            .with_parallel(self.parallel);
        if let Some(seed) = self.random_seed {
            config = config.with_seed(seed);
        }
        config
    }
}
