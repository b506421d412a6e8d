//! Configurable genetic operators for weekly chromosomes.
//!
//! Provides runtime-selectable crossover and mutation strategies
//! via [`GeneticOperators`].
//!
//! # Usage
//!
//! ```
//! use u_routine::ga::operators::{GeneticOperators, CrossoverType, MutationType};
//!
//! let ops = GeneticOperators::default();
//! assert_eq!(ops.crossover_type, CrossoverType::SinglePoint);
//! assert_eq!(ops.mutation_type, MutationType::RandomReset);
//! ```

use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::chromosome::{
    random_reset_mutation, single_point_crossover, swap_mutation, two_point_crossover,
    uniform_crossover, WeekChromosome,
};
use crate::encoding::GeneSpace;
use crate::error::ConfigError;

/// Crossover strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverType {
    /// One cut point, tails exchanged.
    SinglePoint,
    /// One segment exchanged.
    TwoPoint,
    /// Each position exchanged with probability 0.5.
    Uniform,
}

/// Mutation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationType {
    /// Reset one free day to another legal group.
    RandomReset,
    /// Swap the groups of two free days.
    Swap,
}

impl FromStr for CrossoverType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single_point" => Ok(CrossoverType::SinglePoint),
            "two_point" | "two_points" => Ok(CrossoverType::TwoPoint),
            "uniform" => Ok(CrossoverType::Uniform),
            other => Err(ConfigError::InvalidSearch(format!(
                "unknown crossover_type '{other}'"
            ))),
        }
    }
}

impl FromStr for MutationType {
    type Err = ConfigError;

    /// `random` is accepted as an alias of `random_reset`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" | "random_reset" => Ok(MutationType::RandomReset),
            "swap" => Ok(MutationType::Swap),
            other => Err(ConfigError::InvalidSearch(format!(
                "unknown mutation_type '{other}'"
            ))),
        }
    }
}

/// Runtime-selectable genetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneticOperators {
    pub crossover_type: CrossoverType,
    pub mutation_type: MutationType,
}

impl Default for GeneticOperators {
    fn default() -> Self {
        Self {
            crossover_type: CrossoverType::SinglePoint,
            mutation_type: MutationType::RandomReset,
        }
    }
}

impl GeneticOperators {
    /// Performs crossover using the configured strategy.
    pub fn crossover<R: Rng>(
        &self,
        p1: &WeekChromosome,
        p2: &WeekChromosome,
        rng: &mut R,
    ) -> (WeekChromosome, WeekChromosome) {
        match self.crossover_type {
            CrossoverType::SinglePoint => single_point_crossover(p1, p2, rng),
            CrossoverType::TwoPoint => two_point_crossover(p1, p2, rng),
            CrossoverType::Uniform => uniform_crossover(p1, p2, rng),
        }
    }

    /// Performs mutation using the configured strategy.
    pub fn mutate<R: Rng>(&self, chromosome: &mut WeekChromosome, space: &GeneSpace, rng: &mut R) {
        match self.mutation_type {
            MutationType::RandomReset => random_reset_mutation(chromosome, space, rng),
            MutationType::Swap => swap_mutation(chromosome, space, rng),
        }
    }
}
