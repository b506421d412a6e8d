//! Fixed-length weekly chromosome and its gene-space–closed operators.
//!
//! Every operator here maps chromosomes inside the gene space to
//! chromosomes inside the gene space: initialization and mutation draw
//! from each day's legal values, and crossover only exchanges genes at the
//! same position.

use rand::prelude::IndexedRandom;
use rand::Rng;
use u_metaheur::ga::Individual;

use crate::encoding::GeneSpace;
use crate::models::{Genome, Weekday, DAYS_PER_WEEK};

/// One candidate week.
///
/// Lower fitness = better (u-metaheur minimizes); the stored value is the
/// negated schedule score.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekChromosome {
    /// Catalog index per weekday, Monday first.
    pub genes: Genome,
    /// Fitness value (lower = better).
    pub fitness: f64,
}

impl Individual for WeekChromosome {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

impl WeekChromosome {
    /// Wraps genes in an unevaluated chromosome.
    pub fn new(genes: Genome) -> Self {
        Self {
            genes,
            fitness: f64::INFINITY,
        }
    }

    /// Draws each gene uniformly from its day's legal values.
    pub fn random<R: Rng>(space: &GeneSpace, rng: &mut R) -> Self {
        let genes = Weekday::ALL.map(|day| {
            space
                .choices(day)
                .choose(rng)
                .copied()
                .unwrap_or_default()
        });
        Self::new(genes)
    }

    /// Schedule score (positive orientation) of an evaluated chromosome.
    pub fn score(&self) -> f64 {
        -self.fitness
    }
}

/// Single-point crossover.
///
/// Cut point in `1..7`; children swap tails.
pub fn single_point_crossover<R: Rng>(
    p1: &WeekChromosome,
    p2: &WeekChromosome,
    rng: &mut R,
) -> (WeekChromosome, WeekChromosome) {
    let cut = rng.random_range(1..DAYS_PER_WEEK);
    let mut c1 = p1.genes;
    let mut c2 = p2.genes;
    c1[cut..].copy_from_slice(&p2.genes[cut..]);
    c2[cut..].copy_from_slice(&p1.genes[cut..]);
    (WeekChromosome::new(c1), WeekChromosome::new(c2))
}

/// Two-point crossover: children swap the segment `[a, b)`.
pub fn two_point_crossover<R: Rng>(
    p1: &WeekChromosome,
    p2: &WeekChromosome,
    rng: &mut R,
) -> (WeekChromosome, WeekChromosome) {
    let mut a = rng.random_range(0..DAYS_PER_WEEK);
    let mut b = rng.random_range(0..DAYS_PER_WEEK);
    if a > b {
        std::mem::swap(&mut a, &mut b);
    }
    let b = b + 1;
    let mut c1 = p1.genes;
    let mut c2 = p2.genes;
    c1[a..b].copy_from_slice(&p2.genes[a..b]);
    c2[a..b].copy_from_slice(&p1.genes[a..b]);
    (WeekChromosome::new(c1), WeekChromosome::new(c2))
}

/// Uniform crossover: each position swaps with probability 0.5.
pub fn uniform_crossover<R: Rng>(
    p1: &WeekChromosome,
    p2: &WeekChromosome,
    rng: &mut R,
) -> (WeekChromosome, WeekChromosome) {
    let mut c1 = p1.genes;
    let mut c2 = p2.genes;
    for i in 0..DAYS_PER_WEEK {
        if rng.random_bool(0.5) {
            std::mem::swap(&mut c1[i], &mut c2[i]);
        }
    }
    (WeekChromosome::new(c1), WeekChromosome::new(c2))
}

/// Random reset: one non-fixed day gets a different legal value.
///
/// No-op when every day is fixed.
pub fn random_reset_mutation<R: Rng>(ch: &mut WeekChromosome, space: &GeneSpace, rng: &mut R) {
    let free: Vec<Weekday> = Weekday::ALL
        .into_iter()
        .filter(|d| !space.is_fixed(*d))
        .collect();
    let Some(&day) = free.choose(rng) else {
        return;
    };
    let current = ch.genes[day.index()];
    let others: Vec<usize> = space
        .choices(day)
        .iter()
        .copied()
        .filter(|v| *v != current)
        .collect();
    if let Some(&value) = others.choose(rng) {
        ch.genes[day.index()] = value;
    }
}

/// Swaps the genes of two non-fixed days.
///
/// Non-fixed days share the full catalog as their gene space, so the
/// result stays legal. No-op with fewer than two free days.
pub fn swap_mutation<R: Rng>(ch: &mut WeekChromosome, space: &GeneSpace, rng: &mut R) {
    let free: Vec<usize> = Weekday::ALL
        .into_iter()
        .filter(|d| !space.is_fixed(*d))
        .map(Weekday::index)
        .collect();
    if free.len() < 2 {
        return;
    }
    let picked: Vec<usize> = free.choose_multiple(rng, 2).copied().collect();
    ch.genes.swap(picked[0], picked[1]);
}
