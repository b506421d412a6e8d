//! GA-based routine optimization.
//!
//! Implements a weekly-routine encoding on top of `u-metaheur`'s generic
//! GA framework.
//!
//! # Encoding
//!
//! A chromosome is a fixed array of 7 catalog indices, Monday first. Every
//! operator is closed over the gene space: blocked days keep the rest
//! index, free days draw from the whole catalog.
//!
//! # Submodules
//!
//! - [`operators`]: Runtime-selectable crossover and mutation strategies

mod chromosome;
pub mod operators;
mod problem;
mod stats;

pub use chromosome::{
    random_reset_mutation, single_point_crossover, swap_mutation, two_point_crossover,
    uniform_crossover, WeekChromosome,
};
pub use problem::RoutineGaProblem;
pub use stats::PopulationShape;
