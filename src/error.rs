//! Error types.
//!
//! Two families, matching the two ways a run can go wrong:
//!
//! - [`ConfigError`]: the configuration is malformed or incomplete. Raised
//!   before any search starts; not recoverable locally.
//! - [`EncodingError`]: a genome broke the encoding contract (wrong length,
//!   gene outside the catalog or outside its day's gene space). Always
//!   surfaced, never clamped.

use thiserror::Error;

use crate::models::Weekday;

/// Malformed or incomplete configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("rest group '{0}' is not in the group catalog")]
    MissingRestGroup(String),

    #[error("rest group '{name}' appears {count} times in the group catalog")]
    DuplicateRestGroup { name: String, count: usize },

    #[error("group catalog is empty")]
    EmptyCatalog,

    #[error("fitness_weights is missing required key '{0}'")]
    MissingWeight(&'static str),

    #[error("fitness weight '{key}' must be a finite non-negative number, got {value}")]
    InvalidWeight { key: &'static str, value: f64 },

    #[error("unknown weekday label '{0}'")]
    UnknownWeekday(String),

    #[error("diversity target [{low}, {high}] has low > high")]
    InvalidDiversityTarget { low: u32, high: u32 },

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("invalid search parameter: {0}")]
    InvalidSearch(String),

    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// A genome that violates the encoding contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("genome has {actual} genes, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("gene {value} for {day} is outside the group catalog (size {catalog_len})")]
    GeneOutOfRange {
        day: Weekday,
        value: usize,
        catalog_len: usize,
    },

    #[error("gene {value} for {day} is outside the day's gene space")]
    OutsideGeneSpace { day: Weekday, value: usize },

    #[error("{count} evaluated chromosome(s) violated the gene space; first: {first}")]
    ContractViolations { count: usize, first: Box<EncodingError> },
}

/// Crate-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

pub type Result<T> = std::result::Result<T, Error>;
