//! Configuration loading.
//!
//! Two documents drive a run:
//!
//! - [`RoutineConfig`]: the domain (group catalog, availability, weights,
//!   preferences). Consumed by the encoder and the fitness evaluator.
//! - [`SearchConfig`]: engine parameters for one experiment (population,
//!   generations, operator rates, selection, seed).
//!
//! Both are read through the `config` crate: a file source whose format is
//! inferred from its extension (YAML, TOML or JSON), overlaid by environment
//! variables. Raw documents are deserialized first and then validated into
//! typed structs, so a bad file fails before any search begins.

mod routine;
mod search;

pub use routine::RoutineConfig;
pub use search::{SearchConfig, SelectionKind};

pub use ::config::FileFormat;

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::ConfigError;

/// Environment prefix for overrides, e.g. `U_ROUTINE_FITNESS_WEIGHTS__DIVERSITY=0.4`.
pub const ENV_PREFIX: &str = "U_ROUTINE";

fn environment() -> ::config::Environment {
    ::config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

/// Reads a document from a file plus environment overrides.
pub(crate) fn read_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let settings = ::config::Config::builder()
        .add_source(::config::File::from(path).required(true))
        .add_source(environment())
        .build()?;
    Ok(settings.try_deserialize()?)
}

/// Reads a document from an in-memory string.
pub(crate) fn read_str<T: DeserializeOwned>(text: &str, format: FileFormat) -> Result<T, ConfigError> {
    let settings = ::config::Config::builder()
        .add_source(::config::File::from_str(text, format))
        .build()?;
    Ok(settings.try_deserialize()?)
}
