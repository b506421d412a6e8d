//! Weekly training-split optimization for the U-Engine ecosystem.
//!
//! Finds a 7-day muscle-group schedule that balances group diversity,
//! spacing between repeated groups, days without available time, and user
//! preferences such as a weekly cardio minimum. The genetic search itself
//! is provided by `u-metaheur` at a lower layer; this crate supplies the
//! encoding and the fitness function.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Weekday`, `GroupCatalog`, `Availability`,
//!   `FitnessWeights`, `Preferences`, `DecodedSchedule`
//! - **`settings`**: Routine and experiment configuration (YAML/TOML/JSON)
//! - **`encoding`**: Gene space derivation and genome decoding
//! - **`fitness`**: The four scoring criteria and their weighted sum
//! - **`ga`**: `GaProblem` implementation, chromosome and operators
//! - **`search`**: One configured run from configuration to decoded result
//!
//! # Example
//!
//! ```
//! use u_routine::models::{Availability, FitnessWeights, GroupCatalog, Weekday};
//! use u_routine::settings::RoutineConfig;
//! use u_routine::{encoding, fitness};
//!
//! let config = RoutineConfig::new(
//!     GroupCatalog::new(["Cardio", "Piernas", "Descanso"]),
//!     FitnessWeights::uniform(0.25),
//! )
//! .with_availability(Availability::new().with_minutes(Weekday::Sun, 0));
//!
//! let space = encoding::gene_space(&config).unwrap();
//! assert_eq!(space.choices(Weekday::Sun), &[2]);
//!
//! let score = fitness::evaluate(&[0, 1, 0, 1, 0, 1, 2], &config).unwrap();
//! assert!(score > 0.0);
//! ```

pub mod encoding;
pub mod error;
pub mod fitness;
pub mod ga;
pub mod models;
pub mod search;
pub mod settings;

pub use error::{ConfigError, EncodingError, Error, Result};
pub use search::{run_search, SearchOutcome};
