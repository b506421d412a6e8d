//! Weekly-routine domain models.
//!
//! | Type | Role |
//! |------|------|
//! | [`Weekday`] | Gene position (Monday = 0) |
//! | [`GroupCatalog`] | Genome alphabet, including the rest sentinel |
//! | [`Availability`] | Minutes per day; zero forces rest |
//! | [`FitnessWeights`] | Weights of the four criteria |
//! | [`Preferences`] | Cardio minimum, legs bonus, diversity band |
//! | [`Genome`] / [`DecodedSchedule`] | Raw and readable candidate |

mod availability;
mod catalog;
mod preferences;
mod schedule;
mod weekday;

pub use availability::Availability;
pub use catalog::{GroupCatalog, DEFAULT_REST_GROUP};
pub use preferences::{
    DiversityTarget, FitnessWeights, Preferences, DEFAULT_CARDIO_GROUP, DEFAULT_LEGS_GROUP,
};
pub use schedule::{DecodedSchedule, Genome};
pub use weekday::{Weekday, DAYS_PER_WEEK};
