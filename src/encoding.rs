//! Search-space encoding.
//!
//! A genome holds one catalog index per weekday. The gene space restricts
//! each position: a day with zero available minutes only admits the rest
//! index, every other day admits the whole catalog.
//!
//! [`decode`] is the single name-resolution path of the crate. The fitness
//! evaluator scores the [`DecodedSchedule`] it returns, so a reported
//! schedule and its score can never disagree.

use serde::Serialize;

use crate::error::{ConfigError, EncodingError};
use crate::models::{DecodedSchedule, Weekday, DAYS_PER_WEEK};
use crate::settings::RoutineConfig;

/// Legal gene values per weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneSpace {
    days: [Vec<usize>; DAYS_PER_WEEK],
}

impl GeneSpace {
    /// Legal values for a day, ascending.
    pub fn choices(&self, day: Weekday) -> &[usize] {
        &self.days[day.index()]
    }

    /// Whether a day has exactly one legal value.
    pub fn is_fixed(&self, day: Weekday) -> bool {
        self.days[day.index()].len() == 1
    }

    /// Per-day value sets in genome order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[usize])> {
        Weekday::ALL
            .into_iter()
            .zip(self.days.iter().map(Vec::as_slice))
    }

    /// Checks every gene of `genome` against its day's legal values.
    pub fn check(&self, genome: &[usize]) -> Result<(), EncodingError> {
        if genome.len() != DAYS_PER_WEEK {
            return Err(EncodingError::LengthMismatch {
                expected: DAYS_PER_WEEK,
                actual: genome.len(),
            });
        }
        for (day, &value) in Weekday::ALL.iter().zip(genome) {
            if !self.choices(*day).contains(&value) {
                return Err(EncodingError::OutsideGeneSpace { day: *day, value });
            }
        }
        Ok(())
    }

    /// Whether `genome` satisfies every hard constraint.
    pub fn contains(&self, genome: &[usize]) -> bool {
        self.check(genome).is_ok()
    }

    /// Total number of distinct genomes in the space.
    pub fn size(&self) -> u64 {
        self.days.iter().map(|d| d.len() as u64).product()
    }
}

/// Derives the gene space from the catalog and availability map.
///
/// Fails if the rest sentinel is missing from (or duplicated in) the
/// catalog.
pub fn gene_space(config: &RoutineConfig) -> Result<GeneSpace, ConfigError> {
    let rest = config.catalog.rest_index()?;
    let all: Vec<usize> = (0..config.catalog.len()).collect();
    let days = Weekday::ALL.map(|day| {
        if config.availability.is_blocked(day) {
            vec![rest]
        } else {
            all.clone()
        }
    });
    Ok(GeneSpace { days })
}

/// Maps a genome to group names.
///
/// Fails if the genome does not have 7 genes or any value is outside the
/// catalog. Values are never clamped.
pub fn decode(genome: &[usize], config: &RoutineConfig) -> Result<DecodedSchedule, EncodingError> {
    if genome.len() != DAYS_PER_WEEK {
        return Err(EncodingError::LengthMismatch {
            expected: DAYS_PER_WEEK,
            actual: genome.len(),
        });
    }
    let catalog = &config.catalog;
    let mut names: [String; DAYS_PER_WEEK] = Default::default();
    for ((day, &value), slot) in Weekday::ALL.iter().zip(genome).zip(names.iter_mut()) {
        let name = catalog.name(value).ok_or(EncodingError::GeneOutOfRange {
            day: *day,
            value,
            catalog_len: catalog.len(),
        })?;
        *slot = name.to_string();
    }
    Ok(DecodedSchedule::from_names(names))
}
