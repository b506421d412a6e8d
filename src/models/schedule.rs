//! Genomes and decoded weekly schedules.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Weekday, DAYS_PER_WEEK};

/// Raw candidate: one catalog index per weekday, Monday first.
pub type Genome = [usize; DAYS_PER_WEEK];

/// A weekly plan keyed by weekday.
///
/// Produced by [`decode`](crate::encoding::decode); never mutated after
/// construction. Iteration is always in genome order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecodedSchedule {
    days: BTreeMap<Weekday, String>,
}

impl DecodedSchedule {
    pub(crate) fn from_names(names: [String; DAYS_PER_WEEK]) -> Self {
        Self {
            days: Weekday::ALL.into_iter().zip(names).collect(),
        }
    }

    /// Group assigned to a day.
    pub fn get(&self, day: Weekday) -> Option<&str> {
        self.days.get(&day).map(String::as_str)
    }

    /// `(day, group)` pairs in genome order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &str)> {
        self.days.iter().map(|(d, g)| (*d, g.as_str()))
    }

    /// Group names in genome order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.days.values().map(String::as_str)
    }

    /// Consecutive-day pairs (Mon–Tue … Sat–Sun).
    pub fn adjacent_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names().zip(self.names().skip(1))
    }

    /// Number of distinct groups other than `rest`.
    pub fn distinct_training_groups(&self, rest: &str) -> usize {
        self.names()
            .filter(|g| *g != rest)
            .collect::<HashSet<_>>()
            .len()
    }

    /// How many days are assigned `group`.
    pub fn count(&self, group: &str) -> usize {
        self.names().filter(|g| *g == group).count()
    }

    /// Whether `group` appears at least once.
    pub fn contains(&self, group: &str) -> bool {
        self.names().any(|g| g == group)
    }
}

impl fmt::Display for DecodedSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (day, group) in self.iter() {
            writeln!(f, "{day}: {group}")?;
        }
        Ok(())
    }
}
