//! Canonical weekday labels.
//!
//! The genome is indexed by weekday in Monday…Sunday order; every
//! per-day structure in the crate uses [`Weekday::index`] to line up with
//! gene positions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of days (and genes) in a week.
pub const DAYS_PER_WEEK: usize = 7;

/// A day of the week.
///
/// Ordering follows the canonical genome order (Monday first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// All days in genome order.
    pub const ALL: [Weekday; DAYS_PER_WEEK] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Gene position of this day (0 = Monday).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Day at a gene position, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Short lowercase label used in configuration files.
    pub fn label(self) -> &'static str {
        match self {
            Weekday::Mon => "mon",
            Weekday::Tue => "tue",
            Weekday::Wed => "wed",
            Weekday::Thu => "thu",
            Weekday::Fri => "fri",
            Weekday::Sat => "sat",
            Weekday::Sun => "sun",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Weekday {
    type Err = ConfigError;

    /// Accepts short (`mon`) and long (`monday`) names, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let day = match s.trim().to_ascii_lowercase().as_str() {
            "mon" | "monday" => Weekday::Mon,
            "tue" | "tuesday" => Weekday::Tue,
            "wed" | "wednesday" => Weekday::Wed,
            "thu" | "thursday" => Weekday::Thu,
            "fri" | "friday" => Weekday::Fri,
            "sat" | "saturday" => Weekday::Sat,
            "sun" | "sunday" => Weekday::Sun,
            _ => return Err(ConfigError::UnknownWeekday(s.to_string())),
        };
        Ok(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for (i, day) in Weekday::ALL.iter().enumerate() {
            assert_eq!(day.index(), i);
            assert_eq!(Weekday::from_index(i), Some(*day));
        }
        assert_eq!(Weekday::from_index(7), None);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("mon".parse::<Weekday>().unwrap(), Weekday::Mon);
        assert_eq!("Sunday".parse::<Weekday>().unwrap(), Weekday::Sun);
        assert_eq!(" THU ".parse::<Weekday>().unwrap(), Weekday::Thu);
        assert!(matches!(
            "funday".parse::<Weekday>(),
            Err(ConfigError::UnknownWeekday(_))
        ));
    }

    #[test]
    fn test_ordering_is_genome_order() {
        assert!(Weekday::Mon < Weekday::Tue);
        assert!(Weekday::Sat < Weekday::Sun);
        assert_eq!(Weekday::Sun.to_string(), "sun");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Weekday::Wed).unwrap();
        assert_eq!(json, "\"wed\"");
        let day: Weekday = serde_json::from_str("\"fri\"").unwrap();
        assert_eq!(day, Weekday::Fri);
    }
}
