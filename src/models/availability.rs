//! Per-day time availability.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Weekday;

/// Minutes available on each weekday.
///
/// A day with zero minutes only admits the rest sentinel. Days that were
/// never set are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// Explicitly configured minutes per day.
    pub minutes: BTreeMap<Weekday, u32>,
}

impl Availability {
    /// Creates an availability map with no constrained days.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets minutes for a day.
    pub fn with_minutes(mut self, day: Weekday, minutes: u32) -> Self {
        self.minutes.insert(day, minutes);
        self
    }

    /// Configured minutes for a day, `None` if unset.
    pub fn minutes(&self, day: Weekday) -> Option<u32> {
        self.minutes.get(&day).copied()
    }

    /// Whether only rest is allowed on this day.
    pub fn is_blocked(&self, day: Weekday) -> bool {
        self.minutes(day) == Some(0)
    }

    /// Days with zero available minutes, in genome order.
    pub fn blocked_days(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::ALL.into_iter().filter(|d| self.is_blocked(*d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_days_are_unconstrained() {
        let av = Availability::new().with_minutes(Weekday::Sun, 0);
        assert!(av.is_blocked(Weekday::Sun));
        assert!(!av.is_blocked(Weekday::Mon));
        assert_eq!(av.minutes(Weekday::Mon), None);
    }

    #[test]
    fn test_blocked_days_order() {
        let av = Availability::new()
            .with_minutes(Weekday::Sun, 0)
            .with_minutes(Weekday::Wed, 0)
            .with_minutes(Weekday::Thu, 45);
        let blocked: Vec<_> = av.blocked_days().collect();
        assert_eq!(blocked, vec![Weekday::Wed, Weekday::Sun]);
    }
}
