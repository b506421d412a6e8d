//! Fitness weights and user preferences.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default group counted by the cardio requirement.
pub const DEFAULT_CARDIO_GROUP: &str = "Cardio";
/// Default group that triggers the legs bonus.
pub const DEFAULT_LEGS_GROUP: &str = "Piernas";

/// Weights of the four fitness criteria.
///
/// Weights are not normalized; the maximum score is their sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessWeights {
    pub diversity: f64,
    pub rest_spacing: f64,
    pub availability: f64,
    pub user_prefs: f64,
}

impl FitnessWeights {
    /// Keys required in the `fitness_weights` configuration mapping.
    pub const KEYS: [&'static str; 4] = ["diversity", "rest_spacing", "availability", "user_prefs"];

    /// Same weight for every criterion.
    pub fn uniform(weight: f64) -> Self {
        Self {
            diversity: weight,
            rest_spacing: weight,
            availability: weight,
            user_prefs: weight,
        }
    }

    /// Builds weights from a key → value mapping.
    ///
    /// Every key in [`KEYS`](Self::KEYS) must be present; extra keys are
    /// ignored.
    pub fn from_map(map: &HashMap<String, f64>) -> Result<Self, ConfigError> {
        let get = |key: &'static str| {
            let value = *map.get(key).ok_or(ConfigError::MissingWeight(key))?;
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { key, value });
            }
            Ok(value)
        };
        Ok(Self {
            diversity: get("diversity")?,
            rest_spacing: get("rest_spacing")?,
            availability: get("availability")?,
            user_prefs: get("user_prefs")?,
        })
    }

    /// Upper bound of the weighted score.
    pub fn sum(&self) -> f64 {
        self.diversity + self.rest_spacing + self.availability + self.user_prefs
    }
}

/// Inclusive target band for the number of distinct training groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiversityTarget {
    pub low: u32,
    pub high: u32,
}

impl DiversityTarget {
    pub fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.low > self.high {
            return Err(ConfigError::InvalidDiversityTarget {
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }
}

impl Default for DiversityTarget {
    fn default() -> Self {
        Self { low: 4, high: 5 }
    }
}

/// Optional user preferences.
///
/// Every field may be left unset; unset fields disable the corresponding
/// preference or fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Minimum weekly count of the cardio group. `None` or `<= 0` disables.
    pub require_cardio_per_week: Option<i64>,
    /// Bonus added when the legs group appears at least once.
    pub legs_priority_bonus: Option<f64>,
    /// Target range of distinct non-rest groups.
    pub diversity_target: DiversityTarget,
    /// Group counted by the cardio requirement.
    pub cardio_group: String,
    /// Group that triggers the legs bonus.
    pub legs_group: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            require_cardio_per_week: None,
            legs_priority_bonus: None,
            diversity_target: DiversityTarget::default(),
            cardio_group: DEFAULT_CARDIO_GROUP.to_string(),
            legs_group: DEFAULT_LEGS_GROUP.to_string(),
        }
    }
}

impl Preferences {
    /// Sets the weekly cardio minimum.
    pub fn with_cardio_per_week(mut self, count: i64) -> Self {
        self.require_cardio_per_week = Some(count);
        self
    }

    /// Sets the legs bonus.
    pub fn with_legs_bonus(mut self, bonus: f64) -> Self {
        self.legs_priority_bonus = Some(bonus);
        self
    }

    /// Sets the diversity target band.
    pub fn with_diversity_target(mut self, low: u32, high: u32) -> Self {
        self.diversity_target = DiversityTarget::new(low, high);
        self
    }

    /// Cardio minimum, if one is in effect.
    pub fn cardio_requirement(&self) -> Option<u32> {
        match self.require_cardio_per_week {
            Some(n) if n > 0 => Some(u32::try_from(n).unwrap_or(u32::MAX)),
            _ => None,
        }
    }

    /// Legs bonus, if one is in effect.
    pub fn legs_bonus(&self) -> Option<f64> {
        self.legs_priority_bonus.filter(|b| *b != 0.0)
    }
}
