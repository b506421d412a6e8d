//! Domain configuration: what a valid week looks like and how it is scored.

use std::collections::HashMap;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::FileFormat;
use crate::error::ConfigError;
use crate::models::{
    Availability, DiversityTarget, FitnessWeights, GroupCatalog, Preferences, Weekday,
    DEFAULT_CARDIO_GROUP, DEFAULT_LEGS_GROUP, DEFAULT_REST_GROUP,
};

/// Validated domain configuration.
///
/// # Example
///
/// ```
/// use u_routine::models::{Availability, FitnessWeights, GroupCatalog, Weekday};
/// use u_routine::settings::RoutineConfig;
///
/// let config = RoutineConfig::new(
///     GroupCatalog::new(["Cardio", "Piernas", "Descanso"]),
///     FitnessWeights::uniform(0.25),
/// )
/// .with_availability(Availability::new().with_minutes(Weekday::Sun, 0));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutineConfig {
    /// Genome alphabet.
    pub catalog: GroupCatalog,
    /// Minutes available per day.
    pub availability: Availability,
    /// Criterion weights.
    pub weights: FitnessWeights,
    /// Optional user preferences.
    pub preferences: Preferences,
}

/// Configuration file as written by users.
#[derive(Debug, Deserialize)]
struct RawRoutineConfig {
    groups: Vec<String>,
    #[serde(default)]
    rest_group: Option<String>,
    #[serde(default)]
    availability_minutes: HashMap<String, u32>,
    #[serde(default)]
    fitness_weights: HashMap<String, f64>,
    #[serde(default)]
    preferences: Option<RawPreferences>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPreferences {
    #[serde(default)]
    require_cardio_per_week: Option<i64>,
    #[serde(default)]
    legs_priority_bonus: Option<f64>,
    #[serde(default)]
    diversity_target_unique_groups: Option<Vec<u32>>,
    #[serde(default)]
    cardio_group: Option<String>,
    #[serde(default)]
    legs_group: Option<String>,
}

impl RawPreferences {
    fn into_preferences(self) -> Result<Preferences, ConfigError> {
        let diversity_target = match self.diversity_target_unique_groups.as_deref() {
            None => DiversityTarget::default(),
            Some([low, high]) => DiversityTarget::new(*low, *high),
            Some(other) => {
                return Err(ConfigError::Invalid(format!(
                    "diversity_target_unique_groups must have 2 elements, got {}",
                    other.len()
                )))
            }
        };
        Ok(Preferences {
            require_cardio_per_week: self.require_cardio_per_week,
            legs_priority_bonus: self.legs_priority_bonus,
            diversity_target,
            cardio_group: self
                .cardio_group
                .unwrap_or_else(|| DEFAULT_CARDIO_GROUP.to_string()),
            legs_group: self
                .legs_group
                .unwrap_or_else(|| DEFAULT_LEGS_GROUP.to_string()),
        })
    }
}

impl TryFrom<RawRoutineConfig> for RoutineConfig {
    type Error = ConfigError;

    fn try_from(raw: RawRoutineConfig) -> Result<Self, Self::Error> {
        let catalog = GroupCatalog {
            groups: raw.groups,
            rest_group: raw
                .rest_group
                .unwrap_or_else(|| DEFAULT_REST_GROUP.to_string()),
        };

        let mut availability = Availability::new();
        for (label, minutes) in raw.availability_minutes {
            let day: Weekday = label.parse()?;
            availability = availability.with_minutes(day, minutes);
        }

        let weights = FitnessWeights::from_map(&raw.fitness_weights)?;
        let preferences = raw.preferences.unwrap_or_default().into_preferences()?;

        let config = Self {
            catalog,
            availability,
            weights,
            preferences,
        };
        config.validate()?;
        Ok(config)
    }
}

impl RoutineConfig {
    /// Creates a configuration with no availability limits and default
    /// preferences.
    pub fn new(catalog: GroupCatalog, weights: FitnessWeights) -> Self {
        Self {
            catalog,
            availability: Availability::default(),
            weights,
            preferences: Preferences::default(),
        }
    }

    /// Sets the availability map.
    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    /// Sets the user preferences.
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Loads and validates a configuration file (YAML, TOML or JSON).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("loading routine configuration from {}", path.display());
        let raw: RawRoutineConfig = super::read_file(path)?;
        Self::try_from(raw)
    }

    /// Parses and validates a configuration document.
    pub fn from_str(text: &str, format: FileFormat) -> Result<Self, ConfigError> {
        let raw: RawRoutineConfig = super::read_str(text, format)?;
        Self::try_from(raw)
    }

    /// Checks all invariants the encoder and evaluator rely on.
    ///
    /// Warns (without failing) about settings that are legal but likely
    /// unintended.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.catalog.validate()?;
        self.preferences.diversity_target.validate()?;

        for (key, value) in FitnessWeights::KEYS.into_iter().zip([
            self.weights.diversity,
            self.weights.rest_spacing,
            self.weights.availability,
            self.weights.user_prefs,
        ]) {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { key, value });
            }
        }

        if let Some(bonus) = self.preferences.legs_priority_bonus {
            if !bonus.is_finite() || bonus < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "legs_priority_bonus must be a finite non-negative number, got {bonus}"
                )));
            }
        }

        if self.weights.sum() == 0.0 {
            warn!("all fitness weights are zero; every schedule will score 0");
        }
        let prefs = &self.preferences;
        if prefs.cardio_requirement().is_some() && self.catalog.index_of(&prefs.cardio_group).is_none() {
            warn!(
                "cardio group '{}' is not in the catalog; the cardio requirement can never be met",
                prefs.cardio_group
            );
        }
        if prefs.legs_bonus().is_some() && self.catalog.index_of(&prefs.legs_group).is_none() {
            warn!(
                "legs group '{}' is not in the catalog; the legs bonus never applies",
                prefs.legs_group
            );
        }
        Ok(())
    }
}
