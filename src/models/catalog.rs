//! Group catalog: the genome alphabet.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default name of the rest sentinel.
pub const DEFAULT_REST_GROUP: &str = "Descanso";

/// Ordered muscle-group categories.
///
/// Gene values are indices into `groups`. Exactly one entry must equal
/// `rest_group`; its position is the rest index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupCatalog {
    /// Group names in index order.
    pub groups: Vec<String>,
    /// Name of the "no training" sentinel.
    pub rest_group: String,
}

impl GroupCatalog {
    /// Creates a catalog with the default rest sentinel name.
    pub fn new<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groups: groups.into_iter().map(Into::into).collect(),
            rest_group: DEFAULT_REST_GROUP.to_string(),
        }
    }

    /// Sets the rest sentinel name.
    pub fn with_rest_group(mut self, name: impl Into<String>) -> Self {
        self.rest_group = name.into();
        self
    }

    /// Number of groups (size of the genome alphabet).
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Name at an index.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.groups.get(index).map(String::as_str)
    }

    /// Index of a group by name (first match).
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g == name)
    }

    /// Position of the rest sentinel.
    ///
    /// Fails if the sentinel is absent or appears more than once.
    pub fn rest_index(&self) -> Result<usize, ConfigError> {
        let mut positions = self
            .groups
            .iter()
            .enumerate()
            .filter(|(_, g)| **g == self.rest_group)
            .map(|(i, _)| i);

        let first = positions
            .next()
            .ok_or_else(|| ConfigError::MissingRestGroup(self.rest_group.clone()))?;
        let extra = positions.count();
        if extra > 0 {
            return Err(ConfigError::DuplicateRestGroup {
                name: self.rest_group.clone(),
                count: extra + 1,
            });
        }
        Ok(first)
    }

    /// Checks the catalog invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        self.rest_index().map(|_| ())
    }
}
