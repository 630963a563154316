use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::error::AdminError;
use crate::{ADMINS_FILE, DEFAULT_HASH_COST};

// Work factors bcrypt accepts
const MIN_HASH_COST: u32 = 4;
const MAX_HASH_COST: u32 = 31;

/// Configuration for an admin store backed by a JSON file
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    pub data_file: PathBuf, // Location of the admins collection
    pub hash_cost: u32,     // bcrypt work factor used for new credentials
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(ADMINS_FILE),
            hash_cost: DEFAULT_HASH_COST,
        }
    }
}

impl StoreConfig {
    /// Create a configuration for the given data file with the default cost
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            ..Self::default()
        }
    }

    /// Override the bcrypt cost
    pub fn with_hash_cost(mut self, hash_cost: u32) -> Self {
        self.hash_cost = hash_cost;
        self
    }

    /// Check that the configuration can be used to open a store
    pub fn validate(&self) -> Result<(), AdminError> {
        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&self.hash_cost) {
            return Err(AdminError::InvalidConfig(format!(
                "hash cost must be between {} and {}, got {}",
                MIN_HASH_COST,
                MAX_HASH_COST,
                self.hash_cost
            )));
        }
        if self.data_file.as_os_str().is_empty() {
            return Err(AdminError::InvalidConfig(
                "data file path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
