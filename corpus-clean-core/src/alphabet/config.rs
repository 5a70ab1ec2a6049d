//! TOML schema for alphabet tables

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Root alphabet table, a list of `[[alphabet]]` entries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlphabetConfig {
    #[serde(default, rename = "alphabet")]
    pub alphabets: Vec<AlphabetEntry>,
}

/// One language entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlphabetEntry {
    /// Language tag used on the command line (`en`, `ru`, ...)
    pub code: String,
    /// Human readable name
    #[serde(default)]
    pub name: String,
    /// Regex matching every character outside the alphabet
    pub pattern: String,
}

impl AlphabetConfig {
    /// Parse a table from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AlphabetConfig = toml::from_str(content)
            .map_err(|e| CoreError::Configuration(format!("Failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.alphabets {
            if entry.code.trim().is_empty() {
                return Err(CoreError::Configuration(
                    "Language code is required".to_string(),
                ));
            }
            if entry.pattern.is_empty() {
                return Err(CoreError::Configuration(format!(
                    "Alphabet pattern for '{}' is empty",
                    entry.code
                )));
            }
            if !seen.insert(entry.code.as_str()) {
                return Err(CoreError::Configuration(format!(
                    "Duplicate language code '{}'",
                    entry.code
                )));
            }
        }
        Ok(())
    }
}
