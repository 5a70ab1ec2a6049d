//! Alphabet source management for CLI

use anyhow::{Context, Result};
use corpus_clean_core::AlphabetRegistry;
use std::path::PathBuf;

/// Where alphabet rules come from
#[derive(Debug, Clone)]
pub enum AlphabetSource {
    /// Embedded rules only
    BuiltIn,
    /// Embedded rules extended (or overridden) by an external TOML file
    External {
        /// Path to the alphabet table
        path: PathBuf,
    },
}

impl AlphabetSource {
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => AlphabetSource::External { path },
            None => AlphabetSource::BuiltIn,
        }
    }

    /// Get the display name for the alphabet source
    pub fn display_name(&self) -> String {
        match self {
            AlphabetSource::BuiltIn => "Built-in".to_string(),
            AlphabetSource::External { path } => format!("External: {}", path.display()),
        }
    }

    /// Build the registry for this source
    pub fn load(&self) -> Result<AlphabetRegistry> {
        let mut registry =
            AlphabetRegistry::builtin().context("Failed to load built-in alphabet rules")?;

        if let AlphabetSource::External { path } = self {
            registry.extend_from_file(path).with_context(|| {
                format!("Failed to load alphabet configuration: {}", path.display())
            })?;
        }

        log::debug!(
            "Alphabet rules ({}): {}",
            self.display_name(),
            registry.codes().join(", ")
        );
        Ok(registry)
    }
}
