//! corpus-clean CLI library
//!
//! This library provides the command-line interface for filtering
//! parallel machine-translation corpora.

pub mod commands;
pub mod error;
pub mod language_source;
pub mod progress;
pub mod report;

pub use commands::{normalize_legacy_flags, CleanArgs};
pub use error::{CliError, CliResult};
