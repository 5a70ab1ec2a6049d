//! Error types for corpus filtering

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading alphabet rules, reading corpora or writing
/// filtered output
#[derive(Debug, Error)]
pub enum CoreError {
    /// Language tag with no alphabet rule
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Configuration loading, parsing or validation error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Alphabet pattern that does not compile
    #[error("Invalid alphabet pattern for '{code}': {error}")]
    InvalidPattern {
        /// Language code the pattern belongs to
        code: String,
        /// Underlying regex error
        #[source]
        error: regex::Error,
    },

    /// Reading or writing a file failed
    #[error("I/O error on {}: {error}", path.display())]
    Io {
        /// The file or directory involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        error: std::io::Error,
    },

    /// Source and target corpora are not line-aligned
    #[error(
        "Source and target line counts differ: {source_lines} source lines, {target_lines} target lines"
    )]
    LengthMismatch {
        /// Number of source lines
        source_lines: usize,
        /// Number of target lines
        target_lines: usize,
    },
}

impl CoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        CoreError::Io {
            path: path.into(),
            error,
        }
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_language_display() {
        let error = CoreError::UnsupportedLanguage("fr".to_string());
        assert_eq!(error.to_string(), "Unsupported language: fr");
    }

    #[test]
    fn test_io_error_includes_path() {
        let error = CoreError::io(
            "/data/corpus.en",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let msg = error.to_string();
        assert!(msg.contains("/data/corpus.en"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_length_mismatch_display() {
        let error = CoreError::LengthMismatch {
            source_lines: 10,
            target_lines: 9,
        };
        assert_eq!(
            error.to_string(),
            "Source and target line counts differ: 10 source lines, 9 target lines"
        );
    }

    #[test]
    fn test_invalid_pattern_has_source() {
        let pattern = String::from("[unclosed");
        let error = regex::Regex::new(&pattern).unwrap_err();
        let error = CoreError::InvalidPattern {
            code: "xx".to_string(),
            error,
        };
        assert!(std::error::Error::source(&error).is_some());
        assert!(error.to_string().contains("'xx'"));
    }
}
