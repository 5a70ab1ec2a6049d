use super::config::AlphabetConfig;
use crate::error::{CoreError, Result};
use std::sync::OnceLock;

static BUILTIN_CONFIG: OnceLock<std::result::Result<AlphabetConfig, String>> = OnceLock::new();

const BUILTIN_TOML: &str = include_str!("../../configs/alphabets.toml");

/// The embedded alphabet table, parsed once
pub fn builtin_config() -> Result<&'static AlphabetConfig> {
    BUILTIN_CONFIG
        .get_or_init(|| AlphabetConfig::from_toml(BUILTIN_TOML).map_err(|e| e.to_string()))
        .as_ref()
        .map_err(|e| CoreError::Configuration(format!("Failed to load built-in alphabets: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_codes() {
        let config = builtin_config().unwrap();
        let mut codes: Vec<&str> = config.alphabets.iter().map(|a| a.code.as_str()).collect();
        codes.sort();
        assert_eq!(codes, vec!["en", "ru"]);
    }

    #[test]
    fn test_builtin_patterns() {
        let config = builtin_config().unwrap();
        let en = config.alphabets.iter().find(|a| a.code == "en").unwrap();
        assert_eq!(en.pattern, "[^A-Za-z ]");
        let ru = config.alphabets.iter().find(|a| a.code == "ru").unwrap();
        assert_eq!(ru.pattern, "[^А-Яа-я ]");
    }

    #[test]
    fn test_builtin_config_is_cached() {
        let first = builtin_config().unwrap();
        let second = builtin_config().unwrap();
        assert!(std::ptr::eq(first, second));
    }
}
