//! Alphabet rules
//!
//! An alphabet rule classifies characters of a line as belonging to the
//! language alphabet or not. Rules are looked up by language tag in an
//! [`AlphabetRegistry`], which starts from the embedded table in
//! `configs/alphabets.toml` and can be extended from external TOML files.

pub mod config;
pub mod loader;

pub use config::{AlphabetConfig, AlphabetEntry};

use crate::error::{CoreError, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;

/// Compiled alphabet rule for one language
#[derive(Debug, Clone)]
pub struct AlphabetRule {
    code: String,
    name: String,
    pattern: Regex,
}

impl AlphabetRule {
    /// Compile a rule. `pattern` matches every character outside the alphabet.
    pub fn new(code: impl Into<String>, name: impl Into<String>, pattern: &str) -> Result<Self> {
        let code = code.into();
        let pattern = Regex::new(pattern).map_err(|error| CoreError::InvalidPattern {
            code: code.clone(),
            error,
        })?;
        Ok(Self {
            code,
            name: name.into(),
            pattern,
        })
    }

    fn from_entry(entry: &AlphabetEntry) -> Result<Self> {
        Self::new(entry.code.as_str(), entry.name.as_str(), &entry.pattern)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source text of the negated-alphabet pattern
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Replace foreign characters with spaces, collapse runs of spaces and
    /// lowercase.
    ///
    /// Leading and trailing spaces survive as a single space each, so the
    /// result length can be compared against the raw line length.
    pub fn normalize(&self, text: &str) -> String {
        let stripped = self.pattern.replace_all(text, " ");

        let mut collapsed = String::with_capacity(stripped.len());
        let mut previous_space = false;
        for ch in stripped.chars() {
            if ch == ' ' {
                if previous_space {
                    continue;
                }
                previous_space = true;
            } else {
                previous_space = false;
            }
            collapsed.push(ch);
        }

        collapsed.to_lowercase()
    }

    /// Normalized tokens of `text`
    pub fn tokens(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .split_whitespace()
            .map(str::to_owned)
            .collect()
    }
}

/// Mapping from language tag to alphabet rule
#[derive(Debug, Clone, Default)]
pub struct AlphabetRegistry {
    rules: BTreeMap<String, AlphabetRule>,
}

impl AlphabetRegistry {
    /// Registry holding the embedded rules (`en`, `ru`)
    pub fn builtin() -> Result<Self> {
        Self::from_config(loader::builtin_config()?)
    }

    /// Registry holding exactly the rules of `config`
    pub fn from_config(config: &AlphabetConfig) -> Result<Self> {
        let mut registry = Self::default();
        registry.extend(config)?;
        Ok(registry)
    }

    /// Registry holding exactly the rules of an external TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_config(&read_config(path)?)
    }

    /// Add the rules of `config`. Entries with a known code replace the
    /// existing rule.
    pub fn extend(&mut self, config: &AlphabetConfig) -> Result<()> {
        config.validate()?;
        for entry in &config.alphabets {
            let rule = AlphabetRule::from_entry(entry)?;
            if self.rules.insert(entry.code.clone(), rule).is_some() {
                log::debug!("Alphabet rule '{}' overridden", entry.code);
            }
        }
        Ok(())
    }

    /// Add the rules of an external TOML file
    pub fn extend_from_file(&mut self, path: &Path) -> Result<()> {
        let config = read_config(path)?;
        self.extend(&config)
    }

    /// Look up the rule for `code`
    pub fn get(&self, code: &str) -> Result<&AlphabetRule> {
        self.rules
            .get(code)
            .ok_or_else(|| CoreError::UnsupportedLanguage(code.to_string()))
    }

    /// Recognized language tags, sorted
    pub fn codes(&self) -> Vec<&str> {
        self.rules.keys().map(String::as_str).collect()
    }

    pub fn rules(&self) -> impl Iterator<Item = &AlphabetRule> {
        self.rules.values()
    }
}

/// Built-in rule for `code`
pub fn alphabet_pattern(code: &str) -> Result<AlphabetRule> {
    AlphabetRegistry::builtin()?.get(code).cloned()
}

fn read_config(path: &Path) -> Result<AlphabetConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
    AlphabetConfig::from_toml(&content).map_err(|e| match e {
        CoreError::Configuration(msg) => {
            CoreError::Configuration(format!("{}: {msg}", path.display()))
        }
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn english() -> AlphabetRule {
        alphabet_pattern("en").unwrap()
    }

    #[test]
    fn test_normalize_strips_and_lowercases() {
        assert_eq!(english().normalize("Hello, World!"), "hello world ");
    }

    #[test]
    fn test_normalize_collapses_runs() {
        assert_eq!(english().normalize("a  --  b"), "a b");
        assert_eq!(english().normalize("xk7!!"), "xk ");
    }

    #[test]
    fn test_normalize_keeps_single_leading_space() {
        assert_eq!(english().normalize("12 apples"), " apples");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(english().normalize(""), "");
    }

    #[test]
    fn test_tokens() {
        assert_eq!(
            english().tokens("It's 5 o'clock"),
            vec!["it", "s", "o", "clock"]
        );
        assert!(english().tokens("12345").is_empty());
    }

    #[test]
    fn test_russian_rule() {
        let ru = alphabet_pattern("ru").unwrap();
        assert_eq!(ru.normalize("Привет, мир!"), "привет мир ");
        assert_eq!(ru.normalize("hello"), " ");
        // Ё is outside the basic range
        assert_eq!(ru.normalize("Ёлка"), " лка");
    }

    #[test]
    fn test_unsupported_language() {
        match alphabet_pattern("fr") {
            Err(CoreError::UnsupportedLanguage(code)) => assert_eq!(code, "fr"),
            other => panic!("Expected UnsupportedLanguage, got {other:?}"),
        }
    }

    #[test]
    fn test_builtin_codes() {
        let registry = AlphabetRegistry::builtin().unwrap();
        assert_eq!(registry.codes(), vec!["en", "ru"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let result = AlphabetRule::new("xx", "Broken", "[a-");
        assert!(matches!(result, Err(CoreError::InvalidPattern { .. })));
    }

    #[test]
    fn test_extend_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[[alphabet]]
code = "de"
name = "German"
pattern = "[^A-Za-zÄÖÜäöüß ]"

[[alphabet]]
code = "en"
name = "English (digits allowed)"
pattern = "[^A-Za-z0-9 ]"
"#
        )
        .unwrap();

        let mut registry = AlphabetRegistry::builtin().unwrap();
        registry.extend_from_file(file.path()).unwrap();

        assert_eq!(registry.codes(), vec!["de", "en", "ru"]);
        assert_eq!(registry.get("de").unwrap().normalize("Grüße!"), "grüße ");
        assert_eq!(registry.get("en").unwrap().normalize("route 66"), "route 66");
    }

    #[test]
    fn test_from_file_replaces_builtins() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[[alphabet]]
code = "el"
pattern = "[^Α-Ωα-ω ]"
"#
        )
        .unwrap();

        let registry = AlphabetRegistry::from_file(file.path()).unwrap();
        assert_eq!(registry.codes(), vec!["el"]);
        assert!(registry.get("en").is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let result = AlphabetRegistry::from_file(Path::new("/nonexistent/alphabets.toml"));
        match result {
            Err(CoreError::Io { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent/alphabets.toml"))
            }
            other => panic!("Expected Io error, got {other:?}"),
        }
    }
}
