//! Sparsity detection
//!
//! A line is flagged when its normalized form is shorter than
//! `min_alpha_fraction` of the raw line. Lengths are in characters.

use super::{BadIndexSet, LineDetector};
use crate::alphabet::AlphabetRule;
use crate::corpus::Corpus;
use crate::error::Result;
use std::path::Path;

pub const DEFAULT_MIN_ALPHA_FRACTION: f64 = 0.8;

/// Flags lines dominated by digits, punctuation or foreign script
#[derive(Debug, Clone, Copy)]
pub struct SparsityDetector<'a> {
    rule: &'a AlphabetRule,
    min_alpha_fraction: f64,
}

impl<'a> SparsityDetector<'a> {
    pub fn new(rule: &'a AlphabetRule, min_alpha_fraction: f64) -> Self {
        Self {
            rule,
            min_alpha_fraction,
        }
    }

    pub fn min_alpha_fraction(&self) -> f64 {
        self.min_alpha_fraction
    }

    /// Whether a single line is sparse. Empty lines never are: `0 < f * 0`
    /// does not hold.
    pub fn is_sparse(&self, line: &str) -> bool {
        let original = line.chars().count() as f64;
        let kept = self.rule.normalize(line).chars().count() as f64;
        kept < self.min_alpha_fraction * original
    }
}

impl LineDetector for SparsityDetector<'_> {
    fn name(&self) -> &'static str {
        "sparse"
    }

    fn detect(&self, lines: &[String]) -> BadIndexSet {
        let bad: BadIndexSet = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| self.is_sparse(line))
            .map(|(index, _)| index)
            .collect();

        log::debug!(
            "sparsity scan ({}): {} of {} lines flagged",
            self.rule.code(),
            bad.len(),
            lines.len()
        );
        bad
    }
}

/// Read `corpus_path` and flag lines whose alphabet share falls below
/// `min_alpha_fraction`
pub fn sparse_lines(
    corpus_path: &Path,
    rule: &AlphabetRule,
    min_alpha_fraction: f64,
) -> Result<BadIndexSet> {
    let corpus = Corpus::read(corpus_path)?;
    Ok(SparsityDetector::new(rule, min_alpha_fraction).detect(corpus.lines()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::alphabet_pattern;

    fn english() -> AlphabetRule {
        alphabet_pattern("en").unwrap()
    }

    #[test]
    fn test_digits_only_is_sparse() {
        let rule = english();
        let detector = SparsityDetector::new(&rule, 0.8);
        // " " (1) < 0.8 * 5
        assert!(detector.is_sparse("12345"));
    }

    #[test]
    fn test_empty_line_is_not_sparse() {
        let rule = english();
        assert!(!SparsityDetector::new(&rule, 0.8).is_sparse(""));
        assert!(!SparsityDetector::new(&rule, 1.0).is_sparse(""));
    }

    #[test]
    fn test_plain_sentence_is_not_sparse() {
        let rule = english();
        assert!(!SparsityDetector::new(&rule, 0.8).is_sparse("hello world"));
    }

    #[test]
    fn test_mostly_symbols_is_sparse() {
        let rule = english();
        // "xk " (3) < 0.8 * 5
        assert!(SparsityDetector::new(&rule, 0.8).is_sparse("xk7!!"));
    }

    #[test]
    fn test_boundary_is_strict() {
        let rule = english();
        // "abcd " (5) vs 0.5 * 10 = 5: not strictly smaller
        assert!(!SparsityDetector::new(&rule, 0.5).is_sparse("abcd123456"));
        assert!(SparsityDetector::new(&rule, 0.51).is_sparse("abcd123456"));
    }

    #[test]
    fn test_lengths_count_characters() {
        let ru = alphabet_pattern("ru").unwrap();
        let detector = SparsityDetector::new(&ru, 0.8);
        assert!(!detector.is_sparse("Привет мир"));
        assert!(detector.is_sparse("hello мир"));
    }

    #[test]
    fn test_detect_indices() {
        let rule = english();
        let lines: Vec<String> = ["hello world", "xk7!!", "", "good morning", "2024-01-01"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let bad: Vec<usize> = SparsityDetector::new(&rule, 0.8)
            .detect(&lines)
            .into_iter()
            .collect();
        assert_eq!(bad, vec![1, 4]);
    }

    #[test]
    fn test_zero_fraction_flags_nothing() {
        let rule = english();
        let lines = vec!["!!!".to_string(), "123".to_string()];
        assert!(SparsityDetector::new(&rule, 0.0).detect(&lines).is_empty());
    }
}
