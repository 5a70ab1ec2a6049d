//! Rare-token detection
//!
//! Token frequencies are counted over the whole corpus side. A line is
//! flagged when any of its tokens occurs at most `min_count` times.

use super::{BadIndexSet, LineDetector};
use crate::alphabet::AlphabetRule;
use crate::corpus::Corpus;
use crate::error::Result;
use std::collections::HashMap;
use std::path::Path;

/// Tokens seen at most this many times are rare by default
pub const DEFAULT_MIN_COUNT: usize = 1;

/// Flags lines containing corpus-wide (near-)singleton tokens
#[derive(Debug, Clone, Copy)]
pub struct RareTokenDetector<'a> {
    rule: &'a AlphabetRule,
    min_count: usize,
}

impl<'a> RareTokenDetector<'a> {
    pub fn new(rule: &'a AlphabetRule, min_count: usize) -> Self {
        Self { rule, min_count }
    }

    pub fn min_count(&self) -> usize {
        self.min_count
    }
}

impl LineDetector for RareTokenDetector<'_> {
    fn name(&self) -> &'static str {
        "rare"
    }

    fn detect(&self, lines: &[String]) -> BadIndexSet {
        // Keep the per-line tokens so the second pass does not renormalize.
        let line_tokens: Vec<Vec<String>> =
            lines.iter().map(|line| self.rule.tokens(line)).collect();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in line_tokens.iter().flatten() {
            *counts.entry(token.as_str()).or_insert(0) += 1;
        }

        let is_rare = |token: &String| {
            counts
                .get(token.as_str())
                .is_some_and(|&count| count <= self.min_count)
        };

        let bad: BadIndexSet = line_tokens
            .iter()
            .enumerate()
            .filter(|(_, tokens)| tokens.iter().any(is_rare))
            .map(|(index, _)| index)
            .collect();

        log::debug!(
            "rare-token scan ({}): {} distinct tokens, {} of {} lines flagged",
            self.rule.code(),
            counts.len(),
            bad.len(),
            lines.len()
        );
        bad
    }
}

/// Read `corpus_path` and flag lines holding a token seen at most
/// `min_count` times in the whole file
pub fn rare_token_lines(
    corpus_path: &Path,
    rule: &AlphabetRule,
    min_count: usize,
) -> Result<BadIndexSet> {
    let corpus = Corpus::read(corpus_path)?;
    Ok(RareTokenDetector::new(rule, min_count).detect(corpus.lines()))
}
