//! Corpus filtering
//!
//! Runs both detectors on both sides of a parallel corpus, unions the
//! resulting index sets and writes the surviving lines.

use crate::alphabet::AlphabetRule;
use crate::corpus::{ensure_output_dir, output_path, write_lines, Corpus};
use crate::detect::{
    BadIndexSet, LineDetector, RareTokenDetector, SparsityDetector, DEFAULT_MIN_ALPHA_FRACTION,
    DEFAULT_MIN_COUNT,
};
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name of the filtered source side in full mode
pub const SOURCE_FULL: &str = "src_full";
/// File name of the filtered target side in full mode
pub const TARGET_FULL: &str = "tgt_full";

/// Detector thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Tokens occurring at most this many times are rare
    pub min_count: usize,
    /// Minimum share of alphabet characters in a line
    pub min_alpha_fraction: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_count: DEFAULT_MIN_COUNT,
            min_alpha_fraction: DEFAULT_MIN_ALPHA_FRACTION,
        }
    }
}

impl FilterConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.min_alpha_fraction.is_finite() || !(0.0..=1.0).contains(&self.min_alpha_fraction)
        {
            return Err(CoreError::Configuration(format!(
                "min_alpha_fraction must be within [0, 1], got {}",
                self.min_alpha_fraction
            )));
        }
        Ok(())
    }
}

/// Per-detector results for both sides, plus their union
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detection {
    pub rare_source: BadIndexSet,
    pub rare_target: BadIndexSet,
    pub sparse_source: BadIndexSet,
    pub sparse_target: BadIndexSet,
    /// Union of the four sets above
    pub bad_ids: BadIndexSet,
}

impl Detection {
    /// Run both detectors on both sides, each side with its own alphabet
    pub fn run(
        source: &Corpus,
        source_rule: &AlphabetRule,
        target: &Corpus,
        target_rule: &AlphabetRule,
        config: &FilterConfig,
    ) -> Result<Self> {
        config.validate()?;

        if source.len() != target.len() {
            log::warn!(
                "Source and target are not line-aligned ({} vs {} lines)",
                source.len(),
                target.len()
            );
        }

        let rare_source = RareTokenDetector::new(source_rule, config.min_count).detect(source.lines());
        let rare_target = RareTokenDetector::new(target_rule, config.min_count).detect(target.lines());
        let sparse_source =
            SparsityDetector::new(source_rule, config.min_alpha_fraction).detect(source.lines());
        let sparse_target =
            SparsityDetector::new(target_rule, config.min_alpha_fraction).detect(target.lines());

        let bad_ids = rare_source
            .iter()
            .chain(&rare_target)
            .chain(&sparse_source)
            .chain(&sparse_target)
            .copied()
            .collect();

        Ok(Self {
            rare_source,
            rare_target,
            sparse_source,
            sparse_target,
            bad_ids,
        })
    }
}

/// Lines whose index is not in `bad_ids`, in original order
pub fn retain_lines<'a>(
    lines: &'a [String],
    bad_ids: &'a BadIndexSet,
) -> impl Iterator<Item = &'a str> + 'a {
    lines
        .iter()
        .enumerate()
        .filter(move |(index, _)| !bad_ids.contains(index))
        .map(|(_, line)| line.as_str())
}

/// Counts of one full-mode run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    pub source_lines: usize,
    pub target_lines: usize,
    pub rare_source: usize,
    pub rare_target: usize,
    pub sparse_source: usize,
    pub sparse_target: usize,
    /// Size of the unioned bad-id set
    pub bad_ids: usize,
    /// Lines written per output file
    pub written: Vec<(String, usize)>,
}

impl FilterSummary {
    pub fn new(source: &Corpus, target: &Corpus, detection: &Detection) -> Self {
        Self {
            source_lines: source.len(),
            target_lines: target.len(),
            rare_source: detection.rare_source.len(),
            rare_target: detection.rare_target.len(),
            sparse_source: detection.sparse_source.len(),
            sparse_target: detection.sparse_target.len(),
            bad_ids: detection.bad_ids.len(),
            written: Vec::new(),
        }
    }
}

/// Write `src_full` and `tgt_full` with every line whose index is not bad.
/// Returns the number of lines written per side.
pub fn write_full(
    source: &Corpus,
    target: &Corpus,
    bad_ids: &BadIndexSet,
    out_dir: Option<&Path>,
) -> Result<Vec<(String, usize)>> {
    ensure_output_dir(out_dir)?;

    let mut written = Vec::with_capacity(2);
    for (name, corpus) in [(SOURCE_FULL, source), (TARGET_FULL, target)] {
        let path = output_path(out_dir, name);
        let count = write_lines(&path, retain_lines(corpus.lines(), bad_ids))?;
        log::info!("Wrote {} lines to {}", count, path.display());
        written.push((name.to_string(), count));
    }
    Ok(written)
}

/// Filter a parallel corpus into `src_full` and `tgt_full`
pub fn filter_corpus(
    src_path: &Path,
    src_rule: &AlphabetRule,
    tgt_path: &Path,
    tgt_rule: &AlphabetRule,
    out_dir: Option<&Path>,
    config: &FilterConfig,
) -> Result<FilterSummary> {
    let source = Corpus::read(src_path)?;
    let target = Corpus::read(tgt_path)?;

    let detection = Detection::run(&source, src_rule, &target, tgt_rule, config)?;
    let mut summary = FilterSummary::new(&source, &target, &detection);
    summary.written = write_full(&source, &target, &detection.bad_ids, out_dir)?;

    Ok(summary)
}
