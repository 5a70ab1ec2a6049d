//! Train/validation/test partitioning
//!
//! Partitions are contiguous ranges over the original line positions:
//! train is the prefix, test the suffix and validation sits in between.
//! Bad ids are computed on the full corpora before splitting.

use crate::corpus::{ensure_output_dir, output_path, write_lines, Corpus};
use crate::detect::BadIndexSet;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;

pub const DEFAULT_VAL_FRACTION: f64 = 0.001;
pub const DEFAULT_TEST_FRACTION: f64 = 0.0001;

/// How bad ids are matched against lines inside a partition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexMode {
    /// Match by corpus-wide line position
    #[default]
    Global,
    /// Match by position counted from zero inside each partition. Legacy
    /// behavior kept for reproducing older splits: validation and test
    /// lines are checked against the ids of unrelated lines.
    SliceLocal,
}

/// One of the three output partitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Train,
    Val,
    Test,
}

impl Partition {
    pub const ALL: [Partition; 3] = [Partition::Train, Partition::Val, Partition::Test];

    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Train => "train",
            Partition::Val => "val",
            Partition::Test => "test",
        }
    }

    /// Output file names for the source and target side
    pub fn file_names(&self) -> (String, String) {
        (
            format!("src-{}", self.as_str()),
            format!("tgt-{}", self.as_str()),
        )
    }
}

/// Split parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    pub val_fraction: f64,
    pub test_fraction: f64,
    #[serde(default)]
    pub index_mode: IndexMode,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            val_fraction: DEFAULT_VAL_FRACTION,
            test_fraction: DEFAULT_TEST_FRACTION,
            index_mode: IndexMode::Global,
        }
    }
}

impl SplitConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("val_fraction", self.val_fraction),
            ("test_fraction", self.test_fraction),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::Configuration(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.val_fraction + self.test_fraction > 1.0 {
            return Err(CoreError::Configuration(format!(
                "val_fraction + test_fraction must not exceed 1, got {}",
                self.val_fraction + self.test_fraction
            )));
        }
        Ok(())
    }
}

/// Line ranges of the three partitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitBoundaries {
    pub train: Range<usize>,
    pub val: Range<usize>,
    pub test: Range<usize>,
}

impl SplitBoundaries {
    /// Sizes are `total * fraction` rounded half to even. Test is carved out
    /// first, then validation, so the three ranges always cover `0..total`.
    pub fn compute(total: usize, val_fraction: f64, test_fraction: f64) -> Self {
        let test_size = round_size(total, test_fraction).min(total);
        let val_size = round_size(total, val_fraction).min(total - test_size);

        let test_start = total - test_size;
        let val_start = test_start - val_size;

        Self {
            train: 0..val_start,
            val: val_start..test_start,
            test: test_start..total,
        }
    }

    pub fn range(&self, partition: Partition) -> Range<usize> {
        match partition {
            Partition::Train => self.train.clone(),
            Partition::Val => self.val.clone(),
            Partition::Test => self.test.clone(),
        }
    }
}

fn round_size(total: usize, fraction: f64) -> usize {
    let size = (total as f64 * fraction).round_ties_even();
    if size.is_finite() && size > 0.0 {
        size as usize
    } else {
        0
    }
}

/// Lines of `range` whose index is not bad under `mode`
pub fn partition_lines<'a>(
    lines: &'a [String],
    range: Range<usize>,
    bad_ids: &'a BadIndexSet,
    mode: IndexMode,
) -> impl Iterator<Item = &'a str> + 'a {
    let offset = match mode {
        IndexMode::Global => range.start,
        IndexMode::SliceLocal => 0,
    };
    lines[range]
        .iter()
        .enumerate()
        .filter(move |(index, _)| !bad_ids.contains(&(index + offset)))
        .map(|(_, line)| line.as_str())
}

/// Sizes and written line counts of one split run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitSummary {
    pub train_size: usize,
    pub val_size: usize,
    pub test_size: usize,
    /// Lines written per output file
    pub written: Vec<(String, usize)>,
}

/// Write the six partition files. The line counts are checked before any
/// file is created.
pub fn write_split(
    source: &Corpus,
    target: &Corpus,
    bad_ids: &BadIndexSet,
    out_dir: Option<&Path>,
    config: &SplitConfig,
) -> Result<SplitSummary> {
    config.validate()?;
    if source.len() != target.len() {
        return Err(CoreError::LengthMismatch {
            source_lines: source.len(),
            target_lines: target.len(),
        });
    }

    let boundaries = SplitBoundaries::compute(source.len(), config.val_fraction, config.test_fraction);
    log::info!(
        "Split sizes: train={}, val={}, test={} ({:?} indexing)",
        boundaries.train.len(),
        boundaries.val.len(),
        boundaries.test.len(),
        config.index_mode
    );

    ensure_output_dir(out_dir)?;

    let mut summary = SplitSummary {
        train_size: boundaries.train.len(),
        val_size: boundaries.val.len(),
        test_size: boundaries.test.len(),
        written: Vec::with_capacity(6),
    };

    for partition in Partition::ALL {
        let range = boundaries.range(partition);
        let (src_name, tgt_name) = partition.file_names();

        for (name, corpus) in [(src_name, source), (tgt_name, target)] {
            let path = output_path(out_dir, &name);
            let lines = partition_lines(corpus.lines(), range.clone(), bad_ids, config.index_mode);
            let count = write_lines(&path, lines)?;
            log::debug!("Wrote {} lines to {}", count, path.display());
            summary.written.push((name, count));
        }
    }

    Ok(summary)
}

/// Read both corpora and write the six partition files
pub fn filter_corpus_split(
    src_path: &Path,
    tgt_path: &Path,
    bad_ids: &BadIndexSet,
    out_dir: Option<&Path>,
    config: &SplitConfig,
) -> Result<SplitSummary> {
    let source = Corpus::read(src_path)?;
    let target = Corpus::read(tgt_path)?;
    write_split(&source, &target, bad_ids, out_dir, config)
}
