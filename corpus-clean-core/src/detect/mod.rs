//! Bad-line detectors
//!
//! Each detector is a pure function of a corpus side and an alphabet rule,
//! producing the set of zero-based line indices to drop.

pub mod rare;
pub mod sparse;

pub use rare::{rare_token_lines, RareTokenDetector, DEFAULT_MIN_COUNT};
pub use sparse::{sparse_lines, SparsityDetector, DEFAULT_MIN_ALPHA_FRACTION};

use std::collections::BTreeSet;

/// Zero-based line indices excluded from the output
pub type BadIndexSet = BTreeSet<usize>;

/// A per-line quality check over one side of a corpus
pub trait LineDetector {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Indices of the lines that fail the check
    fn detect(&self, lines: &[String]) -> BadIndexSet;
}
