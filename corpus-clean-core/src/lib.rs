//! Quality filtering for parallel machine-translation corpora
//!
//! A parallel corpus is a pair of line-aligned files where line `i` of the
//! source is the translation of line `i` of the target. This crate drops
//! unreliable line pairs from both sides at once:
//!
//! - lines holding tokens that occur at most `min_count` times in their
//!   corpus side ([`detect::RareTokenDetector`]),
//! - lines whose share of alphabet characters falls below
//!   `min_alpha_fraction` ([`detect::SparsityDetector`]).
//!
//! Both checks run on both sides, each side with its own
//! [`alphabet::AlphabetRule`], and the flagged indices are unioned into one
//! bad-id set. The survivors are written either as two full files or as
//! train/validation/test partitions.
//!
//! # Example
//!
//! ```rust
//! use corpus_clean_core::{AlphabetRegistry, Corpus, Detection, FilterConfig};
//!
//! let registry = AlphabetRegistry::builtin().unwrap();
//! let en = registry.get("en").unwrap();
//!
//! let source = Corpus::from_lines(["good day", "xk7!!", "good day"]);
//! let target = Corpus::from_lines(["good day", "xk7!!", "good day"]);
//!
//! let detection = Detection::run(&source, en, &target, en, &FilterConfig::default()).unwrap();
//! assert_eq!(detection.bad_ids.into_iter().collect::<Vec<_>>(), vec![1]);
//! ```

pub mod alphabet;
pub mod corpus;
pub mod detect;
pub mod error;
pub mod filter;
pub mod split;

pub use alphabet::{alphabet_pattern, AlphabetConfig, AlphabetEntry, AlphabetRegistry, AlphabetRule};
pub use corpus::Corpus;
pub use detect::{
    rare_token_lines, sparse_lines, BadIndexSet, LineDetector, RareTokenDetector, SparsityDetector,
};
pub use error::{CoreError, Result};
pub use filter::{filter_corpus, retain_lines, write_full, Detection, FilterConfig, FilterSummary};
pub use split::{
    filter_corpus_split, write_split, IndexMode, Partition, SplitBoundaries, SplitConfig,
    SplitSummary,
};
