//! Clean command implementation

use crate::error::CliError;
use crate::language_source::AlphabetSource;
use crate::progress::ProgressReporter;
use crate::report::RunReport;
use anyhow::{Context, Result};
use clap::Parser;
use corpus_clean_core::detect::{DEFAULT_MIN_ALPHA_FRACTION, DEFAULT_MIN_COUNT};
use corpus_clean_core::split::{DEFAULT_TEST_FRACTION, DEFAULT_VAL_FRACTION};
use corpus_clean_core::{
    write_full, write_split, AlphabetRegistry, AlphabetRule, CoreError, Corpus, Detection,
    FilterConfig, FilterSummary, IndexMode, SplitConfig,
};
use std::path::{Path, PathBuf};

/// Progress stages: two reads, detection, output
const STAGES: u64 = 4;

/// Remove unreliable line pairs from a parallel corpus
#[derive(Debug, Parser)]
#[command(
    name = "clean",
    version,
    about = "Filter parallel corpora for machine-translation training",
    long_about = "Filter parallel corpora for machine-translation training.\n\n\
        Line pairs are dropped from both sides when either side holds a token \
        that is rare in its corpus or is dominated by characters outside its \
        alphabet. Output is either src_full/tgt_full or, with --split, \
        src-/tgt- train, val and test files."
)]
pub struct CleanArgs {
    /// Source language corpus file
    #[arg(short = 's', long = "source", value_name = "FILE")]
    pub source: PathBuf,

    /// Source language tag (en, ru, or a code from --alphabet-config)
    #[arg(long = "sourcelang", value_name = "LANG")]
    pub source_lang: String,

    /// Target language corpus file
    #[arg(short = 't', long = "target", value_name = "FILE")]
    pub target: PathBuf,

    /// Target language tag
    #[arg(long = "targetlang", value_name = "LANG")]
    pub target_lang: String,

    /// Output directory (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Validation fraction of the corpus, used with --split
    #[arg(long = "valsize", value_name = "FRACTION", default_value_t = DEFAULT_VAL_FRACTION)]
    pub val_size: f64,

    /// Test fraction of the corpus, used with --split
    #[arg(long = "testsize", value_name = "FRACTION", default_value_t = DEFAULT_TEST_FRACTION)]
    pub test_size: f64,

    /// Write train/val/test files instead of src_full/tgt_full
    #[arg(long)]
    pub split: bool,

    /// Tokens seen at most this many times in a corpus side are rare (0 disables)
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MIN_COUNT)]
    pub min_count: usize,

    /// Minimum share of alphabet characters a line must keep
    #[arg(long, value_name = "FRACTION", default_value_t = DEFAULT_MIN_ALPHA_FRACTION)]
    pub min_alpha_fraction: f64,

    /// Extra alphabet rules (TOML, [[alphabet]] entries)
    #[arg(short, long, value_name = "FILE", env = "CORPUS_CLEAN_ALPHABETS")]
    pub alphabet_config: Option<PathBuf>,

    /// Match bad ids by position inside each split partition (legacy behavior)
    #[arg(long)]
    pub slice_local_indices: bool,

    /// Write a JSON summary of the run
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CleanArgs {
    /// Execute the clean command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::info!("Starting corpus cleaning");
        log::debug!("Arguments: {:?}", self);

        self.check_inputs()?;
        let filter_config = self.filter_config()?;
        let split_config = if self.split {
            Some(self.split_config()?)
        } else {
            None
        };

        let registry = AlphabetSource::from_option(self.alphabet_config.clone()).load()?;
        let source_rule = lookup_rule(&registry, &self.source_lang, "--sourcelang")?;
        let target_rule = lookup_rule(&registry, &self.target_lang, "--targetlang")?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_stages(STAGES);

        let source = read_corpus(&self.source)?;
        progress.stage_completed("Read source");
        let target = read_corpus(&self.target)?;
        progress.stage_completed("Read target");

        let detection = Detection::run(&source, source_rule, &target, target_rule, &filter_config)
            .map_err(|e| CliError::ProcessingError(e.to_string()))?;
        progress.stage_completed("Detected bad lines");
        log::info!(
            "Flagged {} of {} line pairs (rare: {}/{}, sparse: {}/{})",
            detection.bad_ids.len(),
            source.len(),
            detection.rare_source.len(),
            detection.rare_target.len(),
            detection.sparse_source.len(),
            detection.sparse_target.len()
        );

        let out_dir = self.output.as_deref();
        let mut filter_summary = FilterSummary::new(&source, &target, &detection);
        let split_summary = match split_config {
            Some(config) => Some(
                write_split(&source, &target, &detection.bad_ids, out_dir, &config)
                    .map_err(|e| CliError::ProcessingError(e.to_string()))?,
            ),
            None => {
                filter_summary.written = write_full(&source, &target, &detection.bad_ids, out_dir)
                    .map_err(|e| CliError::ProcessingError(e.to_string()))?;
                None
            }
        };
        progress.stage_completed("Wrote output");
        progress.finish();

        let report = RunReport {
            source_lang: self.source_lang.clone(),
            target_lang: self.target_lang.clone(),
            mode: if self.split { "split" } else { "full" },
            filter: filter_summary,
            split: split_summary,
        };
        log::info!("Wrote {} lines", report.lines_written());

        if let Some(path) = &self.report {
            report.write_json(path)?;
            log::info!("Report written to {}", path.display());
        }

        Ok(())
    }

    /// Both corpora must exist before any work starts
    fn check_inputs(&self) -> Result<()> {
        for path in [&self.source, &self.target] {
            if !path.is_file() {
                return Err(CliError::FileNotFound(path.display().to_string()).into());
            }
        }
        Ok(())
    }

    fn filter_config(&self) -> Result<FilterConfig> {
        let config = FilterConfig {
            min_count: self.min_count,
            min_alpha_fraction: self.min_alpha_fraction,
        };
        config
            .validate()
            .map_err(|e| config_error("--min-alpha-fraction", e))?;
        Ok(config)
    }

    fn split_config(&self) -> Result<SplitConfig> {
        let config = SplitConfig {
            val_fraction: self.val_size,
            test_fraction: self.test_size,
            index_mode: if self.slice_local_indices {
                IndexMode::SliceLocal
            } else {
                IndexMode::Global
            },
        };
        config
            .validate()
            .map_err(|e| config_error("--valsize/--testsize", e))?;
        Ok(config)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when running inside tests
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}

fn config_error(flag: &str, error: CoreError) -> CliError {
    match error {
        CoreError::Configuration(msg) => CliError::ConfigError(format!("{flag}: {msg}")),
        other => CliError::ConfigError(format!("{flag}: {other}")),
    }
}

fn lookup_rule<'a>(
    registry: &'a AlphabetRegistry,
    code: &str,
    flag: &str,
) -> Result<&'a AlphabetRule> {
    registry.get(code).with_context(|| {
        format!(
            "{flag} '{code}' is not supported (supported: {})",
            registry.codes().join(", ")
        )
    })
}

fn read_corpus(path: &Path) -> Result<Corpus> {
    let corpus =
        Corpus::read(path).with_context(|| format!("Failed to read corpus: {}", path.display()))?;
    log::debug!("Read {} lines from {}", corpus.len(), path.display());
    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::normalize_legacy_flags;
    use std::fs;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Result<CleanArgs, clap::Error> {
        CleanArgs::try_parse_from(normalize_legacy_flags(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[
            "clean", "-s", "a.en", "--sourcelang", "en", "-t", "a.ru", "--targetlang", "ru",
        ])
        .unwrap();

        assert_eq!(args.source, PathBuf::from("a.en"));
        assert_eq!(args.target_lang, "ru");
        assert_eq!(args.output, None);
        assert_eq!(args.val_size, 0.001);
        assert_eq!(args.test_size, 0.0001);
        assert!(!args.split);
        assert_eq!(args.min_count, 1);
        assert_eq!(args.min_alpha_fraction, 0.8);
        assert!(!args.slice_local_indices);
    }

    #[test]
    fn test_legacy_short_flags() {
        let args = parse(&[
            "clean", "-s", "a.en", "-sl", "en", "-t", "a.ru", "-tl", "ru", "-val", "0.1",
            "-test", "0.2", "-o", "out", "--split",
        ])
        .unwrap();

        assert_eq!(args.source_lang, "en");
        assert_eq!(args.target_lang, "ru");
        assert_eq!(args.val_size, 0.1);
        assert_eq!(args.test_size, 0.2);
        assert_eq!(args.output, Some(PathBuf::from("out")));
        assert!(args.split);
    }

    #[test]
    fn test_missing_required_argument() {
        let err = parse(&["clean", "-s", "a.en", "-sl", "en", "-t", "a.ru"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_split_config_index_mode() {
        let args = parse(&[
            "clean",
            "-s",
            "a",
            "-sl",
            "en",
            "-t",
            "b",
            "-tl",
            "en",
            "--slice-local-indices",
        ])
        .unwrap();
        assert_eq!(args.split_config().unwrap().index_mode, IndexMode::SliceLocal);
    }

    #[test]
    fn test_invalid_fraction_rejected() {
        let args = parse(&[
            "clean", "-s", "a", "-sl", "en", "-t", "b", "-tl", "en", "--min-alpha-fraction", "1.5",
        ])
        .unwrap();
        let err = args.filter_config().unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
    }

    #[test]
    fn test_execute_full_mode() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src.txt");
        let tgt = temp_dir.path().join("tgt.txt");
        fs::write(&src, "good day\n12345\ngood day\n").unwrap();
        fs::write(&tgt, "добрый день\nдобрый день\nдобрый день\n").unwrap();
        let out = temp_dir.path().join("out");

        let args = CleanArgs {
            source: src,
            source_lang: "en".to_string(),
            target: tgt,
            target_lang: "ru".to_string(),
            output: Some(out.clone()),
            val_size: DEFAULT_VAL_FRACTION,
            test_size: DEFAULT_TEST_FRACTION,
            split: false,
            min_count: DEFAULT_MIN_COUNT,
            min_alpha_fraction: DEFAULT_MIN_ALPHA_FRACTION,
            alphabet_config: None,
            slice_local_indices: false,
            report: None,
            quiet: true,
            verbose: 0,
        };
        args.execute().unwrap();

        assert_eq!(
            fs::read_to_string(out.join("src_full")).unwrap(),
            "good day\ngood day\n"
        );
        assert_eq!(
            fs::read_to_string(out.join("tgt_full")).unwrap(),
            "добрый день\nдобрый день\n"
        );
    }

    #[test]
    fn test_execute_missing_source() {
        let args = parse(&[
            "clean", "-s", "/nonexistent/src", "-sl", "en", "-t", "/nonexistent/tgt", "-tl", "en",
            "-q",
        ])
        .unwrap();
        let err = args.execute().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::FileNotFound(_))
        ));
    }
}
