//! JSON run report

use anyhow::{Context, Result};
use corpus_clean_core::{FilterSummary, SplitSummary};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Everything a run decided, written with `--report`
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub source_lang: String,
    pub target_lang: String,
    pub mode: &'static str,
    pub filter: FilterSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split: Option<SplitSummary>,
}

impl RunReport {
    /// Total lines written across all output files
    pub fn lines_written(&self) -> usize {
        let split_lines: usize = self
            .split
            .as_ref()
            .map(|split| split.written.iter().map(|(_, n)| n).sum())
            .unwrap_or(0);
        self.filter.written.iter().map(|(_, n)| n).sum::<usize>() + split_lines
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
