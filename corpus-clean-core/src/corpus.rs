//! Corpus reading and line output

use crate::error::{CoreError, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// One side of a parallel corpus, held fully in memory
///
/// Line `i` is the alignment key shared with the other side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    path: Option<PathBuf>,
    lines: Vec<String>,
}

impl Corpus {
    /// Read a UTF-8 corpus file. Every line is trimmed of surrounding
    /// whitespace.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
        let lines = content.lines().map(|line| line.trim().to_string()).collect();

        Ok(Self {
            path: Some(path.to_path_buf()),
            lines,
        })
    }

    /// Build an in-memory corpus. Lines are trimmed the same way as
    /// [`Corpus::read`].
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            path: None,
            lines: lines
                .into_iter()
                .map(|line| line.as_ref().trim().to_string())
                .collect(),
        }
    }

    /// Path the corpus was read from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Location of an output file: the bare name when no directory is given
pub fn output_path(dir: Option<&Path>, name: &str) -> PathBuf {
    match dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// Create the output directory if it does not exist yet
pub fn ensure_output_dir(dir: Option<&Path>) -> Result<()> {
    if let Some(dir) = dir {
        fs::create_dir_all(dir).map_err(|e| CoreError::io(dir, e))?;
    }
    Ok(())
}

/// Write `lines` to `path`, one per line, each followed by `\n`.
/// Existing files are truncated. Returns the number of lines written.
pub fn write_lines<'a, I>(path: &Path, lines: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let file = File::create(path).map_err(|e| CoreError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    let mut written = 0;

    for line in lines {
        writeln!(writer, "{line}").map_err(|e| CoreError::io(path, e))?;
        written += 1;
    }
    writer.flush().map_err(|e| CoreError::io(path, e))?;

    Ok(written)
}
