//! Per-letter output files.
//!
//! One `<letter>.txt` per letter of the alphabet. The launcher truncates all of them
//! before the reduce phase; afterwards each file is only ever appended to by the one
//! reducer that owns its letter.

use super::partitioner::alphabet;
use crate::search::types::RankedEntry;

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct OutputLayout {
    dir: PathBuf,
}

impl OutputLayout {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, letter: char) -> PathBuf {
        self.dir.join(format!("{}.txt", letter))
    }

    /// Creates the output directory and an empty file for every letter.
    ///
    /// A missing directory that cannot be created is fatal. A single letter that
    /// cannot be created is logged and returned so the caller can report it.
    pub fn prepare(&self) -> Result<Vec<char>> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create output directory {}", self.dir.display())
        })?;

        let mut failed = Vec::new();
        for letter in alphabet() {
            let path = self.path_for(letter);
            if let Err(err) = File::create(&path) {
                tracing::warn!("Failed to create output file {}: {}", path.display(), err);
                failed.push(letter);
            }
        }

        tracing::debug!("Prepared output files in {}", self.dir.display());
        Ok(failed)
    }

    /// Appends `entries` to the file of `letter`, one line each.
    pub fn append(&self, letter: char, entries: &[&RankedEntry]) -> Result<()> {
        let path = self.path_for(letter);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Error opening output file {}", path.display()))?;

        let mut writer = BufWriter::new(file);
        write_entries(&mut writer, entries.iter().copied())
            .and_then(|_| writer.flush())
            .with_context(|| format!("Error writing output file {}", path.display()))?;

        Ok(())
    }
}

/// Writes entries as `word:[id1 id2 ...]` lines.
pub fn write_entries<'a, W, I>(writer: &mut W, entries: I) -> std::io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a RankedEntry>,
{
    for entry in entries {
        writeln!(writer, "{}", entry)?;
    }
    Ok(())
}
