//! Manifest Parsing
//!
//! The manifest is plain ASCII-whitespace-separated text: an integer count followed by exactly
//! that many file paths.
//!
//! ```text
//! 3
//! docs/one.txt docs/two.txt
//! docs/three.txt
//! ```

use super::types::Manifest;

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

impl Manifest {
    /// Reads and parses the manifest at `path`. Any failure here is fatal for the run.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Error opening manifest {}", path.display()))?;

        let manifest = Self::parse(&text)
            .with_context(|| format!("Invalid manifest {}", path.display()))?;

        tracing::info!(
            "Loaded manifest {} ({} input files)",
            path.display(),
            manifest.len()
        );
        Ok(manifest)
    }

    /// Parses manifest text. Paths are taken verbatim, relative to the working directory.
    pub fn parse(text: &str) -> Result<Self> {
        let mut tokens = text.split_ascii_whitespace();

        let Some(count_token) = tokens.next() else {
            bail!("Manifest is empty, expected a file count");
        };
        let total_files: usize = count_token.parse().with_context(|| {
            format!("File count '{}' is not a non-negative integer", count_token)
        })?;

        let paths: Vec<&str> = tokens.by_ref().take(total_files).collect();
        if paths.len() < total_files {
            bail!(
                "Manifest declares {} files but lists only {}",
                total_files,
                paths.len()
            );
        }

        let extra = tokens.count();
        if extra > 0 {
            tracing::warn!(
                "Ignoring {} trailing manifest entries beyond the declared {} files",
                extra,
                total_files
            );
        }

        Ok(Self::from_paths(paths))
    }
}
