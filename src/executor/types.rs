use crate::search::types::FileId;

use anyhow::{Result, bail};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// How reducers are kept from reading partial maps before the map phase is over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SyncStrategy {
    /// Join every mapper thread, then start the reducers.
    #[default]
    Join,
    /// Start both pools together; reducers wait at a phase gate until every
    /// mapper has arrived.
    Barrier,
}

impl fmt::Display for SyncStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncStrategy::Join => f.write_str("join"),
            SyncStrategy::Barrier => f.write_str("barrier"),
        }
    }
}

/// Settings for one run of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    pub num_mappers: usize,
    pub num_reducers: usize,
    /// Directory receiving the 26 `<letter>.txt` files.
    pub output_dir: PathBuf,
    pub sync: SyncStrategy,
    /// Treat skipped inputs and unwritable outputs as a failed run.
    pub strict: bool,
}

impl JobConfig {
    pub fn new(num_mappers: usize, num_reducers: usize) -> Self {
        Self {
            num_mappers,
            num_reducers,
            output_dir: PathBuf::from("."),
            sync: SyncStrategy::default(),
            strict: false,
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_sync(mut self, sync: SyncStrategy) -> Self {
        self.sync = sync;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_mappers == 0 {
            bail!("num_mappers must be at least 1");
        }
        if self.num_reducers == 0 {
            bail!("num_reducers must be at least 1");
        }
        if self.output_dir.as_os_str().is_empty() {
            bail!("output directory must not be empty");
        }
        Ok(())
    }
}

/// An input file a mapper could not read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub id: FileId,
    pub path: PathBuf,
    pub reason: String,
}

/// What one mapper did during the map phase.
#[derive(Debug, Clone, Default)]
pub struct MapperStats {
    pub mapper_id: usize,
    pub files_indexed: usize,
    pub tokens_accepted: usize,
    pub tokens_rejected: usize,
    pub skipped: Vec<SkippedFile>,
}

/// What one reducer did during the reduce phase.
#[derive(Debug, Clone, Default)]
pub struct ReducerStats {
    pub reducer_id: usize,
    pub letters: Vec<char>,
    pub words_per_letter: BTreeMap<char, usize>,
    pub failed_letters: Vec<char>,
    /// Entries dropped because their first letter belongs to another reducer.
    pub misrouted: usize,
}

impl ReducerStats {
    pub fn words_written(&self) -> usize {
        self.words_per_letter.values().sum()
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub sync: SyncStrategy,
    pub num_mappers: usize,
    pub num_reducers: usize,
    pub files_total: usize,
    pub files_indexed: usize,
    pub skipped_files: Vec<SkippedFile>,
    pub tokens_accepted: usize,
    pub tokens_rejected: usize,
    pub words_indexed: usize,
    pub words_per_letter: BTreeMap<char, usize>,
    pub failed_letters: Vec<char>,
    pub elapsed_ms: u64,
}

impl RunReport {
    /// True if any input was skipped or any output letter could not be written.
    pub fn has_failures(&self) -> bool {
        !self.skipped_files.is_empty() || !self.failed_letters.is_empty()
    }
}
