//! Mapper Worker
//!
//! Pulls file indices from the `TaskQueue` until it runs dry, tokenizes each file and
//! routes every accepted word into the partial map of the reducer that owns its first
//! letter.
//!
//! ## Responsibilities
//! - **Claiming**: One file at a time, so fast mappers naturally take more files.
//! - **Indexing**: ASCII-whitespace tokenization, normalization and per-file deduplication.
//! - **Skipping**: A file that cannot be opened or read is logged and left out entirely;
//!   the mapper moves on to its next task.

use super::queue::TaskQueue;
use super::types::{MapperStats, SkippedFile};
use crate::ingestion::types::{InputFile, Manifest};
use crate::search::tokenizer::tokenize_text;
use crate::storage::partitioner::PartitionManager;
use crate::storage::shuffle::MapperOutput;

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};

pub struct MapperWorker<'a> {
    id: usize,
    manifest: &'a Manifest,
    queue: &'a TaskQueue,
    partitioner: PartitionManager,
}

/// Words found in one file plus token counters, committed only if the whole file was read.
#[derive(Debug, Default)]
struct FileScan {
    words: HashSet<String>,
    accepted: usize,
    rejected: usize,
}

impl<'a> MapperWorker<'a> {
    pub fn new(
        id: usize,
        manifest: &'a Manifest,
        queue: &'a TaskQueue,
        partitioner: PartitionManager,
    ) -> Self {
        Self {
            id,
            manifest,
            queue,
            partitioner,
        }
    }

    /// Runs the claim loop to completion and returns this mapper's partial maps.
    pub fn run(&self) -> (MapperOutput, MapperStats) {
        let mut output = MapperOutput::new(self.id, self.partitioner.num_reducers());
        let mut stats = MapperStats {
            mapper_id: self.id,
            ..Default::default()
        };

        tracing::debug!("Mapper {} started", self.id);

        while let Some(index) = self.queue.next_file_index() {
            let Some(file) = self.manifest.get(index) else {
                tracing::warn!("Mapper {} claimed unknown task {}", self.id, index);
                continue;
            };
            tracing::trace!(
                "Mapper {} claimed file {} ({})",
                self.id,
                file.id,
                file.path.display()
            );

            match scan_file(file) {
                Ok(scan) => {
                    stats.files_indexed += 1;
                    stats.tokens_accepted += scan.accepted;
                    stats.tokens_rejected += scan.rejected;
                    self.commit(&mut output, file, scan);
                }
                Err(err) => {
                    tracing::warn!("Mapper {} skipping file {}: {:#}", self.id, file.id, err);
                    stats.skipped.push(SkippedFile {
                        id: file.id,
                        path: file.path.clone(),
                        reason: format!("{:#}", err),
                    });
                }
            }
        }

        tracing::debug!(
            "Mapper {} finished: {} files, {} distinct words",
            self.id,
            stats.files_indexed,
            output.word_count()
        );
        (output, stats)
    }

    fn commit(&self, output: &mut MapperOutput, file: &InputFile, scan: FileScan) {
        for word in scan.words {
            match self.partitioner.reducer_for_word(&word) {
                Some(reducer_id) => output.insert(reducer_id, word, file.id),
                None => tracing::warn!("Mapper {} dropped unroutable word {:?}", self.id, word),
            }
        }
    }
}

/// Reads one file and collects its distinct words.
fn scan_file(file: &InputFile) -> Result<FileScan> {
    let handle = File::open(&file.path)
        .with_context(|| format!("Error opening file {}", file.path.display()))?;
    let reader = BufReader::new(handle);

    let mut scan = FileScan::default();
    for line in reader.split(b'\n') {
        let line = line.with_context(|| format!("Error reading file {}", file.path.display()))?;
        let text = String::from_utf8_lossy(&line);

        for token in tokenize_text(&text) {
            match token {
                Some(word) => {
                    scan.accepted += 1;
                    scan.words.insert(word);
                }
                None => scan.rejected += 1,
            }
        }
    }

    Ok(scan)
}
