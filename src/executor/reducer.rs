//! Reducer Worker
//!
//! Runs strictly after the map phase. Collects every mapper's partial map for its own
//! partition from the `ShuffleBoard`, merges them, ranks the result and appends it to
//! the output files of the letters it owns.

use super::types::ReducerStats;
use crate::search::ranking::{merge_partials, rank};
use crate::search::types::RankedEntry;
use crate::storage::output::OutputLayout;
use crate::storage::partitioner::PartitionManager;
use crate::storage::shuffle::ShuffleBoard;

use std::collections::BTreeMap;

pub struct ReducerWorker<'a> {
    id: usize,
    partitioner: PartitionManager,
    layout: &'a OutputLayout,
}

impl<'a> ReducerWorker<'a> {
    pub fn new(id: usize, partitioner: PartitionManager, layout: &'a OutputLayout) -> Self {
        Self {
            id,
            partitioner,
            layout,
        }
    }

    /// Merges, ranks and writes this reducer's partition.
    ///
    /// Output failures are per letter: a letter whose file cannot be written is
    /// recorded in the stats and the remaining letters are still written.
    pub fn run(&self, board: &ShuffleBoard) -> ReducerStats {
        let mut stats = ReducerStats {
            reducer_id: self.id,
            letters: self.partitioner.letters_of(self.id),
            ..Default::default()
        };

        if stats.letters.is_empty() {
            tracing::debug!("Reducer {} owns no letters", self.id);
            return stats;
        }

        let combined = merge_partials(board.partitions_for(self.id));
        let ranked = rank(combined);
        tracing::debug!(
            "Reducer {} merged {} words from {} mappers",
            self.id,
            ranked.len(),
            board.published_count()
        );

        for (letter, entries) in self.group_by_letter(&ranked, &mut stats) {
            match self.layout.append(letter, &entries) {
                Ok(()) => {
                    stats.words_per_letter.insert(letter, entries.len());
                }
                Err(err) => {
                    tracing::warn!("Reducer {} could not write '{}': {:#}", self.id, letter, err);
                    stats.failed_letters.push(letter);
                }
            }
        }

        tracing::debug!("Reducer {} wrote {} words", self.id, stats.words_written());
        stats
    }

    /// Splits ranked entries per owned letter, keeping rank order inside each letter.
    fn group_by_letter<'e>(
        &self,
        ranked: &'e [RankedEntry],
        stats: &mut ReducerStats,
    ) -> BTreeMap<char, Vec<&'e RankedEntry>> {
        let mut groups: BTreeMap<char, Vec<&RankedEntry>> = BTreeMap::new();
        for entry in ranked {
            match entry.letter() {
                Some(letter) if self.partitioner.owns(self.id, letter) => {
                    groups.entry(letter).or_default().push(entry);
                }
                _ => {
                    tracing::warn!(
                        "Reducer {} received '{}' outside its letters",
                        self.id,
                        entry.word
                    );
                    stats.misrouted += 1;
                }
            }
        }
        groups
    }
}
