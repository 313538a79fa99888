//! Map-to-Reduce Handoff
//!
//! Holds intermediate results between the two phases without any locking on the data
//! itself.
//!
//! ## Ownership
//! - During the map phase each mapper builds a `MapperOutput` on its own stack: one
//!   `PartialMap` per reducer partition, written by nobody else.
//! - When the mapper is done it *moves* the output into its write-once slot on the
//!   `ShuffleBoard`. From then on the data is only reachable through `&` references, so
//!   the "no mutation after the map phase" rule is enforced by the compiler.
//! - Reducers read the slots for their partition only after the phase barrier (or join).

use crate::search::types::{FileId, PartialMap};

use anyhow::{Result, bail};
use std::sync::OnceLock;

/// Everything one mapper produced, partitioned by reducer id.
#[derive(Debug, Clone)]
pub struct MapperOutput {
    mapper_id: usize,
    partitions: Vec<PartialMap>,
}

impl MapperOutput {
    pub fn new(mapper_id: usize, num_reducers: usize) -> Self {
        Self {
            mapper_id,
            partitions: vec![PartialMap::new(); num_reducers],
        }
    }

    pub fn mapper_id(&self) -> usize {
        self.mapper_id
    }

    /// Adds `(word, file_id)` to the partial map of `reducer_id`.
    pub fn insert(&mut self, reducer_id: usize, word: String, file_id: FileId) {
        self.partitions[reducer_id].insert(word, file_id);
    }

    pub fn partition(&self, reducer_id: usize) -> Option<&PartialMap> {
        self.partitions.get(reducer_id)
    }

    /// Distinct words across all partitions of this mapper.
    pub fn word_count(&self) -> usize {
        self.partitions.iter().map(PartialMap::len).sum()
    }
}

/// Write-once slots, one per mapper, read by every reducer.
#[derive(Debug)]
pub struct ShuffleBoard {
    slots: Vec<OnceLock<MapperOutput>>,
}

impl ShuffleBoard {
    pub fn new(num_mappers: usize) -> Self {
        Self {
            slots: (0..num_mappers).map(|_| OnceLock::new()).collect(),
        }
    }

    /// Freezes a mapper's output. Fails if the id is unknown or already published.
    pub fn publish(&self, output: MapperOutput) -> Result<()> {
        let mapper_id = output.mapper_id();
        let Some(slot) = self.slots.get(mapper_id) else {
            bail!(
                "Mapper {} is outside the board ({} slots)",
                mapper_id,
                self.slots.len()
            );
        };

        if slot.set(output).is_err() {
            bail!("Mapper {} published its output twice", mapper_id);
        }

        tracing::trace!("Mapper {} output frozen", mapper_id);
        Ok(())
    }

    /// Partial maps destined for `reducer_id`, one per mapper that published.
    pub fn partitions_for(&self, reducer_id: usize) -> impl Iterator<Item = &PartialMap> {
        self.slots
            .iter()
            .filter_map(OnceLock::get)
            .filter_map(move |output| output.partition(reducer_id))
    }

    pub fn published_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.get().is_some()).count()
    }
}
