//! Word Indexing Module
//!
//! The text-side half of the pipeline: everything that decides *what* gets indexed
//! and *in which order* it is written, independent of how work is spread over threads.
//!
//! ## Responsibilities
//! - **Tokenization**: Turning raw ASCII-whitespace-delimited tokens into canonical `[a-z]+` words.
//!   Tokens containing a digit are rejected whole.
//! - **Data Model**: Posting sets, per-partition partial maps and ranked output entries.
//! - **Ranking**: Merging partial maps and ordering entries by document frequency, then word.
//!
//! ## Submodules
//! - **`tokenizer`**: Token normalization.
//! - **`types`**: `PartialMap`, `CombinedMap`, `RankedEntry` and friends.
//! - **`ranking`**: Merge and sort used by reducers.

pub mod ranking;
pub mod tokenizer;
pub mod types;

#[cfg(test)]
mod tests;
