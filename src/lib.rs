//! Letter Index Library
//!
//! Builds an inverted word index over a set of text files with an in-process MapReduce:
//! a pool of mapper threads tokenizes files into per-letter partial maps, a pool of
//! reducer threads merges and ranks them and writes one `<letter>.txt` per letter.
//! The binary (`main.rs`) is a thin CLI over `executor::executor::MapReduceJob`.
//!
//! ## Architecture Modules
//! - **`executor`**: The two thread pools, the task queue feeding the mappers, and the
//!   synchronization that keeps reducers from starting before the map phase has ended.
//! - **`ingestion`**: Manifest loading; numbers the input files from 1.
//! - **`search`**: Token normalization, the posting data model and the ranking order.
//! - **`storage`**: The letter partition function, the frozen map handoff between phases
//!   and the per-letter output files.

pub mod executor;
pub mod ingestion;
pub mod search;
pub mod storage;
