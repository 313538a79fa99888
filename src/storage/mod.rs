//! Storage Module
//!
//! Where data lives between and after the two phases.
//!
//! ## Core Concepts
//! - **Partitioning**: Words are routed by first letter to a reducer via `reducer_of`,
//!   the one function both phases share.
//! - **Handoff**: Mapper outputs are frozen into a `ShuffleBoard` and read lock-free.
//! - **Output**: Each letter has exactly one output file, owned by exactly one reducer.

pub mod output;
pub mod partitioner;
pub mod shuffle;
