//! Ingestion Module
//!
//! Turns the manifest file into the list of input files the mappers work through.
//!
//! ## Workflow
//! 1. **Load**: Read the manifest (`<count> <path> ...`). An unreadable or short manifest
//!    aborts the run.
//! 2. **Number**: Give every listed path its 1-based file id in manifest order.
//! 3. **Hand off**: The executor's task queue hands out 0-based indices into this list.

pub mod manifest;
pub mod types;
