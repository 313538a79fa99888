//! Map/Reduce Executor Module
//!
//! Runs the index build as two fixed-size pools of OS threads inside one process.
//!
//! ## Architecture Overview
//! The executor follows a **Pull-based** model:
//! 1. **Distribution**: Mappers claim file indices one at a time from the `TaskQueue`,
//!    the only state shared for writing between threads.
//! 2. **Map**: Each mapper tokenizes its files into private partial maps, one per reducer,
//!    routed with the shared letter partition function.
//! 3. **Handoff**: Finished mappers freeze their output into the `ShuffleBoard`.
//! 4. **Reduce**: After the phase gate (or a full join) each reducer merges all
//!    mappers' maps for its partition, ranks them and writes its letters.
//!
//! ## Submodules
//! - **`queue`**: The mutex-protected task cursor.
//! - **`gate`**: Abortable rendezvous between the pools in barrier mode.
//! - **`mapper`**: Mapper worker loop.
//! - **`reducer`**: Reducer worker.
//! - **`executor`**: Pool launch, phase synchronization and run report assembly.
//! - **`types`**: Job configuration, sync strategy, worker stats and the run report.

pub mod executor;
pub mod gate;
pub mod mapper;
pub mod queue;
pub mod reducer;
pub mod types;
