//! Job Launcher
//!
//! Owns the shared state of a run (task queue, shuffle board, output layout), starts
//! the two fixed-size thread pools and enforces the phase ordering between them.
//!
//! ## Phase Ordering
//! No reducer may look at the shuffle board before every mapper has stopped writing.
//! - **`SyncStrategy::Join`**: mappers are spawned and joined; only then are reducers spawned.
//! - **`SyncStrategy::Barrier`**: both pools start at once. Mappers arrive at a
//!   `PhaseGate` after publishing their output; reducers wait there before reading. A
//!   mapper that fails, panics or never spawns aborts the gate, so no reducer is left
//!   blocked and the run ends in an error.
//!
//! All threads are scoped, so shared state is borrowed rather than reference counted.

use super::gate::PhaseGate;
use super::mapper::MapperWorker;
use super::queue::TaskQueue;
use super::reducer::ReducerWorker;
use super::types::*;
use crate::ingestion::types::Manifest;
use crate::storage::output::OutputLayout;
use crate::storage::partitioner::PartitionManager;
use crate::storage::shuffle::ShuffleBoard;

use anyhow::{Context, Result, anyhow};
use std::collections::BTreeMap;
use std::thread::{self, Scope, ScopedJoinHandle};
use std::time::Instant;

/// Shared, read-mostly state borrowed by every worker thread of one run.
struct JobContext<'a> {
    manifest: &'a Manifest,
    queue: TaskQueue,
    board: ShuffleBoard,
    layout: OutputLayout,
    partitioner: PartitionManager,
}

/// One index build over one manifest.
pub struct MapReduceJob {
    config: JobConfig,
    manifest: Manifest,
}

impl MapReduceJob {
    pub fn new(config: JobConfig, manifest: Manifest) -> Self {
        Self { config, manifest }
    }

    /// Runs both phases to completion.
    ///
    /// # Returns
    /// * `Ok(RunReport)` once every reducer has written its letters, including runs where
    ///   some inputs were skipped or some outputs failed (see `RunReport::has_failures`).
    /// * `Err` for an invalid configuration, an unusable output directory, or a worker
    ///   thread that could not be spawned or panicked.
    pub fn run(&self) -> Result<RunReport> {
        self.execute(map_phase)
    }

    /// Runs the job with mapper `failing` panicking instead of doing its work.
    #[cfg(test)]
    pub(super) fn run_with_failing_mapper(&self, failing: usize) -> Result<RunReport> {
        self.execute(|ctx, id| {
            if id == failing {
                panic!("mapper {} failed", id);
            }
            map_phase(ctx, id)
        })
    }

    fn execute<M>(&self, map: M) -> Result<RunReport>
    where
        M: Fn(&JobContext<'_>, usize) -> Result<MapperStats> + Sync,
    {
        self.config.validate()?;
        let started = Instant::now();

        let layout = OutputLayout::new(&self.config.output_dir);
        let unprepared = layout.prepare()?;

        let ctx = JobContext {
            manifest: &self.manifest,
            queue: TaskQueue::new(self.manifest.len()),
            board: ShuffleBoard::new(self.config.num_mappers),
            layout,
            partitioner: PartitionManager::new(self.config.num_reducers),
        };

        tracing::info!(
            "Indexing {} files with {} mappers and {} reducers ({} sync)",
            self.manifest.len(),
            self.config.num_mappers,
            self.config.num_reducers,
            self.config.sync
        );

        let (mapper_stats, reducer_stats) = match self.config.sync {
            SyncStrategy::Join => self.run_joined(&ctx, &map)?,
            SyncStrategy::Barrier => self.run_with_barrier(&ctx, &map)?,
        };

        let report = self.build_report(mapper_stats, reducer_stats, unprepared, started);
        tracing::info!(
            "Indexed {} of {} files, {} distinct words in {} ms",
            report.files_indexed,
            report.files_total,
            report.words_indexed,
            report.elapsed_ms
        );
        if report.has_failures() {
            tracing::warn!(
                "{} input files skipped, {} output letters failed",
                report.skipped_files.len(),
                report.failed_letters.len()
            );
        }

        Ok(report)
    }

    fn run_joined<M>(
        &self,
        ctx: &JobContext<'_>,
        map: &M,
    ) -> Result<(Vec<MapperStats>, Vec<ReducerStats>)>
    where
        M: Fn(&JobContext<'_>, usize) -> Result<MapperStats> + Sync,
    {
        let mapper_stats = thread::scope(|scope| -> Result<Vec<MapperStats>> {
            let handles = (0..self.config.num_mappers)
                .map(|id| spawn_worker(scope, format!("mapper-{}", id), move || map(ctx, id)))
                .collect::<Result<Vec<_>>>()?;
            join_all(handles)?.into_iter().collect::<Result<Vec<_>>>()
        })?;

        tracing::info!("Map phase complete, starting reducers");

        let reducer_stats = thread::scope(|scope| -> Result<Vec<ReducerStats>> {
            let handles = (0..self.config.num_reducers)
                .map(|id| {
                    spawn_worker(scope, format!("reducer-{}", id), move || {
                        reduce_phase(ctx, id)
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            join_all(handles)
        })?;

        Ok((mapper_stats, reducer_stats))
    }

    fn run_with_barrier<M>(
        &self,
        ctx: &JobContext<'_>,
        map: &M,
    ) -> Result<(Vec<MapperStats>, Vec<ReducerStats>)>
    where
        M: Fn(&JobContext<'_>, usize) -> Result<MapperStats> + Sync,
    {
        let gate = PhaseGate::new(self.config.num_mappers);
        let gate = &gate;

        thread::scope(|scope| -> Result<(Vec<MapperStats>, Vec<ReducerStats>)> {
            let pools = (|| -> Result<_> {
                let mappers = (0..self.config.num_mappers)
                    .map(|id| {
                        spawn_worker(scope, format!("mapper-{}", id), move || {
                            let arrival = PhaseArrival::new(gate);
                            let stats = map(ctx, id);
                            if stats.is_ok() {
                                arrival.complete();
                            }
                            stats
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;

                let reducers = (0..self.config.num_reducers)
                    .map(|id| {
                        spawn_worker(scope, format!("reducer-{}", id), move || -> Result<ReducerStats> {
                            gate.wait()?;
                            Ok(reduce_phase(ctx, id))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;

                Ok((mappers, reducers))
            })();
            // A worker that never started never arrives; release everyone already waiting.
            let (mappers, reducers) = pools.inspect_err(|_| gate.abort())?;

            let mapper_stats = join_all(mappers)?.into_iter().collect::<Result<Vec<_>>>()?;
            let reducer_stats = join_all(reducers)?
                .into_iter()
                .collect::<Result<Vec<ReducerStats>>>()?;
            Ok((mapper_stats, reducer_stats))
        })
    }

    fn build_report(
        &self,
        mapper_stats: Vec<MapperStats>,
        reducer_stats: Vec<ReducerStats>,
        unprepared: Vec<char>,
        started: Instant,
    ) -> RunReport {
        let mut words_per_letter = BTreeMap::new();
        let mut failed_letters = unprepared;
        for stats in &reducer_stats {
            words_per_letter.extend(stats.words_per_letter.iter().map(|(&l, &n)| (l, n)));
            failed_letters.extend(stats.failed_letters.iter().copied());
        }
        failed_letters.sort_unstable();
        failed_letters.dedup();

        let mut skipped_files: Vec<SkippedFile> = mapper_stats
            .iter()
            .flat_map(|stats| stats.skipped.iter().cloned())
            .collect();
        skipped_files.sort_by_key(|file| file.id);

        RunReport {
            sync: self.config.sync,
            num_mappers: self.config.num_mappers,
            num_reducers: self.config.num_reducers,
            files_total: self.manifest.len(),
            files_indexed: mapper_stats.iter().map(|s| s.files_indexed).sum(),
            skipped_files,
            tokens_accepted: mapper_stats.iter().map(|s| s.tokens_accepted).sum(),
            tokens_rejected: mapper_stats.iter().map(|s| s.tokens_rejected).sum(),
            words_indexed: words_per_letter.values().sum(),
            words_per_letter,
            failed_letters,
            elapsed_ms: started.elapsed().as_millis() as u64,
        }
    }
}

fn map_phase(ctx: &JobContext<'_>, id: usize) -> Result<MapperStats> {
    let worker = MapperWorker::new(id, ctx.manifest, &ctx.queue, ctx.partitioner);
    let (output, stats) = worker.run();
    ctx.board.publish(output)?;
    Ok(stats)
}

fn reduce_phase(ctx: &JobContext<'_>, id: usize) -> ReducerStats {
    ReducerWorker::new(id, ctx.partitioner, &ctx.layout).run(&ctx.board)
}

/// A mapper's pass through the phase gate. Completing it counts as an arrival;
/// dropping it any other way (error or unwinding) aborts the gate.
struct PhaseArrival<'g> {
    gate: &'g PhaseGate,
    completed: bool,
}

impl<'g> PhaseArrival<'g> {
    fn new(gate: &'g PhaseGate) -> Self {
        Self {
            gate,
            completed: false,
        }
    }

    fn complete(mut self) {
        self.completed = true;
    }
}

impl Drop for PhaseArrival<'_> {
    fn drop(&mut self) {
        if self.completed {
            self.gate.arrive();
        } else {
            self.gate.abort();
        }
    }
}

fn spawn_worker<'scope, 'env, T, F>(
    scope: &'scope Scope<'scope, 'env>,
    name: String,
    work: F,
) -> Result<(String, ScopedJoinHandle<'scope, T>)>
where
    T: Send + 'scope,
    F: FnOnce() -> T + Send + 'scope,
{
    let handle = thread::Builder::new()
        .name(name.clone())
        .spawn_scoped(scope, work)
        .with_context(|| format!("Failed to spawn {}", name))?;
    Ok((name, handle))
}

fn join_all<T>(handles: Vec<(String, ScopedJoinHandle<'_, T>)>) -> Result<Vec<T>> {
    let mut results = Vec::with_capacity(handles.len());
    let mut panicked = Vec::new();

    for (name, handle) in handles {
        match handle.join() {
            Ok(value) => results.push(value),
            Err(_) => {
                tracing::error!("Worker {} panicked", name);
                panicked.push(name);
            }
        }
    }

    if panicked.is_empty() {
        Ok(results)
    } else {
        Err(anyhow!("Worker threads panicked: {}", panicked.join(", ")))
    }
}
