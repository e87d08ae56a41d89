use std::num::{NonZeroU64, NonZeroUsize};
use std::thread;

use log::debug;

use crate::{ProcessTable, ResultTable, RoundRobin, Scheduler, SchedulerError, SchedulerResult};

/// One round robin run of a quantum sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepRun {
    pub quantum: NonZeroU64,
    pub results: ResultTable,
}

/// Runs round robin over the same table once per quantum.
///
/// Every quantum is checked before the first run starts. Runs execute in
/// batches of at most one thread per available core; the threads only share
/// the read-only table and each run keeps its remaining-burst counters to
/// itself. Runs come back in the order of `quanta`.
pub fn sweep(table: &ProcessTable, quanta: &[i64]) -> SchedulerResult<Vec<SweepRun>> {
    let policies = quanta
        .iter()
        .map(|quantum| RoundRobin::try_new(*quantum))
        .collect::<SchedulerResult<Vec<_>>>()?;

    let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    debug!(
        "sweeping {} quanta over {} processes with {} workers",
        policies.len(),
        table.len(),
        workers
    );

    let mut runs = Vec::with_capacity(policies.len());
    for batch in policies.chunks(workers) {
        runs.extend(run_batch(table, batch)?);
    }

    Ok(runs)
}

fn run_batch(table: &ProcessTable, batch: &[RoundRobin]) -> SchedulerResult<Vec<SweepRun>> {
    thread::scope(|s| -> SchedulerResult<Vec<SweepRun>> {
        let mut handles = Vec::with_capacity(batch.len());
        for policy in batch {
            let table = table.clone();
            let handle = thread::Builder::new()
                .name(format!("sweep-q{}", policy.quantum()))
                .spawn_scoped(s, move || SweepRun {
                    quantum: policy.quantum(),
                    results: policy.schedule(&table),
                })
                .map_err(|error| SchedulerError::WorkerSpawn(error.kind()))?;
            handles.push(handle);
        }

        Ok(handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(run) => run,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect())
    })
}
