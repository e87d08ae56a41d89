use std::io;

use thiserror::Error;

use crate::Pid;

/// Result alias used across the scheduler crate.
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Errors reported to the caller of the scheduler.
///
/// Every variant but [`SchedulerError::WorkerSpawn`] is an invalid-input
/// error: it is detected while building a [`ProcessTable`](crate::ProcessTable)
/// or a policy, or when a summary of nothing is requested. No scheduling step
/// has run when one is returned, and no partial results exist.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("invalid input: process id 0 is reserved, ids start from 1")]
    ZeroPid,

    #[error("invalid input: process id {0} appears more than once")]
    DuplicatePid(Pid),

    #[error("invalid input: process {pid} has negative burst length {burst}")]
    NegativeBurst { pid: Pid, burst: i64 },

    #[error("invalid input: total burst length overflows the scheduler clock")]
    BurstOverflow,

    #[error("invalid input: quantum must be a positive integer, got {0}")]
    NonPositiveQuantum(i64),

    #[error("invalid input: cannot summarize an empty result table")]
    EmptyTable,

    /// The OS refused a thread for a sweep run; the sweep returns no runs.
    #[error("could not start a sweep worker: {0}")]
    WorkerSpawn(io::ErrorKind),
}
