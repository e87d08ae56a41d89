//! A CPU scheduling policy library.
//!
//! This library computes how a single CPU dispatcher interleaves a set of
//! processes, all present at time 0, under a chosen policy, and reports
//! per-process waiting and turnaround times plus their averages.
//!
//! ```rust
//! use scheduler::{fcfs, ProcessTable, Scheduler};
//!
//! let table = ProcessTable::from_bursts(&[10, 5, 8]).unwrap();
//! let results = fcfs().schedule(&table);
//!
//! assert_eq!(results.waiting_times(), vec![0, 10, 15]);
//! ```

use std::num::NonZeroU64;

mod error;
mod scheduler;
mod schedulers;
mod summary;
mod sweep;

pub use crate::error::{SchedulerError, SchedulerResult};
pub use crate::scheduler::{
    Dispatch, Pid, Process, ProcessResult, ProcessState, ProcessTable, ResultTable, Scheduler,
    StopReason,
};
pub use crate::schedulers::{Fcfs, RoundRobin};
pub use crate::summary::{summarize, ScheduleSummary};
pub use crate::sweep::{sweep, SweepRun};

/// Returns a structure that implements the `Scheduler` trait with a first come,
/// first served policy
pub fn fcfs() -> impl Scheduler {
    Fcfs::new()
}

/// Returns a structure that implements the `Scheduler` trait with a round robin scheduler policy
///
/// * `quantum` - the time units that a process can run before it is preempted
///               and sent to the back of the ready queue.
pub fn round_robin(quantum: NonZeroU64) -> impl Scheduler {
    RoundRobin::new(quantum)
}
