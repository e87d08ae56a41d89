use std::collections::HashSet;
use std::fmt::{self, Display};
use std::num::NonZeroUsize;
use std::slice;
use std::sync::Arc;

use crate::summary::{summarize, ScheduleSummary};
use crate::{SchedulerError, SchedulerResult};

/// The PID of a process
///
/// The PID cannot be 0, PIDs start from 1.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Pid(NonZeroUsize);

impl Pid {
    /// Returns [`None`] for 0.
    pub fn new(pid: usize) -> Option<Pid> {
        NonZeroUsize::new(pid).map(Pid)
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl PartialEq<usize> for Pid {
    fn eq(&self, other: &usize) -> bool {
        self.0.get() == *other
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A process descriptor: an identity and the CPU time it needs.
///
/// Arrival order is the position inside the [`ProcessTable`]; every process
/// is present at time 0.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Process {
    pid: Pid,
    burst: u64,
}

impl Process {
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Total CPU time the process requires.
    pub fn burst(&self) -> u64 {
        self.burst
    }
}

/// The ordered, validated collection of processes for one simulation.
///
/// The table is immutable once built. Cloning it shares the same storage, so
/// several runs can read it at the same time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessTable {
    processes: Arc<[Process]>,
    total_burst: u64,
}

impl ProcessTable {
    /// Builds a table from `(pid, burst)` pairs, kept in the given order.
    ///
    /// Fails on a zero or repeated pid, a negative burst, or when the bursts
    /// add up to more than the clock can hold.
    pub fn new<I>(entries: I) -> SchedulerResult<ProcessTable>
    where
        I: IntoIterator<Item = (usize, i64)>,
    {
        let mut seen = HashSet::new();
        let mut processes = Vec::new();
        let mut total_burst: u64 = 0;

        for (pid, burst) in entries {
            let pid = Pid::new(pid).ok_or(SchedulerError::ZeroPid)?;
            if !seen.insert(pid) {
                return Err(SchedulerError::DuplicatePid(pid));
            }
            let burst =
                u64::try_from(burst).map_err(|_| SchedulerError::NegativeBurst { pid, burst })?;
            total_burst = total_burst
                .checked_add(burst)
                .ok_or(SchedulerError::BurstOverflow)?;
            processes.push(Process { pid, burst });
        }

        Ok(ProcessTable {
            processes: processes.into(),
            total_burst,
        })
    }

    /// Builds a table from burst lengths alone, numbering processes from 1.
    pub fn from_bursts(bursts: &[i64]) -> SchedulerResult<ProcessTable> {
        ProcessTable::new(
            bursts
                .iter()
                .enumerate()
                .map(|(index, burst)| (index + 1, *burst)),
        )
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Process> {
        self.processes.iter()
    }

    pub fn get(&self, pid: Pid) -> Option<&Process> {
        self.processes.iter().find(|process| process.pid == pid)
    }

    /// Sum of every burst length, which is also the time the CPU needs to
    /// drain the table under any policy.
    pub fn total_burst(&self) -> u64 {
        self.total_burst
    }

    pub fn max_burst(&self) -> Option<u64> {
        self.processes.iter().map(Process::burst).max()
    }
}

impl<'a> IntoIterator for &'a ProcessTable {
    type Item = &'a Process;
    type IntoIter = slice::Iter<'a, Process>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The state of a process during a simulation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProcessState {
    /// The process waits in the ready rotation.
    Ready,

    /// The process holds the CPU.
    Running,

    /// The process needs no more CPU time.
    Finished,
}

impl Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessState::Ready => write!(f, "READY"),
            ProcessState::Running => write!(f, "RUNNING"),
            ProcessState::Finished => write!(f, "FINISHED"),
        }
    }
}

/// The outcome of one process after a policy has run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    /// The PID of the process.
    pub pid: Pid,

    /// The burst length the process asked for.
    pub burst: u64,

    /// Time spent ready but not running.
    pub waiting: u64,

    /// Time from arrival (0) to completion.
    pub turnaround: u64,

    /// Clock value when the process last stopped running.
    pub completion: u64,
}

impl ProcessResult {
    /// Derives waiting and turnaround times from the completion time.
    ///
    /// `completion` is never smaller than `burst` for a process that
    /// arrived at time 0.
    pub fn from_completion(pid: Pid, burst: u64, completion: u64) -> ProcessResult {
        debug_assert!(
            completion >= burst,
            "process {pid} completed at {completion} before its burst {burst} could run"
        );
        ProcessResult {
            pid,
            burst,
            waiting: completion - burst,
            turnaround: completion,
            completion,
        }
    }
}

/// The reason a process left the CPU.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The quantum ran out before the burst did and the process was
    /// preempted.
    Expired,

    /// The process used up its burst.
    Finished,
}

impl Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::Expired => write!(f, "Expired"),
            StopReason::Finished => write!(f, "Finished"),
        }
    }
}

/// One contiguous slice of CPU time given to a process.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub pid: Pid,
    pub start: u64,
    pub end: u64,
    pub reason: StopReason,
}

impl Dispatch {
    pub fn duration(&self) -> u64 {
        self.end - self.start
    }
}

impl Display for Dispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}: Run P{} for {} units, {}",
            self.start,
            self.end,
            self.pid,
            self.duration(),
            self.reason
        )
    }
}

/// What a policy produces: one result per process, in table order, and the
/// dispatch timeline in the order the CPU ran it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultTable {
    results: Vec<ProcessResult>,
    timeline: Vec<Dispatch>,
}

impl ResultTable {
    pub fn new(results: Vec<ProcessResult>, timeline: Vec<Dispatch>) -> ResultTable {
        ResultTable { results, timeline }
    }

    pub fn results(&self) -> &[ProcessResult] {
        &self.results
    }

    pub fn timeline(&self) -> &[Dispatch] {
        &self.timeline
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn get(&self, pid: Pid) -> Option<&ProcessResult> {
        self.results.iter().find(|result| result.pid == pid)
    }

    /// Final clock value of the run.
    pub fn elapsed(&self) -> u64 {
        self.timeline.last().map_or(0, |dispatch| dispatch.end)
    }

    pub fn waiting_times(&self) -> Vec<u64> {
        self.results.iter().map(|result| result.waiting).collect()
    }

    pub fn turnaround_times(&self) -> Vec<u64> {
        self.results.iter().map(|result| result.turnaround).collect()
    }

    /// Averages over the table; fails when there is nothing to average.
    pub fn summarize(&self) -> SchedulerResult<ScheduleSummary> {
        summarize(&self.results)
    }
}

/// The trait that every dispatch policy implements.
pub trait Scheduler: Send + Sync {
    /// A human readable name of the policy and its parameters.
    fn name(&self) -> String;

    /// Runs the policy over the whole table.
    ///
    /// The table and the policy are validated when they are built, so a run
    /// always succeeds and always terminates.
    fn schedule(&self, table: &ProcessTable) -> ResultTable;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pid_zero_is_rejected() {
        assert_eq!(Pid::new(0), None);
        assert_eq!(Pid::new(3).map(|pid| pid.get()), Some(3));
    }

    #[test]
    fn from_bursts_numbers_from_one() {
        let table = ProcessTable::from_bursts(&[10, 5, 8]).unwrap();
        let pids: Vec<usize> = table.iter().map(|process| process.pid().get()).collect();
        assert_eq!(pids, vec![1, 2, 3]);
        assert_eq!(table.total_burst(), 23);
        assert_eq!(table.max_burst(), Some(10));
    }

    #[test]
    fn negative_burst_is_rejected() {
        let error = ProcessTable::from_bursts(&[4, -1, 2]).unwrap_err();
        assert_eq!(
            error,
            SchedulerError::NegativeBurst {
                pid: Pid::new(2).unwrap(),
                burst: -1
            }
        );
    }

    #[test]
    fn duplicate_and_zero_pids_are_rejected() {
        assert_eq!(
            ProcessTable::new([(1, 3), (1, 4)]).unwrap_err(),
            SchedulerError::DuplicatePid(Pid::new(1).unwrap())
        );
        assert_eq!(
            ProcessTable::new([(0, 3)]).unwrap_err(),
            SchedulerError::ZeroPid
        );
    }

    #[test]
    fn overflowing_bursts_are_rejected() {
        let error = ProcessTable::from_bursts(&[i64::MAX, i64::MAX, i64::MAX]).unwrap_err();
        assert_eq!(error, SchedulerError::BurstOverflow);
    }

    #[test]
    fn custom_pids_keep_input_order() {
        let table = ProcessTable::new([(7, 1), (3, 2), (9, 0)]).unwrap();
        let pids: Vec<usize> = table.iter().map(|process| process.pid().get()).collect();
        assert_eq!(pids, vec![7, 3, 9]);
        assert_eq!(table.get(Pid::new(3).unwrap()).map(Process::burst), Some(2));
    }

    #[test]
    fn result_is_derived_from_completion() {
        let result = ProcessResult::from_completion(Pid::new(1).unwrap(), 5, 15);
        assert_eq!(result.waiting, 10);
        assert_eq!(result.turnaround, result.waiting + result.burst);
    }

    #[test]
    fn empty_result_table_has_no_elapsed_time() {
        let table = ResultTable::default();
        assert_eq!(table.elapsed(), 0);
        assert_eq!(table.summarize(), Err(SchedulerError::EmptyTable));
    }
}
