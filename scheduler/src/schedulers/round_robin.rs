use std::collections::VecDeque;
use std::num::NonZeroU64;

use log::{debug, trace};

use crate::ProcessState::{Finished, Ready, Running};
use crate::{
    Dispatch, Pid, Process, ProcessResult, ProcessState, ProcessTable, ResultTable, Scheduler,
    SchedulerError, SchedulerResult, StopReason,
};

#[derive(Copy, Clone, PartialEq, Debug)]
struct PCB {
    pid: Pid,
    burst: u64,
    remaining: u64,
    state: ProcessState,
    completion: u64,
}

impl PCB {
    fn new(process: &Process) -> Self {
        PCB {
            pid: process.pid(),
            burst: process.burst(),
            remaining: process.burst(),
            state: Ready,
            completion: 0,
        }
    }
}

/// Preemptive round robin with a fixed time quantum.
///
/// Processes rotate through a ready queue. A process whose quantum expires
/// goes to the tail of the queue, behind every process preempted before it.
#[derive(Debug, Copy, Clone)]
pub struct RoundRobin {
    quantum: NonZeroU64,
}

impl RoundRobin {
    pub fn new(quantum: NonZeroU64) -> Self {
        RoundRobin { quantum }
    }

    /// Validates a raw quantum; anything below 1 is rejected.
    pub fn try_new(quantum: i64) -> SchedulerResult<Self> {
        u64::try_from(quantum)
            .ok()
            .and_then(NonZeroU64::new)
            .map(RoundRobin::new)
            .ok_or(SchedulerError::NonPositiveQuantum(quantum))
    }

    pub fn quantum(&self) -> NonZeroU64 {
        self.quantum
    }
}

impl Scheduler for RoundRobin {
    fn name(&self) -> String {
        format!("Round Robin (quantum {})", self.quantum)
    }

    fn schedule(&self, table: &ProcessTable) -> ResultTable {
        let quantum = self.quantum.get();
        let mut processes: Vec<PCB> = table.iter().map(PCB::new).collect();
        let mut ready_queue: VecDeque<usize> = VecDeque::with_capacity(processes.len());
        let mut timeline = Vec::new();
        let mut clock: u64 = 0;

        // zero bursts finish on arrival and never take a slot in the rotation
        for (index, process) in processes.iter_mut().enumerate() {
            if process.remaining == 0 {
                process.state = Finished;
            } else {
                ready_queue.push_back(index);
            }
        }

        while let Some(index) = ready_queue.pop_front() {
            let process = &mut processes[index];
            debug_assert_eq!(process.state, Ready, "P{} dequeued while not ready", process.pid);
            process.state = Running;

            let run = process.remaining.min(quantum);
            let start = clock;
            clock += run;
            process.remaining -= run;

            let reason = if process.remaining == 0 {
                process.state = Finished;
                process.completion = clock;
                StopReason::Finished
            } else {
                process.state = Ready;
                ready_queue.push_back(index);
                StopReason::Expired
            };

            trace!(
                "P{} ran {}..{}, {} remaining, {}",
                process.pid,
                start,
                clock,
                process.remaining,
                reason
            );
            timeline.push(Dispatch {
                pid: process.pid,
                start,
                end: clock,
                reason,
            });
        }

        debug!(
            "round robin (quantum {}) finished {} processes in {} dispatches at t={}",
            quantum,
            processes.len(),
            timeline.len(),
            clock
        );

        let results = processes
            .iter()
            .map(|process| {
                ProcessResult::from_completion(process.pid, process.burst, process.completion)
            })
            .collect();
        ResultTable::new(results, timeline)
    }
}
