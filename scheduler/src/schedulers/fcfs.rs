use log::{debug, trace};

use crate::{Dispatch, ProcessResult, ProcessTable, ResultTable, Scheduler, StopReason};

/// First come, first served: every process runs to completion in table
/// order.
#[derive(Debug, Default, Copy, Clone)]
pub struct Fcfs;

impl Fcfs {
    pub fn new() -> Self {
        Fcfs
    }
}

impl Scheduler for Fcfs {
    fn name(&self) -> String {
        String::from("First Come First Serve")
    }

    fn schedule(&self, table: &ProcessTable) -> ResultTable {
        let mut clock = 0;
        let mut results = Vec::with_capacity(table.len());
        let mut timeline = Vec::with_capacity(table.len());

        for process in table {
            // a zero burst completes on arrival without holding the CPU
            if process.burst() == 0 {
                results.push(ProcessResult::from_completion(process.pid(), 0, 0));
                continue;
            }

            let start = clock;
            clock += process.burst();
            trace!("P{} runs {}..{}", process.pid(), start, clock);
            timeline.push(Dispatch {
                pid: process.pid(),
                start,
                end: clock,
                reason: StopReason::Finished,
            });
            results.push(ProcessResult::from_completion(
                process.pid(),
                process.burst(),
                clock,
            ));
        }

        debug!("fcfs finished {} processes at t={}", results.len(), clock);
        ResultTable::new(results, timeline)
    }
}
