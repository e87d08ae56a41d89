use std::fmt::{self, Display};

use crate::{ProcessResult, SchedulerError, SchedulerResult};

/// Averages over every process of a result table.
///
/// Always recomputed from the results it describes, never stored apart from
/// them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScheduleSummary {
    /// Number of processes the averages cover.
    pub processes: usize,
    pub average_waiting: f64,
    pub average_turnaround: f64,
}

impl Display for ScheduleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        write!(
            f,
            "avg waiting {:.precision$}, avg turnaround {:.precision$} over {} processes",
            self.average_waiting, self.average_turnaround, self.processes
        )
    }
}

/// Reduces per-process results to average waiting and turnaround times.
///
/// Summarizing zero results is an error rather than a division by zero.
pub fn summarize(results: &[ProcessResult]) -> SchedulerResult<ScheduleSummary> {
    if results.is_empty() {
        return Err(SchedulerError::EmptyTable);
    }

    // u128 holds any sum of u64 values a table can produce
    let (waiting, turnaround) = results.iter().fold((0u128, 0u128), |(w, t), result| {
        (w + result.waiting as u128, t + result.turnaround as u128)
    });
    let count = results.len() as f64;

    Ok(ScheduleSummary {
        processes: results.len(),
        average_waiting: waiting as f64 / count,
        average_turnaround: turnaround as f64 / count,
    })
}
