//! A scheduling report library
//!
//! This drives policies from the [`scheduler`] crate and renders what they
//! computed. Nothing here changes a result; it only reads result tables.

use std::fmt::{self, Display, Write};

use log::{debug, info};
use scheduler::{ProcessTable, ResultTable, ScheduleSummary, Scheduler, SweepRun};

const RULE_WIDTH: usize = 60;

/// The outcome of one simulation run, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// The name of the policy that produced the results.
    pub policy: String,

    /// Per-process results and the dispatch timeline.
    pub results: ResultTable,

    /// Averages over the results, [`None`] when the table is empty.
    pub summary: Option<ScheduleSummary>,
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let precision = f.precision().unwrap_or(2);
        writeln!(f, "{}", self.policy)?;
        writeln!(
            f,
            "{:<10} | {:<12} | {:<13} | {}",
            "Process", "Burst Time", "Waiting Time", "Turnaround Time"
        )?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        for result in self.results.results() {
            writeln!(
                f,
                "{:<10} | {:<12} | {:<13} | {}",
                format!("P{}", result.pid),
                result.burst,
                result.waiting,
                result.turnaround
            )?;
        }
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        match self.summary {
            Some(summary) => {
                writeln!(
                    f,
                    "Average Waiting Time: {:.precision$}",
                    summary.average_waiting
                )?;
                writeln!(
                    f,
                    "Average Turnaround Time: {:.precision$}",
                    summary.average_turnaround
                )
            }
            None => {
                writeln!(f, "Average Waiting Time: n/a")?;
                writeln!(f, "Average Turnaround Time: n/a")
            }
        }
    }
}

/// The processor simulation.
pub struct Processor;

impl Processor {
    /// Runs `scheduler` over `table` and collects everything a report needs.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use processor::Processor;
    /// use scheduler::ProcessTable;
    /// use std::num::NonZeroU64;
    ///
    /// let table = ProcessTable::from_bursts(&[10, 5, 8]).unwrap();
    /// let report = Processor::run(scheduler::round_robin(NonZeroU64::new(2).unwrap()), &table);
    ///
    /// assert_eq!(report.results.elapsed(), 23);
    /// ```
    pub fn run<S: Scheduler>(scheduler: S, table: &ProcessTable) -> Report {
        let policy = scheduler.name();
        info!("running {} over {} processes", policy, table.len());

        let results = scheduler.schedule(table);
        let summary = match results.summarize() {
            Ok(summary) => Some(summary),
            Err(error) => {
                debug!("no summary for {}: {}", policy, error);
                None
            }
        };

        info!(
            "{} finished at t={} after {} dispatches",
            policy,
            results.elapsed(),
            results.timeline().len()
        );

        Report {
            policy,
            results,
            summary,
        }
    }
}

/// Format a [`Report`] to a [`String`].
///
/// * `report` - the report returned by the [`Processor`].
/// * `precision` - the number of decimals of the averages.
///
/// ## Example
///
/// ```rust
/// use processor::{format_report, Processor};
/// use scheduler::ProcessTable;
///
/// let table = ProcessTable::from_bursts(&[10, 5, 8]).unwrap();
/// let report = Processor::run(scheduler::fcfs(), &table);
///
/// assert!(format_report(&report, 2).ends_with("Average Turnaround Time: 16.00\n"));
/// ```
pub fn format_report(report: &Report, precision: usize) -> String {
    format!("{report:.precision$}")
}

/// Format the dispatch timeline of a result table, each slice under a
/// numbered header.
pub fn format_timeline(results: &ResultTable) -> String {
    let mut s = String::new();
    for (iteration, dispatch) in results.timeline().iter().enumerate() {
        fmt::write(
            &mut s,
            format_args!("===== Dispatch: {} =====\n{}\n", iteration + 1, dispatch),
        )
        .expect("writing to a String cannot fail");
    }
    s
}

/// Format the summaries of a quantum sweep, one quantum per line.
pub fn format_sweep(runs: &[SweepRun], precision: usize) -> String {
    let mut s = String::new();
    for run in runs {
        let written = match run.results.summarize() {
            Ok(summary) => writeln!(
                s,
                "Quantum {:<4} | Dispatches {:<6} | {:.precision$}",
                run.quantum,
                run.results.timeline().len(),
                summary
            ),
            Err(_) => writeln!(s, "Quantum {:<4} | no processes", run.quantum),
        };
        written.expect("writing to a String cannot fail");
    }
    s
}
