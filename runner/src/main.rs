use std::env;

use anyhow::Context;
use log::debug;
use processor::{format_report, format_sweep, format_timeline, Processor, Report};
use scheduler::{fcfs, sweep, ProcessTable, RoundRobin};

mod config;

use config::{parse_integer, Config, Policy};

/// The workload used when no burst lengths are given.
const DEMO_BURSTS: [i64; 3] = [10, 5, 8];

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::from_env().context("invalid configuration")?;
    debug!("{config:?}");

    print!("{}", render(&config, env::args().skip(1))?);
    Ok(())
}

/// Builds the process table from burst length arguments, falling back to the
/// demo workload when there are none.
fn process_table<I>(args: I) -> anyhow::Result<ProcessTable>
where
    I: IntoIterator<Item = String>,
{
    let bursts = args
        .into_iter()
        .map(|burst| parse_integer("burst length", &burst))
        .collect::<Result<Vec<i64>, _>>()?;
    let bursts = if bursts.is_empty() {
        DEMO_BURSTS.to_vec()
    } else {
        bursts
    };

    ProcessTable::from_bursts(&bursts).context("invalid process list")
}

/// Runs what `config` asks for over the arguments and returns the text to
/// print. Any error ends the program with a non-zero exit code.
fn render<I>(config: &Config, args: I) -> anyhow::Result<String>
where
    I: IntoIterator<Item = String>,
{
    let table = process_table(args)?;

    if let Some(quanta) = &config.sweep {
        let runs = sweep(&table, quanta).context("invalid quantum sweep")?;
        return Ok(format_sweep(&runs, config.precision));
    }

    let report = simulate(config, &table)?;
    let mut output = format_report(&report, config.precision);
    if config.timeline {
        output.push('\n');
        output.push_str(&format_timeline(&report.results));
    }

    Ok(output)
}

fn simulate(config: &Config, table: &ProcessTable) -> anyhow::Result<Report> {
    let report = match config.policy {
        Policy::Fcfs => Processor::run(fcfs(), table),
        Policy::RoundRobin => {
            let round_robin = RoundRobin::try_new(config.quantum).context("invalid quantum")?;
            Processor::run(round_robin, table)
        }
    };
    Ok(report)
}

#[cfg(test)]
mod tests;
