#[cfg(all(feature = "fcfs", not(feature = "round-robin")))]
use scheduler::fcfs;
#[cfg(feature = "round-robin")]
use scheduler::RoundRobin;
use scheduler::{ProcessTable, Scheduler};

use std::env;
use std::fs;

use processor::{format_report, format_timeline, Processor};


fn write_logs(folder: &str, name: &str, logs: &str) {
    let quantum = arguments();
    fs::create_dir_all(format!("../outputs/{SCHEDULER}/{folder}")).unwrap();
    fs::write(
        format!("../outputs/{SCHEDULER}/{folder}/{name}___{quantum}.log"),
        logs,
    )
    .unwrap();
}

fn read_logs(folder: &str, name: &str) -> String {
    let quantum = arguments();
    fs::read_to_string(format!(
        "../outputs/{SCHEDULER}/{folder}/{name}___{quantum}.log"
    ))
    .unwrap()
}

fn run(folder: &str, name: &str, bursts: &[i64]) {
    let table = ProcessTable::from_bursts(bursts).unwrap();
    let report = Processor::run(scheduler(), &table);
    let output = format!(
        "{}\n{}",
        format_report(&report, 2),
        format_timeline(&report.results)
    );

    if env::var("WRITE_OUTPUT").is_ok() {
        write_logs(folder, name, &output);
    } else {
        let reference = read_logs(folder, name);

        println!("\nleft = Correct Output\nright = Your Output\n");
        use pretty_assertions::assert_eq;
        assert_eq!(reference, output);
    }
}

fn arguments() -> i64 {
    env::var("QUANTUM")
        .unwrap_or("2".to_string())
        .parse::<i64>()
        .unwrap()
}

#[cfg(all(feature = "fcfs", not(feature = "round-robin")))]
static SCHEDULER: &str = "fcfs";
#[cfg(all(feature = "fcfs", not(feature = "round-robin")))]
fn scheduler() -> impl Scheduler {
    println!("Quantum {} (unused)", arguments());
    fcfs()
}

#[cfg(feature = "round-robin")]
static SCHEDULER: &str = "round-robin";
#[cfg(feature = "round-robin")]
fn scheduler() -> impl Scheduler {
    let quantum = arguments();

    println!("Quantum {quantum}");
    RoundRobin::try_new(quantum).unwrap()
}

#[cfg(not(any(feature = "round-robin", feature = "fcfs")))]
compile_error!("the runner tests need the `round-robin` or the `fcfs` feature");
