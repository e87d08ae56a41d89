//! The dispatch policies.
//!
//! Each policy lives in its own file and is exported here.
mod fcfs;
pub use fcfs::Fcfs;

mod round_robin;
pub use round_robin::RoundRobin;
