//! Per-method statistics: outcome classification, lock-guarded counters and
//! latency histograms.
mod histogram;
mod outcome;
mod stat;
mod table;


pub use histogram::LatencyHistogram;
pub use outcome::{Outcome, OutcomeBucket, classify};
pub use stat::{MethodStat, StatSnapshot};
pub use table::{StatHandle, StatTable};
