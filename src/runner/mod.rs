//! Replays every loaded method through the worker pool and collects the
//! per-method statistics.
mod context;
mod driver;


pub use context::{MethodPlan, RunContext};
pub use driver::{RunSettings, RunSummary, drive, execute, method_url};
