//! HTTP transport and the bounded worker pool that drives it.
mod client;
mod dispatcher;
mod fetcher;

#[cfg(test)]
pub(crate) mod test_support;
#[cfg(test)]
mod tests;

pub use client::build_client;
pub use dispatcher::{DispatcherSettings, DrainSummary, Job, JobDispatcher, process_job};
pub use fetcher::{FetchResponse, Fetcher};
