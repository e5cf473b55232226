use std::time::Duration;

use tracing::warn;

use super::{MethodStat, OutcomeBucket, StatSnapshot};

/// Index of a [`MethodStat`] inside its [`StatTable`]. Carried by jobs in
/// place of a shared pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatHandle(usize);

impl StatHandle {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One stat per replayed method, registered before workers start and never
/// resized afterwards.
#[derive(Debug, Default)]
pub struct StatTable {
    stats: Vec<MethodStat>,
}

impl StatTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fresh stat for `method` and returns its handle.
    pub fn register(&mut self, method: impl Into<String>) -> StatHandle {
        let handle = StatHandle(self.stats.len());
        self.stats.push(MethodStat::new(method));
        handle
    }

    #[must_use]
    pub fn get(&self, handle: StatHandle) -> Option<&MethodStat> {
        self.stats.get(handle.index())
    }

    pub fn record(&self, handle: StatHandle, latency: Duration, bucket: OutcomeBucket) {
        match self.get(handle) {
            Some(stat) => stat.record(latency, bucket),
            None => warn!("Dropping observation for unknown stat {:?}", handle),
        }
    }

    pub fn set_elapsed(&self, handle: StatHandle, elapsed: Duration) {
        match self.get(handle) {
            Some(stat) => stat.set_elapsed(elapsed),
            None => warn!("Dropping elapsed time for unknown stat {:?}", handle),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Snapshots in registration order.
    #[must_use]
    pub fn snapshots(&self) -> Vec<StatSnapshot> {
        self.stats.iter().map(MethodStat::snapshot).collect()
    }
}
