use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::debug;

use super::{LatencyHistogram, OutcomeBucket};

/// Microseconds per second.
const US_PER_SEC: u128 = 1_000_000;

#[derive(Debug)]
struct StatCounters {
    requests_count: u64,
    total_latency: Duration,
    total_elapsed: Duration,
    conn_errors: u64,
    http_code_errors: u64,
    content_errors: u64,
    histogram: Option<LatencyHistogram>,
}

impl StatCounters {
    fn new() -> Self {
        let histogram = match LatencyHistogram::new() {
            Ok(histogram) => Some(histogram),
            Err(err) => {
                tracing::warn!("Failed to initialize latency histogram: {}", err);
                None
            }
        };
        Self {
            requests_count: 0,
            total_latency: Duration::ZERO,
            total_elapsed: Duration::ZERO,
            conn_errors: 0,
            http_code_errors: 0,
            content_errors: 0,
            histogram,
        }
    }
}

/// Aggregate for one API method. Every mutation goes through one lock owned
/// by this stat, so writers for different methods never contend.
#[derive(Debug)]
pub struct MethodStat {
    method: String,
    counters: Mutex<StatCounters>,
}

impl MethodStat {
    #[must_use]
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            counters: Mutex::new(StatCounters::new()),
        }
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Counts one finished job: request count and latency always, plus the
    /// outcome's error bucket, in a single critical section.
    pub fn record(&self, latency: Duration, bucket: OutcomeBucket) {
        let mut counters = self.lock();
        counters.requests_count = counters.requests_count.saturating_add(1);
        counters.total_latency = counters.total_latency.saturating_add(latency);
        match bucket {
            OutcomeBucket::Success => {}
            OutcomeBucket::ConnError => {
                counters.conn_errors = counters.conn_errors.saturating_add(1);
            }
            OutcomeBucket::HttpCodeError => {
                counters.http_code_errors = counters.http_code_errors.saturating_add(1);
            }
            OutcomeBucket::ContentError => {
                counters.content_errors = counters.content_errors.saturating_add(1);
            }
        }
        if let Some(histogram) = counters.histogram.as_mut() {
            let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
            if let Err(err) = histogram.record(latency_ms) {
                debug!("{}: {}", self.method, err);
            }
        }
    }

    pub fn set_elapsed(&self, elapsed: Duration) {
        self.lock().total_elapsed = elapsed;
    }

    #[must_use]
    pub fn snapshot(&self) -> StatSnapshot {
        let counters = self.lock();
        let (p50_latency_ms, p90_latency_ms, p99_latency_ms) = counters
            .histogram
            .as_ref()
            .map_or((0, 0, 0), LatencyHistogram::percentiles);
        StatSnapshot {
            method: self.method.clone(),
            requests_count: counters.requests_count,
            total_latency: counters.total_latency,
            total_elapsed: counters.total_elapsed,
            conn_errors: counters.conn_errors,
            http_code_errors: counters.http_code_errors,
            content_errors: counters.content_errors,
            p50_latency_ms,
            p90_latency_ms,
            p99_latency_ms,
        }
    }

    // A writer that panicked mid-update has still left whole counters
    // behind; keep counting instead of poisoning the run.
    fn lock(&self) -> MutexGuard<'_, StatCounters> {
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Point-in-time copy of a [`MethodStat`], taken after workers are joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatSnapshot {
    pub method: String,
    pub requests_count: u64,
    pub total_latency: Duration,
    pub total_elapsed: Duration,
    pub conn_errors: u64,
    pub http_code_errors: u64,
    pub content_errors: u64,
    pub p50_latency_ms: u64,
    pub p90_latency_ms: u64,
    pub p99_latency_ms: u64,
}

impl StatSnapshot {
    #[must_use]
    pub const fn error_count(&self) -> u64 {
        self.conn_errors
            .saturating_add(self.http_code_errors)
            .saturating_add(self.content_errors)
    }

    #[must_use]
    pub const fn success_count(&self) -> u64 {
        self.requests_count.saturating_sub(self.error_count())
    }

    /// `requests_count / elapsed` in whole requests per second, 0 when no
    /// time was recorded.
    #[must_use]
    pub fn requests_per_second(&self) -> u64 {
        u128::from(self.requests_count)
            .saturating_mul(US_PER_SEC)
            .checked_div(self.total_elapsed.as_micros())
            .map_or(0, |rps| u64::try_from(rps).unwrap_or(u64::MAX))
    }

    /// `total_latency / requests_count`, zero when nothing was recorded.
    #[must_use]
    pub fn avg_latency(&self) -> Duration {
        self.total_latency
            .as_nanos()
            .checked_div(u128::from(self.requests_count))
            .map_or(Duration::ZERO, |nanos| {
                Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
            })
    }
}
