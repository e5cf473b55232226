use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::args::TesterArgs;
use crate::metrics::StatSnapshot;
use crate::runner::RunSummary;

#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub generated_at: String,
    pub started_at: String,
    pub wall_time_ms: u64,
    pub requests_submitted: u64,
    pub requests_processed: u64,
    pub settings: ReportSettings,
    pub methods: Vec<MethodRow>,
}

#[derive(Debug, Serialize)]
pub struct ReportSettings {
    pub host: String,
    pub connections: usize,
    pub count: usize,
    pub queue_capacity: usize,
    pub timeout_ms: u64,
}

/// One method's statistics with durations flattened to integers.
#[derive(Debug, Serialize)]
pub struct MethodRow {
    pub method: String,
    pub requests: u64,
    pub rps: u64,
    pub elapsed_ms: u64,
    pub avg_latency_us: u64,
    pub p50_latency_ms: u64,
    pub p90_latency_ms: u64,
    pub p99_latency_ms: u64,
    pub conn_errors: u64,
    pub http_code_errors: u64,
    pub content_errors: u64,
}

impl JsonReport {
    #[must_use]
    pub fn new(summary: &RunSummary, args: &TesterArgs, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            started_at: summary
                .started_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            wall_time_ms: saturating_u64(summary.wall_time.as_millis()),
            requests_submitted: summary.drain.submitted,
            requests_processed: summary.drain.processed,
            settings: ReportSettings {
                host: args.host.as_str().trim_end_matches('/').to_owned(),
                connections: args.connections.get(),
                count: args.count.get(),
                queue_capacity: args.queue_capacity.get(),
                timeout_ms: saturating_u64(args.timeout.as_millis()),
            },
            methods: summary.methods.iter().map(MethodRow::from).collect(),
        }
    }
}

impl From<&StatSnapshot> for MethodRow {
    fn from(snapshot: &StatSnapshot) -> Self {
        Self {
            method: snapshot.method.clone(),
            requests: snapshot.requests_count,
            rps: snapshot.requests_per_second(),
            elapsed_ms: saturating_u64(snapshot.total_elapsed.as_millis()),
            avg_latency_us: saturating_u64(snapshot.avg_latency().as_micros()),
            p50_latency_ms: snapshot.p50_latency_ms,
            p90_latency_ms: snapshot.p90_latency_ms,
            p99_latency_ms: snapshot.p99_latency_ms,
            conn_errors: snapshot.conn_errors,
            http_code_errors: snapshot.http_code_errors,
            content_errors: snapshot.content_errors,
        }
    }
}

fn saturating_u64(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}
