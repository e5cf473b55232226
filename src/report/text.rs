use std::time::Duration;

use crate::metrics::StatSnapshot;
use crate::runner::RunSummary;

/// Microseconds per millisecond.
const US_PER_MS: u128 = 1_000;

const HEADERS: [&str; 9] = [
    "Requests",
    "RPS",
    "Avg",
    "P50",
    "P90",
    "P99",
    "Conn Errors",
    "Wrong Status",
    "Mismatch",
];

/// Header line, one row per method, then a totals line.
#[must_use]
pub fn summary_lines(summary: &RunSummary) -> Vec<String> {
    let mut lines = Vec::with_capacity(summary.methods.len().saturating_add(4));
    lines.push(format!(
        "Started: {}",
        summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    lines.push(format!(
        "Duration: {}",
        format_latency(summary.wall_time)
    ));

    if summary.methods.is_empty() {
        lines.push("No methods were replayed.".to_owned());
        return lines;
    }

    let rows: Vec<[String; 9]> = summary.methods.iter().map(row_cells).collect();
    let method_width = summary
        .methods
        .iter()
        .map(|snapshot| snapshot.method.len())
        .chain(std::iter::once("Method".len()))
        .max()
        .unwrap_or_default();
    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    lines.push(format_row(
        "Method",
        method_width,
        HEADERS.iter().copied(),
        &widths,
    ));
    for (snapshot, row) in summary.methods.iter().zip(rows.iter()) {
        lines.push(format_row(
            &snapshot.method,
            method_width,
            row.iter().map(String::as_str),
            &widths,
        ));
    }

    let errors: u64 = summary
        .methods
        .iter()
        .map(StatSnapshot::error_count)
        .fold(0, u64::saturating_add);
    lines.push(format!(
        "Total: {} requests, {} errors",
        summary.drain.processed, errors
    ));
    lines
}

fn row_cells(snapshot: &StatSnapshot) -> [String; 9] {
    [
        snapshot.requests_count.to_string(),
        snapshot.requests_per_second().to_string(),
        format_latency(snapshot.avg_latency()),
        format!("{}ms", snapshot.p50_latency_ms),
        format!("{}ms", snapshot.p90_latency_ms),
        format!("{}ms", snapshot.p99_latency_ms),
        snapshot.conn_errors.to_string(),
        snapshot.http_code_errors.to_string(),
        snapshot.content_errors.to_string(),
    ]
}

fn format_row<'cell>(
    method: &str,
    method_width: usize,
    cells: impl Iterator<Item = &'cell str>,
    widths: &[usize; 9],
) -> String {
    let mut parts = Vec::with_capacity(widths.len().saturating_add(1));
    parts.push(format!("{:<method_width$}", method));
    for (cell, width) in cells.zip(widths.iter()) {
        parts.push(format!("{:>width$}", cell, width = *width));
    }
    parts.join("  ")
}

/// `12.345ms`, truncated to microseconds.
pub(super) fn format_latency(latency: Duration) -> String {
    let micros = latency.as_micros();
    format!("{}.{:03}ms", micros / US_PER_MS, micros % US_PER_MS)
}
