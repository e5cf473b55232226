use super::text::format_latency;
use super::*;
use crate::args::test_support::parse_test_args;
use crate::http::DrainSummary;
use crate::metrics::StatSnapshot;
use chrono::{DateTime, TimeZone, Utc};
use std::time::Duration;
use tempfile::tempdir;

fn snapshot(method: &str, requests: u64) -> StatSnapshot {
    StatSnapshot {
        method: method.to_owned(),
        requests_count: requests,
        total_latency: Duration::from_millis(requests.saturating_mul(4)),
        total_elapsed: Duration::from_secs(2),
        conn_errors: 1,
        http_code_errors: 2,
        content_errors: 3,
        p50_latency_ms: 4,
        p90_latency_ms: 9,
        p99_latency_ms: 15,
    }
}

fn summary() -> Result<RunSummary, String> {
    let started_at = Utc
        .with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .ok_or_else(|| "invalid timestamp".to_owned())?;
    Ok(RunSummary {
        started_at,
        wall_time: Duration::from_millis(4250),
        drain: DrainSummary {
            submitted: 300,
            processed: 300,
        },
        methods: vec![
            snapshot("/api/v1/epg", 100),
            snapshot("/api/v1/media_items", 200),
        ],
    })
}

#[test]
fn format_latency_keeps_microseconds() -> Result<(), String> {
    for (latency, expected) in [
        (Duration::ZERO, "0.000ms"),
        (Duration::from_micros(12_345), "12.345ms"),
        (Duration::from_nanos(1_999), "0.001ms"),
        (Duration::from_secs(2), "2000.000ms"),
    ] {
        let formatted = format_latency(latency);
        if formatted != expected {
            return Err(format!("{:?} formatted as {}", latency, formatted));
        }
    }
    Ok(())
}

#[test]
fn text_report_has_aligned_rows() -> Result<(), String> {
    let lines = summary_lines(&summary()?);
    let header = lines
        .iter()
        .find(|line| line.starts_with("Method"))
        .ok_or_else(|| "Missing header".to_owned())?;
    for column in ["Requests", "RPS", "P99", "Conn Errors", "Wrong Status", "Mismatch"] {
        if !header.contains(column) {
            return Err(format!("Header missing {}: {}", column, header));
        }
    }

    let epg = lines
        .iter()
        .find(|line| line.starts_with("/api/v1/epg "))
        .ok_or_else(|| "Missing epg row".to_owned())?;
    let cells: Vec<&str> = epg.split_whitespace().collect();
    if cells != ["/api/v1/epg", "100", "50", "4.000ms", "4ms", "9ms", "15ms", "1", "2", "3"] {
        return Err(format!("Unexpected epg row: {:?}", cells));
    }
    let media = lines
        .iter()
        .find(|line| line.starts_with("/api/v1/media_items"))
        .ok_or_else(|| "Missing media row".to_owned())?;
    if media.len() != epg.len() || header.len() != epg.len() {
        return Err("Rows must share the same width".to_owned());
    }
    if lines.last().map(String::as_str) != Some("Total: 300 requests, 12 errors") {
        return Err(format!("Unexpected totals: {:?}", lines.last()));
    }
    Ok(())
}

#[test]
fn text_report_without_methods() -> Result<(), String> {
    let mut empty = summary()?;
    empty.methods.clear();
    let lines = summary_lines(&empty);
    if !lines.iter().any(|line| line == "No methods were replayed.") {
        return Err(format!("Unexpected lines: {:?}", lines));
    }
    Ok(())
}

#[test]
fn json_report_carries_settings_and_rows() -> Result<(), String> {
    let args = parse_test_args([
        "ammo-tester",
        "--host",
        "localhost:9000",
        "--conn",
        "4",
        "--count",
        "100",
        "--timeout",
        "3s",
    ])
    .map_err(|err| err.to_string())?;
    let generated_at = Utc
        .with_ymd_and_hms(2026, 3, 1, 12, 0, 5)
        .single()
        .ok_or_else(|| "invalid timestamp".to_owned())?;
    let report = JsonReport::new(&summary()?, &args, generated_at);
    let value = serde_json::to_value(&report).map_err(|err| err.to_string())?;

    if value["generated_at"] != "2026-03-01T12:00:05.000Z" {
        return Err(format!("Unexpected generated_at: {}", value["generated_at"]));
    }
    if value["settings"]["host"] != "http://localhost:9000"
        || value["settings"]["connections"] != 4
        || value["settings"]["timeout_ms"] != 3000
    {
        return Err(format!("Unexpected settings: {}", value["settings"]));
    }
    let first = &value["methods"][0];
    if first["method"] != "/api/v1/epg"
        || first["requests"] != 100
        || first["rps"] != 50
        || first["avg_latency_us"] != 4000
        || first["content_errors"] != 3
    {
        return Err(format!("Unexpected row: {}", first));
    }
    Ok(())
}

#[test]
fn render_json_is_parseable() -> Result<(), String> {
    let args = parse_test_args(["ammo-tester", "--output-format", "json"])
        .map_err(|err| err.to_string())?;
    let rendered = render(&summary()?, &args).map_err(|err| err.to_string())?;
    let value: serde_json::Value =
        serde_json::from_str(&rendered).map_err(|err| err.to_string())?;
    let generated_at = value["generated_at"]
        .as_str()
        .ok_or_else(|| "Missing generated_at".to_owned())?;
    DateTime::parse_from_rfc3339(generated_at).map_err(|err| err.to_string())?;
    if value["methods"].as_array().map(Vec::len) != Some(2) {
        return Err("Expected two method rows".to_owned());
    }
    Ok(())
}

#[test]
fn write_report_to_file() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("report.txt");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime
        .block_on(write_report("hello report\n", Some(&path)))
        .map_err(|err| err.to_string())?;
    let written = std::fs::read_to_string(&path).map_err(|err| err.to_string())?;
    if written != "hello report\n" {
        return Err(format!("Unexpected file content: {:?}", written));
    }
    Ok(())
}
