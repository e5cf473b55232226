use clap::Parser;
use reqwest::Url;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::defaults::{
    DEFAULT_CONNECTIONS, DEFAULT_COUNT, DEFAULT_DATA_DIR, DEFAULT_HOST, DEFAULT_QUEUE_CAPACITY,
    DEFAULT_TIMEOUT,
};
use super::parsers::{parse_duration_arg, parse_host, parse_positive_usize};
use super::types::{OutputFormat, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Replays recorded API requests against a media catalogue service, checks every response against reference data and reports per-method latency, throughput and error counts."
)]
pub struct TesterArgs {
    /// Target service as host[:port]
    #[arg(long, default_value = DEFAULT_HOST, value_parser = parse_host)]
    pub host: Url,

    /// Directory holding epg.json and media_items.json
    #[arg(long = "datadir", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Directory holding ammos.json (empty string skips ammo loading)
    #[arg(long = "ammodir", default_value = DEFAULT_DATA_DIR)]
    pub ammo_dir: String,

    /// Number of concurrent workers
    #[arg(
        long = "conn",
        alias = "connections",
        default_value = DEFAULT_CONNECTIONS,
        value_parser = parse_positive_usize
    )]
    pub connections: PositiveUsize,

    /// Per-request timeout (supports ms/s/m/h, bare number = seconds)
    #[arg(long, default_value = DEFAULT_TIMEOUT, value_parser = parse_duration_arg)]
    pub timeout: Duration,

    /// Requests to send per method
    #[arg(long, default_value = DEFAULT_COUNT, value_parser = parse_positive_usize)]
    pub count: PositiveUsize,

    /// Jobs buffered between the driver and the workers
    #[arg(
        long = "queue-capacity",
        default_value = DEFAULT_QUEUE_CAPACITY,
        value_parser = parse_positive_usize
    )]
    pub queue_capacity: PositiveUsize,

    /// Report format
    #[arg(long = "output-format", default_value = "text", value_enum)]
    pub output_format: OutputFormat,

    /// Write the report to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Path to config file (TOML/JSON). Defaults to ./ammo-tester.toml or ./ammo-tester.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by AMMO_TESTER_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl TesterArgs {
    /// The ammo directory, or `None` when ammo loading is disabled.
    #[must_use]
    pub fn ammo_dir(&self) -> Option<&Path> {
        if self.ammo_dir.trim().is_empty() {
            None
        } else {
            Some(Path::new(&self.ammo_dir))
        }
    }
}
