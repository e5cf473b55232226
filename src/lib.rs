//! Core library for the `ammo-tester` CLI.
//!
//! The binary replays recorded requests ("ammo") against a media catalogue
//! service through a bounded worker pool, validates every response against a
//! reference dataset and reports per-method latency, throughput and error
//! counts. The modules here are the building blocks it is assembled from:
//! argument and config resolution, data loading, validators, the dispatcher,
//! statistics and reporting.
pub mod args;
pub mod config;
pub mod data;
pub mod entry;
pub mod error;
pub mod http;
pub mod logger;
pub mod metrics;
pub mod model;
pub mod report;
pub mod runner;
pub mod validate;
