use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading the reference dataset or the ammo set. All of them
/// abort the run before any request is dispatched.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
