use thiserror::Error;

use super::{ConfigError, DataError, DispatchError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("HTTP client error: {source}")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },
    #[error("Join error: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Data error: {0}")]
    Data(#[from] DataError),
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

pub type AppResult<T> = Result<T, AppError>;
