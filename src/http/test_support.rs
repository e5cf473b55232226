use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;

use crate::error::TransportError;

use super::{FetchResponse, Fetcher};

/// Answers every request with the same response and remembers the URLs it
/// was asked for.
pub(crate) struct StaticFetcher {
    status: u16,
    body: Vec<u8>,
    delay: Duration,
    seen: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub(crate) fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(crate) const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn seen(&self) -> Vec<String> {
        self.seen
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &Url, _timeout: Duration) -> Result<FetchResponse, TransportError> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(url.to_string());
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(FetchResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

/// Fails every request as if the server never answered.
pub(crate) struct TimeoutFetcher;

#[async_trait]
impl Fetcher for TimeoutFetcher {
    async fn fetch(&self, url: &Url, _timeout: Duration) -> Result<FetchResponse, TransportError> {
        Err(TransportError::Timeout {
            url: url.to_string(),
        })
    }
}

pub(crate) fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: std::future::Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

pub(crate) fn run_multi_thread_test<F>(worker_threads: usize, future: F) -> Result<(), String>
where
    F: std::future::Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}
