use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, Url};

use crate::error::TransportError;

/// Status and fully read body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Issues one GET. Implemented by `reqwest::Client`; tests substitute their
/// own.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url`, giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the request cannot be sent, times out,
    /// or the body cannot be read.
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<FetchResponse, TransportError>;
}

#[async_trait]
impl Fetcher for Client {
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<FetchResponse, TransportError> {
        let response = self
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| TransportError::from_reqwest(url.as_str(), err, false))?;
        let status = response.status().as_u16();
        let body = read_body(response)
            .await
            .map_err(|err| TransportError::from_reqwest(url.as_str(), err, true))?;
        Ok(FetchResponse { status, body })
    }
}

async fn read_body(response: reqwest::Response) -> Result<Vec<u8>, reqwest::Error> {
    let capacity = response
        .content_length()
        .and_then(|len| usize::try_from(len).ok())
        .unwrap_or(0);
    let mut body = Vec::with_capacity(capacity);
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        body.extend_from_slice(&chunk?);
    }
    Ok(body)
}
