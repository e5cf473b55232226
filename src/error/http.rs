use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Network-level failure of a single request. Never inspected further than
/// counting it as a connection error.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request to {url} timed out.")]
    Timeout { url: String },
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: BoxedSource,
    },
    #[error("Failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: BoxedSource,
    },
}

impl TransportError {
    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error, reading_body: bool) -> Self {
        if err.is_timeout() {
            return TransportError::Timeout {
                url: url.to_owned(),
            };
        }
        if reading_body {
            TransportError::Body {
                url: url.to_owned(),
                source: Box::new(err),
            }
        } else {
            TransportError::Request {
                url: url.to_owned(),
                source: Box::new(err),
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Job queue closed before {url} could be enqueued; all workers have exited.")]
    QueueClosed { url: String },
}
