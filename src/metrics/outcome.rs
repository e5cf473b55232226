use crate::error::{ContentError, TransportError};
use crate::http::FetchResponse;

/// Terminal result of one job.
#[derive(Debug)]
pub enum Outcome {
    Success,
    Transport(TransportError),
    UnexpectedStatus { expected: u16, actual: u16 },
    Content(ContentError),
}

/// The counter an outcome lands in. Exactly one per job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeBucket {
    Success,
    ConnError,
    HttpCodeError,
    ContentError,
}

impl Outcome {
    #[must_use]
    pub const fn bucket(&self) -> OutcomeBucket {
        match self {
            Outcome::Success => OutcomeBucket::Success,
            Outcome::Transport(_) => OutcomeBucket::ConnError,
            Outcome::UnexpectedStatus { .. } => OutcomeBucket::HttpCodeError,
            Outcome::Content(_) => OutcomeBucket::ContentError,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// Routes a finished request into its bucket. Transport failures win over a
/// wrong status, and `validate` only runs when both checks passed.
pub fn classify<V>(
    result: Result<FetchResponse, TransportError>,
    expected_status: u16,
    validate: V,
) -> Outcome
where
    V: FnOnce(&[u8]) -> Result<(), ContentError>,
{
    let response = match result {
        Ok(response) => response,
        Err(err) => return Outcome::Transport(err),
    };
    if response.status != expected_status {
        return Outcome::UnexpectedStatus {
            expected: expected_status,
            actual: response.status,
        };
    }
    match validate(&response.body) {
        Ok(()) => Outcome::Success,
        Err(err) => Outcome::Content(err),
    }
}
