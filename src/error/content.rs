use thiserror::Error;

/// Reasons a response that passed transport and status checks is still wrong.
/// Reported in aggregate only as "content errors".
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Failed to decode response body: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
    #[error("Search item tagged '{tag}' has no '{tag}' payload.")]
    MissingPayload { tag: &'static str },
    #[error("Expected {expected} items, but got {actual}.")]
    CountMismatch { expected: usize, actual: usize },
    #[error("Expected {expected} total_items, but got {actual}.")]
    TotalItemsMismatch { expected: i64, actual: i64 },
    #[error("Expected item with ID={expected}, but got ID={actual} in position {position}.")]
    OrderMismatch {
        position: usize,
        expected: i64,
        actual: i64,
    },
    #[error("Item with ID {id} has no reference entry.")]
    MissingReference { id: i64 },
    #[error("Item with ID {id} content mismatch.")]
    ContentMismatch { id: i64 },
    #[error("Only {found} of {expected} expected items found; at least 70% must match.")]
    InsufficientOverlap { found: usize, expected: usize },
}
