use thiserror::Error;

/// Failures while obtaining the raw document.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Fetch worker exited without a document")]
    WorkerDisconnected,
}

/// Failures while turning a document into a `SearchResult`.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Invalid selector {selector}: {reason}")]
    Selector { selector: String, reason: String },
    #[error("Invalid pattern: {0}")]
    Pattern(String),
    #[error("no matches: {0}")]
    HitCountNotFound(String),
    #[error("Hit count out of range: {0}")]
    InvalidHitCount(String),
    #[error("Max page number is not an integer: {0:?}")]
    InvalidPageNumber(String),
}
