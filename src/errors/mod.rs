use reqwest::StatusCode;
use thiserror::Error;

/// Failure taxonomy for start.gg API access
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("GraphQL errors: {}", .0.join("; "))]
    Query(Vec<String>),

    #[error("event not found for slug: {0}")]
    NotFound(String),
}

impl ApiError {
    /// Transport, HTTP and server-reported failures are worth another attempt;
    /// a missing event is a terminal answer.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ApiError::NotFound(_))
    }
}
