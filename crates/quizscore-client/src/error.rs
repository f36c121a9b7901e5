//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to a quizscore server.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(String),

    /// The server could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The server answered with an error status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body was not what the API documents.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
