//! Error taxonomy for backend queries.

use thiserror::Error;

/// Errors from the telemetry query backend.
///
/// Render paths treat all of these the same way: log and leave the chart's
/// loading placeholder in place. The taxonomy exists for logs and for
/// library consumers.
#[derive(Debug, Error)]
pub enum QueryError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Could not reach the backend.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,
}

impl From<reqwest::Error> for QueryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            QueryError::Timeout
        } else if err.is_connect() {
            QueryError::Connection(err.to_string())
        } else if err.is_decode() {
            QueryError::Parse(err.to_string())
        } else {
            QueryError::Http(err.to_string())
        }
    }
}
