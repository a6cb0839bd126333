//! Error types for the gateway crate

use codex_ports::FeedError;
use thiserror::Error;

/// HTTP-level errors from a REST price provider
#[derive(Error, Debug)]
pub enum RestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Price missing: {0}")]
    Missing(String),
}

/// Convert infrastructure RestError to the port's FeedError
impl From<RestError> for FeedError {
    fn from(err: RestError) -> Self {
        match err {
            RestError::Http(e) if e.is_decode() => FeedError::Parse(e.to_string()),
            RestError::Http(e) => FeedError::Network(e.to_string()),
            RestError::Status(status) => FeedError::Api { status },
            RestError::Parse(msg) => FeedError::Parse(msg),
            RestError::Missing(path) => FeedError::MissingPrice(path),
        }
    }
}
