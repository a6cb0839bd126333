use thiserror::Error;

/// Errors from a durable keyed store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The stored bytes are not a readable record
    #[error("Corrupt record under {0}")]
    Corrupt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors from the reference price provider
///
/// Never surfaced to the player: the game keeps its default rate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: status {status}")]
    Api { status: u16 },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Price missing from response: {0}")]
    MissingPrice(String),
}

pub type FeedResult<T> = std::result::Result<T, FeedError>;
