use thiserror::Error;

use crate::config::ConfigError;

/// Errors returned by game commands
#[derive(Error, Debug)]
pub enum GameError {
    #[error("No choice is pending")]
    NoPendingChoice,

    #[error("Invalid choice index {index}: {available} options offered")]
    InvalidChoice { index: usize, available: usize },

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, GameError>;
