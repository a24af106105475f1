//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid folder identifier: {0}")]
    InvalidFolderId(String),

    #[error("invalid filename: {0}")]
    InvalidFilename(String),

    #[error("word corpus too small: {found} usable words (need at least {min})")]
    CorpusTooSmall { found: usize, min: usize },

    #[error("failed to read word list: {0}")]
    CorpusUnreadable(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
