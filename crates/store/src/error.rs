//! Store error types.

use thiserror::Error;

/// Folder store operation errors.
///
/// Messages carry folder identifiers and filenames, never filesystem paths,
/// so they are safe to surface to callers.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown folder: {0}")]
    NotFound(String),

    #[error(transparent)]
    Invalid(#[from] satchel_core::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("metadata record error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
