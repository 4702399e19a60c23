//! Error types for history pipeline operations

use crate::error::AppError;

/// Result type for history pipeline operations
pub type HistoryResult<T> = std::result::Result<T, HistoryError>;

/// Errors that can occur in the history pipeline
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// Store fetch failed; recovered by the view as "no data"
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// Export sink could not be written; surfaced to the caller
    #[error("Export failed: {0}")]
    ExportFailed(String),

    /// Export payload could not be serialized
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),
}

impl From<HistoryError> for AppError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::FetchFailed(msg) => AppError::Store(msg),
            HistoryError::ExportFailed(msg) => AppError::Internal(msg),
            HistoryError::SerializationFailed(msg) => AppError::Serialization(msg),
        }
    }
}
