//! Error type for store backends.
//!
//! A missing record is not an error; see `TodoStore`.

use thiserror::Error;

/// Faults raised by the storage engine itself.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying engine rejected or failed the operation.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<tokio_rusqlite::Error> for StoreError {
    fn from(error: tokio_rusqlite::Error) -> Self {
        StoreError::Backend(error.to_string())
    }
}
