//! Session store error types

use super::PagingError;

/// Errors that can occur while reading or writing session state.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
    #[error("session backend lock poisoned")]
    Poisoned,
    #[error("stored pager state rejected: {0}")]
    Paging(#[from] PagingError),
}
