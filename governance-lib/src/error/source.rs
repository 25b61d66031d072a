//! Page source error types

/// Errors raised by a [`PageSource`](crate::paging::PageSource) while
/// fetching rows.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The bounded database query failed.
    #[error("Query error: {0}")]
    Query(#[from] rusqlite::Error),

    /// Any other collaborator failure.
    #[error("Source failed: {0}")]
    Failed(String),
}

impl SourceError {
    /// Creates a generic collaborator failure.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}
