//! Pager navigation error types

use super::SourceError;

/// Errors that can occur while navigating a [`Pager`](crate::paging::Pager).
#[derive(Debug, thiserror::Error)]
pub enum PagingError {
    /// A pager was built or restored with a page size of zero.
    #[error("Page size must be greater than zero")]
    InvalidPageSize,

    /// `next_page` was called while the last rows were already visible.
    #[error("No next page: offset {offset} already shows the end of {total} rows")]
    NoNextPage { offset: usize, total: usize },

    /// `prev_page` was called on the first page.
    #[error("No previous page: already on the first page")]
    NoPrevPage,

    /// A saved pager state was written by an incompatible version.
    #[error("Unsupported pager state version {found} (expected {expected})")]
    UnsupportedStateVersion { found: u16, expected: u16 },

    /// A saved pager state points past the addressable row range.
    #[error("Pager state out of range: offset {offset} with page size {page_size}")]
    StateOutOfRange { offset: usize, page_size: usize },

    /// The page source failed to reload the current window.
    #[error("Page reload failed: {0}")]
    Reload(#[from] SourceError),
}

impl PagingError {
    /// Returns `true` if this error is a navigation precondition violation
    /// rather than a failure of the page source.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::NoNextPage { .. } | Self::NoPrevPage)
    }
}
