//! The collaborator side of a pager.

use crate::error::SourceError;

/// The rows a list view should show: skip `offset`, take at most `limit`.
///
/// This is the pair a bounded query binds as `OFFSET` / `LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: usize,
    pub limit: usize,
}

impl PageWindow {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }
}

/// Supplies totals and rows to a [`Pager`](super::Pager).
///
/// The pager itself only does offset arithmetic. How the total is computed
/// and how the visible rows are fetched is up to the source: counting an
/// already materialized list ([`CountingSource`](super::CountingSource)) or
/// running a bounded database query ([`QueryingSource`](super::QueryingSource)).
pub trait PageSource {
    /// Number of rows matching the current filter.
    ///
    /// Asked for fresh by every pager call that needs it, so implementations
    /// that are expensive to count should cache between reloads.
    fn total(&self) -> usize;

    /// Re-fetches the rows for `window`.
    ///
    /// Called after the pager moves and on explicit refresh.
    fn reload(&mut self, window: PageWindow) -> Result<(), SourceError>;
}

impl<S: PageSource + ?Sized> PageSource for Box<S> {
    fn total(&self) -> usize {
        (**self).total()
    }

    fn reload(&mut self, window: PageWindow) -> Result<(), SourceError> {
        (**self).reload(window)
    }
}
