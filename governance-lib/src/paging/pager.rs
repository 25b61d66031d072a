//! Offset/page-size navigation over an external total.

use log::debug;
use log::warn;
use serde::Serialize;

use super::ListResult;
use super::PageSource;
use super::PageWindow;
use super::PagerState;
use super::PagingConfig;
use super::state::PAGER_STATE_VERSION;
use crate::error::PagingError;

/// Turns an offset and page size plus the source's total into navigation
/// state, and reloads the source whenever the position moves.
///
/// The pager never stores the total. Every call that needs it asks the
/// source, so the answer always reflects the source's current filter.
///
/// # Example
///
/// ```
/// use governance_lib::paging::{CountingSource, Pager};
///
/// let source = CountingSource::new((1..=25).collect::<Vec<u32>>());
/// let mut pager = Pager::new(10, source).unwrap();
///
/// pager.refresh().unwrap();
/// assert_eq!(pager.source().rows(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
///
/// pager.next_page().unwrap();
/// assert_eq!(pager.start_index(), 11);
/// assert_eq!(pager.end_index(), 20);
/// assert_eq!(pager.current_page(), 2);
/// ```
#[derive(Debug)]
pub struct Pager<S> {
    page_size: usize,
    offset: usize,
    source: S,
}

impl<S: PageSource> Pager<S> {
    /// Creates a pager on the first page.
    ///
    /// Returns [`PagingError::InvalidPageSize`] if `page_size` is zero.
    pub fn new(page_size: usize, source: S) -> Result<Self, PagingError> {
        if page_size == 0 {
            return Err(PagingError::InvalidPageSize);
        }
        Ok(Self {
            page_size,
            offset: 0,
            source,
        })
    }

    /// Creates a pager using the configured default page size.
    pub fn from_config(config: &PagingConfig, source: S) -> Result<Self, PagingError> {
        Self::new(config.default_page_size, source)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the source, e.g. to change its filter.
    ///
    /// Callers that change what the source matches should follow up with
    /// [`reset_offset`](Self::reset_offset).
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// The source's current total.
    pub fn total(&self) -> usize {
        self.source.total()
    }

    /// The window the source is asked to load.
    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.offset, self.page_size)
    }

    // -------------------------------------------------------------------------
    // Derived navigation state
    // -------------------------------------------------------------------------

    /// One-based index of the first visible row.
    pub fn start_index(&self) -> usize {
        self.offset + 1
    }

    /// One-based index of the last visible row.
    pub fn end_index(&self) -> usize {
        self.end_index_for(self.total())
    }

    pub fn has_next(&self) -> bool {
        let total = self.total();
        self.end_index_for(total) < total
    }

    pub fn has_prev(&self) -> bool {
        self.offset > 0
    }

    /// Whether the rows overflow a single page, i.e. whether paging controls
    /// are worth rendering.
    pub fn is_paging_required(&self) -> bool {
        self.total() > self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.offset / self.page_size + 1
    }

    /// Number of pages needed for the current total; zero when empty.
    pub fn last_page(&self) -> usize {
        self.total().div_ceil(self.page_size)
    }

    fn end_index_for(&self, total: usize) -> usize {
        (self.offset + self.page_size).min(total)
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Jumps to `page`, clamped into `1..=last_page`.
    ///
    /// With no rows at all the pager lands on page 1 at offset 0. The source
    /// is not reloaded; call [`refresh`](Self::refresh) to fetch the rows.
    pub fn set_current_page(&mut self, page: usize) {
        let last = self.last_page().max(1);
        let page = page.clamp(1, last);
        self.offset = (page - 1) * self.page_size;
        debug!("Pager jumped to page {} (offset {})", page, self.offset);
    }

    /// Advances one page and reloads.
    ///
    /// Fails with [`PagingError::NoNextPage`] when the last rows are already
    /// visible; the offset is left untouched. If the reload fails the offset
    /// is restored before the error is returned.
    pub fn next_page(&mut self) -> Result<(), PagingError> {
        let total = self.total();
        if self.end_index_for(total) >= total {
            return Err(PagingError::NoNextPage {
                offset: self.offset,
                total,
            });
        }
        let previous = self.offset;
        self.offset += self.page_size;
        self.reload_or_rollback(previous)
    }

    /// Steps back one page and reloads.
    ///
    /// Fails with [`PagingError::NoPrevPage`] on the first page. If the
    /// reload fails the offset is restored before the error is returned.
    pub fn prev_page(&mut self) -> Result<(), PagingError> {
        if !self.has_prev() {
            return Err(PagingError::NoPrevPage);
        }
        let previous = self.offset;
        self.offset = self.offset.saturating_sub(self.page_size);
        self.reload_or_rollback(previous)
    }

    /// Reloads the current window without moving.
    pub fn refresh(&mut self) -> Result<(), PagingError> {
        self.source.reload(self.window())?;
        Ok(())
    }

    /// Goes back to the first row. Used when the filter changes.
    pub fn reset_offset(&mut self) {
        self.offset = 0;
    }

    fn reload_or_rollback(&mut self, previous: usize) -> Result<(), PagingError> {
        match self.source.reload(self.window()) {
            Ok(()) => {
                debug!("Pager moved to offset {} (page {})", self.offset, self.current_page());
                Ok(())
            }
            Err(e) => {
                warn!(
                    "Reload at offset {} failed, staying at offset {}: {}",
                    self.offset, previous, e
                );
                self.offset = previous;
                Err(e.into())
            }
        }
    }

    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    /// Captures offset and page size for storage between requests.
    pub fn save_state(&self) -> PagerState {
        PagerState::new(self.offset, self.page_size)
    }

    /// Restores a previously saved position verbatim.
    ///
    /// The source is not reloaded. Rejects states from another format
    /// version, states with a zero page size and states whose last window
    /// row is not addressable, leaving the pager unchanged.
    pub fn restore_state(&mut self, state: PagerState) -> Result<(), PagingError> {
        if state.version != PAGER_STATE_VERSION {
            return Err(PagingError::UnsupportedStateVersion {
                found: state.version,
                expected: PAGER_STATE_VERSION,
            });
        }
        if state.page_size == 0 {
            return Err(PagingError::InvalidPageSize);
        }
        // index arithmetic adds offset and page size
        if state.offset.checked_add(state.page_size).is_none() {
            return Err(PagingError::StateOutOfRange {
                offset: state.offset,
                page_size: state.page_size,
            });
        }
        self.offset = state.offset;
        self.page_size = state.page_size;
        Ok(())
    }

    /// Pairs the visible rows with the current total in grid-store shape.
    pub fn list_result<T: Serialize>(&self, objects: Vec<T>) -> ListResult<T> {
        ListResult::new(objects, self.total())
    }
}
