//! Serializable pager position.

use serde::Deserialize;
use serde::Serialize;

/// Version written by [`PagerState::new`].
pub const PAGER_STATE_VERSION: u16 = 1;

/// A saved pager position, kept in the session between requests.
///
/// Produced by [`Pager::save_state`](super::Pager::save_state) and fed back
/// to [`Pager::restore_state`](super::Pager::restore_state).
///
/// # Example
///
/// ```
/// use governance_lib::paging::PagerState;
///
/// let state = PagerState::new(20, 10);
/// assert_eq!(state.as_pair(), [20, 10]);
/// assert_eq!(PagerState::from_pair([20, 10]), state);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerState {
    /// Format version, checked on restore.
    pub version: u16,
    /// Zero-based index of the first visible row.
    pub offset: usize,
    /// Rows per page.
    pub page_size: usize,
}

impl PagerState {
    /// Creates a state at the current format version.
    pub fn new(offset: usize, page_size: usize) -> Self {
        Self {
            version: PAGER_STATE_VERSION,
            offset,
            page_size,
        }
    }

    /// Returns the legacy `[offset, page_size]` shape.
    pub fn as_pair(&self) -> [usize; 2] {
        [self.offset, self.page_size]
    }

    /// Builds a state from the legacy `[offset, page_size]` shape.
    pub fn from_pair([offset, page_size]: [usize; 2]) -> Self {
        Self::new(offset, page_size)
    }
}
