//! Offset-based paging for list views.
//!
//! A [`Pager`] keeps the offset and page size of one list view. It never
//! owns the total row count: a [`PageSource`] supplies that on demand and
//! reloads rows whenever the pager moves.
//!
//! # Sources
//!
//! - [`CountingSource`] - counts and slices a list already in memory
//! - [`QueryingSource`] - runs bounded SQL queries described by a [`PagedQuery`]
//!
//! # Supporting types
//!
//! - [`PagerState`] - serializable position kept between requests
//! - [`PagingConfig`] - default and maximum page sizes
//! - [`ListResult`] - `{"totalCount", "objects"}` grid payload

mod config;
mod counting;
mod pager;
mod query;
mod querying;
mod result;
mod source;
mod state;

pub use config::PagingConfig;
pub use config::DEFAULT_MAX_PAGE_SIZE;
pub use config::DEFAULT_PAGE_SIZE;
pub use counting::CountingSource;
pub use pager::Pager;
pub use query::Direction;
pub use query::Filter;
pub use query::OrderBy;
pub use query::PagedQuery;
pub use querying::QueryingSource;
pub use result::ListResult;
pub use source::PageSource;
pub use source::PageWindow;
pub use state::PagerState;
pub use state::PAGER_STATE_VERSION;
