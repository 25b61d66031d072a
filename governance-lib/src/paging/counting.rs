//! Counting strategy: page through a list that is already in memory.

use super::PageSource;
use super::PageWindow;
use crate::error::SourceError;

type Predicate<T> = Box<dyn Fn(&T) -> bool>;

/// A page source over a materialized list.
///
/// Suited to lists that are cheap to hold but hard to query, e.g. rows
/// computed in the application rather than stored. The total is found by
/// counting the items that pass the filter; a reload copies the visible
/// window into [`rows`](Self::rows).
pub struct CountingSource<T> {
    items: Vec<T>,
    filter: Option<Predicate<T>>,
    rows: Vec<T>,
}

impl<T: Clone> CountingSource<T> {
    /// Creates a source over `items` with no filter.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            filter: None,
            rows: Vec::new(),
        }
    }

    /// Sets the filter predicate.
    pub fn with_filter(mut self, filter: impl Fn(&T) -> bool + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Replaces the filter predicate. Reset the pager's offset afterwards.
    pub fn set_filter(&mut self, filter: impl Fn(&T) -> bool + 'static) {
        self.filter = Some(Box::new(filter));
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    /// All items, filtered or not.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Mutable access to the backing list for out-of-band edits.
    pub fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }

    /// Rows loaded by the last reload.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    fn matching(&self) -> impl Iterator<Item = &T> {
        self.items
            .iter()
            .filter(|&item| self.filter.as_ref().is_none_or(|accept| accept(item)))
    }
}

impl<T: Clone> PageSource for CountingSource<T> {
    fn total(&self) -> usize {
        self.matching().count()
    }

    fn reload(&mut self, window: PageWindow) -> Result<(), SourceError> {
        self.rows = self
            .matching()
            .skip(window.offset)
            .take(window.limit)
            .cloned()
            .collect();
        Ok(())
    }
}

impl<T> std::fmt::Debug for CountingSource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountingSource")
            .field("items", &self.items.len())
            .field("filtered", &self.filter.is_some())
            .field("rows", &self.rows.len())
            .finish()
    }
}
