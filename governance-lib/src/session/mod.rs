//! Typed key-value storage for view state kept between requests.

mod backend;
mod memory;
mod sqlite;

pub use backend::SessionBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use std::sync::Arc;

use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::SessionError;
use crate::paging::PageSource;
use crate::paging::Pager;
use crate::paging::PagerState;

/// Typed session store.
///
/// Wraps a [`SessionBackend`] with bincode serialization.
///
/// # Example
///
/// ```
/// use governance_lib::paging::{CountingSource, Pager};
/// use governance_lib::session::{MemoryBackend, SessionStore};
///
/// let store = SessionStore::new(MemoryBackend::new());
///
/// let mut pager = Pager::new(10, CountingSource::new((0..50).collect::<Vec<u32>>())).unwrap();
/// pager.set_current_page(3);
/// store.save_pager("identities", &pager).unwrap();
///
/// let mut fresh = Pager::new(10, CountingSource::new((0..50).collect::<Vec<u32>>())).unwrap();
/// assert!(store.restore_pager("identities", &mut fresh).unwrap());
/// assert_eq!(fresh.offset(), 20);
/// ```
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn SessionBackend>,
}

impl SessionStore {
    /// Key prefix under which pager states are stored.
    pub const PAGER_PREFIX: &'static str = "pager:";

    /// Create a new store over the given backend.
    pub fn new(backend: impl SessionBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Get a typed value for a key.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SessionError> {
        match self.backend.get_bytes(key)? {
            Some(bytes) => Ok(Some(
                bincode::deserialize(&bytes).map_err(SessionError::Deserialization)?,
            )),
            None => Ok(None),
        }
    }

    /// Get a typed value for a key, returning a default if not found.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, SessionError> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Set a typed value for a key.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), SessionError> {
        let bytes = bincode::serialize(value).map_err(SessionError::Serialization)?;
        self.backend.set_bytes(key, bytes)
    }

    /// Delete a key.
    pub fn delete(&self, key: &str) -> Result<(), SessionError> {
        self.backend.delete(key)
    }

    /// Get all keys matching a prefix.
    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SessionError> {
        self.backend.keys_with_prefix(prefix)
    }

    /// Stores the pager's position under `view`.
    pub fn save_pager<S: PageSource>(&self, view: &str, pager: &Pager<S>) -> Result<(), SessionError> {
        let state = pager.save_state();
        debug!(
            "Saving pager state for {}: offset {}, page size {}",
            view, state.offset, state.page_size
        );
        self.set(&Self::pager_key(view), &state)
    }

    /// Restores the position saved under `view`, if any.
    ///
    /// Returns `Ok(false)` when nothing was saved. A stored state the pager
    /// rejects is reported as [`SessionError::Paging`] and leaves the pager
    /// as it was.
    pub fn restore_pager<S: PageSource>(&self, view: &str, pager: &mut Pager<S>) -> Result<bool, SessionError> {
        let Some(state) = self.get::<PagerState>(&Self::pager_key(view))? else {
            return Ok(false);
        };
        pager.restore_state(state)?;
        debug!("Restored pager state for {}: offset {}", view, state.offset);
        Ok(true)
    }

    /// Names of all views with a saved pager state.
    pub fn saved_pager_views(&self) -> Result<Vec<String>, SessionError> {
        Ok(self
            .keys_with_prefix(Self::PAGER_PREFIX)?
            .into_iter()
            .filter_map(|key| key.strip_prefix(Self::PAGER_PREFIX).map(str::to_string))
            .collect())
    }

    fn pager_key(view: &str) -> String {
        format!("{}{}", Self::PAGER_PREFIX, view)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}
