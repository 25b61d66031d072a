//! In-memory session backend using DashMap

use dashmap::DashMap;

use super::SessionBackend;
use crate::error::SessionError;

/// Session storage that lives as long as the process.
///
/// # Example
///
/// ```
/// use governance_lib::session::{MemoryBackend, SessionStore};
///
/// let store = SessionStore::new(MemoryBackend::new());
/// store.set("filter", &"inactive".to_string()).unwrap();
/// assert_eq!(store.get::<String>("filter").unwrap().as_deref(), Some("inactive"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryBackend {
    store: DashMap<String, Vec<u8>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl SessionBackend for MemoryBackend {
    fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, SessionError> {
        Ok(self.store.get(key).map(|entry| entry.value().clone()))
    }

    fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), SessionError> {
        self.store.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), SessionError> {
        self.store.remove(key);
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SessionError> {
        let mut keys: Vec<String> = self
            .store
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        Ok(keys)
    }
}
