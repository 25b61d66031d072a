//! Session backend trait.

use crate::error::SessionError;

/// Raw byte storage behind a [`SessionStore`](super::SessionStore).
///
/// Implementations handle storage and retrieval only; the store layers
/// typed serialization on top.
pub trait SessionBackend: Send + Sync {
    /// Get raw bytes for a key.
    fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, SessionError>;

    /// Set raw bytes for a key.
    fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), SessionError>;

    /// Delete a key.
    fn delete(&self, key: &str) -> Result<(), SessionError>;

    /// Get all keys matching a prefix.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SessionError>;
}
