//! SQLite session backend with in-memory cache.

use std::path::Path;
use std::sync::Mutex;

use dashmap::DashMap;
use rusqlite::Connection;

use super::SessionBackend;
use crate::error::SessionError;

/// SQLite-backed session storage with a DashMap read cache.
///
/// Survives process restarts, so a list view can come back on the page the
/// user left it.
pub struct SqliteBackend {
    conn: Mutex<Connection>,
    cache: DashMap<String, Vec<u8>>,
}

impl SqliteBackend {
    /// Opens (or creates) the session database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        Self::init(Connection::open(path)?)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self, SessionError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, SessionError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS session_state (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
            cache: DashMap::new(),
        })
    }

    fn with_conn<R>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<R>,
    ) -> Result<R, SessionError> {
        let conn = self.conn.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(f(&*conn)?)
    }
}

impl SessionBackend for SqliteBackend {
    fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, SessionError> {
        // Check cache first
        if let Some(value) = self.cache.get(key) {
            return Ok(Some(value.clone()));
        }

        let result = self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT value FROM session_state WHERE key = ?")?;
            let mut rows = stmt.query([key])?;
            match rows.next()? {
                Some(row) => Ok(Some(row.get::<_, Vec<u8>>(0)?)),
                None => Ok(None),
            }
        })?;

        if let Some(ref value) = result {
            self.cache.insert(key.to_string(), value.clone());
        }

        Ok(result)
    }

    fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), SessionError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO session_state (key, value) VALUES (?, ?)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                rusqlite::params![key, &value],
            )
        })?;

        self.cache.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), SessionError> {
        self.with_conn(|conn| conn.execute("DELETE FROM session_state WHERE key = ?", [key]))?;
        self.cache.remove(key);
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SessionError> {
        let pattern = format!("{}%", prefix.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_"));
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT key FROM session_state WHERE key LIKE ? ESCAPE '\\' ORDER BY key",
            )?;
            let rows = stmt.query_map([&pattern], |row| row.get(0))?;
            rows.collect::<Result<Vec<String>, _>>()
        })
    }
}

impl std::fmt::Debug for SqliteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBackend")
            .field("cached", &self.cache.len())
            .finish()
    }
}
