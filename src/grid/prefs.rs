//! Durable storage for per-view column preferences
//!
//! The column layout talks to a small repository interface instead of a
//! concrete backend, so the grid stays testable with an in-memory fake while
//! the CLI persists preferences in a SQLite file under `.tiller/`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;

use rusqlite::{params, Connection};
use thiserror::Error;

use crate::core::project::Project;

/// Failure while reading or writing the preference backend
///
/// Loads never produce this - unreadable state degrades to "no stored
/// preference". Only writes surface errors, and callers treat them as
/// warnings: the in-memory layout stays authoritative.
#[derive(Debug, Error)]
#[error("view preference store: {message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Key-value repository for string-array preferences
pub trait PrefsStore {
    /// Load the array stored under `key`, if any; corrupt values read as absent
    fn load(&self, key: &str) -> Option<Vec<String>>;

    /// Store the array under `key`, replacing any previous value
    fn save(&mut self, key: &str, values: &[String]) -> Result<(), StoreError>;
}

/// In-memory store for tests and ephemeral views
///
/// Clones share the same backing map, so a "restarted" layout built over a
/// clone sees what the previous one saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    map: Rc<RefCell<BTreeMap<String, Vec<String>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefsStore for MemoryStore {
    fn load(&self, key: &str) -> Option<Vec<String>> {
        self.map.borrow().get(key).cloned()
    }

    fn save(&mut self, key: &str, values: &[String]) -> Result<(), StoreError> {
        self.map
            .borrow_mut()
            .insert(key.to_string(), values.to_vec());
        Ok(())
    }
}

/// SQLite-backed store, one row per preference key
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the project's view preference database
    pub fn open(project: &Project) -> Result<Self, StoreError> {
        Self::open_at(&project.state_dir().join("views.db"))
    }

    /// Open (or create) a store at an explicit path
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn =
            Connection::open(path).map_err(|e| StoreError::new(format!("open failed: {e}")))?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Open a throwaway in-memory store
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::new(format!("open failed: {e}")))?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn init_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS view_prefs (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| StoreError::new(format!("schema init failed: {e}")))?;
        Ok(())
    }
}

impl PrefsStore for SqliteStore {
    fn load(&self, key: &str) -> Option<Vec<String>> {
        let json: String = self
            .conn
            .query_row(
                "SELECT value FROM view_prefs WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .ok()?;
        serde_json::from_str(&json).ok()
    }

    fn save(&mut self, key: &str, values: &[String]) -> Result<(), StoreError> {
        let json = serde_json::to_string(values)
            .map_err(|e| StoreError::new(format!("encode failed: {e}")))?;
        self.conn
            .execute(
                "INSERT INTO view_prefs (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, json],
            )
            .map_err(|e| StoreError::new(format!("write failed: {e}")))?;
        Ok(())
    }
}
