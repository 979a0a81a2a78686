//! Keyed blob persistence port.
//!
//! All durable state (the template list, per-cohort workflow snapshots, the
//! audit log) lives behind this trait as JSON strings under well-known keys.
//! Core logic never touches a database directly; it receives a `BlobStore`,
//! which lets tests run against the in-memory implementation.

use std::collections::HashMap;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};

/// Write-through keyed blob storage. Every `save` is immediately durable.
pub trait BlobStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, String>;
    fn save(&self, key: &str, value: &str) -> Result<(), String>;
}

/// SQLite-backed store: one `slots` table mapping key to JSON value.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &str) -> Result<Self, String> {
        let conn = Connection::open(path).map_err(|e| e.to_string())?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS slots (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )
        .map_err(|e| e.to_string())?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl BlobStore for SqliteStore {
    fn load(&self, key: &str) -> Result<Option<String>, String> {
        let conn = self.conn.lock().map_err(|e| e.to_string())?;
        conn.query_row(
            "SELECT value FROM slots WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| e.to_string())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), String> {
        let conn = self.conn.lock().map_err(|e| e.to_string())?;
        conn.execute(
            "INSERT OR REPLACE INTO slots (key, value) VALUES (?1, ?2)",
            params![key, value],
        )
        .map_err(|e| e.to_string())?;
        Ok(())
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl BlobStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, String> {
        let slots = self.slots.lock().map_err(|e| e.to_string())?;
        Ok(slots.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), String> {
        let mut slots = self.slots.lock().map_err(|e| e.to_string())?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
