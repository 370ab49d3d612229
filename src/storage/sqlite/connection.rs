use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::errors::{HeadlinesError, HeadlinesResult};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS client_state (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

/// A string-keyed store scoped to this client, one row per entry.
#[derive(Clone)]
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> HeadlinesResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> HeadlinesResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>, HeadlinesError> {
        self.conn
            .lock()
            .map_err(|_| HeadlinesError::Database(rusqlite::Error::InvalidQuery))
    }

    pub fn get(&self, key: &str) -> HeadlinesResult<Option<String>> {
        let conn = self.connection()?;
        let value = conn
            .query_row("SELECT value FROM client_state WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn set(&self, key: &str, value: &str) -> HeadlinesResult<()> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO client_state (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
            (key, value),
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> HeadlinesResult<()> {
        let conn = self.connection()?;
        conn.execute("DELETE FROM client_state WHERE key = ?1", [key])?;
        Ok(())
    }
}
