use super::Store;
use crate::error::StoreError;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

const DB_SCHEMA_VERSION: i64 = 1;

/// Sqlite-backed store. One row per collection key, full JSON array as
/// the value; each save replaces the row in a single statement.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the tracker database under
    /// `<workspace>/.sprintlens/state.db`.
    pub fn open(workspace_path: &str) -> Result<Self, StoreError> {
        let dir = Path::new(workspace_path).join(".sprintlens");
        std::fs::create_dir_all(&dir)?;
        let conn = Connection::open(dir.join("state.db"))?;
        initialize_schema(&conn)?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }
}

pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;

    let mut version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version < 1 {
        apply_migration_1(conn)?;
        version = 1;
        conn.pragma_update(None, "user_version", version)?;
    }

    if version > DB_SCHEMA_VERSION {
        // Future schema; do not fail reads/writes for forward-compatible changes.
        conn.pragma_update(None, "user_version", version)?;
    }

    Ok(())
}

fn apply_migration_1(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS collections (
            key TEXT PRIMARY KEY,
            data TEXT NOT NULL DEFAULT '[]',
            updated_at INTEGER NOT NULL DEFAULT 0
        );
        ",
    )
}

impl Store for SqliteStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        let data = conn
            .query_row(
                "SELECT data FROM collections WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(data)
    }

    fn save_raw(&self, key: &str, json: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        let now = chrono::Utc::now().timestamp();
        conn.execute(
            "
            INSERT INTO collections (key, data, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                data = excluded.data,
                updated_at = excluded.updated_at
            ",
            params![key, json, now],
        )?;
        Ok(())
    }
}
