//! Trigger ingredient storage
//!
//! The store is a capability handed to the scanner; the matcher never sees it.

use crate::error::ScanResult;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

/// Persistent list of trigger ingredients
pub trait IngredientStore: Send + Sync {
    /// All stored ingredients, without duplicates, oldest first
    fn list_triggers(&self) -> ScanResult<Vec<String>>;

    /// Add `name` unless already present; returns whether a row was added
    fn add_trigger(&self, name: &str) -> ScanResult<bool>;
}

/// SQLite-backed store holding one connection for its whole lifetime
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path`
    pub fn open(db_path: &Path) -> ScanResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        info!("🗄️ Opening ingredient store at {}", db_path.display());
        Self::init(Connection::open(db_path)?)
    }

    pub fn in_memory() -> ScanResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> ScanResult<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS triggers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                ingredient TEXT UNIQUE
            )",
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl IngredientStore for SqliteStore {
    fn list_triggers(&self) -> ScanResult<Vec<String>> {
        let conn = self.conn.lock()?;
        let mut stmt = conn
            .prepare("SELECT ingredient FROM triggers WHERE ingredient IS NOT NULL ORDER BY id")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut ingredients = Vec::new();
        for row in rows {
            ingredients.push(row?);
        }
        Ok(ingredients)
    }

    fn add_trigger(&self, name: &str) -> ScanResult<bool> {
        let conn = self.conn.lock()?;
        // Concurrent adds from another process hit the UNIQUE column and are ignored
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO triggers (ingredient) VALUES (?)",
            [name],
        )?;

        if inserted == 0 {
            debug!("Ingredient '{}' already stored", name);
            return Ok(false);
        }
        debug!("Stored ingredient '{}'", name);
        Ok(true)
    }
}
