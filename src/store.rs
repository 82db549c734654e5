use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use crate::error::Result;
use crate::models::Record;

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT DEFAULT (datetime('now'))
);
";

/// The single key the whole ledger lives under.
pub const LEDGER_KEY: &str = "expenses";

pub const DB_FILE: &str = "basketbook.db";

/// Where the ledger is persisted. Each call is one request/response round
/// trip; `save` replaces the whole collection in one write.
pub trait LedgerStore {
    fn load(&self) -> Result<Vec<Record>>;
    fn save(&self, records: &[Record]) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating if needed) the ledger database under `data_dir`.
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        let conn = get_connection(&data_dir.join(DB_FILE))?;
        init_db(&conn)?;
        Ok(Self { conn })
    }

    /// Open a ledger database file as it is, e.g. a backup copy.
    pub fn at(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        init_db(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl LedgerStore for SqliteStore {
    fn load(&self) -> Result<Vec<Record>> {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [LEDGER_KEY], |row| row.get(0))
            .optional()?;
        match raw {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, records: &[Record]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
            rusqlite::params![LEDGER_KEY, json],
        )?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM kv", [])?;
        Ok(())
    }
}

#[cfg(test)]
pub use memory::MemoryStore;

#[cfg(test)]
mod memory {
    use std::cell::RefCell;

    use super::LedgerStore;
    use crate::error::Result;
    use crate::models::Record;

    /// In-process store for tests. Counts writes so callers can check that
    /// nothing was persisted.
    #[derive(Default)]
    pub struct MemoryStore {
        records: RefCell<Vec<Record>>,
        pub writes: RefCell<usize>,
    }

    impl LedgerStore for MemoryStore {
        fn load(&self) -> Result<Vec<Record>> {
            Ok(self.records.borrow().clone())
        }

        fn save(&self, records: &[Record]) -> Result<()> {
            *self.records.borrow_mut() = records.to_vec();
            *self.writes.borrow_mut() += 1;
            Ok(())
        }

        fn clear(&self) -> Result<()> {
            self.records.borrow_mut().clear();
            *self.writes.borrow_mut() += 1;
            Ok(())
        }
    }
}
