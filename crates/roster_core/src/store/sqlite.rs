//! SQLite-backed record store.

use super::{RecordKey, RecordStore, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Record store over a migrated connection (see `db::open_db`).
pub struct SqliteRecordStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RecordStore for SqliteRecordStore<'_> {
    fn read_record(&self, key: RecordKey) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM records WHERE key = ?1;",
                [key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_record(&self, key: RecordKey, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO records (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key.as_str(), value],
        )?;
        Ok(())
    }
}
