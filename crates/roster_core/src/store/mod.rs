//! Persistence adapter over a durable key-value store.
//!
//! # Responsibility
//! - Name the four persisted records and their storage keys.
//! - Define the `RecordStore` contract and its SQLite/in-memory backends.
//! - Convert between `RosterState` and stored JSON (see `persistence`).
//!
//! # Invariants
//! - A write replaces the whole stored value for one key.
//! - Loading never fails; unreadable records fall back to defaults.

mod memory;
mod persistence;
mod sqlite;

pub use memory::MemoryRecordStore;
pub use persistence::{load_state, persist_changes, save_record, LoadedState};
pub use sqlite::SqliteRecordStore;

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// One independently persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKey {
    Seasons,
    Attendance,
    Users,
    ActiveSeasonId,
}

impl RecordKey {
    pub const ALL: [RecordKey; 4] = [
        RecordKey::Seasons,
        RecordKey::Attendance,
        RecordKey::Users,
        RecordKey::ActiveSeasonId,
    ];

    /// Storage key name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seasons => "seasons",
            Self::Attendance => "attendance",
            Self::Users => "users",
            Self::ActiveSeasonId => "activeSeasonId",
        }
    }
}

impl Display for RecordKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of records touched by one state change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub seasons: bool,
    pub attendance: bool,
    pub users: bool,
    pub active_season_id: bool,
}

impl ChangeSet {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn only(key: RecordKey) -> Self {
        let mut changes = Self::default();
        changes.mark(key);
        changes
    }

    pub fn mark(&mut self, key: RecordKey) {
        match key {
            RecordKey::Seasons => self.seasons = true,
            RecordKey::Attendance => self.attendance = true,
            RecordKey::Users => self.users = true,
            RecordKey::ActiveSeasonId => self.active_season_id = true,
        }
    }

    pub fn contains(&self, key: RecordKey) -> bool {
        match key {
            RecordKey::Seasons => self.seasons,
            RecordKey::Attendance => self.attendance,
            RecordKey::Users => self.users,
            RecordKey::ActiveSeasonId => self.active_season_id,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.seasons || self.attendance || self.users || self.active_season_id)
    }

    /// Flagged keys in `RecordKey::ALL` order.
    pub fn keys(&self) -> impl Iterator<Item = RecordKey> {
        let changes = *self;
        RecordKey::ALL
            .into_iter()
            .filter(move |key| changes.contains(*key))
    }
}

// Renders as `seasons,activeSeasonId` or `none` for log lines.
impl Display for ChangeSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<&str> = self.keys().map(RecordKey::as_str).collect();
        f.write_str(&names.join(","))
    }
}

/// Durable key-value backend holding serialized records.
pub trait RecordStore {
    /// Reads the raw stored value, or `None` when the key was never written.
    fn read_record(&self, key: RecordKey) -> StoreResult<Option<String>>;
    /// Overwrites the stored value unconditionally.
    fn write_record(&self, key: RecordKey, value: &str) -> StoreResult<()>;
}

impl<T: RecordStore + ?Sized> RecordStore for &T {
    fn read_record(&self, key: RecordKey) -> StoreResult<Option<String>> {
        (**self).read_record(key)
    }

    fn write_record(&self, key: RecordKey, value: &str) -> StoreResult<()> {
        (**self).write_record(key, value)
    }
}

#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialize {
        key: RecordKey,
        source: serde_json::Error,
    },
    /// Backend refused the operation (used by non-SQLite backends).
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize { key, source } => {
                write!(f, "failed to serialize record `{key}`: {source}")
            }
            Self::Unavailable(message) => write!(f, "record store unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize { source, .. } => Some(source),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
