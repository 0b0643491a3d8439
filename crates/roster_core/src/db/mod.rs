//! SQLite bootstrap for the durable record store.
//!
//! # Responsibility
//! - Open file or in-memory connections with required pragmas.
//! - Bring the schema to the latest version before any record access.
//!
//! # Invariants
//! - No record is read or written before migrations succeed.
//! - A store written by a newer build is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failures while bringing the record store online.
#[derive(Debug)]
pub enum DbError {
    /// Parent directory of the store file could not be created.
    CreateDataDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file carries a schema this build does not know.
    SchemaTooNew { found: u32, supported: u32 },
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateDataDir { path, source } => {
                write!(f, "cannot create data directory `{}`: {source}", path.display())
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "roster store uses schema v{found} but this build reads up to v{supported}; upgrade roster"
            ),
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDataDir { source, .. } => Some(source),
            Self::SchemaTooNew { .. } => None,
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
