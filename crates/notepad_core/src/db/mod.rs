//! SQLite file backing [`crate::storage::SqliteKeyValueStore`].
//!
//! Connections come out of [`open_db`] / [`open_db_in_memory`] with the
//! `kv_entries` table in place. The schema version lives in
//! `PRAGMA user_version`; a file stamped by a newer build is refused so its
//! notes are not rewritten by a binary that cannot read them.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure to open or upgrade the notes database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// File schema is ahead of [`migrations::latest_version`].
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "notes database: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "notes database was written by a newer build (schema v{found}, this build reads up to v{supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
