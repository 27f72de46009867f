//! SQLite connection lifecycle and schema bootstrap entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for userbase core.
//! - Own the single connection shared by every table store.
//! - Create store tables idempotently on demand.
//!
//! # Invariants
//! - Stores never touch a table before its `ensure_*` call succeeded.
//! - A `ConnectionManager` holds at most one live handle.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

mod manager;
mod open;
pub mod schema;

pub use manager::ConnectionManager;
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Connection-level settings applied right after a handle is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionOptions {
    /// Turns on `PRAGMA foreign_keys`, so dangling `user_id` references are
    /// rejected by SQLite. Off by default: the schema declares the relation
    /// without enforcing it.
    pub enforce_foreign_keys: bool,
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout: Duration,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            enforce_foreign_keys: false,
            busy_timeout: Duration::from_secs(5),
        }
    }
}
