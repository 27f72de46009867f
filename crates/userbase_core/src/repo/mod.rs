//! Table stores over a shared SQLite connection.
//!
//! # Responsibility
//! - Provide per-table data access for users, admins and customers.
//! - Report every failure as a `RepoError` value after logging it.
//!
//! # Invariants
//! - Stores borrow a connected `ConnectionManager`; they never open their own.
//! - Each store creates its tables before returning from `try_new`.
//! - Writes run in SQLite autocommit mode unless a caller wraps them in
//!   `ConnectionManager::run_transaction`.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod admin_repo;
pub mod customer_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error returned by store and connection-manager data operations.
#[derive(Debug)]
pub enum RepoError {
    /// The manager has no open connection.
    NotConnected,
    /// SQLite rejected a statement (constraint, missing table, bad SQL).
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotConnected => write!(f, "database connection is not open"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotConnected => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
