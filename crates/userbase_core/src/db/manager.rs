//! Owner of the single SQLite handle shared by every store.
//!
//! # Responsibility
//! - Track the connected/disconnected lifecycle of one connection.
//! - Run ordered batches of store actions as one all-or-nothing transaction.
//!
//! # Invariants
//! - Data access while disconnected yields `RepoError::NotConnected`.
//! - A failed `open` or any `close` leaves the manager disconnected.
//! - A failed transaction step rolls back every earlier step.

use super::{open_db, open_db_in_memory, ConnectionOptions, DbResult};
use crate::db::schema::table_exists;
use crate::model::user::User;
use crate::repo::user_repo::select_user_by_name;
use crate::repo::{RepoError, RepoResult};
use log::{debug, error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Single-connection owner with an explicit connected/disconnected state.
#[derive(Debug, Default)]
pub struct ConnectionManager {
    conn: Option<Connection>,
    path: Option<PathBuf>,
    options: ConnectionOptions,
}

impl ConnectionManager {
    /// Creates a disconnected manager with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a disconnected manager that applies `options` on every open.
    pub fn with_options(options: ConnectionOptions) -> Self {
        Self {
            conn: None,
            path: None,
            options,
        }
    }

    /// Creates a manager already connected to the file at `path`.
    pub fn connect(path: impl AsRef<Path>, options: ConnectionOptions) -> DbResult<Self> {
        let mut manager = Self::with_options(options);
        manager.open(path)?;
        Ok(manager)
    }

    /// Connects to the SQLite file at `path`, replacing any open handle.
    ///
    /// # Errors
    /// Returns the open/configure error; the manager stays disconnected.
    pub fn open(&mut self, path: impl AsRef<Path>) -> DbResult<()> {
        let path = path.as_ref();
        self.release_current();
        let conn = open_db(path, self.options)?;
        self.conn = Some(conn);
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Connects to a private in-memory database, replacing any open handle.
    pub fn open_in_memory(&mut self) -> DbResult<()> {
        self.release_current();
        let conn = open_db_in_memory(self.options)?;
        self.conn = Some(conn);
        Ok(())
    }

    /// Releases the connection. A no-op when already disconnected.
    ///
    /// The manager is disconnected afterwards even when SQLite reports an
    /// error while closing; the handle is dropped in that case.
    pub fn close(&mut self) -> DbResult<()> {
        self.path = None;
        let Some(conn) = self.conn.take() else {
            debug!("event=db_close module=db status=noop");
            return Ok(());
        };

        match conn.close() {
            Ok(()) => {
                info!("event=db_close module=db status=ok");
                Ok(())
            }
            Err((conn, err)) => {
                drop(conn);
                error!("event=db_close module=db status=error error={err}");
                Err(err.into())
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// File path of the open database; `None` when disconnected or in memory.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn options(&self) -> ConnectionOptions {
        self.options
    }

    /// Returns the live handle or `RepoError::NotConnected`.
    pub fn connection(&self) -> RepoResult<&Connection> {
        self.conn.as_ref().ok_or_else(|| {
            error!("event=db_access module=db status=error error_code=not_connected");
            RepoError::NotConnected
        })
    }

    /// Returns the first user named `username`.
    ///
    /// A database without a `users` table holds no users, so this returns
    /// `Ok(None)` there instead of a statement error.
    pub fn find_user_by_name(&self, username: &str) -> RepoResult<Option<User>> {
        let conn = self.connection()?;
        if !table_exists(conn, "users")? {
            return Ok(None);
        }
        select_user_by_name(conn, username)
    }

    /// Runs `operations` in order inside one transaction.
    ///
    /// Actions usually capture stores borrowing this manager, so their
    /// statements execute on the transaction's connection. The transaction
    /// commits after the last action; the first failing action stops the
    /// batch, rolls everything back and its error is returned.
    pub fn run_transaction<I, F>(&self, operations: I) -> RepoResult<()>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce() -> RepoResult<()>,
    {
        let conn = self.connection()?;
        let started_at = Instant::now();
        let tx = conn.unchecked_transaction().inspect_err(|err| {
            error!("event=transaction module=db status=error error_code=begin_failed error={err}")
        })?;

        let mut steps = 0usize;
        for operation in operations {
            if let Err(err) = operation() {
                error!(
                    "event=transaction module=db status=error error_code=step_failed step={} error={}",
                    steps, err
                );
                match tx.rollback() {
                    Ok(()) => info!(
                        "event=transaction module=db status=rolled_back steps={} duration_ms={}",
                        steps,
                        started_at.elapsed().as_millis()
                    ),
                    Err(rollback_err) => error!(
                        "event=transaction module=db status=error error_code=rollback_failed error={rollback_err}"
                    ),
                }
                return Err(err);
            }
            steps += 1;
        }

        tx.commit().inspect_err(|err| {
            error!("event=transaction module=db status=error error_code=commit_failed error={err}")
        })?;
        info!(
            "event=transaction module=db status=ok steps={} duration_ms={}",
            steps,
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn release_current(&mut self) {
        // close() logs its own failure; the old handle is gone either way.
        let _ = self.close();
    }
}
