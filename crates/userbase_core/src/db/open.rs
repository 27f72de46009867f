//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Apply `ConnectionOptions` pragmas before returning a usable handle.
//!
//! # Invariants
//! - Returned connections have `foreign_keys` set exactly as requested.
//! - Table creation is left to the stores; no schema is touched here.

use super::{ConnectionOptions, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::Instant;

/// Opens a SQLite database file and applies connection options.
///
/// # Side effects
/// - Creates the file when it does not exist.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>, options: ConnectionOptions) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=db_open module=db status=start mode=file path={}",
        path.display()
    );

    let conn = Connection::open(path);
    finish_open(conn, options, "file", started_at)
}

/// Opens a private in-memory SQLite database and applies connection options.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_in_memory(options: ConnectionOptions) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let conn = Connection::open_in_memory();
    finish_open(conn, options, "memory", started_at)
}

fn finish_open(
    conn: rusqlite::Result<Connection>,
    options: ConnectionOptions,
    mode: &str,
    started_at: Instant,
) -> DbResult<Connection> {
    let conn = match conn {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match configure_connection(&conn, options) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={} foreign_keys={}",
                mode,
                started_at.elapsed().as_millis(),
                options.enforce_foreign_keys
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_configure_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn configure_connection(conn: &Connection, options: ConnectionOptions) -> DbResult<()> {
    let foreign_keys = if options.enforce_foreign_keys {
        "ON"
    } else {
        "OFF"
    };
    conn.execute_batch(&format!("PRAGMA foreign_keys = {foreign_keys};"))?;
    conn.busy_timeout(options.busy_timeout)?;
    Ok(())
}
