//! Table definitions and idempotent creation helpers.
//!
//! # Responsibility
//! - Keep the DDL for every store table in one place.
//! - Create tables with `IF NOT EXISTS` so repeated store construction is safe.
//!
//! # Invariants
//! - `users` is created before any table declaring a reference to it.
//! - Creating an existing table never drops or rewrites its rows.

use crate::db::DbResult;
use log::{debug, error};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct TableDef {
    name: &'static str,
    sql: &'static str,
}

const USERS: TableDef = TableDef {
    name: "users",
    sql: include_str!("users.sql"),
};

const ADMINS: TableDef = TableDef {
    name: "admins",
    sql: include_str!("admins.sql"),
};

const CUSTOMERS: TableDef = TableDef {
    name: "customers",
    sql: include_str!("customers.sql"),
};

/// Ensures the `users` table exists.
pub fn ensure_users_table(conn: &Connection) -> DbResult<()> {
    ensure_table(conn, USERS)
}

/// Ensures `users` and then `admins` exist.
pub fn ensure_admins_table(conn: &Connection) -> DbResult<()> {
    ensure_table(conn, USERS)?;
    ensure_table(conn, ADMINS)
}

/// Ensures `users` and then `customers` exist.
pub fn ensure_customers_table(conn: &Connection) -> DbResult<()> {
    ensure_table(conn, USERS)?;
    ensure_table(conn, CUSTOMERS)
}

/// Names of every table this crate manages, in creation order.
pub fn managed_tables() -> [&'static str; 3] {
    [USERS.name, ADMINS.name, CUSTOMERS.name]
}

/// Returns whether a table named `name` exists on this connection.
pub fn table_exists(conn: &Connection, name: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn ensure_table(conn: &Connection, table: TableDef) -> DbResult<()> {
    match conn.execute_batch(table.sql) {
        Ok(()) => {
            debug!(
                "event=ensure_table module=db status=ok table={}",
                table.name
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=ensure_table module=db status=error table={} error={}",
                table.name, err
            );
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ensure_admins_table, ensure_customers_table, ensure_users_table, managed_tables};
    use rusqlite::Connection;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name;")
            .unwrap();
        let names = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap();
        names
    }

    #[test]
    fn admin_and_customer_tables_bring_users_along() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_admins_table(&conn).unwrap();
        ensure_customers_table(&conn).unwrap();

        let names = table_names(&conn);
        for table in managed_tables() {
            assert!(names.iter().any(|name| name == table), "missing {table}");
        }
    }

    #[test]
    fn ensuring_twice_keeps_existing_rows() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_users_table(&conn).unwrap();
        conn.execute(
            "INSERT INTO users (username, email) VALUES ('a', 'a@example.com');",
            [],
        )
        .unwrap();

        ensure_users_table(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
