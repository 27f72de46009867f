//! Admin store: add-only access to the `admins` table.
//!
//! # Invariants
//! - `users` is ensured before `admins` so the declared reference resolves.
//! - `user_id` is stored as given; whether it must exist is decided by the
//!   connection's foreign-key setting.

use crate::db::schema::ensure_admins_table;
use crate::db::ConnectionManager;
use crate::model::user::{Admin, UserId};
use crate::repo::RepoResult;
use log::{error, info};
use rusqlite::{params, Connection};

/// Store interface for admin grants.
pub trait AdminRepository {
    /// Grants `rights` to the user and returns the stored row.
    fn add_admin(&self, user_id: UserId, rights: &str) -> RepoResult<Admin>;
}

/// SQLite-backed admin store.
pub struct SqliteAdminRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAdminRepository<'conn> {
    /// Borrows the manager's connection and ensures `users` and `admins`.
    pub fn try_new(manager: &'conn ConnectionManager) -> RepoResult<Self> {
        let conn = manager.connection()?;
        ensure_admins_table(conn)?;
        Ok(Self { conn })
    }
}

impl AdminRepository for SqliteAdminRepository<'_> {
    fn add_admin(&self, user_id: UserId, rights: &str) -> RepoResult<Admin> {
        self.conn
            .execute(
                "INSERT INTO admins (user_id, admin_rights) VALUES (?1, ?2);",
                params![user_id, rights],
            )
            .inspect_err(|err| {
                error!("event=admin_add module=repo status=error user_id={user_id} error={err}")
            })?;

        let admin = Admin {
            id: self.conn.last_insert_rowid(),
            user_id,
            admin_rights: rights.to_string(),
        };
        info!(
            "event=admin_add module=repo status=ok admin_id={} user_id={}",
            admin.id, user_id
        );
        Ok(admin)
    }
}
