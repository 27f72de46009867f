//! User store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Own the `users` table: insert, lookup by id or name, delete by id.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Name lookups return the lowest-id match since `username` is not unique.
//! - Deleting an unknown id is a successful no-op.
//! - Log lines carry ids only, never usernames or emails.

use crate::db::schema::ensure_users_table;
use crate::db::ConnectionManager;
use crate::model::user::{User, UserId};
use crate::repo::RepoResult;
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension, Row};

const USER_SELECT_SQL: &str = "SELECT id, username, email FROM users";

/// Store interface for user accounts.
pub trait UserRepository {
    /// Inserts a user and returns it with the assigned id.
    fn add_user(&self, username: &str, email: &str) -> RepoResult<User>;
    /// Returns the user with `id`, if any.
    fn get_user_by_id(&self, id: UserId) -> RepoResult<Option<User>>;
    /// Returns the first user named `username`, if any.
    fn find_user_by_name(&self, username: &str) -> RepoResult<Option<User>>;
    /// Removes the user with `id`. Succeeds when no such row exists.
    fn delete_user(&self, id: UserId) -> RepoResult<()>;
}

/// SQLite-backed user store.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Borrows the manager's connection and ensures the `users` table.
    ///
    /// # Errors
    /// - `RepoError::NotConnected` when the manager is disconnected.
    /// - `RepoError::Db` when the table cannot be created.
    pub fn try_new(manager: &'conn ConnectionManager) -> RepoResult<Self> {
        let conn = manager.connection()?;
        ensure_users_table(conn)?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn add_user(&self, username: &str, email: &str) -> RepoResult<User> {
        self.conn
            .execute(
                "INSERT INTO users (username, email) VALUES (?1, ?2);",
                params![username, email],
            )
            .inspect_err(|err| error!("event=user_add module=repo status=error error={err}"))?;

        let user = User {
            id: self.conn.last_insert_rowid(),
            username: username.to_string(),
            email: email.to_string(),
        };
        info!("event=user_add module=repo status=ok user_id={}", user.id);
        Ok(user)
    }

    fn get_user_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let user = self
            .conn
            .query_row(
                &format!("{USER_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_user_row,
            )
            .optional()
            .inspect_err(|err| {
                error!("event=user_get module=repo status=error user_id={id} error={err}")
            })?;
        Ok(user)
    }

    fn find_user_by_name(&self, username: &str) -> RepoResult<Option<User>> {
        select_user_by_name(self.conn, username)
    }

    fn delete_user(&self, id: UserId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1;", [id])
            .inspect_err(|err| {
                error!("event=user_delete module=repo status=error user_id={id} error={err}")
            })?;

        info!("event=user_delete module=repo status=ok user_id={id} removed={changed}");
        Ok(())
    }
}

pub(crate) fn select_user_by_name(conn: &Connection, username: &str) -> RepoResult<Option<User>> {
    let user = conn
        .query_row(
            &format!("{USER_SELECT_SQL} WHERE username = ?1 ORDER BY id LIMIT 1;"),
            [username],
            parse_user_row,
        )
        .optional()
        .inspect_err(|err| error!("event=user_find module=repo status=error error={err}"))?;
    Ok(user)
}

fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        email: row.get("email")?,
    })
}
