//! Customer store: add-only access to the `customers` table.
//!
//! # Invariants
//! - `users` is ensured before `customers`.
//! - An unspecified loyalty balance is left to the column default (0).

use crate::db::schema::ensure_customers_table;
use crate::db::ConnectionManager;
use crate::model::user::{Customer, UserId, DEFAULT_LOYALTY_POINTS};
use crate::repo::RepoResult;
use log::{error, info};
use rusqlite::{params, Connection};

/// Store interface for customer profiles.
pub trait CustomerRepository {
    /// Adds a customer profile for the user and returns the stored row.
    ///
    /// `None` stores the default balance of `DEFAULT_LOYALTY_POINTS`.
    fn add_customer(&self, user_id: UserId, loyalty_points: Option<i64>) -> RepoResult<Customer>;
}

/// SQLite-backed customer store.
pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    /// Borrows the manager's connection and ensures `users` and `customers`.
    pub fn try_new(manager: &'conn ConnectionManager) -> RepoResult<Self> {
        let conn = manager.connection()?;
        ensure_customers_table(conn)?;
        Ok(Self { conn })
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn add_customer(&self, user_id: UserId, loyalty_points: Option<i64>) -> RepoResult<Customer> {
        let inserted = match loyalty_points {
            Some(points) => self.conn.execute(
                "INSERT INTO customers (user_id, loyalty_points) VALUES (?1, ?2);",
                params![user_id, points],
            ),
            None => self.conn.execute(
                "INSERT INTO customers (user_id) VALUES (?1);",
                params![user_id],
            ),
        };
        inserted.inspect_err(|err| {
            error!("event=customer_add module=repo status=error user_id={user_id} error={err}")
        })?;

        let customer = Customer {
            id: self.conn.last_insert_rowid(),
            user_id,
            loyalty_points: loyalty_points.unwrap_or(DEFAULT_LOYALTY_POINTS),
        };
        info!(
            "event=customer_add module=repo status=ok customer_id={} user_id={}",
            customer.id, user_id
        );
        Ok(customer)
    }
}
