//! User, admin and customer records.

use serde::{Deserialize, Serialize};

/// Row id of a `users` entry.
pub type UserId = i64;

/// Row id of an `admins` entry.
pub type AdminId = i64;

/// Row id of a `customers` entry.
pub type CustomerId = i64;

/// Loyalty balance stored when a customer is added without one.
pub const DEFAULT_LOYALTY_POINTS: i64 = 0;

/// Generic user account.
///
/// `username` is not unique; lookups by name return the earliest row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

/// Administrative grant attached to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub id: AdminId,
    pub user_id: UserId,
    /// Free-form rights description, e.g. `full`.
    pub admin_rights: String,
}

/// Customer profile attached to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub user_id: UserId,
    pub loyalty_points: i64,
}
