//! Core persistence for userbase: users, admins and customers on SQLite.
//! This crate owns the schema and every statement run against it.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{ConnectionManager, ConnectionOptions, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::user::{
    Admin, AdminId, Customer, CustomerId, User, UserId, DEFAULT_LOYALTY_POINTS,
};
pub use repo::admin_repo::{AdminRepository, SqliteAdminRepository};
pub use repo::customer_repo::{CustomerRepository, SqliteCustomerRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
