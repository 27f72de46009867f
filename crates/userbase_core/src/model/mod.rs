//! Domain records for the three-tier user model.
//!
//! # Responsibility
//! - Define the rows stored in `users`, `admins` and `customers`.
//!
//! # Invariants
//! - Every record is identified by the integer id SQLite assigned on insert.
//! - Admin and customer rows point at a user through `user_id`; the link is
//!   declared in the schema, not checked here.

pub mod user;
