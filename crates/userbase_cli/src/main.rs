//! CLI driver for userbase core.
//!
//! # Responsibility
//! - Walk one store session end to end against a database file.
//! - Keep going after individual step failures; only a failed open is fatal.
//!
//! Usage: `userbase_cli [db_path]` (default `example.db`).

use log::warn;
use std::process::ExitCode;
use userbase_core::{
    default_log_level, init_logging, AdminRepository, ConnectionManager, CustomerRepository,
    RepoError, RepoResult, SqliteAdminRepository, SqliteCustomerRepository, SqliteUserRepository,
    UserRepository,
};

const DEFAULT_DB_PATH: &str = "example.db";

fn main() -> ExitCode {
    if let Err(err) = init_logging(default_log_level(), None) {
        eprintln!("logging disabled: {err}");
    }

    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

    let mut manager = ConnectionManager::new();
    if let Err(err) = manager.open(&db_path) {
        eprintln!("cannot open database `{db_path}`: {err}");
        return ExitCode::FAILURE;
    }

    report("session", run_session(&manager));

    report("close", manager.close().map_err(RepoError::from));
    ExitCode::SUCCESS
}

fn run_session(manager: &ConnectionManager) -> RepoResult<()> {
    let users = SqliteUserRepository::try_new(manager)?;
    let admins = SqliteAdminRepository::try_new(manager)?;
    let customers = SqliteCustomerRepository::try_new(manager)?;

    report("add_user", users.add_user("sultan", "sultan@gmail.com"));
    report("add_user", users.add_user("baibol", "baibol@gmail.com"));

    if let Some(sultan) = report("get_user_by_id", users.get_user_by_id(1)).flatten() {
        report("add_admin", admins.add_admin(sultan.id, "full"));
    }
    if let Some(baibol) = report("get_user_by_id", users.get_user_by_id(2)).flatten() {
        report("add_customer", customers.add_customer(baibol.id, Some(100)));
    }

    match report("find_user_by_name", manager.find_user_by_name("sultan")).flatten() {
        Some(user) => match serde_json::to_string(&user) {
            Ok(json) => println!("found user: {json}"),
            Err(err) => warn!("event=cli_print module=cli status=error error={err}"),
        },
        None => println!("found user: none"),
    }

    report(
        "run_transaction",
        manager.run_transaction([|| -> RepoResult<()> {
            users.add_user("beknazar", "beknazar@gmail.com")?;
            users.add_user("beka", "beka@gmail.com")?;
            Ok(())
        }]),
    );

    Ok(())
}

fn report<T>(step: &str, result: RepoResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            eprintln!("{step} failed: {err}");
            None
        }
    }
}
