use userbase_core::{
    AdminRepository, ConnectionManager, RepoError, RepoResult, SqliteAdminRepository,
    SqliteUserRepository, UserRepository,
};

fn connected() -> ConnectionManager {
    let mut manager = ConnectionManager::new();
    manager.open_in_memory().unwrap();
    manager
}

fn count_rows(manager: &ConnectionManager, table: &str) -> i64 {
    manager
        .connection()
        .unwrap()
        .query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
            row.get(0)
        })
        .unwrap()
}

#[test]
fn successful_batch_commits_every_action() {
    let manager = connected();
    let users = SqliteUserRepository::try_new(&manager).unwrap();

    manager
        .run_transaction([|| -> RepoResult<()> {
            users.add_user("beknazar", "beknazar@gmail.com")?;
            users.add_user("beka", "beka@gmail.com")?;
            Ok(())
        }])
        .unwrap();

    assert!(manager.find_user_by_name("beknazar").unwrap().is_some());
    assert!(manager.find_user_by_name("beka").unwrap().is_some());
}

#[test]
fn mixed_actions_run_in_order() {
    let manager = connected();
    let users = SqliteUserRepository::try_new(&manager).unwrap();
    let admins = SqliteAdminRepository::try_new(&manager).unwrap();

    let actions: Vec<Box<dyn FnOnce() -> RepoResult<()> + '_>> = vec![
        Box::new(|| users.add_user("sultan", "sultan@gmail.com").map(|_| ())),
        Box::new(|| -> RepoResult<()> {
            let sultan = users
                .find_user_by_name("sultan")?
                .expect("inserted by the previous action");
            admins.add_admin(sultan.id, "full").map(|_| ())
        }),
    ];
    manager.run_transaction(actions).unwrap();

    assert_eq!(count_rows(&manager, "users"), 1);
    assert_eq!(count_rows(&manager, "admins"), 1);
}

#[test]
fn failing_action_rolls_back_earlier_actions() {
    let manager = connected();
    let users = SqliteUserRepository::try_new(&manager).unwrap();
    users.add_user("sultan", "sultan@gmail.com").unwrap();

    let actions: Vec<Box<dyn FnOnce() -> RepoResult<()> + '_>> = vec![
        Box::new(|| users.add_user("beknazar", "beknazar@gmail.com").map(|_| ())),
        Box::new(|| -> RepoResult<()> {
            manager
                .connection()?
                .execute_batch("INSERT INTO no_such_table VALUES (1);")?;
            Ok(())
        }),
        Box::new(|| users.add_user("beka", "beka@gmail.com").map(|_| ())),
    ];
    let err = manager.run_transaction(actions).unwrap_err();

    assert!(matches!(err, RepoError::Db(_)));
    assert_eq!(count_rows(&manager, "users"), 1);
    assert!(manager.find_user_by_name("beknazar").unwrap().is_none());
    assert!(manager.find_user_by_name("beka").unwrap().is_none());
}

#[test]
fn failing_action_error_is_returned_unchanged() {
    let manager = connected();
    let users = SqliteUserRepository::try_new(&manager).unwrap();

    let actions: Vec<Box<dyn FnOnce() -> RepoResult<()> + '_>> = vec![
        Box::new(|| users.add_user("beka", "beka@gmail.com").map(|_| ())),
        Box::new(|| -> RepoResult<()> { Err(RepoError::NotConnected) }),
    ];
    let err = manager.run_transaction(actions).unwrap_err();

    assert!(matches!(err, RepoError::NotConnected));
    assert_eq!(count_rows(&manager, "users"), 0);
}

#[test]
fn connection_is_usable_after_rollback() {
    let manager = connected();
    let users = SqliteUserRepository::try_new(&manager).unwrap();

    let _ = manager.run_transaction([|| -> RepoResult<()> { Err(RepoError::NotConnected) }]);

    users.add_user("sultan", "sultan@gmail.com").unwrap();
    assert_eq!(count_rows(&manager, "users"), 1);
}

#[test]
fn empty_batch_commits_nothing() {
    let manager = connected();
    SqliteUserRepository::try_new(&manager).unwrap();

    let none: Vec<fn() -> RepoResult<()>> = Vec::new();
    manager.run_transaction(none).unwrap();

    assert_eq!(count_rows(&manager, "users"), 0);
}

#[test]
fn disconnected_manager_rejects_transactions() {
    let manager = ConnectionManager::new();
    let mut ran = false;

    let err = manager
        .run_transaction([|| -> RepoResult<()> {
            ran = true;
            Ok(())
        }])
        .unwrap_err();

    assert!(matches!(err, RepoError::NotConnected));
    assert!(!ran);
}
