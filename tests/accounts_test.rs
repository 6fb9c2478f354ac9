mod common;

use std::sync::Arc;

use spendfolio_core::accounts::{
    AccountError, AccountRepository, AccountService, AccountServiceTrait, NewAccount,
};

fn service(pool: Arc<spendfolio_core::db::DbPool>) -> AccountService {
    AccountService::new(Arc::new(AccountRepository::new(pool)))
}

#[test]
fn system_token_is_replaced_on_write() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(common::setup_pool(dir.path()));

    assert_eq!(service.get_system_token("user-1").unwrap(), None);

    service.replace_system_token("user-1", "t.first").unwrap();
    service.replace_system_token("user-1", "t.second").unwrap();

    // Only the latest token survives; the invariant holds at write time.
    assert_eq!(
        service.get_system_token("user-1").unwrap(),
        Some("t.second".to_string())
    );

    // Tokens are scoped per user.
    service.replace_system_token("user-2", "t.other").unwrap();
    assert_eq!(
        service.get_system_token("user-1").unwrap(),
        Some("t.second".to_string())
    );
}

#[test]
fn accounts_are_scoped_to_their_owner() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(common::setup_pool(dir.path()));

    let created = service
        .create_account(
            NewAccount {
                name: "Main".to_string(),
                account_number: "2000000001".to_string(),
                token: "t.token".to_string(),
            },
            "user-1",
        )
        .unwrap();

    assert!(service.get_account(&created.id, "user-2").is_err());
    assert_eq!(service.list_accounts("user-1").unwrap().len(), 1);
    assert!(service.list_accounts("user-2").unwrap().is_empty());

    service.delete_account(&created.id, "user-1").unwrap();
    assert!(service.list_accounts("user-1").unwrap().is_empty());
}

#[test]
fn blank_system_token_is_rejected_as_invalid_token() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(common::setup_pool(dir.path()));

    let result = service.replace_system_token("user-1", "   ");
    assert!(matches!(result, Err(AccountError::InvalidToken(_))));
    assert_eq!(service.get_system_token("user-1").unwrap(), None);
}

#[test]
fn blank_account_token_is_rejected_as_invalid_token() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(common::setup_pool(dir.path()));

    let result = service.create_account(
        NewAccount {
            name: "Main".to_string(),
            account_number: "2000000001".to_string(),
            token: "".to_string(),
        },
        "user-1",
    );
    assert!(matches!(result, Err(AccountError::InvalidToken(_))));
}

#[test]
fn blank_account_fields_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(common::setup_pool(dir.path()));

    let result = service.create_account(
        NewAccount {
            name: "Main".to_string(),
            account_number: "  ".to_string(),
            token: "t.token".to_string(),
        },
        "user-1",
    );
    assert!(result.is_err());
}
