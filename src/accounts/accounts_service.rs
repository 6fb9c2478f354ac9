use log::debug;
use std::sync::Arc;

use super::accounts_model::{Account, NewAccount, SystemToken};
use super::accounts_repository::AccountRepository;
use super::accounts_traits::AccountServiceTrait;
use crate::accounts::Result;

/// Service for managing brokerage accounts and system tokens
pub struct AccountService {
    repository: Arc<AccountRepository>,
}

impl AccountService {
    pub fn new(repository: Arc<AccountRepository>) -> Self {
        Self { repository }
    }
}

impl AccountServiceTrait for AccountService {
    fn create_account(&self, new_account: NewAccount, owner_id: &str) -> Result<Account> {
        self.repository.create(new_account, owner_id)
    }

    fn get_account(&self, account_id: &str, owner_id: &str) -> Result<Account> {
        self.repository.get_by_id(account_id, owner_id)
    }

    fn list_accounts(&self, owner_id: &str) -> Result<Vec<Account>> {
        self.repository.list(owner_id)
    }

    fn delete_account(&self, account_id: &str, owner_id: &str) -> Result<()> {
        self.repository.delete(account_id, owner_id)?;
        Ok(())
    }

    fn replace_system_token(&self, owner_id: &str, token: &str) -> Result<SystemToken> {
        debug!("Replacing system token for user {}", owner_id);
        self.repository.replace_system_token(owner_id, token)
    }

    fn get_system_token(&self, owner_id: &str) -> Result<Option<String>> {
        self.repository.get_system_token(owner_id)
    }
}
