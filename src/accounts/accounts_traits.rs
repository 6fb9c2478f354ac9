use super::accounts_model::{Account, NewAccount, SystemToken};
use crate::accounts::Result;

/// Trait defining the contract for Account service operations.
pub trait AccountServiceTrait: Send + Sync {
    fn create_account(&self, new_account: NewAccount, owner_id: &str) -> Result<Account>;
    fn get_account(&self, account_id: &str, owner_id: &str) -> Result<Account>;
    fn list_accounts(&self, owner_id: &str) -> Result<Vec<Account>>;
    fn delete_account(&self, account_id: &str, owner_id: &str) -> Result<()>;
    fn replace_system_token(&self, owner_id: &str, token: &str) -> Result<SystemToken>;
    fn get_system_token(&self, owner_id: &str) -> Result<Option<String>>;
}
