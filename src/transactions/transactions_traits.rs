use super::transactions_model::{Transaction, TransactionFilters};
use crate::transactions::Result;

/// Trait defining the read contract the reporting pipeline depends on.
pub trait TransactionRepositoryTrait: Send + Sync {
    fn list(&self, owner_id: &str, filters: &TransactionFilters) -> Result<Vec<Transaction>>;
    fn distinct_categories(&self, owner_id: &str) -> Result<Vec<String>>;
}
