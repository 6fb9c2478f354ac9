use log::info;
use std::sync::Arc;

use crate::transactions::transactions_errors::TransactionError;
use crate::Result;

use super::csv_parser::parse_transactions;
use super::transactions_model::{Transaction, TransactionFilters};
use super::transactions_repository::TransactionRepository;
use super::transactions_traits::TransactionRepositoryTrait;

/// Service for importing and managing bank transactions
pub struct TransactionService {
    repository: Arc<TransactionRepository>,
}

impl TransactionService {
    pub fn new(repository: Arc<TransactionRepository>) -> Self {
        Self { repository }
    }

    /// Imports an uploaded CSV export for a user.
    ///
    /// The filename must end in `.csv`; this is checked before any parsing.
    /// Parsing happens in full before the bulk write, so a parse failure
    /// commits nothing.
    pub fn import_csv(&self, filename: &str, content: &[u8], user_id: &str) -> Result<usize> {
        if !filename.to_lowercase().ends_with(".csv") {
            return Err(TransactionError::InvalidFile(format!(
                "'{}' is not a CSV file",
                filename
            ))
            .into());
        }

        let rows = parse_transactions(content, user_id)?;
        let inserted = self.repository.insert_bulk(&rows)?;

        info!("Imported {} transactions for user {}", inserted, user_id);
        Ok(inserted)
    }

    pub fn list(&self, user_id: &str, filters: &TransactionFilters) -> Result<Vec<Transaction>> {
        Ok(self.repository.list(user_id, filters)?)
    }

    /// Distinct categories for the filter form's dropdown
    pub fn categories(&self, user_id: &str) -> Result<Vec<String>> {
        Ok(self.repository.distinct_categories(user_id)?)
    }

    pub fn delete(&self, transaction_id: &str, user_id: &str) -> Result<()> {
        self.repository.delete(transaction_id, user_id)?;
        Ok(())
    }

    pub fn delete_all(&self, user_id: &str) -> Result<usize> {
        let removed = self.repository.delete_all(user_id)?;
        info!("Deleted {} transactions for user {}", removed, user_id);
        Ok(removed)
    }
}
