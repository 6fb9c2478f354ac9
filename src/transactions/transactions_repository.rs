use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::db::get_connection;
use crate::schema::transactions;
use crate::transactions::{Result, TransactionError};

use super::transactions_model::{Transaction, TransactionFilters};
use super::transactions_traits::TransactionRepositoryTrait;

/// Repository for imported bank transactions
pub struct TransactionRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl TransactionRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<crate::db::DbConnection> {
        get_connection(&self.pool).map_err(|e| TransactionError::DatabaseError(e.to_string()))
    }

    /// Inserts all rows as a single bulk write inside one transaction;
    /// there is no per-row fallback.
    pub fn insert_bulk(&self, rows: &[Transaction]) -> Result<usize> {
        let mut conn = self.conn()?;

        let inserted = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::insert_into(transactions::table)
                .values(rows)
                .execute(conn)
        })?;

        Ok(inserted)
    }

    /// Deletes one of the user's transactions
    pub fn delete(&self, transaction_id: &str, owner_id: &str) -> Result<usize> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(
            transactions::table
                .filter(transactions::id.eq(transaction_id))
                .filter(transactions::user_id.eq(owner_id)),
        )
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(TransactionError::NotFound(format!(
                "Transaction with id {} not found",
                transaction_id
            )));
        }

        Ok(affected)
    }

    /// Deletes all of the user's transactions
    pub fn delete_all(&self, owner_id: &str) -> Result<usize> {
        let mut conn = self.conn()?;

        let affected =
            diesel::delete(transactions::table.filter(transactions::user_id.eq(owner_id)))
                .execute(&mut conn)?;

        Ok(affected)
    }

    pub fn count(&self, owner_id: &str) -> Result<i64> {
        let mut conn = self.conn()?;

        transactions::table
            .filter(transactions::user_id.eq(owner_id))
            .count()
            .get_result(&mut conn)
            .map_err(|e| TransactionError::DatabaseError(e.to_string()))
    }
}

impl TransactionRepositoryTrait for TransactionRepository {
    /// Lists the user's transactions, newest first, honoring the optional
    /// date-range and category filters.
    fn list(&self, owner_id: &str, filters: &TransactionFilters) -> Result<Vec<Transaction>> {
        let mut conn = self.conn()?;

        let mut query = transactions::table
            .filter(transactions::user_id.eq(owner_id))
            .into_boxed();

        if let Some(start) = filters.start_date {
            query = query.filter(transactions::operation_date.ge(start));
        }
        if let Some(end) = filters.end_date {
            query = query.filter(transactions::operation_date.le(end));
        }
        if let Some(category) = &filters.category {
            query = query.filter(transactions::category.eq(category));
        }

        query
            .order(transactions::operation_date.desc())
            .load::<Transaction>(&mut conn)
            .map_err(|e| TransactionError::DatabaseError(e.to_string()))
    }

    /// Distinct categories present in the user's transaction set, computed
    /// from live data at request time.
    fn distinct_categories(&self, owner_id: &str) -> Result<Vec<String>> {
        let mut conn = self.conn()?;

        transactions::table
            .filter(transactions::user_id.eq(owner_id))
            .select(transactions::category)
            .distinct()
            .order(transactions::category.asc())
            .load::<String>(&mut conn)
            .map_err(|e| TransactionError::DatabaseError(e.to_string()))
    }
}
