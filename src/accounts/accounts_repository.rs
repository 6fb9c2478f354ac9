use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::accounts::{AccountError, Result};
use crate::db::get_connection;
use crate::schema::{accounts, system_tokens};

use super::accounts_model::{Account, AccountDB, NewAccount, SystemToken, SystemTokenDB};

/// Repository for accounts and system tokens
pub struct AccountRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl AccountRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<crate::db::DbConnection> {
        get_connection(&self.pool).map_err(|e| AccountError::DatabaseError(e.to_string()))
    }

    /// Registers a brokerage account for a user
    pub fn create(&self, new_account: NewAccount, owner_id: &str) -> Result<Account> {
        new_account.validate()?;

        let account_db = AccountDB {
            id: uuid::Uuid::new_v4().to_string(),
            name: new_account.name,
            account_number: new_account.account_number,
            token: new_account.token,
            user_id: owner_id.to_string(),
        };

        let mut conn = self.conn()?;
        diesel::insert_into(accounts::table)
            .values(&account_db)
            .execute(&mut conn)?;

        Ok(account_db.into())
    }

    /// Retrieves one of the user's accounts by its ID
    pub fn get_by_id(&self, account_id: &str, owner_id: &str) -> Result<Account> {
        let mut conn = self.conn()?;

        let account = accounts::table
            .filter(accounts::id.eq(account_id))
            .filter(accounts::user_id.eq(owner_id))
            .first::<AccountDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    AccountError::NotFound(format!("Account with id {} not found", account_id))
                }
                _ => AccountError::DatabaseError(e.to_string()),
            })?;

        Ok(account.into())
    }

    /// Lists the user's accounts
    pub fn list(&self, owner_id: &str) -> Result<Vec<Account>> {
        let mut conn = self.conn()?;

        accounts::table
            .filter(accounts::user_id.eq(owner_id))
            .order(accounts::name.asc())
            .load::<AccountDB>(&mut conn)
            .map_err(|e| AccountError::DatabaseError(e.to_string()))
            .map(|results| results.into_iter().map(Account::from).collect())
    }

    /// Deletes one of the user's accounts
    pub fn delete(&self, account_id: &str, owner_id: &str) -> Result<usize> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(
            accounts::table
                .filter(accounts::id.eq(account_id))
                .filter(accounts::user_id.eq(owner_id)),
        )
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(AccountError::NotFound(format!(
                "Account with id {} not found",
                account_id
            )));
        }

        Ok(affected)
    }

    /// Replaces the user's system token. The one-token-per-user invariant is
    /// enforced here at write time: existing rows are deleted before the new
    /// token is inserted, inside a single transaction.
    pub fn replace_system_token(&self, owner_id: &str, token: &str) -> Result<SystemToken> {
        if token.trim().is_empty() {
            return Err(AccountError::InvalidToken(
                "System token cannot be empty".to_string(),
            ));
        }

        let token_db = SystemTokenDB {
            id: uuid::Uuid::new_v4().to_string(),
            token: token.to_string(),
            user_id: owner_id.to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        };

        let mut conn = self.conn()?;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::delete(system_tokens::table.filter(system_tokens::user_id.eq(owner_id)))
                .execute(conn)?;
            diesel::insert_into(system_tokens::table)
                .values(&token_db)
                .execute(conn)?;
            Ok(())
        })?;

        Ok(token_db.into())
    }

    /// Returns the user's system token, if one is registered
    pub fn get_system_token(&self, owner_id: &str) -> Result<Option<String>> {
        let mut conn = self.conn()?;

        system_tokens::table
            .filter(system_tokens::user_id.eq(owner_id))
            .select(system_tokens::token)
            .first::<String>(&mut conn)
            .optional()
            .map_err(|e| AccountError::DatabaseError(e.to_string()))
    }
}
