use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::accounts::accounts_errors::AccountError;
use crate::accounts::Result;

/// A brokerage account number plus its API token, owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub account_number: String,
    pub token: String,
    pub user_id: String,
}

/// Input model for registering a brokerage account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub name: String,
    pub account_number: String,
    pub token: String,
}

impl NewAccount {
    pub fn validate(&self) -> Result<()> {
        if self.account_number.trim().is_empty() {
            return Err(AccountError::InvalidData(
                "Account number cannot be empty".to_string(),
            ));
        }
        if self.token.trim().is_empty() {
            return Err(AccountError::InvalidToken(
                "Account token cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Database model for accounts
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: String,
    pub name: String,
    pub account_number: String,
    pub token: String,
    pub user_id: String,
}

impl From<AccountDB> for Account {
    fn from(db: AccountDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            account_number: db.account_number,
            token: db.token,
            user_id: db.user_id,
        }
    }
}

/// The single API token a user registers for catalog and price queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemToken {
    pub id: String,
    pub token: String,
    pub user_id: String,
    pub created_at: NaiveDateTime,
}

/// Database model for system tokens
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::system_tokens)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SystemTokenDB {
    pub id: String,
    pub token: String,
    pub user_id: String,
    pub created_at: NaiveDateTime,
}

impl From<SystemTokenDB> for SystemToken {
    fn from(db: SystemTokenDB) -> Self {
        Self {
            id: db.id,
            token: db.token,
            user_id: db.user_id,
            created_at: db.created_at,
        }
    }
}
