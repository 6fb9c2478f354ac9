use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A bank transaction imported from a CSV export.
///
/// The sign of `amount` encodes direction: negative values are expenses.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub operation_date: NaiveDate,
    pub card_number: String,
    pub currency: String,
    pub category: String,
    pub mcc: String,
    pub description: String,
    pub bonuses: f64,
    pub amount: f64,
    pub user_id: String,
}

/// Optional filters applied when listing or aggregating transactions.
/// Date bounds are inclusive, the category filter is an exact match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilters {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<String>,
}

impl TransactionFilters {
    pub fn matches(&self, date: NaiveDate, category: &str) -> bool {
        if let Some(start) = self.start_date {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if date > end {
                return false;
            }
        }
        if let Some(wanted) = &self.category {
            if category != wanted {
                return false;
            }
        }
        true
    }
}
