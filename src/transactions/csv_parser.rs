//! Parser for the bank's transaction CSV export.
//!
//! Expected layout: one header row (ignored), then comma-separated rows of
//! at least 8 columns: operation date (`DD.MM.YYYY HH:MM:SS`), card number,
//! currency, category, MCC, description, bonus amount, signed amount.

use chrono::NaiveDateTime;
use csv::ReaderBuilder;

use crate::constants::{CSV_DATE_FORMAT, DEFAULT_CATEGORY};
use crate::transactions::transactions_errors::{Result, TransactionError};
use crate::transactions::transactions_model::Transaction;

const MIN_COLUMNS: usize = 8;

/// Parses the CSV export into transactions attributed to `user_id`.
///
/// Rows with fewer than 8 columns are silently skipped. A malformed date or
/// amount fails the whole import with the offending row number; nothing is
/// written until parsing has succeeded in full.
pub fn parse_transactions(content: &[u8], user_id: &str) -> Result<Vec<Transaction>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content);

    let mut transactions = Vec::new();

    // Data rows are numbered from 1, excluding the header.
    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let record = record.map_err(|e| TransactionError::Parse {
            row,
            message: e.to_string(),
        })?;

        if record.len() < MIN_COLUMNS {
            continue;
        }

        let operation_date = NaiveDateTime::parse_from_str(&record[0], CSV_DATE_FORMAT)
            .map_err(|_| TransactionError::Parse {
                row,
                message: format!("invalid operation date '{}'", &record[0]),
            })?
            .date();

        let category = if record[3].is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            record[3].to_string()
        };

        let bonuses = if record[6].is_empty() {
            0.0
        } else {
            parse_amount(&record[6]).map_err(|message| TransactionError::Parse { row, message })?
        };

        let amount =
            parse_amount(&record[7]).map_err(|message| TransactionError::Parse { row, message })?;

        transactions.push(Transaction {
            id: uuid::Uuid::new_v4().to_string(),
            operation_date,
            card_number: record[1].to_string(),
            currency: record[2].to_string(),
            category,
            mcc: record[4].to_string(),
            description: record[5].to_string(),
            bonuses,
            amount,
            user_id: user_id.to_string(),
        });
    }

    Ok(transactions)
}

/// Parses a monetary column, stripping thousands-separator commas.
fn parse_amount(raw: &str) -> std::result::Result<f64, String> {
    raw.replace(',', "")
        .parse::<f64>()
        .map_err(|_| format!("invalid amount '{}'", raw))
}
