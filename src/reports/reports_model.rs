use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One point of a date-indexed spend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatePoint {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Number of transactions (both signs) in one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Absolute expense total of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

/// The four labeled series produced by the reporting pipeline, ready for
/// chart rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseReport {
    /// Positive spend magnitude per calendar day, gap-filled with zeros
    /// over the contiguous axis from the filtered set's first to last date.
    pub daily: Vec<DatePoint>,
    /// The daily series resampled into calendar months, labeled by the
    /// last day of each month.
    pub monthly: Vec<DatePoint>,
    /// Transaction counts per category, descending.
    pub category_counts: Vec<CategoryCount>,
    /// Absolute expense sums per category.
    pub category_sums: Vec<CategoryTotal>,
}
