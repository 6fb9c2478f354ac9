use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::transactions::{Transaction, TransactionFilters, TransactionRepositoryTrait};
use crate::Result;

use super::reports_model::{CategoryCount, CategoryTotal, DatePoint, ExpenseReport};

/// Service producing expense reports from a user's transaction set
pub struct ReportService {
    repository: Arc<dyn TransactionRepositoryTrait>,
}

impl ReportService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Builds the four report series for a user. `Ok(None)` means the
    /// filtered set is empty and there is nothing to chart.
    pub fn expense_report(
        &self,
        user_id: &str,
        filters: &TransactionFilters,
    ) -> Result<Option<ExpenseReport>> {
        let transactions = self.repository.list(user_id, filters)?;
        // Filters are already applied by the repository query.
        Ok(build_expense_report(
            &transactions,
            &TransactionFilters::default(),
        ))
    }
}

/// Runs the aggregation pipeline over a transaction set.
///
/// Every step is a pure transform: project to (date, amount, category),
/// filter, then derive the daily/monthly spend series and the per-category
/// counts and sums. Returns `None` when the filtered set is empty — the
/// date axis has no defined bounds in that case.
pub fn build_expense_report(
    transactions: &[Transaction],
    filters: &TransactionFilters,
) -> Option<ExpenseReport> {
    let filtered: Vec<(NaiveDate, f64, &str)> = transactions
        .iter()
        .filter(|tx| filters.matches(tx.operation_date, &tx.category))
        .map(|tx| (tx.operation_date, tx.amount, tx.category.as_str()))
        .collect();

    if filtered.is_empty() {
        return None;
    }

    // Axis bounds come from the whole filtered set, not only expense rows.
    let first = filtered.iter().map(|(date, _, _)| *date).min()?;
    let last = filtered.iter().map(|(date, _, _)| *date).max()?;

    let mut spend_by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for (date, amount, _) in filtered.iter().filter(|(_, amount, _)| *amount < 0.0) {
        *spend_by_day.entry(*date).or_insert(0.0) += -amount;
    }

    // Densify: a sparse transaction log would otherwise chart as straight
    // lines interpolated across missing days.
    let daily: Vec<DatePoint> = first
        .iter_days()
        .take_while(|date| *date <= last)
        .map(|date| DatePoint {
            date,
            amount: spend_by_day.get(&date).copied().unwrap_or(0.0),
        })
        .collect();

    let mut spend_by_month: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for point in &daily {
        *spend_by_month
            .entry(last_day_of_month(point.date))
            .or_insert(0.0) += point.amount;
    }
    let monthly: Vec<DatePoint> = spend_by_month
        .into_iter()
        .map(|(date, amount)| DatePoint { date, amount })
        .collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for (_, _, category) in &filtered {
        *counts.entry(*category).or_insert(0) += 1;
    }
    let mut category_counts: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    category_counts.sort_by(|a, b| b.count.cmp(&a.count).then(a.category.cmp(&b.category)));

    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for (_, amount, category) in filtered.iter().filter(|(_, amount, _)| *amount < 0.0) {
        *sums.entry(*category).or_insert(0.0) += -amount;
    }
    let category_sums: Vec<CategoryTotal> = sums
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category: category.to_string(),
            amount,
        })
        .collect();

    Some(ExpenseReport {
        daily,
        monthly,
        category_counts,
        category_sums,
    })
}

/// Calendar-month bucket label: the last day of the date's month.
fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = (date.year(), date.month());
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .expect("valid month boundary")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(date: &str, amount: f64, category: &str) -> Transaction {
        Transaction {
            id: uuid::Uuid::new_v4().to_string(),
            operation_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            card_number: "*1234".to_string(),
            currency: "USD".to_string(),
            category: category.to_string(),
            mcc: "5411".to_string(),
            description: String::new(),
            bonuses: 0.0,
            amount,
            user_id: "user-1".to_string(),
        }
    }

    fn no_filters() -> TransactionFilters {
        TransactionFilters::default()
    }

    #[test]
    fn daily_series_is_gap_filled_with_zeros() {
        let txs = vec![tx("2024-01-01", -100.0, "Food"), tx("2024-01-03", -50.0, "Food")];
        let report = build_expense_report(&txs, &no_filters()).unwrap();

        assert_eq!(report.daily.len(), 3);
        assert_eq!(report.daily[0].amount, 100.0);
        assert_eq!(report.daily[1].amount, 0.0);
        assert_eq!(
            report.daily[1].date,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert_eq!(report.daily[2].amount, 50.0);
    }

    #[test]
    fn income_rows_extend_the_axis_but_not_the_spend() {
        // A deposit on the last day widens the date axis; the spend stays 0.
        let txs = vec![tx("2024-01-01", -100.0, "Food"), tx("2024-01-04", 200.0, "Salary")];
        let report = build_expense_report(&txs, &no_filters()).unwrap();

        assert_eq!(report.daily.len(), 4);
        assert_eq!(report.daily[3].amount, 0.0);
    }

    #[test]
    fn category_sums_exclude_income_but_counts_do_not() {
        let txs = vec![
            tx("2024-01-01", -100.0, "Food"),
            tx("2024-01-02", -50.0, "Food"),
            tx("2024-01-03", 200.0, "Food"),
        ];
        let report = build_expense_report(&txs, &no_filters()).unwrap();

        assert_eq!(report.category_sums.len(), 1);
        assert_eq!(report.category_sums[0].category, "Food");
        assert_eq!(report.category_sums[0].amount, 150.0);

        assert_eq!(report.category_counts.len(), 1);
        assert_eq!(report.category_counts[0].count, 3);
    }

    #[test]
    fn category_counts_are_sorted_descending() {
        let txs = vec![
            tx("2024-01-01", -10.0, "Transport"),
            tx("2024-01-01", -10.0, "Food"),
            tx("2024-01-02", -10.0, "Food"),
        ];
        let report = build_expense_report(&txs, &no_filters()).unwrap();

        assert_eq!(report.category_counts[0].category, "Food");
        assert_eq!(report.category_counts[0].count, 2);
        assert_eq!(report.category_counts[1].category, "Transport");
    }

    #[test]
    fn monthly_series_buckets_by_last_day_of_month() {
        let txs = vec![
            tx("2024-01-15", -100.0, "Food"),
            tx("2024-01-20", -50.0, "Food"),
            tx("2024-02-05", -25.0, "Food"),
        ];
        let report = build_expense_report(&txs, &no_filters()).unwrap();

        assert_eq!(report.monthly.len(), 2);
        assert_eq!(
            report.monthly[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
        );
        assert_eq!(report.monthly[0].amount, 150.0);
        assert_eq!(
            report.monthly[1].date,
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(report.monthly[1].amount, 25.0);
    }

    #[test]
    fn filters_are_inclusive_and_exact() {
        let txs = vec![
            tx("2024-01-01", -100.0, "Food"),
            tx("2024-01-02", -50.0, "Transport"),
            tx("2024-01-03", -25.0, "Food"),
        ];

        let filters = TransactionFilters {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 2),
            category: Some("Food".to_string()),
        };
        let report = build_expense_report(&txs, &filters).unwrap();

        assert_eq!(report.daily.len(), 1);
        assert_eq!(report.daily[0].amount, 100.0);
        assert_eq!(report.category_counts.len(), 1);
    }

    #[test]
    fn empty_filtered_set_yields_no_report() {
        let txs = vec![tx("2024-01-01", -100.0, "Food")];
        let filters = TransactionFilters {
            start_date: None,
            end_date: None,
            category: Some("Travel".to_string()),
        };
        assert!(build_expense_report(&txs, &filters).is_none());
        assert!(build_expense_report(&[], &no_filters()).is_none());
    }

    #[test]
    fn pipeline_is_deterministic() {
        let txs = vec![
            tx("2024-01-01", -100.0, "Food"),
            tx("2024-01-05", 75.0, "Salary"),
            tx("2024-02-10", -30.0, "Transport"),
        ];
        let first = build_expense_report(&txs, &no_filters()).unwrap();
        let second = build_expense_report(&txs, &no_filters()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn december_rolls_over_to_the_next_year() {
        assert_eq!(
            last_day_of_month(NaiveDate::from_ymd_opt(2023, 12, 5).unwrap()),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
    }
}
