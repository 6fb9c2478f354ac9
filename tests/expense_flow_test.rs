mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use spendfolio_core::reports::ReportService;
use spendfolio_core::transactions::{
    TransactionFilters, TransactionRepository, TransactionService,
};
use spendfolio_core::Error;

const CSV: &str = "\
Date,Card,Currency,Category,MCC,Description,Bonuses,Amount
01.03.2024 12:30:45,*1234,USD,Food,5411,Grocery store,10,-100.00
02.03.2024 09:00:00,*1234,USD,,4111,Metro,0,-20.00
04.03.2024 19:15:00,*1234,USD,Food,5812,Restaurant,0,-50.00
05.03.2024 10:00:00,*1234,USD,Salary,0000,Payroll,0,\"2,000.00\"
";

fn services(pool: Arc<spendfolio_core::db::DbPool>) -> (TransactionService, ReportService) {
    let repository = Arc::new(TransactionRepository::new(pool));
    let service = TransactionService::new(repository.clone());
    let reports = ReportService::new(repository);
    (service, reports)
}

#[test]
fn import_then_report_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let pool = common::setup_pool(dir.path());
    let (service, reports) = services(pool);

    let imported = service
        .import_csv("statement.csv", CSV.as_bytes(), "user-1")
        .unwrap();
    assert_eq!(imported, 4);

    // Blank category column lands in the default bucket.
    let categories = service.categories("user-1").unwrap();
    assert_eq!(categories, vec!["Food", "Other", "Salary"]);

    let report = reports
        .expense_report("user-1", &TransactionFilters::default())
        .unwrap()
        .expect("report should not be empty");

    // Contiguous daily axis from 01.03 to 05.03 with zero-filled 03.03.
    assert_eq!(report.daily.len(), 5);
    assert_eq!(report.daily[0].amount, 100.0);
    assert_eq!(report.daily[2].amount, 0.0);
    assert_eq!(
        report.daily[2].date,
        NaiveDate::from_ymd_opt(2024, 3, 3).unwrap()
    );

    assert_eq!(report.monthly.len(), 1);
    assert_eq!(
        report.monthly[0].date,
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    );
    assert_eq!(report.monthly[0].amount, 170.0);

    // Salary is counted but not summed.
    let food_sum = report
        .category_sums
        .iter()
        .find(|c| c.category == "Food")
        .unwrap();
    assert_eq!(food_sum.amount, 150.0);
    assert!(report
        .category_sums
        .iter()
        .all(|c| c.category != "Salary"));
}

#[test]
fn malformed_row_aborts_the_whole_import() {
    let dir = tempfile::tempdir().unwrap();
    let pool = common::setup_pool(dir.path());
    let repository = Arc::new(TransactionRepository::new(pool));
    let service = TransactionService::new(repository.clone());

    let bad_csv = "\
Date,Card,Currency,Category,MCC,Description,Bonuses,Amount
01.03.2024 12:30:45,*1234,USD,Food,5411,Grocery store,0,-100.00
02.03.2024 09:00:00,*1234,USD,Food,5411,Bakery,0,broken
";

    let before = repository.count("user-1").unwrap();
    let result = service.import_csv("statement.csv", bad_csv.as_bytes(), "user-1");
    assert!(matches!(result, Err(Error::Transaction(_))));

    // Nothing was committed.
    assert_eq!(repository.count("user-1").unwrap(), before);
}

#[test]
fn non_csv_filename_is_rejected_before_parsing() {
    let dir = tempfile::tempdir().unwrap();
    let pool = common::setup_pool(dir.path());
    let (service, _) = services(pool);

    let result = service.import_csv("statement.xlsx", CSV.as_bytes(), "user-1");
    assert!(matches!(result, Err(Error::Transaction(_))));
}

#[test]
fn users_see_only_their_own_transactions() {
    let dir = tempfile::tempdir().unwrap();
    let pool = common::setup_pool(dir.path());
    let (service, reports) = services(pool);

    service
        .import_csv("statement.csv", CSV.as_bytes(), "user-1")
        .unwrap();

    let other = reports
        .expense_report("user-2", &TransactionFilters::default())
        .unwrap();
    assert!(other.is_none());

    let removed = service.delete_all("user-1").unwrap();
    assert_eq!(removed, 4);
    let after = reports
        .expense_report("user-1", &TransactionFilters::default())
        .unwrap();
    assert!(after.is_none());
}
