// Module declarations
pub(crate) mod reports_model;
pub(crate) mod reports_service;

// Re-export the public interface
pub use reports_model::{CategoryCount, CategoryTotal, DatePoint, ExpenseReport};
pub use reports_service::{build_expense_report, ReportService};
