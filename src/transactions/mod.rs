// Module declarations
pub(crate) mod csv_parser;
pub(crate) mod transactions_errors;
pub(crate) mod transactions_model;
pub(crate) mod transactions_repository;
pub(crate) mod transactions_service;
pub(crate) mod transactions_traits;

// Re-export the public interface
pub use csv_parser::parse_transactions;
pub use transactions_model::{Transaction, TransactionFilters};
pub use transactions_repository::TransactionRepository;
pub use transactions_service::TransactionService;
pub use transactions_traits::TransactionRepositoryTrait;

// Re-export error types for convenience
pub use transactions_errors::{Result, TransactionError};
