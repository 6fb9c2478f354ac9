// Module declarations
pub(crate) mod accounts_errors;
pub(crate) mod accounts_model;
pub(crate) mod accounts_repository;
pub(crate) mod accounts_service;
pub(crate) mod accounts_traits;

// Re-export the public interface
pub use accounts_model::{Account, AccountDB, NewAccount, SystemToken, SystemTokenDB};
pub use accounts_repository::AccountRepository;
pub use accounts_service::AccountService;
pub use accounts_traits::AccountServiceTrait;

// Re-export error types for convenience
pub use accounts_errors::{AccountError, Result};
