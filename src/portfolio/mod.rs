// Module declarations
pub(crate) mod portfolio_errors;
pub(crate) mod portfolio_model;
pub(crate) mod portfolio_service;

// Re-export the public interface
pub use portfolio_model::PortfolioPosition;
pub use portfolio_service::PortfolioService;

// Re-export error types for convenience
pub use portfolio_errors::{PortfolioError, Result};
