use thiserror::Error;

/// Custom error type for portfolio valuation
#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("Missing reference rate: {0}")]
    MissingRate(String),
}

/// Result type for portfolio operations
pub type Result<T> = std::result::Result<T, PortfolioError>;
