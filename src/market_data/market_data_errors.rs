use thiserror::Error;

/// Custom error type for chart/price-history operations
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("Unsupported duration: {0}")]
    InvalidDuration(String),

    #[error("Unsupported candle granularity: {0} minutes")]
    InvalidGranularity(u32),

    #[error("Invalid time range: {0}")]
    InvalidRange(String),

    #[error("No data in range: {0}")]
    NoData(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),
}

/// Result type for market data operations
pub type Result<T> = std::result::Result<T, MarketDataError>;
