use thiserror::Error;

/// Custom error type for brokerage API operations
#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for broker operations
pub type Result<T> = std::result::Result<T, BrokerError>;
