// Module declarations
pub(crate) mod market_data_errors;
pub(crate) mod market_data_model;
pub(crate) mod market_data_service;

// Re-export the public interface
pub use market_data_model::{Candle, ChartDuration, ChartQuery, Granularity};
pub use market_data_service::MarketDataService;

// Re-export error types for convenience
pub use market_data_errors::{MarketDataError, Result};
