// Module declarations
pub(crate) mod broker_client;
pub(crate) mod broker_errors;
pub(crate) mod broker_model;
pub(crate) mod broker_traits;

// Re-export the public interface
pub use broker_client::RestBrokerClient;
pub use broker_errors::BrokerError;
pub use broker_model::{
    BondDto, BrokerAccountDto, CandleDto, DateValue, LastPriceDto, MoneyValue, PositionDto,
    Quotation, ShareDto,
};
pub use broker_traits::BrokerClient;
