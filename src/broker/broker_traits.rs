use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::broker_errors::Result;
use super::broker_model::{
    BondDto, BrokerAccountDto, CandleDto, LastPriceDto, PositionDto, ShareDto,
};

/// Trait defining the contract for the brokerage API client.
///
/// Every call is authenticated by a bearer token supplied per call; calls are
/// never retried and failures propagate to the caller.
#[async_trait]
pub trait BrokerClient: Send + Sync {
    /// Lists base-status shares.
    async fn shares(&self, token: &str) -> Result<Vec<ShareDto>>;

    /// Lists base-status bonds.
    async fn bonds(&self, token: &str) -> Result<Vec<BondDto>>;

    /// Fetches ordered candle bars for an instrument over a time range.
    async fn candles(
        &self,
        token: &str,
        figi: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        interval: &str,
    ) -> Result<Vec<CandleDto>>;

    /// Fetches the latest trade prices for a set of instruments.
    async fn last_prices(&self, token: &str, figis: &[String]) -> Result<Vec<LastPriceDto>>;

    /// Lists the brokerage accounts reachable under the token.
    async fn accounts(&self, token: &str) -> Result<Vec<BrokerAccountDto>>;

    /// Fetches the open positions of one brokerage account.
    async fn portfolio(&self, token: &str, account_id: &str) -> Result<Vec<PositionDto>>;
}
