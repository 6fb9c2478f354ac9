use chrono::{DateTime, Utc};
use log::debug;
use std::sync::Arc;

use crate::broker::BrokerClient;
use crate::market_data::market_data_errors::MarketDataError;
use crate::Result;

use super::market_data_model::{Candle, Granularity};

/// Service fetching historical price bars from the brokerage API
pub struct MarketDataService {
    broker: Arc<dyn BrokerClient>,
}

impl MarketDataService {
    pub fn new(broker: Arc<dyn BrokerClient>) -> Self {
        Self { broker }
    }

    /// Fetches ordered candle bars for an instrument over a time range.
    ///
    /// The token must have at least one resolvable brokerage account; an
    /// empty account list is a credentials problem, reported distinctly from
    /// a valid range that simply has no bars.
    pub async fn get_candles(
        &self,
        token: &str,
        figi: &str,
        granularity: Granularity,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Vec<Candle>> {
        if start_time >= end_time {
            return Err(MarketDataError::InvalidRange(
                "start must precede end".to_string(),
            )
            .into());
        }

        let accounts = self.broker.accounts(token).await?;
        if accounts.is_empty() {
            return Err(MarketDataError::MissingCredentials(
                "no brokerage account resolvable under this token, check your system token"
                    .to_string(),
            )
            .into());
        }

        debug!(
            "Fetching {} candles for {} from {} to {}",
            granularity.as_interval(),
            figi,
            start_time,
            end_time
        );

        let bars = self
            .broker
            .candles(token, figi, start_time, end_time, granularity.as_interval())
            .await?;

        if bars.is_empty() {
            return Err(MarketDataError::NoData(format!(
                "no candles for {} in the requested period",
                figi
            ))
            .into());
        }

        Ok(bars.into_iter().map(Candle::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broker::{
        BondDto, BrokerAccountDto, BrokerError, CandleDto, LastPriceDto, PositionDto, Quotation,
        ShareDto,
    };
    use crate::Error;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::result::Result;

    struct MockBroker {
        accounts: Vec<BrokerAccountDto>,
        candles: Vec<CandleDto>,
    }

    impl MockBroker {
        fn with_account(candles: Vec<CandleDto>) -> Self {
            MockBroker {
                accounts: vec![BrokerAccountDto {
                    id: "acc-1".to_string(),
                    name: None,
                    status: None,
                }],
                candles,
            }
        }
    }

    #[async_trait]
    impl BrokerClient for MockBroker {
        async fn shares(&self, _token: &str) -> Result<Vec<ShareDto>, BrokerError> {
            unimplemented!("MockBroker::shares")
        }
        async fn bonds(&self, _token: &str) -> Result<Vec<BondDto>, BrokerError> {
            unimplemented!("MockBroker::bonds")
        }
        async fn candles(
            &self,
            _token: &str,
            _figi: &str,
            _from: DateTime<Utc>,
            _to: DateTime<Utc>,
            _interval: &str,
        ) -> Result<Vec<CandleDto>, BrokerError> {
            Ok(self.candles.clone())
        }
        async fn last_prices(
            &self,
            _token: &str,
            _figis: &[String],
        ) -> Result<Vec<LastPriceDto>, BrokerError> {
            unimplemented!("MockBroker::last_prices")
        }
        async fn accounts(&self, _token: &str) -> Result<Vec<BrokerAccountDto>, BrokerError> {
            Ok(self.accounts.clone())
        }
        async fn portfolio(
            &self,
            _token: &str,
            _account_id: &str,
        ) -> Result<Vec<PositionDto>, BrokerError> {
            unimplemented!("MockBroker::portfolio")
        }
    }

    fn candle(units: i64) -> CandleDto {
        CandleDto {
            time: Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap(),
            open: Quotation::new(units, 0),
            high: Quotation::new(units + 1, 500_000_000),
            low: Quotation::new(units - 1, 0),
            close: Quotation::new(units, 250_000_000),
            volume: 42,
        }
    }

    #[tokio::test]
    async fn rejects_inverted_time_range() {
        let service = MarketDataService::new(Arc::new(MockBroker::with_account(vec![])));
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();

        let err = service
            .get_candles("token", "FIGI", Granularity::Hour1, start, end)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MarketData(MarketDataError::InvalidRange(_))
        ));
    }

    #[tokio::test]
    async fn token_without_accounts_is_a_credentials_error() {
        let broker = MockBroker {
            accounts: vec![],
            candles: vec![candle(100)],
        };
        let service = MarketDataService::new(Arc::new(broker));
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();

        let err = service
            .get_candles("token", "FIGI", Granularity::Hour1, start, end)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MarketData(MarketDataError::MissingCredentials(_))
        ));
    }

    #[tokio::test]
    async fn empty_result_in_valid_range_is_no_data() {
        let service = MarketDataService::new(Arc::new(MockBroker::with_account(vec![])));
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();

        let err = service
            .get_candles("token", "FIGI", Granularity::Hour1, start, end)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MarketData(MarketDataError::NoData(_))));
    }

    #[tokio::test]
    async fn candle_prices_are_normalized() {
        let service =
            MarketDataService::new(Arc::new(MockBroker::with_account(vec![candle(100)])));
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();

        let bars = service
            .get_candles("token", "FIGI", Granularity::Day1, start, end)
            .await
            .unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].open, 100.0);
        assert_eq!(bars[0].high, 101.5);
        assert_eq!(bars[0].close, 100.25);
        assert_eq!(bars[0].volume, 42);
    }
}
