use log::debug;
use std::sync::Arc;

use crate::accounts::Account;
use crate::broker::BrokerClient;
use crate::constants::USD_REFERENCE_FIGI;
use crate::instruments::InstrumentNameLookup;
use crate::portfolio::portfolio_errors::PortfolioError;
use crate::Result;

use super::portfolio_model::PortfolioPosition;

/// Service valuating a brokerage account's positions in the reporting currency
pub struct PortfolioService {
    broker: Arc<dyn BrokerClient>,
    instrument_lookup: Arc<dyn InstrumentNameLookup>,
}

impl PortfolioService {
    pub fn new(
        broker: Arc<dyn BrokerClient>,
        instrument_lookup: Arc<dyn InstrumentNameLookup>,
    ) -> Self {
        Self {
            broker,
            instrument_lookup,
        }
    }

    /// Fetches and valuates the positions of one brokerage account.
    pub async fn get_portfolio(&self, account: &Account) -> Result<Vec<PortfolioPosition>> {
        let usd_rate = self.fetch_usd_rate(&account.token).await?;
        debug!(
            "Valuating portfolio of account {} at USD rate {}",
            account.account_number, usd_rate
        );

        let raw_positions = self
            .broker
            .portfolio(&account.token, &account.account_number)
            .await?;

        let mut positions = Vec::with_capacity(raw_positions.len());
        for raw in &raw_positions {
            let mut position = PortfolioPosition::from_raw(raw, usd_rate);
            position.name = self.instrument_lookup.find_name(&position.figi)?;
            positions.push(position);
        }

        Ok(positions)
    }

    /// Current USD rate in the reporting currency, read off the fixed
    /// reference instrument's last price.
    async fn fetch_usd_rate(&self, token: &str) -> Result<f64> {
        let prices = self
            .broker
            .last_prices(token, &[USD_REFERENCE_FIGI.to_string()])
            .await?;

        let price = prices
            .iter()
            .find(|p| p.figi == USD_REFERENCE_FIGI)
            .ok_or_else(|| {
                PortfolioError::MissingRate(format!(
                    "no last price for reference instrument {}",
                    USD_REFERENCE_FIGI
                ))
            })?;

        Ok(price.price.as_f64())
    }
}
