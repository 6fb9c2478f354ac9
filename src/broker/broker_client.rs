use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use super::broker_errors::{BrokerError, Result};
use super::broker_model::{
    BondDto, BrokerAccountDto, CandleDto, LastPriceDto, PositionDto, ShareDto,
};
use super::broker_traits::BrokerClient;

const BASE_URL: &str = "https://invest-public-api.tinkoff.ru/rest";
const SERVICE_PREFIX: &str = "tinkoff.public.invest.api.contract.v1";
const INSTRUMENT_STATUS_BASE: &str = "INSTRUMENT_STATUS_BASE";

/// REST client for the brokerage gateway. Every service method is a JSON
/// POST authenticated with the caller's bearer token.
pub struct RestBrokerClient {
    client: Client,
    base_url: String,
}

impl RestBrokerClient {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL.to_string())
    }

    /// Points the client at a different gateway, used by tests.
    pub fn with_base_url(base_url: String) -> Self {
        RestBrokerClient {
            client: Client::new(),
            base_url,
        }
    }

    async fn post<T: DeserializeOwned>(
        &self,
        token: &str,
        service: &str,
        method: &str,
        body: serde_json::Value,
    ) -> Result<T> {
        let url = format!(
            "{}/{}.{}/{}",
            self.base_url, SERVICE_PREFIX, service, method
        );
        debug!("Broker request: {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let detail = response.text().await.unwrap_or_default();
                Err(BrokerError::Unauthorized(detail))
            }
            status if !status.is_success() => {
                let detail = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "unknown error".to_string());
                Err(BrokerError::Provider(format!(
                    "{} {} failed with {}: {}",
                    service, method, status, detail
                )))
            }
            _ => response
                .json::<T>()
                .await
                .map_err(|e| BrokerError::InvalidData(e.to_string())),
        }
    }
}

impl Default for RestBrokerClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct InstrumentsResponse<T> {
    #[serde(default = "Vec::new")]
    instruments: Vec<T>,
}

#[derive(Deserialize)]
struct CandlesResponse {
    #[serde(default = "Vec::new")]
    candles: Vec<CandleDto>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LastPricesResponse {
    #[serde(default = "Vec::new")]
    last_prices: Vec<LastPriceDto>,
}

#[derive(Deserialize)]
struct AccountsResponse {
    #[serde(default = "Vec::new")]
    accounts: Vec<BrokerAccountDto>,
}

#[derive(Deserialize)]
struct PortfolioResponse {
    #[serde(default = "Vec::new")]
    positions: Vec<PositionDto>,
}

fn rfc3339(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[async_trait]
impl BrokerClient for RestBrokerClient {
    async fn shares(&self, token: &str) -> Result<Vec<ShareDto>> {
        let response: InstrumentsResponse<ShareDto> = self
            .post(
                token,
                "InstrumentsService",
                "Shares",
                json!({ "instrumentStatus": INSTRUMENT_STATUS_BASE }),
            )
            .await?;
        Ok(response.instruments)
    }

    async fn bonds(&self, token: &str) -> Result<Vec<BondDto>> {
        let response: InstrumentsResponse<BondDto> = self
            .post(
                token,
                "InstrumentsService",
                "Bonds",
                json!({ "instrumentStatus": INSTRUMENT_STATUS_BASE }),
            )
            .await?;
        Ok(response.instruments)
    }

    async fn candles(
        &self,
        token: &str,
        figi: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        interval: &str,
    ) -> Result<Vec<CandleDto>> {
        let response: CandlesResponse = self
            .post(
                token,
                "MarketDataService",
                "GetCandles",
                json!({
                    "figi": figi,
                    "from": rfc3339(from),
                    "to": rfc3339(to),
                    "interval": interval,
                }),
            )
            .await?;
        Ok(response.candles)
    }

    async fn last_prices(&self, token: &str, figis: &[String]) -> Result<Vec<LastPriceDto>> {
        let response: LastPricesResponse = self
            .post(
                token,
                "MarketDataService",
                "GetLastPrices",
                json!({ "figi": figis }),
            )
            .await?;
        Ok(response.last_prices)
    }

    async fn accounts(&self, token: &str) -> Result<Vec<BrokerAccountDto>> {
        let response: AccountsResponse = self
            .post(token, "UsersService", "GetAccounts", json!({}))
            .await?;
        Ok(response.accounts)
    }

    async fn portfolio(&self, token: &str, account_id: &str) -> Result<Vec<PositionDto>> {
        let response: PortfolioResponse = self
            .post(
                token,
                "OperationsService",
                "GetPortfolio",
                json!({ "accountId": account_id }),
            )
            .await?;
        Ok(response.positions)
    }
}
