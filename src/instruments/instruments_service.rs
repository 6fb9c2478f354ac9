use log::{info, warn};
use std::sync::Arc;

use crate::accounts::AccountServiceTrait;
use crate::broker::BrokerClient;
use crate::Result;

use super::instruments_model::{Bond, CatalogSyncSummary, Stock};
use super::instruments_repository::InstrumentRepository;

/// Service refreshing the local instrument catalog from the brokerage API
pub struct InstrumentService {
    repository: Arc<InstrumentRepository>,
    broker: Arc<dyn BrokerClient>,
    account_service: Arc<dyn AccountServiceTrait>,
}

impl InstrumentService {
    pub fn new(
        repository: Arc<InstrumentRepository>,
        broker: Arc<dyn BrokerClient>,
        account_service: Arc<dyn AccountServiceTrait>,
    ) -> Self {
        Self {
            repository,
            broker,
            account_service,
        }
    }

    /// Refreshes the catalog of base-status shares and bonds.
    ///
    /// A user without a system token is not an error: the refresh is skipped
    /// and `Ok(None)` returned so a scheduled run never crashes on missing
    /// credentials. Upserts already committed when a later API call fails
    /// remain in place; there is no transaction around the whole sync.
    pub async fn sync_catalog(&self, user_id: &str) -> Result<Option<CatalogSyncSummary>> {
        let token = match self.account_service.get_system_token(user_id)? {
            Some(token) => token,
            None => {
                warn!(
                    "Skipping catalog sync: no system token registered for user {}",
                    user_id
                );
                return Ok(None);
            }
        };

        let (shares, bonds) =
            futures::join!(self.broker.shares(&token), self.broker.bonds(&token));

        let mut summary = CatalogSyncSummary::default();

        for share in shares? {
            let stock = Stock::from(share);
            self.repository.upsert_stock(&stock)?;
            summary.stocks_upserted += 1;
        }

        // Stocks written above stay committed even when the bond fetch failed.
        for bond_dto in bonds? {
            let bond = Bond::from(bond_dto);
            self.repository.upsert_bond(&bond)?;
            summary.bonds_upserted += 1;
        }

        info!(
            "Catalog sync finished: {} stocks, {} bonds",
            summary.stocks_upserted, summary.bonds_upserted
        );

        Ok(Some(summary))
    }

    pub fn list_stocks(&self) -> Result<Vec<Stock>> {
        Ok(self.repository.list_stocks()?)
    }

    pub fn list_bonds(&self) -> Result<Vec<Bond>> {
        Ok(self.repository.list_bonds()?)
    }

    pub fn get_stock(&self, figi: &str) -> Result<Stock> {
        Ok(self.repository.get_stock(figi)?)
    }

    pub fn get_bond(&self, figi: &str) -> Result<Bond> {
        Ok(self.repository.get_bond(figi)?)
    }
}
