use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::constants::UNKNOWN_INSTRUMENT;
use crate::db::get_connection;
use crate::instruments::{InstrumentError, Result};
use crate::schema::{bonds, stocks};

use super::instruments_model::{Bond, Stock};
use super::instruments_traits::InstrumentNameLookup;

/// Repository for the instrument catalog
pub struct InstrumentRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl InstrumentRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<crate::db::DbConnection> {
        get_connection(&self.pool).map_err(|e| InstrumentError::DatabaseError(e.to_string()))
    }

    /// Inserts the stock or updates the existing record in place when the
    /// FIGI already exists. Each upsert is an independent, durable write.
    pub fn upsert_stock(&self, stock: &Stock) -> Result<()> {
        let mut conn = self.conn()?;

        diesel::insert_into(stocks::table)
            .values(stock)
            .on_conflict(stocks::figi)
            .do_update()
            .set(stock)
            .execute(&mut conn)?;

        Ok(())
    }

    /// Inserts the bond or updates the existing record in place.
    pub fn upsert_bond(&self, bond: &Bond) -> Result<()> {
        let mut conn = self.conn()?;

        diesel::insert_into(bonds::table)
            .values(bond)
            .on_conflict(bonds::figi)
            .do_update()
            .set(bond)
            .execute(&mut conn)?;

        Ok(())
    }

    pub fn get_stock(&self, instrument_figi: &str) -> Result<Stock> {
        let mut conn = self.conn()?;

        stocks::table
            .find(instrument_figi)
            .first::<Stock>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => InstrumentError::NotFound(format!(
                    "Stock with figi {} not found",
                    instrument_figi
                )),
                _ => InstrumentError::DatabaseError(e.to_string()),
            })
    }

    pub fn get_bond(&self, instrument_figi: &str) -> Result<Bond> {
        let mut conn = self.conn()?;

        bonds::table
            .find(instrument_figi)
            .first::<Bond>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => InstrumentError::NotFound(format!(
                    "Bond with figi {} not found",
                    instrument_figi
                )),
                _ => InstrumentError::DatabaseError(e.to_string()),
            })
    }

    pub fn list_stocks(&self) -> Result<Vec<Stock>> {
        let mut conn = self.conn()?;

        stocks::table
            .order(stocks::ticker.asc())
            .load::<Stock>(&mut conn)
            .map_err(|e| InstrumentError::DatabaseError(e.to_string()))
    }

    pub fn list_bonds(&self) -> Result<Vec<Bond>> {
        let mut conn = self.conn()?;

        bonds::table
            .order(bonds::ticker.asc())
            .load::<Bond>(&mut conn)
            .map_err(|e| InstrumentError::DatabaseError(e.to_string()))
    }
}

impl InstrumentNameLookup for InstrumentRepository {
    fn find_name(&self, instrument_figi: &str) -> Result<String> {
        let mut conn = self.conn()?;

        let stock_name = stocks::table
            .find(instrument_figi)
            .select(stocks::name)
            .first::<String>(&mut conn)
            .optional()
            .map_err(|e| InstrumentError::DatabaseError(e.to_string()))?;

        if let Some(name) = stock_name {
            return Ok(name);
        }

        let bond_name = bonds::table
            .find(instrument_figi)
            .select(bonds::name)
            .first::<String>(&mut conn)
            .optional()
            .map_err(|e| InstrumentError::DatabaseError(e.to_string()))?;

        Ok(bond_name.unwrap_or_else(|| UNKNOWN_INSTRUMENT.to_string()))
    }
}
