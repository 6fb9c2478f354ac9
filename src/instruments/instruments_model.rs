use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::broker::{BondDto, ShareDto};
use crate::constants::NOT_AVAILABLE;

/// A share listed by the brokerage, keyed by its FIGI.
///
/// The FIGI namespace is shared with [`Bond`]: an identifier is unique across
/// both tables combined, so lookups must check both.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::stocks)]
#[diesel(primary_key(figi))]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub figi: String,
    pub ticker: String,
    pub name: String,
    pub currency: String,
    pub sector: String,
    pub country_of_risk: String,
    pub country_of_risk_name: String,
    pub exchange: String,
    pub lot: i32,
    pub nominal: Option<f64>,
    pub trading_status: String,
    pub ipo_date: Option<NaiveDate>,
}

impl From<ShareDto> for Stock {
    fn from(dto: ShareDto) -> Self {
        Self {
            figi: dto.figi,
            ticker: dto.ticker,
            name: dto.name,
            currency: dto.currency,
            sector: dto
                .sector
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            country_of_risk: dto.country_of_risk,
            country_of_risk_name: dto.country_of_risk_name,
            exchange: dto.exchange,
            lot: dto.lot,
            nominal: dto.nominal.map(|n| n.as_f64()),
            trading_status: dto.trading_status,
            ipo_date: dto.ipo_date.map(|d| d.to_naive_date()),
        }
    }
}

/// A bond listed by the brokerage, keyed by its FIGI.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::bonds)]
#[diesel(primary_key(figi))]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Bond {
    pub figi: String,
    pub ticker: String,
    pub name: String,
    pub currency: String,
    pub maturity_date: Option<NaiveDate>,
    pub nominal: f64,
    pub coupon_quantity_per_year: i32,
    pub floating_coupon_flag: bool,
    pub perpetual_flag: bool,
    pub amortization_flag: bool,
    pub exchange: String,
    pub trading_status: String,
}

impl From<BondDto> for Bond {
    fn from(dto: BondDto) -> Self {
        Self {
            figi: dto.figi,
            ticker: dto.ticker,
            name: dto.name,
            currency: dto.currency,
            maturity_date: dto.maturity_date.map(|d| d.to_naive_date()),
            nominal: dto.nominal.as_f64(),
            coupon_quantity_per_year: dto.coupon_quantity_per_year,
            floating_coupon_flag: dto.floating_coupon_flag,
            perpetual_flag: dto.perpetual_flag,
            amortization_flag: dto.amortization_flag,
            exchange: dto.exchange,
            trading_status: dto.trading_status,
        }
    }
}

/// Counters returned by a catalog refresh run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSyncSummary {
    pub stocks_upserted: usize,
    pub bonds_upserted: usize,
}
