use serde::{Deserialize, Serialize};

use crate::broker::PositionDto;
use crate::constants::{COMMISSION_RATE, YIELD_TAX_RATE};

/// A valuated brokerage position. Transient: derived per query from the
/// brokerage API and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPosition {
    pub figi: String,
    pub name: String,
    pub instrument_type: String,
    pub quantity: f64,
    pub expected_yield: f64,
    pub average_buy_price: f64,
    pub currency: String,
    /// Accrued coupon interest on a bond position.
    pub nkd: f64,
    pub sell_sum: f64,
    pub commission: f64,
    pub tax: f64,
}

impl PortfolioPosition {
    /// Valuates a raw position in the reporting currency.
    ///
    /// Only USD positions are converted with `usd_rate`; any other foreign
    /// currency passes through unconverted, a known limitation carried over
    /// deliberately.
    pub fn from_raw(raw: &PositionDto, usd_rate: f64) -> Self {
        let quantity = raw.quantity.as_f64();
        let mut expected_yield = raw.expected_yield.as_f64();
        let mut average_buy_price = raw.average_position_price.as_f64();
        let mut nkd = raw.current_nkd.as_ref().map(|n| n.as_f64()).unwrap_or(0.0);

        let currency = raw.average_position_price.currency.clone();
        if currency.eq_ignore_ascii_case("usd") {
            expected_yield *= usd_rate;
            average_buy_price *= usd_rate;
            nkd *= usd_rate;
        }

        let sell_sum = average_buy_price * quantity + expected_yield + nkd * quantity;
        let commission = sell_sum * COMMISSION_RATE;
        let tax = if expected_yield > 0.0 {
            expected_yield * YIELD_TAX_RATE
        } else {
            0.0
        };

        Self {
            figi: raw.figi.clone(),
            name: String::new(),
            instrument_type: raw.instrument_type.clone(),
            quantity,
            expected_yield,
            average_buy_price,
            currency,
            nkd,
            sell_sum,
            commission,
            tax,
        }
    }
}
