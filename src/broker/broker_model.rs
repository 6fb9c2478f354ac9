use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Two-part numeric value used by the brokerage API: integer units plus a
/// nano-fractional part in billionths, same sign as the units by convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    #[serde(deserialize_with = "de_i64_flexible", default)]
    pub units: i64,
    #[serde(default)]
    pub nano: i32,
}

impl Quotation {
    pub fn new(units: i64, nano: i32) -> Self {
        Self { units, nano }
    }

    /// Collapses the two-part representation into a plain double.
    pub fn as_f64(&self) -> f64 {
        self.units as f64 + self.nano as f64 / 1e9
    }
}

/// A `Quotation` tagged with its currency code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoneyValue {
    #[serde(default)]
    pub currency: String,
    #[serde(deserialize_with = "de_i64_flexible", default)]
    pub units: i64,
    #[serde(default)]
    pub nano: i32,
}

impl MoneyValue {
    pub fn as_f64(&self) -> f64 {
        Quotation::new(self.units, self.nano).as_f64()
    }
}

/// Date fields arrive from the provider either as a full RFC 3339 timestamp
/// or as a plain date. Normalized to `NaiveDate` once at the ingestion
/// boundary via [`DateValue::to_naive_date`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
}

impl DateValue {
    pub fn to_naive_date(self) -> NaiveDate {
        match self {
            DateValue::Timestamp(ts) => ts.date_naive(),
            DateValue::Date(date) => date,
        }
    }
}

/// The provider's proto-JSON gateway serializes int64 as a string; accept both.
fn de_i64_flexible<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| serde::de::Error::custom("int64 out of range")),
        serde_json::Value::String(s) => s
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid int64: {}", s))),
        serde_json::Value::Null => Ok(0),
        other => Err(serde::de::Error::custom(format!(
            "expected int64, got {}",
            other
        ))),
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareDto {
    pub figi: String,
    pub ticker: String,
    pub name: String,
    pub currency: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub country_of_risk: String,
    #[serde(default)]
    pub country_of_risk_name: String,
    pub exchange: String,
    #[serde(default = "default_lot")]
    pub lot: i32,
    #[serde(default)]
    pub nominal: Option<MoneyValue>,
    #[serde(default)]
    pub trading_status: String,
    #[serde(default)]
    pub ipo_date: Option<DateValue>,
}

fn default_lot() -> i32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondDto {
    pub figi: String,
    pub ticker: String,
    pub name: String,
    pub currency: String,
    #[serde(default)]
    pub maturity_date: Option<DateValue>,
    pub nominal: MoneyValue,
    #[serde(default)]
    pub coupon_quantity_per_year: i32,
    #[serde(default)]
    pub floating_coupon_flag: bool,
    #[serde(default)]
    pub perpetual_flag: bool,
    #[serde(default)]
    pub amortization_flag: bool,
    pub exchange: String,
    #[serde(default)]
    pub trading_status: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandleDto {
    pub time: DateTime<Utc>,
    pub open: Quotation,
    pub high: Quotation,
    pub low: Quotation,
    pub close: Quotation,
    #[serde(deserialize_with = "de_i64_flexible", default)]
    pub volume: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastPriceDto {
    pub figi: String,
    pub price: Quotation,
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerAccountDto {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionDto {
    pub figi: String,
    #[serde(default)]
    pub instrument_type: String,
    pub quantity: Quotation,
    #[serde(default)]
    pub expected_yield: Quotation,
    pub average_position_price: MoneyValue,
    #[serde(default)]
    pub current_nkd: Option<MoneyValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn quotation_collapses_units_and_nanos() {
        assert_eq!(Quotation::new(114, 250000000).as_f64(), 114.25);
        assert_eq!(Quotation::new(0, 0).as_f64(), 0.0);
        assert!((Quotation::new(-2, -500000000).as_f64() - (-2.5)).abs() < 1e-12);
    }

    #[test]
    fn money_value_keeps_currency() {
        let v = MoneyValue {
            currency: "usd".to_string(),
            units: 10,
            nano: 500_000_000,
        };
        assert_eq!(v.as_f64(), 10.5);
        assert_eq!(v.currency, "usd");
    }

    #[test]
    fn date_value_accepts_timestamp_or_plain_date() {
        let ts: DateValue = serde_json::from_str("\"2021-07-16T00:00:00Z\"").unwrap();
        assert_eq!(
            ts.to_naive_date(),
            NaiveDate::from_ymd_opt(2021, 7, 16).unwrap()
        );

        let plain: DateValue = serde_json::from_str("\"2021-07-16\"").unwrap();
        assert_eq!(
            plain.to_naive_date(),
            NaiveDate::from_ymd_opt(2021, 7, 16).unwrap()
        );
    }

    #[test]
    fn int64_fields_deserialize_from_strings() {
        let q: Quotation = serde_json::from_str(r#"{"units":"114","nano":250000000}"#).unwrap();
        assert_eq!(q.as_f64(), 114.25);

        let candle: CandleDto = serde_json::from_str(
            r#"{
                "time": "2024-01-02T10:00:00Z",
                "open": {"units": "100", "nano": 0},
                "high": {"units": "101", "nano": 0},
                "low": {"units": "99", "nano": 0},
                "close": {"units": "100", "nano": 500000000},
                "volume": "1250"
            }"#,
        )
        .unwrap();
        assert_eq!(candle.volume, 1250);
        assert_eq!(candle.close.as_f64(), 100.5);
    }
}
