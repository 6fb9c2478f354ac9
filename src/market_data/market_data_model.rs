use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::broker::CandleDto;
use crate::errors::ValidationError;
use crate::market_data::market_data_errors::MarketDataError;

/// Symbolic chart duration selected on the form.
///
/// Month and year are calendar-naive approximations of 30 and 365 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartDuration {
    #[serde(rename = "1_hour")]
    OneHour,
    #[serde(rename = "1_day")]
    OneDay,
    #[serde(rename = "1_week")]
    OneWeek,
    #[serde(rename = "1_month")]
    OneMonth,
    #[serde(rename = "1_year")]
    OneYear,
}

impl ChartDuration {
    /// Resolves the range start by subtracting the duration's fixed offset.
    pub fn start_time(&self, end_time: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            ChartDuration::OneHour => end_time - ChronoDuration::hours(1),
            ChartDuration::OneDay => end_time - ChronoDuration::days(1),
            ChartDuration::OneWeek => end_time - ChronoDuration::days(7),
            ChartDuration::OneMonth => end_time - ChronoDuration::days(30),
            ChartDuration::OneYear => end_time - ChronoDuration::days(365),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartDuration::OneHour => "1_hour",
            ChartDuration::OneDay => "1_day",
            ChartDuration::OneWeek => "1_week",
            ChartDuration::OneMonth => "1_month",
            ChartDuration::OneYear => "1_year",
        }
    }
}

impl FromStr for ChartDuration {
    type Err = MarketDataError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "1_hour" => Ok(ChartDuration::OneHour),
            "1_day" => Ok(ChartDuration::OneDay),
            "1_week" => Ok(ChartDuration::OneWeek),
            "1_month" => Ok(ChartDuration::OneMonth),
            "1_year" => Ok(ChartDuration::OneYear),
            other => Err(MarketDataError::InvalidDuration(other.to_string())),
        }
    }
}

/// Candle bucket size selected on the form, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Min1,
    Min5,
    Min15,
    Hour1,
    Day1,
}

impl Granularity {
    pub fn minutes(&self) -> u32 {
        match self {
            Granularity::Min1 => 1,
            Granularity::Min5 => 5,
            Granularity::Min15 => 15,
            Granularity::Hour1 => 60,
            Granularity::Day1 => 1440,
        }
    }

    /// The provider's candle interval code for this bucket size.
    pub fn as_interval(&self) -> &'static str {
        match self {
            Granularity::Min1 => "CANDLE_INTERVAL_1_MIN",
            Granularity::Min5 => "CANDLE_INTERVAL_5_MIN",
            Granularity::Min15 => "CANDLE_INTERVAL_15_MIN",
            Granularity::Hour1 => "CANDLE_INTERVAL_HOUR",
            Granularity::Day1 => "CANDLE_INTERVAL_DAY",
        }
    }
}

impl TryFrom<u32> for Granularity {
    type Error = MarketDataError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        match minutes {
            1 => Ok(Granularity::Min1),
            5 => Ok(Granularity::Min5),
            15 => Ok(Granularity::Min15),
            60 => Ok(Granularity::Hour1),
            1440 => Ok(Granularity::Day1),
            other => Err(MarketDataError::InvalidGranularity(other)),
        }
    }
}

// The form encodes granularity as its minute value, not a variant name.
impl Serialize for Granularity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(self.minutes())
    }
}

impl<'de> Deserialize<'de> for Granularity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let minutes = u32::deserialize(deserializer)?;
        Granularity::try_from(minutes).map_err(serde::de::Error::custom)
    }
}

/// A single price bar. OHLC prices are normalized doubles, volume and
/// timestamp pass through from the provider unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl From<CandleDto> for Candle {
    fn from(dto: CandleDto) -> Self {
        Self {
            time: dto.time,
            open: dto.open.as_f64(),
            high: dto.high.as_f64(),
            low: dto.low.as_f64(),
            close: dto.close.as_f64(),
            volume: dto.volume,
        }
    }
}

/// The price-chart request form: exactly one instrument, an end date, a
/// duration and a candle granularity. Cross-field rules are enforced here,
/// before any network call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartQuery {
    pub stock_figi: Option<String>,
    pub bond_figi: Option<String>,
    pub end_date: NaiveDate,
    pub duration: ChartDuration,
    pub granularity: Granularity,
}

impl ChartQuery {
    pub fn validate(&self) -> crate::Result<()> {
        let has_stock = self.stock_figi.as_deref().is_some_and(|s| !s.is_empty());
        let has_bond = self.bond_figi.as_deref().is_some_and(|s| !s.is_empty());

        if has_stock && has_bond {
            return Err(ValidationError::InvalidInput(
                "Select only one security (a stock or a bond)".to_string(),
            )
            .into());
        }
        if !has_stock && !has_bond {
            return Err(ValidationError::InvalidInput(
                "Select a stock or a bond".to_string(),
            )
            .into());
        }

        use ChartDuration::*;
        let compatible = match self.granularity {
            Granularity::Min1 | Granularity::Min5 | Granularity::Min15 => {
                matches!(self.duration, OneHour | OneDay)
            }
            Granularity::Hour1 => matches!(self.duration, OneHour | OneDay | OneWeek),
            Granularity::Day1 => matches!(self.duration, OneDay | OneWeek | OneMonth | OneYear),
        };
        if !compatible {
            return Err(ValidationError::InvalidInput(format!(
                "A {}-minute candle interval is not available for duration {}",
                self.granularity.minutes(),
                self.duration.label()
            ))
            .into());
        }

        Ok(())
    }

    /// The FIGI of the selected instrument. Only meaningful after `validate`.
    pub fn figi(&self) -> Option<&str> {
        self.stock_figi
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.bond_figi.as_deref().filter(|s| !s.is_empty()))
    }
}
