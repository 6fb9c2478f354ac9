/// Category assigned to imported transactions with a blank category column.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Sentinel for optional instrument fields the provider leaves empty.
pub const NOT_AVAILABLE: &str = "N/A";

/// Display name used when a FIGI resolves to neither a stock nor a bond.
pub const UNKNOWN_INSTRUMENT: &str = "Unknown";

/// Reference instrument used to fetch the USD conversion rate.
pub const USD_REFERENCE_FIGI: &str = "USD000UTSTOM";

/// Brokerage commission applied to the liquidation value of a position.
pub const COMMISSION_RATE: f64 = 0.003;

/// Income tax rate applied to positive expected yield.
pub const YIELD_TAX_RATE: f64 = 0.013;

/// Date-time format of the bank CSV export's operation date column.
pub const CSV_DATE_FORMAT: &str = "%d.%m.%Y %H:%M:%S";
