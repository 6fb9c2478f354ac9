use crate::instruments::Result;

/// Resolves a FIGI to a display name across both instrument tables.
pub trait InstrumentNameLookup: Send + Sync {
    /// Returns the instrument's display name, or a fixed fallback when the
    /// FIGI resolves to neither a stock nor a bond.
    fn find_name(&self, figi: &str) -> Result<String>;
}
