use cryptick_core::{NormalizedRange, PriceStats};
use rust_decimal::Decimal;
use serde::Serialize;

/// Wire shape for a symbol scored by normalized range.
#[derive(Debug, Serialize)]
pub struct NormalizedRangeDto {
    pub symbol: String,
    #[serde(rename = "normalizedRange")]
    pub normalized_range: Decimal,
}

impl From<NormalizedRange> for NormalizedRangeDto {
    fn from(value: NormalizedRange) -> Self {
        Self {
            symbol: value.symbol.to_string(),
            normalized_range: value.value,
        }
    }
}

/// Wire shape for per-symbol price statistics.
#[derive(Debug, Serialize)]
pub struct StatsDto {
    pub oldest: Decimal,
    pub newest: Decimal,
    pub min: Decimal,
    pub max: Decimal,
}

impl From<PriceStats> for StatsDto {
    fn from(value: PriceStats) -> Self {
        Self {
            oldest: value.oldest,
            newest: value.newest,
            min: value.min,
            max: value.max,
        }
    }
}
