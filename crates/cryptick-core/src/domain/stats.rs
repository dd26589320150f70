use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::Symbol;

/// Price aggregates over a series or a date-filtered slice of one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceStats {
    pub oldest: Decimal,
    pub newest: Decimal,
    pub min: Decimal,
    pub max: Decimal,
}

/// A symbol scored by its normalized price range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRange {
    pub symbol: Symbol,
    pub value: Decimal,
}

/// `(max - min) / min`, rounded half-up to the scale of the numerator.
///
/// The quotient inherits the dividend's scale, so two-decimal prices yield
/// a two-decimal range. Callers guarantee `min > 0`.
pub fn normalized_range_value(min: Decimal, max: Decimal) -> Decimal {
    let spread = max - min;
    (spread / min).round_dp_with_strategy(spread.scale(), RoundingStrategy::MidpointAwayFromZero)
}
