use rust_decimal::Decimal;
use serde::Serialize;

use crate::{Symbol, UtcDateTime, ValidationError};

/// One timestamped price sample for a symbol. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Observation {
    pub symbol: Symbol,
    pub ts: UtcDateTime,
    pub price: Decimal,
}

impl Observation {
    /// Price must be strictly positive.
    pub fn new(symbol: Symbol, ts: UtcDateTime, price: Decimal) -> Result<Self, ValidationError> {
        if price <= Decimal::ZERO {
            return Err(ValidationError::NonPositivePrice {
                value: price.to_string(),
            });
        }

        Ok(Self { symbol, ts, price })
    }
}

/// Observations for one symbol, in source order; not assumed time-sorted.
pub type Series = Vec<Observation>;

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn symbol() -> Symbol {
        Symbol::parse("BTC").expect("symbol")
    }

    fn ts() -> UtcDateTime {
        UtcDateTime::from_epoch_millis(1_641_013_200_000).expect("timestamp")
    }

    #[test]
    fn accepts_positive_price() {
        let obs = Observation::new(symbol(), ts(), dec!(36823.19)).expect("must construct");
        assert_eq!(obs.price, dec!(36823.19));
    }

    #[test]
    fn rejects_zero_price() {
        let err = Observation::new(symbol(), ts(), Decimal::ZERO).expect_err("must fail");
        assert!(matches!(err, ValidationError::NonPositivePrice { .. }));
    }

    #[test]
    fn rejects_negative_price() {
        let err = Observation::new(symbol(), ts(), dec!(-0.01)).expect_err("must fail");
        assert!(matches!(err, ValidationError::NonPositivePrice { .. }));
    }
}
