//! Query operations over a fixed, immutable dataset.

use rust_decimal::Decimal;
use time::Date;
use tracing::debug;

use crate::domain::normalized_range_value;
use crate::error::QueryError;
use crate::{Dataset, DateRange, NormalizedRange, Observation, PriceStats, Symbol};

/// Answers analytic queries over the dataset injected at construction.
///
/// The dataset is never mutated or reloaded, so the engine is safe to share
/// across arbitrarily many concurrent callers without locking. Every query
/// is a synchronous scan; no query affects another.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    dataset: Dataset,
}

impl AnalyticsEngine {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// `(max - min) / min` over the symbol's full price history, rounded
    /// half-up.
    pub fn normalized_range_for_symbol(&self, symbol: &Symbol) -> Result<Decimal, QueryError> {
        debug!(%symbol, "computing normalized range");
        let stats = self.stats_for_symbol(symbol)?;
        Ok(normalized_range_value(stats.min, stats.max))
    }

    /// Every symbol scored by normalized range, highest first.
    ///
    /// Equal scores keep symbol-ascending order.
    pub fn ranked_by_normalized_range(&self) -> Result<Vec<NormalizedRange>, QueryError> {
        debug!("ranking all symbols by normalized range");
        let mut ranked = Vec::with_capacity(self.dataset.len());
        for symbol in self.dataset.symbols() {
            ranked.push(NormalizedRange {
                symbol: symbol.clone(),
                value: self.normalized_range_for_symbol(symbol)?,
            });
        }

        // Stable sort over symbol-ascending input.
        ranked.sort_by(|a, b| b.value.cmp(&a.value));
        Ok(ranked)
    }

    /// oldest/newest (by timestamp extremes, not list position) and min/max
    /// price over the symbol's full series.
    pub fn stats_for_symbol(&self, symbol: &Symbol) -> Result<PriceStats, QueryError> {
        debug!(%symbol, "computing stats");
        let series = self.series(symbol)?;
        stats_of(series.iter()).ok_or_else(|| QueryError::UnknownSymbol {
            symbol: symbol.to_string(),
        })
    }

    /// Stats restricted to observations whose UTC date falls inside the
    /// range, bounds inclusive.
    pub fn stats_for_symbol_in_range(
        &self,
        symbol: &Symbol,
        range: &DateRange,
    ) -> Result<PriceStats, QueryError> {
        debug!(%symbol, start = %range.start(), end = %range.end(), "computing windowed stats");
        let series = self.series(symbol)?;
        stats_of(series.iter().filter(|obs| range.contains(obs.ts.date()))).ok_or_else(|| {
            QueryError::EmptyWindow {
                symbol: symbol.to_string(),
            }
        })
    }

    /// The most volatile symbol among those with data on `date`.
    ///
    /// Presence on the date gates participation, but each participant is
    /// scored by its full-series normalized range. The maximum wins; on a
    /// tie the first symbol in ascending order is kept.
    pub fn highest_normalized_range_for_date(
        &self,
        date: Date,
    ) -> Result<NormalizedRange, QueryError> {
        debug!(%date, "ranking symbols present on date");
        let mut best: Option<NormalizedRange> = None;
        for (symbol, series) in self.dataset.iter() {
            if !series.iter().any(|obs| obs.ts.date() == date) {
                continue;
            }

            let value = self.normalized_range_for_symbol(symbol)?;
            if best.as_ref().is_none_or(|current| value > current.value) {
                best = Some(NormalizedRange {
                    symbol: symbol.clone(),
                    value,
                });
            }
        }

        best.ok_or(QueryError::NoDataForDate { date })
    }

    /// A symbol that is absent, or present with an empty series, reports
    /// the same not-found condition.
    fn series(&self, symbol: &Symbol) -> Result<&[Observation], QueryError> {
        match self.dataset.get(symbol) {
            Some(series) if !series.is_empty() => Ok(series),
            _ => Err(QueryError::UnknownSymbol {
                symbol: symbol.to_string(),
            }),
        }
    }
}

/// Single pass over the observations; ties on an extreme keep the first
/// occurrence. `None` for an empty iterator.
fn stats_of<'a>(observations: impl IntoIterator<Item = &'a Observation>) -> Option<PriceStats> {
    let mut iter = observations.into_iter();
    let first = iter.next()?;

    let mut oldest = first;
    let mut newest = first;
    let mut min = first.price;
    let mut max = first.price;

    for obs in iter {
        if obs.ts < oldest.ts {
            oldest = obs;
        }
        if obs.ts > newest.ts {
            newest = obs;
        }
        if obs.price < min {
            min = obs.price;
        }
        if obs.price > max {
            max = obs.price;
        }
    }

    Some(PriceStats {
        oldest: oldest.price,
        newest: newest.price,
        min,
        max,
    })
}
