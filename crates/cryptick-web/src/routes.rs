//! Route table and handlers.
//!
//! Thin request adapters: bind path/query parameters, run the pre-query
//! validation gate, call the engine, and serialize the result. No analytics
//! logic lives here.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use cryptick_core::{parse_date, AnalyticsEngine, DateRange, Symbol, ValidationError};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::dto::{NormalizedRangeDto, StatsDto};
use crate::error::ApiError;

pub type SharedEngine = Arc<AnalyticsEngine>;

pub fn router(engine: SharedEngine) -> Router {
    Router::new()
        .route(
            "/cryptos/sorted-by-normalized-range",
            get(sorted_by_normalized_range),
        )
        .route(
            "/cryptos/:symbol/normalized-range",
            get(normalized_range_for_symbol),
        )
        .route("/cryptos/:symbol/stats", get(stats_for_symbol))
        .route(
            "/cryptos/highest-normalized-range/:date",
            get(highest_normalized_range),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}

#[derive(Debug, Deserialize)]
struct StatsParams {
    #[serde(rename = "startDate")]
    start_date: Option<String>,
    #[serde(rename = "endDate")]
    end_date: Option<String>,
}

impl StatsParams {
    /// Both bounds or neither; an empty string counts as absent, so
    /// `?startDate=2022-01-01&endDate=` is a one-sided (rejected) window.
    fn window(&self) -> Result<Option<DateRange>, ValidationError> {
        let start = self.start_date.as_deref().filter(|value| !value.is_empty());
        let end = self.end_date.as_deref().filter(|value| !value.is_empty());

        match (start, end) {
            (None, None) => Ok(None),
            (Some(start), Some(end)) => DateRange::parse(start, end).map(Some),
            _ => Err(ValidationError::OneSidedRange),
        }
    }
}

async fn sorted_by_normalized_range(
    State(engine): State<SharedEngine>,
) -> Result<Json<Vec<NormalizedRangeDto>>, ApiError> {
    let ranked = engine.ranked_by_normalized_range()?;
    Ok(Json(ranked.into_iter().map(NormalizedRangeDto::from).collect()))
}

async fn normalized_range_for_symbol(
    State(engine): State<SharedEngine>,
    Path(symbol): Path<String>,
) -> Result<Json<NormalizedRangeDto>, ApiError> {
    let symbol = Symbol::parse(&symbol)?;
    let value = engine.normalized_range_for_symbol(&symbol)?;
    Ok(Json(NormalizedRangeDto {
        symbol: symbol.to_string(),
        normalized_range: value,
    }))
}

async fn stats_for_symbol(
    State(engine): State<SharedEngine>,
    Path(symbol): Path<String>,
    Query(params): Query<StatsParams>,
) -> Result<Json<StatsDto>, ApiError> {
    let symbol = Symbol::parse(&symbol)?;
    let stats = match params.window()? {
        Some(range) => engine.stats_for_symbol_in_range(&symbol, &range)?,
        None => engine.stats_for_symbol(&symbol)?,
    };

    Ok(Json(stats.into()))
}

async fn highest_normalized_range(
    State(engine): State<SharedEngine>,
    Path(date): Path<String>,
) -> Result<Json<NormalizedRangeDto>, ApiError> {
    let date = parse_date(&date)?;
    let best = engine.highest_normalized_range_for_date(date)?;
    Ok(Json(best.into()))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use cryptick_core::{Dataset, Observation, UtcDateTime};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    fn observation(symbol: &Symbol, millis: i64, price: Decimal) -> Observation {
        Observation::new(
            symbol.clone(),
            UtcDateTime::from_epoch_millis(millis).expect("timestamp"),
            price,
        )
        .expect("observation")
    }

    /// BTC and ETH with three same-day observations each (2022-01-01).
    fn test_router() -> Router {
        let btc = Symbol::parse("BTC").expect("symbol");
        let eth = Symbol::parse("ETH").expect("symbol");

        let mut series = BTreeMap::new();
        series.insert(
            btc.clone(),
            vec![
                observation(&btc, 1_641_013_200_000, dec!(36823.19)),
                observation(&btc, 1_641_016_200_000, dec!(38161.69)),
                observation(&btc, 1_641_017_200_000, dec!(35201.17)),
            ],
        );
        series.insert(
            eth.clone(),
            vec![
                observation(&eth, 1_641_013_200_000, dec!(39856.49)),
                observation(&eth, 1_641_016_200_000, dec!(45636.34)),
                observation(&eth, 1_641_017_200_000, dec!(34857.67)),
            ],
        );

        router(Arc::new(AnalyticsEngine::new(Dataset::new(series))))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let json = serde_json::from_slice(&bytes).expect("json body");
        (status, json)
    }

    #[tokio::test]
    async fn ranking_is_descending_with_camel_case_fields() {
        let (status, body) = get_json("/cryptos/sorted-by-normalized-range").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["symbol"], "ETH");
        assert_eq!(body[0]["normalizedRange"], "0.31");
        assert_eq!(body[1]["symbol"], "BTC");
        assert_eq!(body[1]["normalizedRange"], "0.08");
    }

    #[tokio::test]
    async fn single_symbol_normalized_range() {
        let (status, body) = get_json("/cryptos/BTC/normalized-range").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["symbol"], "BTC");
        assert_eq!(body["normalizedRange"], "0.08");
    }

    #[tokio::test]
    async fn stats_without_window_covers_the_full_series() {
        let (status, body) = get_json("/cryptos/BTC/stats").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["oldest"], "36823.19");
        assert_eq!(body["newest"], "35201.17");
        assert_eq!(body["min"], "35201.17");
        assert_eq!(body["max"], "38161.69");
    }

    #[tokio::test]
    async fn stats_with_window_filters_by_date() {
        let (status, _) =
            get_json("/cryptos/BTC/stats?startDate=2022-01-01&endDate=2022-01-01").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) =
            get_json("/cryptos/BTC/stats?startDate=2023-01-01&endDate=2023-02-01").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body["errorMessage"],
            "No data found for symbol: BTC in the specified time range"
        );
    }

    #[tokio::test]
    async fn unknown_symbol_is_not_found() {
        let (status, body) = get_json("/cryptos/ZZZ/stats").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errorType"], "Not Found");
        assert_eq!(body["errorMessage"], "No data found for symbol: ZZZ");
    }

    #[tokio::test]
    async fn inverted_window_is_a_client_error() {
        let (status, body) =
            get_json("/cryptos/BTC/stats?startDate=2022-03-01&endDate=2022-01-01").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errorMessage"], "Start date must be before end date!");
    }

    #[tokio::test]
    async fn one_sided_window_is_a_client_error() {
        let (status, body) = get_json("/cryptos/BTC/stats?startDate=2022-01-01&endDate=").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["errorMessage"],
            "A valid time range needs to be provided!"
        );
    }

    #[tokio::test]
    async fn malformed_date_is_a_client_error() {
        let (status, body) = get_json("/cryptos/highest-normalized-range/2023-10-011").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["errorMessage"],
            "Invalid date format. Please use yyyy-MM-dd."
        );
    }

    #[tokio::test]
    async fn highest_normalized_range_for_covered_date() {
        let (status, body) = get_json("/cryptos/highest-normalized-range/2022-01-01").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["symbol"], "ETH");
        assert_eq!(body["normalizedRange"], "0.31");
    }

    #[tokio::test]
    async fn highest_normalized_range_for_uncovered_date() {
        let (status, body) = get_json("/cryptos/highest-normalized-range/2025-01-01").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body["errorMessage"],
            "No cryptocurrencies found with valid data for the date: 2025-01-01"
        );
    }
}
