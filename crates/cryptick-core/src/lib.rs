//! # Cryptick Core
//!
//! Ingestion and analytics core for the cryptick price service.
//!
//! ## Overview
//!
//! This crate loads per-symbol CSV price histories into an immutable
//! in-memory dataset and answers analytic queries over it:
//!
//! - **Normalized range** `(max - min) / min` per symbol, and a full
//!   descending ranking of all symbols
//! - **Price statistics** (oldest/newest/min/max) per symbol, optionally
//!   restricted to a calendar-day window
//! - **Highest normalized range** among symbols with data on a given date
//!
//! Prices are exact decimals; normalized ranges divide with half-up
//! rounding. Ingestion is concurrent per file and all-or-nothing: one bad
//! file name or malformed row fails the whole load.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`dataset`] | Immutable symbol-to-series mapping |
//! | [`domain`] | Validated value objects (symbols, observations, stats) |
//! | [`engine`] | Query operations over a loaded dataset |
//! | [`error`] | Validation, malformed-data, load, and query errors |
//! | [`loader`] | Concurrent per-file CSV ingestion |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cryptick_core::{AnalyticsEngine, CsvLoader, Symbol};
//! use regex::Regex;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pattern = Regex::new(r"^([A-Za-z]+)_values\.csv$")?;
//!     let loader = CsvLoader::new("data", pattern)?;
//!     let engine = AnalyticsEngine::new(loader.load_all().await?);
//!
//!     let btc = Symbol::parse("BTC")?;
//!     println!("BTC normalized range: {}", engine.normalized_range_for_symbol(&btc)?);
//!     Ok(())
//! }
//! ```

pub mod dataset;
pub mod domain;
pub mod engine;
pub mod error;
pub mod loader;

pub use dataset::Dataset;
pub use domain::{
    parse_date, DateRange, NormalizedRange, Observation, PriceStats, Series, Symbol, UtcDateTime,
};
pub use engine::AnalyticsEngine;
pub use error::{LoadError, MalformedDataError, QueryError, ValidationError};
pub use loader::CsvLoader;
