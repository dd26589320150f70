//! Concurrent CSV ingestion.
//!
//! Reads every `*.csv` file in a configured directory, derives each file's
//! symbol from its name via a one-capture-group pattern, and parses rows of
//! `(epoch-millis timestamp, symbol, price)` into typed series. Files are
//! parsed concurrently, one task per file, joined before the call returns.
//! The first failure aborts the whole load; no partial dataset is ever
//! returned.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use futures::future::join_all;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{LoadError, MalformedDataError, ValidationError};
use crate::{Dataset, Observation, Series, Symbol, UtcDateTime};

const CSV_EXTENSION: &str = "csv";
const FIELDS_PER_ROW: usize = 3;

/// Loads a directory of per-symbol CSV files into a [`Dataset`].
#[derive(Debug, Clone)]
pub struct CsvLoader {
    directory: PathBuf,
    file_pattern: Regex,
}

impl CsvLoader {
    /// `file_pattern` must contain exactly one capture group, which yields
    /// the instrument symbol when matched against a file name.
    pub fn new(
        directory: impl Into<PathBuf>,
        file_pattern: Regex,
    ) -> Result<Self, ValidationError> {
        // captures_len counts the implicit whole-match group.
        if file_pattern.captures_len() != 2 {
            return Err(ValidationError::PatternShape {
                pattern: file_pattern.as_str().to_owned(),
            });
        }

        Ok(Self {
            directory: directory.into(),
            file_pattern,
        })
    }

    /// Load every matching file and combine the results into a [`Dataset`].
    ///
    /// All-or-nothing: an unreadable file, a file name that does not match
    /// the pattern, or a single malformed row fails the whole call.
    pub async fn load_all(&self) -> Result<Dataset, LoadError> {
        info!(directory = %self.directory.display(), "loading price histories");
        let files = self.csv_files()?;

        let mut tasks = Vec::with_capacity(files.len());
        for path in files {
            let symbol = self.symbol_for(&path)?;
            debug!(file = %path.display(), %symbol, "parsing price file");
            tasks.push((file_name_of(&path), tokio::spawn(parse_file(path, symbol))));
        }

        let (names, handles): (Vec<_>, Vec<_>) = tasks.into_iter().unzip();
        let outcomes = join_all(handles).await;

        let mut series = BTreeMap::new();
        for (file, joined) in names.into_iter().zip(outcomes) {
            let outcome = joined.map_err(|_| LoadError::TaskFailed { file: file.clone() })?;
            let (symbol, file_series) = outcome?;
            if series.insert(symbol.clone(), file_series).is_some() {
                return Err(ValidationError::DuplicateSymbol {
                    symbol: symbol.to_string(),
                }
                .into());
            }
        }

        info!(symbols = series.len(), "price histories loaded");
        Ok(Dataset::new(series))
    }

    fn csv_files(&self) -> Result<Vec<PathBuf>, LoadError> {
        let entries = fs::read_dir(&self.directory).map_err(|source| LoadError::Io {
            path: self.directory.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| LoadError::Io {
                path: self.directory.clone(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() && path.extension().and_then(OsStr::to_str) == Some(CSV_EXTENSION) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Derive the series key from the file name.
    ///
    /// Every `*.csv` file in the directory must conform to the pattern;
    /// a mismatch is a validation failure for the whole load.
    fn symbol_for(&self, path: &Path) -> Result<Symbol, ValidationError> {
        let file = file_name_of(path);
        let captured = self
            .file_pattern
            .captures(&file)
            .and_then(|captures| captures.get(1))
            .map(|capture| capture.as_str().to_owned())
            .ok_or_else(|| ValidationError::FileNameMismatch { file: file.clone() })?;

        Symbol::parse(&captured).map_err(|_| ValidationError::FileNameMismatch { file })
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(OsStr::to_str)
        .unwrap_or_default()
        .to_owned()
}

async fn parse_file(path: PathBuf, symbol: Symbol) -> Result<(Symbol, Series), LoadError> {
    let file = file_name_of(&path);
    let contents = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;

    // flexible: field-count policy is enforced per row, with line context.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let mut series = Series::new();
    for (index, record) in reader.records().enumerate() {
        // 1-based, counting the skipped header row.
        let line = index + 2;
        let record = record.map_err(|err| MalformedDataError::Csv {
            file: file.clone(),
            message: err.to_string(),
        })?;
        series.push(parse_row(&file, line, &record)?);
    }

    debug!(file = %file, rows = series.len(), "parsed price file");
    Ok((symbol, series))
}

fn parse_row(
    file: &str,
    line: usize,
    record: &csv::StringRecord,
) -> Result<Observation, MalformedDataError> {
    if record.len() != FIELDS_PER_ROW {
        return Err(MalformedDataError::FieldCount {
            file: file.to_owned(),
            line,
            found: record.len(),
        });
    }

    let millis: i64 = record[0].parse().map_err(|_| MalformedDataError::Timestamp {
        file: file.to_owned(),
        line,
        value: record[0].to_owned(),
    })?;
    let ts = UtcDateTime::from_epoch_millis(millis).map_err(|source| MalformedDataError::Field {
        file: file.to_owned(),
        line,
        source,
    })?;

    let symbol = Symbol::parse(&record[1]).map_err(|source| MalformedDataError::Field {
        file: file.to_owned(),
        line,
        source,
    })?;

    let price: Decimal = record[2].parse().map_err(|_| MalformedDataError::Price {
        file: file.to_owned(),
        line,
        value: record[2].to_owned(),
    })?;

    Observation::new(symbol, ts, price).map_err(|source| MalformedDataError::Field {
        file: file.to_owned(),
        line,
        source,
    })
}
