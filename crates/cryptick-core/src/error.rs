use std::path::PathBuf;

use thiserror::Error;

/// Input-shape errors: bad file names, bad symbols, bad dates.
///
/// Raised before any data is loaded or any query reaches the engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid file name format: {file}")]
    FileNameMismatch { file: String },

    #[error("file pattern must contain exactly one capture group: '{pattern}'")]
    PatternShape { pattern: String },

    #[error("duplicate series for symbol: {symbol}")]
    DuplicateSymbol { symbol: String },

    #[error("Invalid date format. Please use yyyy-MM-dd.")]
    DateFormat { value: String },

    #[error("Start date must be before end date!")]
    InvertedRange,

    #[error("A valid time range needs to be provided!")]
    OneSidedRange,

    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("timestamp {millis}ms is outside the representable range")]
    TimestampOutOfRange { millis: i64 },

    #[error("price must be positive: {value}")]
    NonPositivePrice { value: String },
}

/// Unparseable source rows or fields, with file and 1-based line context.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedDataError {
    #[error("malformed row in {file} line {line}: expected 3 fields, found {found}")]
    FieldCount {
        file: String,
        line: usize,
        found: usize,
    },

    #[error("malformed timestamp '{value}' in {file} line {line}")]
    Timestamp {
        file: String,
        line: usize,
        value: String,
    },

    #[error("malformed price '{value}' in {file} line {line}")]
    Price {
        file: String,
        line: usize,
        value: String,
    },

    #[error("invalid field in {file} line {line}: {source}")]
    Field {
        file: String,
        line: usize,
        source: ValidationError,
    },

    #[error("cannot decode {file}: {message}")]
    Csv { file: String, message: String },
}

/// Umbrella error for the all-or-nothing ingestion call.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Malformed(#[from] MalformedDataError),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ingestion task for {file} did not complete")]
    TaskFailed { file: String },
}

/// Not-found conditions reported by the analytics engine.
///
/// Messages are part of the public contract and surface verbatim at the
/// service boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("No data found for symbol: {symbol}")]
    UnknownSymbol { symbol: String },

    #[error("No data found for symbol: {symbol} in the specified time range")]
    EmptyWindow { symbol: String },

    #[error("No cryptocurrencies found with valid data for the date: {date}")]
    NoDataForDate { date: time::Date },
}
