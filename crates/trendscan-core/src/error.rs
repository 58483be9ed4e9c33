use thiserror::Error;

use crate::domain::TradingDate;

/// Validation errors raised when constructing domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("date must be calendar YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },

    #[error("unknown market '{value}', expected one of kospi, kosdaq")]
    UnknownMarket { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be positive")]
    NonPositiveValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("bar high must be >= low")]
    InvalidBarRange,
    #[error("bar open/close must be within high/low range")]
    InvalidBarBounds,

    #[error("grade threshold {value} must lie in [0, 100]")]
    GradeOutOfRange { value: String },
}

/// Caller contract violations on a price history handed to the indicator
/// pass. Insufficient history is NOT an error (windows come back `None`);
/// these fire only when the sequence itself is malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("duplicate observation date {date} at index {index}")]
    DuplicateDate { date: TradingDate, index: usize },
    #[error("observation dates out of order at index {index}: {prev} then {next}")]
    OutOfOrderDate {
        prev: TradingDate,
        next: TradingDate,
        index: usize,
    },
}

/// Errors surfaced by a [`PriceSeriesStore`](crate::store::PriceSeriesStore)
/// implementation. Backend details are carried as text so the engine stays
/// independent of any particular storage crate.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend: {0}")]
    Backend(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}
