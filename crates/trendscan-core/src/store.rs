//! The seam between the engine and its storage backend.
//!
//! The batch passes are written against [`PriceSeriesStore`] so the
//! DuckDB warehouse, or an in-memory double in tests, can sit behind
//! them interchangeably.

use serde::{Deserialize, Serialize};

use crate::momentum::IndicatorRow;
use crate::ranking::{MomentumScore, RankAssignment};
use crate::{Instrument, PriceObservation, StoreError, Symbol, TradingDate};

/// One instrument's observation row for an evaluation date, carrying the
/// derived fields the funnel filter reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySnapshot {
    pub ticker: Symbol,
    pub name: String,
    pub close: f64,
    pub ma_50: Option<f64>,
    pub ma_150: Option<f64>,
    pub ma_200: Option<f64>,
    pub ma_200_trending_up: Option<bool>,
    pub high_252: Option<f64>,
    pub rs_grade: Option<f64>,
}

/// Final screening output: one row per surviving instrument, ready for
/// presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub ticker: Symbol,
    pub name: String,
    pub close: f64,
    pub rs_grade: f64,
}

/// Read/write access to ordered daily price observations and their
/// derived analytic fields.
///
/// Implementations must be shareable across the momentum pass's worker
/// threads; each worker only ever writes rows for its own instruments.
pub trait PriceSeriesStore: Send + Sync {
    /// Active universe, the instruments a full pass iterates.
    fn instruments(&self) -> Result<Vec<Instrument>, StoreError>;

    /// Full price history for one instrument, ordered by date ascending.
    fn price_history(&self, ticker: &Symbol) -> Result<Vec<PriceObservation>, StoreError>;

    /// Most recent observation date across the whole universe, if any
    /// data exists at all.
    fn latest_date(&self) -> Result<Option<TradingDate>, StoreError>;

    /// Overwrite the derived indicator fields for the given rows of one
    /// instrument. Returns the number of rows written.
    fn upsert_indicators(&self, ticker: &Symbol, rows: &[IndicatorRow])
        -> Result<usize, StoreError>;

    /// Every non-null composite momentum score on the date.
    fn momentum_scores_on(&self, date: TradingDate) -> Result<Vec<MomentumScore>, StoreError>;

    /// Whether a ranking pass has populated rank/grade for the date.
    fn has_rankings(&self, date: TradingDate) -> Result<bool, StoreError>;

    /// Overwrite rank and grade for the date. Returns rows written.
    fn upsert_rankings(
        &self,
        date: TradingDate,
        rows: &[RankAssignment],
    ) -> Result<usize, StoreError>;

    /// Per-instrument snapshots for the date, one row per instrument
    /// with an observation on it.
    fn snapshots_on(&self, date: TradingDate) -> Result<Vec<DailySnapshot>, StoreError>;
}
