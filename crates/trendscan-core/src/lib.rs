//! # Trendscan Core
//!
//! Domain contracts and the screening engine for trendscan: relative
//! strength momentum scoring, cross-sectional percentile ranking, and
//! trend-template funnel filtering over a universe of equities.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain`] | Validated domain types (Symbol, TradingDate, Instrument, PriceObservation) |
//! | [`momentum`] | Per-instrument indicator math: moving averages, rolling extremes, ROC, composite score |
//! | [`ranking`] | Cross-sectional rank and percentile grade over one date's score snapshot |
//! | [`template`] | Trend-template predicates and screening thresholds |
//! | [`store`] | The `PriceSeriesStore` trait between engine and storage |
//! | [`pipeline`] | Batch passes: momentum workers, ranking barrier, screening funnel |
//! | [`error`] | Validation, history-contract, and store error types |
//!
//! ## Shape of a run
//!
//! ```text
//! ┌──────────────────┐   per instrument   ┌───────────────────┐
//! │ PriceSeriesStore │ ─────────────────▶ │ momentum pass     │
//! │ (DuckDB, tests)  │ ◀───────────────── │ (worker threads)  │
//! └──────────────────┘   derived fields   └─────────┬─────────┘
//!          ▲                                        │ join
//!          │ rank/grade                   ┌─────────▼─────────┐
//!          └──────────────────────────────│ ranking barrier   │
//!                                         └─────────┬─────────┘
//!                                         ┌─────────▼─────────┐
//!                                         │ screening funnel  │
//!                                         └───────────────────┘
//! ```
//!
//! The engine is storage-agnostic: everything runs against
//! [`store::PriceSeriesStore`], with the DuckDB implementation living in
//! the `trendscan-warehouse` crate.

pub mod domain;
pub mod error;
pub mod momentum;
pub mod pipeline;
pub mod ranking;
pub mod store;
pub mod template;

pub use domain::{Instrument, Market, PriceObservation, Symbol, TradingDate};
pub use error::{HistoryError, StoreError, ValidationError};
pub use momentum::{compute_indicators, composite_momentum, IndicatorRow};
pub use pipeline::{
    run_analysis, run_momentum_pass, run_ranking_pass, run_screen, AnalysisReport, BatchReport,
    InstrumentFailure, MomentumScope, RankingReport, DEFAULT_WORKERS,
};
pub use ranking::{percentile_grade, rank_universe, MomentumScore, RankAssignment};
pub use store::{Candidate, DailySnapshot, PriceSeriesStore};
pub use template::{matches_trend_template, ScreenParams};
