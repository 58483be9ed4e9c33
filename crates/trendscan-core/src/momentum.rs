//! Indicator math for the per-instrument momentum pass.
//!
//! Everything here is pure: an ordered price history goes in, one derived
//! row per observation comes out. Persistence happens in the pipeline
//! layer through [`PriceSeriesStore`](crate::store::PriceSeriesStore).
//!
//! Windows count observations, not calendar days, so exchange holidays
//! and halts are tolerated without special cases. A window of length W
//! needs W observations ending at the row in question; with fewer, the
//! field is `None` rather than an error.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::{HistoryError, PriceObservation, TradingDate};

/// Short/intermediate/long moving-average windows.
pub const MA_SHORT: usize = 50;
pub const MA_MID: usize = 150;
pub const MA_LONG: usize = 200;

/// One trading year of daily observations; drives the rolling extremes
/// and the longest ROC lookback.
pub const YEAR_WINDOW: usize = 252;

/// Lag (in observations) for the long moving-average trend test: MA200 is
/// "trending up" iff it exceeds its own value this many rows earlier.
pub const MA_TREND_LAG: usize = 20;

/// ROC lookbacks: one year, six months, one quarter, one month.
pub const ROC_WINDOWS: [usize; 4] = [252, 126, 63, 21];

/// IBD-style composite weights, aligned with [`ROC_WINDOWS`]. Sum to 1.
pub const ROC_WEIGHTS: [f64; 4] = [0.4, 0.2, 0.2, 0.2];

/// Close must reach this fraction of the 52-week high to count as near it.
pub const NEAR_HIGH_RATIO: f64 = 0.75;

/// Close must clear the 52-week low by this multiple to count as
/// recovered off the low.
pub const ABOVE_LOW_RATIO: f64 = 1.25;

/// Derived analytic fields for one observation date.
///
/// `None` means the trailing window was not yet full on that date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub date: TradingDate,
    pub ma_50: Option<f64>,
    pub ma_150: Option<f64>,
    pub ma_200: Option<f64>,
    pub ma_200_prior: Option<f64>,
    pub ma_200_trending_up: Option<bool>,
    pub high_252: Option<f64>,
    pub low_252: Option<f64>,
    pub near_high_252: Option<bool>,
    pub above_low_252: Option<bool>,
    pub roc_252: Option<f64>,
    pub roc_126: Option<f64>,
    pub roc_63: Option<f64>,
    pub roc_21: Option<f64>,
    pub rs_momentum: Option<f64>,
}

/// Compute every derived column for every observation in one pass.
///
/// The history must be ordered by date ascending with no duplicates;
/// anything else is a caller bug reported as [`HistoryError`], and the
/// instrument's pass should be skipped. Re-running over the same history
/// yields identical rows.
pub fn compute_indicators(history: &[PriceObservation]) -> Result<Vec<IndicatorRow>, HistoryError> {
    validate_dates(history)?;

    let closes: Vec<f64> = history.iter().map(|obs| obs.close).collect();
    let highs: Vec<f64> = history.iter().map(|obs| obs.high).collect();
    let lows: Vec<f64> = history.iter().map(|obs| obs.low).collect();

    let ma_50 = sma(&closes, MA_SHORT);
    let ma_150 = sma(&closes, MA_MID);
    let ma_200 = sma(&closes, MA_LONG);
    let high_252 = rolling_max(&highs, YEAR_WINDOW);
    let low_252 = rolling_min(&lows, YEAR_WINDOW);
    let roc_252 = roc(&closes, ROC_WINDOWS[0]);
    let roc_126 = roc(&closes, ROC_WINDOWS[1]);
    let roc_63 = roc(&closes, ROC_WINDOWS[2]);
    let roc_21 = roc(&closes, ROC_WINDOWS[3]);

    let rows = history
        .iter()
        .enumerate()
        .map(|(i, obs)| {
            let ma_200_prior = if i >= MA_TREND_LAG {
                ma_200[i - MA_TREND_LAG]
            } else {
                None
            };
            let ma_200_trending_up = match (ma_200[i], ma_200_prior) {
                (Some(current), Some(prior)) => Some(current > prior),
                _ => None,
            };

            IndicatorRow {
                date: obs.date,
                ma_50: ma_50[i],
                ma_150: ma_150[i],
                ma_200: ma_200[i],
                ma_200_prior,
                ma_200_trending_up,
                high_252: high_252[i],
                low_252: low_252[i],
                near_high_252: high_252[i].map(|h| obs.close >= NEAR_HIGH_RATIO * h),
                above_low_252: low_252[i].map(|l| obs.close >= ABOVE_LOW_RATIO * l),
                roc_252: roc_252[i],
                roc_126: roc_126[i],
                roc_63: roc_63[i],
                roc_21: roc_21[i],
                rs_momentum: composite_momentum(roc_252[i], roc_126[i], roc_63[i], roc_21[i]),
            }
        })
        .collect();

    Ok(rows)
}

/// Weighted composite of the four ROC horizons. `None` if any component
/// is missing; partial weights are never renormalized.
pub fn composite_momentum(
    roc_252: Option<f64>,
    roc_126: Option<f64>,
    roc_63: Option<f64>,
    roc_21: Option<f64>,
) -> Option<f64> {
    Some(
        ROC_WEIGHTS[0] * roc_252?
            + ROC_WEIGHTS[1] * roc_126?
            + ROC_WEIGHTS[2] * roc_63?
            + ROC_WEIGHTS[3] * roc_21?,
    )
}

fn validate_dates(history: &[PriceObservation]) -> Result<(), HistoryError> {
    for (offset, pair) in history.windows(2).enumerate() {
        let (prev, next) = (pair[0].date, pair[1].date);
        let index = offset + 1;
        if next == prev {
            return Err(HistoryError::DuplicateDate { date: next, index });
        }
        if next < prev {
            return Err(HistoryError::OutOfOrderDate { prev, next, index });
        }
    }
    Ok(())
}

/// Simple moving average over exactly `window` trailing values.
fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, &value) in values.iter().enumerate() {
        sum += value;
        if i >= window {
            sum -= values[i - window];
        }
        out.push((i + 1 >= window).then(|| sum / window as f64));
    }
    out
}

/// Rate of change over a `window`-observation trailing span, in percent:
/// the last close of the window against its first.
fn roc(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    (0..closes.len())
        .map(|i| (i + 1 >= window).then(|| (closes[i] / closes[i + 1 - window] - 1.0) * 100.0))
        .collect()
}

fn rolling_max(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling_extreme(values, window, |candidate, incumbent| candidate >= incumbent)
}

fn rolling_min(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling_extreme(values, window, |candidate, incumbent| candidate <= incumbent)
}

/// Monotonic-deque rolling extreme; `displaces` says whether a new value
/// evicts an older one from the back of the deque.
fn rolling_extreme(
    values: &[f64],
    window: usize,
    displaces: impl Fn(f64, f64) -> bool,
) -> Vec<Option<f64>> {
    let mut deque: VecDeque<usize> = VecDeque::new();
    let mut out = Vec::with_capacity(values.len());

    for i in 0..values.len() {
        while deque.front().is_some_and(|&front| front + window <= i) {
            deque.pop_front();
        }
        while deque
            .back()
            .is_some_and(|&back| displaces(values[i], values[back]))
        {
            deque.pop_back();
        }
        deque.push_back(i);

        let extreme_index = *deque.front().expect("deque holds the current index");
        out.push((i + 1 >= window).then(|| values[extreme_index]));
    }

    out
}
