//! The trend template: stage-1 predicates plus screening thresholds.

use serde::{Deserialize, Serialize};

use crate::momentum::NEAR_HIGH_RATIO;
use crate::store::DailySnapshot;
use crate::ValidationError;

/// Thresholds for one screening run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenParams {
    /// Instruments below this close are dropped in stage 1.
    pub min_price: f64,
    /// Minimum percentile grade kept in stage 3.
    pub min_grade: f64,
    /// Result cap; `None` is unbounded.
    pub limit: Option<usize>,
}

impl Default for ScreenParams {
    fn default() -> Self {
        Self {
            min_price: 20.0,
            min_grade: 70.0,
            limit: Some(100),
        }
    }
}

impl ScreenParams {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.min_price.is_finite() {
            return Err(ValidationError::NonFiniteValue { field: "min_price" });
        }
        if self.min_price < 0.0 {
            return Err(ValidationError::NegativeValue { field: "min_price" });
        }
        if !(0.0..=100.0).contains(&self.min_grade) {
            return Err(ValidationError::GradeOutOfRange {
                value: self.min_grade.to_string(),
            });
        }
        Ok(())
    }
}

/// Stage-1 predicate set. Every clause must hold; a missing derived
/// field fails the clause that reads it (exclusion, not an error).
///
/// The clauses only touch fields already materialized per instrument,
/// which is what makes stage 1 cheap enough to run before ranking.
pub fn matches_trend_template(snapshot: &DailySnapshot, min_price: f64) -> bool {
    let (Some(ma_50), Some(ma_150), Some(ma_200)) =
        (snapshot.ma_50, snapshot.ma_150, snapshot.ma_200)
    else {
        return false;
    };
    let (Some(trending_up), Some(high_252)) = (snapshot.ma_200_trending_up, snapshot.high_252)
    else {
        return false;
    };

    snapshot.close >= min_price
        && snapshot.close > ma_50
        && snapshot.close > ma_150
        && snapshot.close > ma_200
        && trending_up
        && snapshot.close >= NEAR_HIGH_RATIO * high_252
        && ma_50 > ma_150
        && ma_150 > ma_200
}
