//! Cross-sectional ranking behavior through the warehouse: grade
//! arithmetic, idempotence, and the stale-ranking recovery path.

use tempfile::tempdir;

use trendscan_core::momentum::IndicatorRow;
use trendscan_core::{
    run_ranking_pass, run_screen, PriceObservation, PriceSeriesStore, ScreenParams, TradingDate,
};
use trendscan_tests::{open_temp_warehouse, seed_instrument, ticker};
use trendscan_warehouse::Warehouse;

const DATE: &str = "2024-06-03";

fn seed_scored_instrument(warehouse: &Warehouse, raw: &str, close: f64, rs_momentum: f64) {
    let date = TradingDate::parse(DATE).expect("date");
    let observation =
        PriceObservation::new(date, close, close * 1.02, close * 0.98, close, Some(1_000))
            .expect("observation");
    seed_instrument(warehouse, raw, &format!("{raw} Corp"), &[observation]);

    // A hand-built derived row: fully aligned template fields plus the
    // composite score under test.
    let row = IndicatorRow {
        date,
        ma_50: Some(close * 0.9),
        ma_150: Some(close * 0.8),
        ma_200: Some(close * 0.7),
        ma_200_prior: Some(close * 0.69),
        ma_200_trending_up: Some(true),
        high_252: Some(close * 1.05),
        low_252: Some(close * 0.5),
        near_high_252: Some(true),
        above_low_252: Some(true),
        roc_252: Some(rs_momentum),
        roc_126: Some(rs_momentum),
        roc_63: Some(rs_momentum),
        roc_21: Some(rs_momentum),
        rs_momentum: Some(rs_momentum),
    };
    warehouse
        .upsert_indicators(&ticker(raw), &[row])
        .expect("indicators");
}

#[test]
fn three_scores_rank_into_grades_100_50_0() {
    let temp = tempdir().expect("tempdir");
    let warehouse = open_temp_warehouse(temp.path());
    let date = TradingDate::parse(DATE).expect("date");

    seed_scored_instrument(&warehouse, "000100", 50.0, 30.0);
    seed_scored_instrument(&warehouse, "000200", 50.0, 10.0);
    seed_scored_instrument(&warehouse, "000300", 50.0, 20.0);

    let report = run_ranking_pass(&warehouse, date).expect("ranking");
    assert_eq!(report.ranked, 3);

    let snapshots = warehouse.snapshots_on(date).expect("snapshots");
    let grade_of = |raw: &str| -> f64 {
        snapshots
            .iter()
            .find(|s| s.ticker == ticker(raw))
            .and_then(|s| s.rs_grade)
            .expect("graded")
    };

    assert_eq!(grade_of("000100"), 100.0);
    assert_eq!(grade_of("000300"), 50.0);
    assert_eq!(grade_of("000200"), 0.0);
}

#[test]
fn reranking_unchanged_scores_changes_nothing() {
    let temp = tempdir().expect("tempdir");
    let warehouse = open_temp_warehouse(temp.path());
    let date = TradingDate::parse(DATE).expect("date");

    seed_scored_instrument(&warehouse, "000100", 50.0, 30.0);
    seed_scored_instrument(&warehouse, "000200", 50.0, 10.0);

    run_ranking_pass(&warehouse, date).expect("first ranking");
    let first = warehouse.snapshots_on(date).expect("snapshots");

    run_ranking_pass(&warehouse, date).expect("second ranking");
    let second = warehouse.snapshots_on(date).expect("snapshots");

    assert_eq!(first, second);
}

#[test]
fn equal_scores_rank_deterministically_by_ticker() {
    let temp = tempdir().expect("tempdir");
    let warehouse = open_temp_warehouse(temp.path());
    let date = TradingDate::parse(DATE).expect("date");

    seed_scored_instrument(&warehouse, "000200", 50.0, 15.0);
    seed_scored_instrument(&warehouse, "000100", 50.0, 15.0);

    run_ranking_pass(&warehouse, date).expect("ranking");

    let result = warehouse
        .execute_query(
            "SELECT ticker, rs_rank FROM daily_prices ORDER BY rs_rank",
            trendscan_warehouse::QueryGuardrails::default(),
            false,
        )
        .expect("query");
    assert_eq!(result.rows[0][0].as_str(), Some("000100"));
    assert_eq!(result.rows[1][0].as_str(), Some("000200"));
}

#[test]
fn screen_recovers_from_missing_rankings_on_its_own() {
    let temp = tempdir().expect("tempdir");
    let warehouse = open_temp_warehouse(temp.path());
    let date = TradingDate::parse(DATE).expect("date");

    seed_scored_instrument(&warehouse, "000100", 50.0, 30.0);
    seed_scored_instrument(&warehouse, "000200", 50.0, 10.0);

    assert!(!warehouse.has_rankings(date).expect("has_rankings"));

    let params = ScreenParams {
        min_grade: 50.0,
        ..ScreenParams::default()
    };
    let candidates = run_screen(&warehouse, date, &params).expect("screen");

    // The screen ranked the date itself and kept only the top grade.
    assert!(warehouse.has_rankings(date).expect("has_rankings"));
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].ticker, ticker("000100"));
    assert_eq!(candidates[0].rs_grade, 100.0);
}
