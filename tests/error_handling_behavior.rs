//! How the pipeline behaves when data is missing or wrong: empty
//! universes, short histories, and guardrail rejections.

use tempfile::tempdir;

use trendscan_core::{
    run_momentum_pass, run_ranking_pass, run_screen, MomentumScope, PriceSeriesStore, ScreenParams,
    TradingDate,
};
use trendscan_tests::{linear_history, open_temp_warehouse, seed_instrument};
use trendscan_warehouse::{QueryGuardrails, WarehouseError};

#[test]
fn momentum_pass_over_an_empty_universe_succeeds_quietly() {
    let temp = tempdir().expect("tempdir");
    let warehouse = open_temp_warehouse(temp.path());

    let report =
        run_momentum_pass(&warehouse, MomentumScope::FullHistory, 4).expect("pass should run");
    assert_eq!(report.total_instruments, 0);
    assert_eq!(report.failed, 0);
}

#[test]
fn short_history_scores_nothing_but_is_not_an_error() {
    let temp = tempdir().expect("tempdir");
    let warehouse = open_temp_warehouse(temp.path());

    // 100 observations: enough for MA50, nowhere near the 252 needed
    // for the one-year ROC.
    seed_instrument(
        &warehouse,
        "000400",
        "Newcomer Corp",
        &linear_history(30.0, 0.1, 100),
    );

    let report =
        run_momentum_pass(&warehouse, MomentumScope::FullHistory, 1).expect("pass should run");
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 0);

    let date = warehouse.latest_date().expect("latest").expect("has data");
    assert!(warehouse.momentum_scores_on(date).expect("scores").is_empty());

    // MA50 did get filled even though the composite could not be.
    let result = warehouse
        .execute_query(
            "SELECT COUNT(ma_50), COUNT(rs_momentum) FROM daily_prices",
            QueryGuardrails::default(),
            false,
        )
        .expect("query");
    let filled_ma = result.rows[0][0].as_i64().expect("count");
    let filled_momentum = result.rows[0][1].as_i64().expect("count");
    assert_eq!(filled_ma, 51);
    assert_eq!(filled_momentum, 0);
}

#[test]
fn ranking_a_date_with_no_scores_is_an_empty_result() {
    let temp = tempdir().expect("tempdir");
    let warehouse = open_temp_warehouse(temp.path());

    seed_instrument(
        &warehouse,
        "000400",
        "Newcomer Corp",
        &linear_history(30.0, 0.1, 100),
    );
    run_momentum_pass(&warehouse, MomentumScope::FullHistory, 1).expect("momentum");

    let date = warehouse.latest_date().expect("latest").expect("has data");
    let report = run_ranking_pass(&warehouse, date).expect("ranking should run");
    assert_eq!(report.ranked, 0);
    assert!(!warehouse.has_rankings(date).expect("has_rankings"));
}

#[test]
fn screen_over_an_unscored_universe_is_empty_not_an_error() {
    let temp = tempdir().expect("tempdir");
    let warehouse = open_temp_warehouse(temp.path());

    seed_instrument(
        &warehouse,
        "000400",
        "Newcomer Corp",
        &linear_history(30.0, 0.1, 100),
    );
    run_momentum_pass(&warehouse, MomentumScope::FullHistory, 1).expect("momentum");

    let date = warehouse.latest_date().expect("latest").expect("has data");
    let candidates =
        run_screen(&warehouse, date, &ScreenParams::default()).expect("screen should run");
    assert!(candidates.is_empty());
}

#[test]
fn screen_rejects_nonsense_thresholds() {
    let temp = tempdir().expect("tempdir");
    let warehouse = open_temp_warehouse(temp.path());
    let date = TradingDate::parse("2024-06-03").expect("date");

    let params = ScreenParams {
        min_grade: 250.0,
        ..ScreenParams::default()
    };
    let error = run_screen(&warehouse, date, &params).expect_err("must reject");
    assert!(error.to_string().contains("must lie in [0, 100]"));
}

#[test]
fn sql_guardrails_reject_writes_and_zero_caps() {
    let temp = tempdir().expect("tempdir");
    let warehouse = open_temp_warehouse(temp.path());

    let write_error = warehouse
        .execute_query("DROP TABLE daily_prices", QueryGuardrails::default(), false)
        .expect_err("must reject writes");
    assert!(matches!(write_error, WarehouseError::QueryRejected(_)));

    let cap_error = warehouse
        .execute_query(
            "SELECT 1",
            QueryGuardrails {
                max_rows: 0,
                query_timeout_ms: 1_000,
            },
            false,
        )
        .expect_err("must reject zero row cap");
    assert!(matches!(cap_error, WarehouseError::QueryRejected(_)));
}

#[test]
fn sql_row_cap_truncates_results() {
    let temp = tempdir().expect("tempdir");
    let warehouse = open_temp_warehouse(temp.path());

    seed_instrument(
        &warehouse,
        "000100",
        "Strong Corp",
        &linear_history(100.0, 1.0, 30),
    );

    let result = warehouse
        .execute_query(
            "SELECT date FROM daily_prices ORDER BY date",
            QueryGuardrails {
                max_rows: 10,
                query_timeout_ms: 5_000,
            },
            false,
        )
        .expect("query");
    assert_eq!(result.row_count, 10);
    assert!(result.truncated);
}
