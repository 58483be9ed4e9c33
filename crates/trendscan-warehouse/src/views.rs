//! Database views for analytical queries.

use ::duckdb::Connection;

/// Create database views for common analytical queries.
///
/// - `vw_momentum_latest`: scored instruments on the newest date
/// - `vw_ranking_coverage`: per-date counts of scored vs ranked rows
/// - `vw_ma_alignment`: moving-average stack state per observation
///
/// # Errors
/// Returns an error if the view creation SQL fails to execute.
pub fn create_views(connection: &Connection) -> Result<(), ::duckdb::Error> {
    connection.execute_batch(
        r"
CREATE OR REPLACE VIEW vw_momentum_latest AS
SELECT
    p.ticker,
    i.name,
    i.market,
    p.date,
    p.close,
    p.rs_momentum,
    p.rs_rank,
    p.rs_grade
FROM daily_prices p
LEFT JOIN instruments i USING (ticker)
WHERE p.date = (SELECT MAX(date) FROM daily_prices)
  AND p.rs_momentum IS NOT NULL;

CREATE OR REPLACE VIEW vw_ranking_coverage AS
SELECT
    date,
    COUNT(*) AS observations,
    COUNT(rs_momentum) AS scored,
    COUNT(rs_rank) AS ranked
FROM daily_prices
GROUP BY date;

CREATE OR REPLACE VIEW vw_ma_alignment AS
SELECT
    ticker,
    date,
    close,
    ma_50,
    ma_150,
    ma_200,
    (close > ma_50 AND ma_50 > ma_150 AND ma_150 > ma_200) AS stacked
FROM daily_prices
WHERE ma_200 IS NOT NULL;
",
    )?;

    Ok(())
}
