//! # Trendscan Warehouse
//!
//! DuckDB-backed Price Series Store for trendscan.
//!
//! ## Overview
//!
//! Holds the instrument universe and daily price observations together
//! with the derived analytic fields the screening engine computes
//! (moving averages, rolling extremes, ROC, composite momentum, rank
//! and grade). Implements
//! [`PriceSeriesStore`](trendscan_core::PriceSeriesStore) so the engine
//! never sees SQL.
//!
//! ## Tables
//!
//! | Table | Description |
//! |-------|-------------|
//! | `instruments` | Universe metadata (ticker, name, market) |
//! | `daily_prices` | OHLCV plus derived analytic fields, one row per (ticker, date) |
//! | `schema_migrations` | Applied migration versions |
//!
//! ## Views
//!
//! | View | Description |
//! |------|-------------|
//! | `vw_momentum_latest` | Scored instruments on the newest date |
//! | `vw_ranking_coverage` | Per-date counts of scored vs ranked rows |
//! | `vw_ma_alignment` | Moving-average stack state per observation |
//!
//! ## Security
//!
//! All user-provided values travel as query parameters. The ad-hoc SQL
//! surface is read-only by default and capped by [`QueryGuardrails`].

pub mod migrations;
pub mod pool;
pub mod query;
pub mod views;

mod error;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use ::duckdb::{Connection, ToSql};
use tracing::debug;

use trendscan_core::momentum::IndicatorRow;
use trendscan_core::ranking::{MomentumScore, RankAssignment};
use trendscan_core::store::DailySnapshot;
use trendscan_core::{
    Instrument, PriceObservation, PriceSeriesStore, StoreError, Symbol, TradingDate,
};

pub use error::WarehouseError;
pub use pool::{ConnectionPool, PooledConnection};
pub use query::{QueryGuardrails, QueryResult, SqlColumn};

use migrations::escape_sql_string;

/// Configuration for the warehouse database.
#[derive(Debug, Clone)]
pub struct WarehouseConfig {
    /// Path to the `DuckDB` database file.
    pub db_path: PathBuf,
    /// Maximum number of idle connections kept in the pool.
    pub max_pool_size: usize,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            db_path: resolve_trendscan_home().join("warehouse.duckdb"),
            max_pool_size: 4,
        }
    }
}

/// The DuckDB-backed price series store.
#[derive(Clone)]
pub struct Warehouse {
    pool: ConnectionPool,
}

impl Warehouse {
    /// Open a warehouse with default configuration.
    pub fn open_default() -> Result<Self, WarehouseError> {
        Self::open(WarehouseConfig::default())
    }

    /// Open a warehouse, creating the database and applying migrations
    /// if needed.
    pub fn open(config: WarehouseConfig) -> Result<Self, WarehouseError> {
        if let Some(parent) = config.db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let pool = ConnectionPool::new(config.db_path.clone(), config.max_pool_size);
        let warehouse = Self { pool };
        warehouse.initialize()?;
        Ok(warehouse)
    }

    /// Apply migrations and (re)create views. Idempotent.
    pub fn initialize(&self) -> Result<(), WarehouseError> {
        let connection = self.pool.acquire()?;
        migrations::apply_migrations(&connection)?;
        views::create_views(&connection)?;
        Ok(())
    }

    /// Path of the backing database file.
    pub fn db_path(&self) -> &Path {
        self.pool.db_path()
    }

    /// Execute one ad-hoc SQL statement under guardrails.
    pub fn execute_query(
        &self,
        sql: &str,
        guardrails: QueryGuardrails,
        allow_write: bool,
    ) -> Result<QueryResult, WarehouseError> {
        let connection = self.pool.acquire()?;
        query::run_query(&connection, sql, guardrails, allow_write)
    }

    /// Register (or refresh) instrument metadata.
    pub fn register_instruments(&self, instruments: &[Instrument]) -> Result<usize, WarehouseError> {
        if instruments.is_empty() {
            return Ok(0);
        }

        let connection = self.pool.acquire()?;
        connection.execute_batch("BEGIN TRANSACTION")?;
        let result = (|| -> Result<usize, WarehouseError> {
            let mut written = 0;
            let mut statement = connection.prepare(
                "INSERT OR REPLACE INTO instruments (ticker, name, market, is_active, updated_at) \
                 VALUES (?, ?, ?, ?, CURRENT_TIMESTAMP)",
            )?;
            for instrument in instruments {
                let params: [&dyn ToSql; 4] = [
                    &instrument.ticker.as_str(),
                    &instrument.name,
                    &instrument.market.as_str(),
                    &instrument.is_active,
                ];
                written += statement.execute(params.as_slice())?;
            }
            Ok(written)
        })();

        finalize_transaction(&connection, result)
    }

    /// Insert daily price observations for one instrument.
    ///
    /// Conflicting `(ticker, date)` rows are left untouched, so a
    /// re-ingest never clobbers derived fields already computed.
    pub fn insert_daily_prices(
        &self,
        ticker: &Symbol,
        observations: &[PriceObservation],
    ) -> Result<usize, WarehouseError> {
        if observations.is_empty() {
            return Ok(0);
        }

        let connection = self.pool.acquire()?;
        connection.execute_batch("BEGIN TRANSACTION")?;
        let result = (|| -> Result<usize, WarehouseError> {
            let mut written = 0;
            let mut statement = connection.prepare(
                "INSERT OR IGNORE INTO daily_prices \
                 (ticker, date, open, high, low, close, volume) \
                 VALUES (?, CAST(? AS DATE), ?, ?, ?, ?, ?)",
            )?;
            for observation in observations {
                let date = observation.date.format_iso();
                let volume = observation.volume.map(|v| v as i64);
                let params: [&dyn ToSql; 7] = [
                    &ticker.as_str(),
                    &date,
                    &observation.open,
                    &observation.high,
                    &observation.low,
                    &observation.close,
                    &volume,
                ];
                written += statement.execute(params.as_slice())?;
            }
            Ok(written)
        })();

        finalize_transaction(&connection, result)
    }

    /// Bulk-load instrument metadata from a CSV file with columns
    /// `ticker, name, market`.
    pub fn import_instruments_csv(&self, path: &Path) -> Result<usize, WarehouseError> {
        let connection = self.pool.acquire()?;
        let sql = format!(
            "INSERT OR REPLACE INTO instruments (ticker, name, market, is_active, updated_at) \
             SELECT ticker, name, upper(market), TRUE, CURRENT_TIMESTAMP \
             FROM read_csv('{}', header = true, types = {{'ticker': 'VARCHAR'}})",
            escape_sql_string(&path_to_sql(path))
        );
        let loaded = connection.execute(sql.as_str(), [] as [&dyn ToSql; 0])?;
        debug!(path = %path.display(), loaded, "instruments imported");
        Ok(loaded)
    }

    /// Bulk-load daily prices from a CSV file with columns
    /// `ticker, date, open, high, low, close, volume`.
    ///
    /// Existing `(ticker, date)` rows are skipped, preserving any
    /// derived fields already computed for them.
    pub fn import_prices_csv(&self, path: &Path) -> Result<usize, WarehouseError> {
        let connection = self.pool.acquire()?;
        let sql = format!(
            "INSERT OR IGNORE INTO daily_prices \
             (ticker, date, open, high, low, close, volume) \
             SELECT ticker, CAST(date AS DATE), open, high, low, close, volume \
             FROM read_csv('{}', header = true, types = {{'ticker': 'VARCHAR'}})",
            escape_sql_string(&path_to_sql(path))
        );
        let loaded = connection.execute(sql.as_str(), [] as [&dyn ToSql; 0])?;
        debug!(path = %path.display(), loaded, "daily prices imported");
        Ok(loaded)
    }
}

impl PriceSeriesStore for Warehouse {
    fn instruments(&self) -> Result<Vec<Instrument>, StoreError> {
        let read = || -> Result<Vec<Instrument>, WarehouseError> {
            let connection = self.pool.acquire()?;
            let mut statement = connection.prepare(
                "SELECT ticker, name, market, is_active FROM instruments \
                 WHERE is_active ORDER BY ticker",
            )?;
            let rows = statement.query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, bool>(3)?,
                ))
            })?;

            let mut instruments = Vec::new();
            for row in rows {
                let (ticker, name, market, is_active) = row?;
                instruments.push(Instrument::new(
                    Symbol::parse(&ticker)?,
                    name,
                    market.parse()?,
                    is_active,
                ));
            }
            Ok(instruments)
        };
        read().map_err(to_store_error)
    }

    fn price_history(&self, ticker: &Symbol) -> Result<Vec<PriceObservation>, StoreError> {
        let read = || -> Result<Vec<PriceObservation>, WarehouseError> {
            let connection = self.pool.acquire()?;
            let mut statement = connection.prepare(
                "SELECT CAST(date AS VARCHAR), open, high, low, close, volume \
                 FROM daily_prices WHERE ticker = ? ORDER BY date",
            )?;
            let params: [&dyn ToSql; 1] = [&ticker.as_str()];
            let rows = statement.query_map(params.as_slice(), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, f64>(4)?,
                    row.get::<_, Option<i64>>(5)?,
                ))
            })?;

            let mut history = Vec::new();
            for row in rows {
                let (date, open, high, low, close, volume) = row?;
                history.push(PriceObservation::new(
                    TradingDate::parse(&date)?,
                    open,
                    high,
                    low,
                    close,
                    volume.and_then(|v| u64::try_from(v).ok()),
                )?);
            }
            Ok(history)
        };
        read().map_err(to_store_error)
    }

    fn latest_date(&self) -> Result<Option<TradingDate>, StoreError> {
        let read = || -> Result<Option<TradingDate>, WarehouseError> {
            let connection = self.pool.acquire()?;
            let latest: Option<String> = connection.query_row(
                "SELECT CAST(MAX(date) AS VARCHAR) FROM daily_prices",
                [],
                |row| row.get(0),
            )?;
            latest
                .map(|raw| TradingDate::parse(&raw).map_err(WarehouseError::from))
                .transpose()
        };
        read().map_err(to_store_error)
    }

    fn upsert_indicators(
        &self,
        ticker: &Symbol,
        rows: &[IndicatorRow],
    ) -> Result<usize, StoreError> {
        let write = || -> Result<usize, WarehouseError> {
            if rows.is_empty() {
                return Ok(0);
            }

            let connection = self.pool.acquire()?;
            connection.execute_batch("BEGIN TRANSACTION")?;
            let result = (|| -> Result<usize, WarehouseError> {
                let mut written = 0;
                let mut statement = connection.prepare(
                    "UPDATE daily_prices SET \
                     ma_50 = ?, ma_150 = ?, ma_200 = ?, ma_200_prior = ?, \
                     ma_200_trending_up = ?, high_252 = ?, low_252 = ?, \
                     near_high_252 = ?, above_low_252 = ?, \
                     roc_252 = ?, roc_126 = ?, roc_63 = ?, roc_21 = ?, \
                     rs_momentum = ?, updated_at = CURRENT_TIMESTAMP \
                     WHERE ticker = ? AND date = CAST(? AS DATE)",
                )?;
                for row in rows {
                    let date = row.date.format_iso();
                    let params: [&dyn ToSql; 16] = [
                        &row.ma_50,
                        &row.ma_150,
                        &row.ma_200,
                        &row.ma_200_prior,
                        &row.ma_200_trending_up,
                        &row.high_252,
                        &row.low_252,
                        &row.near_high_252,
                        &row.above_low_252,
                        &row.roc_252,
                        &row.roc_126,
                        &row.roc_63,
                        &row.roc_21,
                        &row.rs_momentum,
                        &ticker.as_str(),
                        &date,
                    ];
                    written += statement.execute(params.as_slice())?;
                }
                Ok(written)
            })();
            finalize_transaction(&connection, result)
        };
        write().map_err(to_store_error)
    }

    fn momentum_scores_on(&self, date: TradingDate) -> Result<Vec<MomentumScore>, StoreError> {
        let read = || -> Result<Vec<MomentumScore>, WarehouseError> {
            let connection = self.pool.acquire()?;
            let mut statement = connection.prepare(
                "SELECT ticker, rs_momentum FROM daily_prices \
                 WHERE date = CAST(? AS DATE) AND rs_momentum IS NOT NULL",
            )?;
            let date = date.format_iso();
            let params: [&dyn ToSql; 1] = [&date];
            let rows = statement.query_map(params.as_slice(), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
            })?;

            let mut scores = Vec::new();
            for row in rows {
                let (ticker, rs_momentum) = row?;
                scores.push(MomentumScore {
                    ticker: Symbol::parse(&ticker)?,
                    rs_momentum,
                });
            }
            Ok(scores)
        };
        read().map_err(to_store_error)
    }

    fn has_rankings(&self, date: TradingDate) -> Result<bool, StoreError> {
        let read = || -> Result<bool, WarehouseError> {
            let connection = self.pool.acquire()?;
            let date = date.format_iso();
            let params: [&dyn ToSql; 1] = [&date];
            let ranked: i64 = connection.query_row(
                "SELECT COUNT(*) FROM daily_prices \
                 WHERE date = CAST(? AS DATE) AND rs_grade IS NOT NULL",
                params.as_slice(),
                |row| row.get(0),
            )?;
            Ok(ranked > 0)
        };
        read().map_err(to_store_error)
    }

    fn upsert_rankings(
        &self,
        date: TradingDate,
        rows: &[RankAssignment],
    ) -> Result<usize, StoreError> {
        let write = || -> Result<usize, WarehouseError> {
            if rows.is_empty() {
                return Ok(0);
            }

            let connection = self.pool.acquire()?;
            connection.execute_batch("BEGIN TRANSACTION")?;
            let result = (|| -> Result<usize, WarehouseError> {
                let mut written = 0;
                let mut statement = connection.prepare(
                    "UPDATE daily_prices SET \
                     rs_rank = ?, rs_grade = ?, updated_at = CURRENT_TIMESTAMP \
                     WHERE ticker = ? AND date = CAST(? AS DATE)",
                )?;
                let date = date.format_iso();
                for row in rows {
                    let params: [&dyn ToSql; 4] =
                        [&row.rs_rank, &row.rs_grade, &row.ticker.as_str(), &date];
                    written += statement.execute(params.as_slice())?;
                }
                Ok(written)
            })();
            finalize_transaction(&connection, result)
        };
        write().map_err(to_store_error)
    }

    fn snapshots_on(&self, date: TradingDate) -> Result<Vec<DailySnapshot>, StoreError> {
        let read = || -> Result<Vec<DailySnapshot>, WarehouseError> {
            let connection = self.pool.acquire()?;
            let mut statement = connection.prepare(
                "SELECT p.ticker, COALESCE(i.name, p.ticker), p.close, \
                        p.ma_50, p.ma_150, p.ma_200, p.ma_200_trending_up, \
                        p.high_252, p.rs_grade \
                 FROM daily_prices p \
                 LEFT JOIN instruments i USING (ticker) \
                 WHERE p.date = CAST(? AS DATE) \
                 ORDER BY p.ticker",
            )?;
            let date = date.format_iso();
            let params: [&dyn ToSql; 1] = [&date];
            let rows = statement.query_map(params.as_slice(), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, Option<f64>>(3)?,
                    row.get::<_, Option<f64>>(4)?,
                    row.get::<_, Option<f64>>(5)?,
                    row.get::<_, Option<bool>>(6)?,
                    row.get::<_, Option<f64>>(7)?,
                    row.get::<_, Option<f64>>(8)?,
                ))
            })?;

            let mut snapshots = Vec::new();
            for row in rows {
                let (ticker, name, close, ma_50, ma_150, ma_200, trending, high_252, rs_grade) =
                    row?;
                snapshots.push(DailySnapshot {
                    ticker: Symbol::parse(&ticker)?,
                    name,
                    close,
                    ma_50,
                    ma_150,
                    ma_200,
                    ma_200_trending_up: trending,
                    high_252,
                    rs_grade,
                });
            }
            Ok(snapshots)
        };
        read().map_err(to_store_error)
    }
}

/// Commit on success, roll back on failure.
fn finalize_transaction<T>(
    connection: &Connection,
    result: Result<T, WarehouseError>,
) -> Result<T, WarehouseError> {
    match result {
        Ok(value) => {
            connection.execute_batch("COMMIT")?;
            Ok(value)
        }
        Err(error) => {
            let _ = connection.execute_batch("ROLLBACK");
            Err(error)
        }
    }
}

fn to_store_error(error: WarehouseError) -> StoreError {
    match error {
        WarehouseError::Validation(inner) => StoreError::Validation(inner),
        other => StoreError::backend(other.to_string()),
    }
}

/// Resolve the trendscan home directory from environment or default.
fn resolve_trendscan_home() -> PathBuf {
    if let Some(path) = env::var_os("TRENDSCAN_HOME") {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".trendscan");
    }

    PathBuf::from(".trendscan")
}

/// Convert a path to a SQL-compatible string (forward slashes).
fn path_to_sql(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    use tempfile::tempdir;
    use trendscan_core::Market;

    fn open_test_warehouse(dir: &Path) -> Warehouse {
        Warehouse::open(WarehouseConfig {
            db_path: dir.join("warehouse.duckdb"),
            max_pool_size: 2,
        })
        .expect("warehouse open")
    }

    fn ticker(raw: &str) -> Symbol {
        Symbol::parse(raw).expect("ticker")
    }

    fn observation(date: &str, close: f64) -> PriceObservation {
        PriceObservation::new(
            TradingDate::parse(date).expect("date"),
            close,
            close * 1.02,
            close * 0.98,
            close,
            Some(1_000),
        )
        .expect("observation")
    }

    fn indicator_row(date: &str) -> IndicatorRow {
        IndicatorRow {
            date: TradingDate::parse(date).expect("date"),
            ma_50: Some(9.5),
            ma_150: Some(9.0),
            ma_200: Some(8.5),
            ma_200_prior: Some(8.4),
            ma_200_trending_up: Some(true),
            high_252: Some(12.0),
            low_252: Some(7.0),
            near_high_252: Some(true),
            above_low_252: Some(true),
            roc_252: Some(40.0),
            roc_126: Some(20.0),
            roc_63: Some(10.0),
            roc_21: Some(5.0),
            rs_momentum: Some(23.0),
        }
    }

    #[test]
    fn initializes_tables_and_views() {
        let temp = tempdir().expect("tempdir");
        let warehouse = open_test_warehouse(temp.path());

        let result = warehouse
            .execute_query(
                "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = 'daily_prices'",
                QueryGuardrails::default(),
                false,
            )
            .expect("query");
        assert_eq!(result.row_count, 1);

        // Re-initializing must not fail or duplicate anything.
        warehouse.initialize().expect("second initialize");
    }

    #[test]
    fn read_only_mode_rejects_write_query() {
        let temp = tempdir().expect("tempdir");
        let warehouse = open_test_warehouse(temp.path());

        let error = warehouse
            .execute_query(
                "DELETE FROM daily_prices",
                QueryGuardrails::default(),
                false,
            )
            .expect_err("should reject");
        assert!(matches!(error, WarehouseError::QueryRejected(_)));
    }

    #[test]
    fn price_history_round_trips_ordered() {
        let temp = tempdir().expect("tempdir");
        let warehouse = open_test_warehouse(temp.path());
        let samsung = ticker("005930");

        warehouse
            .register_instruments(&[Instrument::new(
                samsung.clone(),
                "Samsung Electronics",
                Market::Kospi,
                true,
            )])
            .expect("register");
        // Insert out of order; reads must come back sorted by date.
        warehouse
            .insert_daily_prices(
                &samsung,
                &[
                    observation("2024-06-04", 11.0),
                    observation("2024-06-03", 10.0),
                ],
            )
            .expect("insert");

        let history = warehouse.price_history(&samsung).expect("history");
        assert_eq!(history.len(), 2);
        assert!(history[0].date < history[1].date);
        assert_eq!(history[0].close, 10.0);

        let latest = warehouse.latest_date().expect("latest").expect("some date");
        assert_eq!(latest.format_iso(), "2024-06-04");
    }

    #[test]
    fn reingesting_prices_preserves_derived_fields() {
        let temp = tempdir().expect("tempdir");
        let warehouse = open_test_warehouse(temp.path());
        let samsung = ticker("005930");

        warehouse
            .insert_daily_prices(&samsung, &[observation("2024-06-03", 10.0)])
            .expect("insert");
        warehouse
            .upsert_indicators(&samsung, &[indicator_row("2024-06-03")])
            .expect("indicators");

        // Same (ticker, date) again with a different close: ignored.
        warehouse
            .insert_daily_prices(&samsung, &[observation("2024-06-03", 99.0)])
            .expect("re-insert");

        let result = warehouse
            .execute_query(
                "SELECT close, rs_momentum FROM daily_prices WHERE ticker = '005930'",
                QueryGuardrails::default(),
                false,
            )
            .expect("query");
        assert_eq!(result.row_count, 1);
        assert_eq!(result.rows[0][0], serde_json::json!(10.0));
        assert_eq!(result.rows[0][1], serde_json::json!(23.0));
    }

    #[test]
    fn upsert_indicators_overwrites_on_rerun() {
        let temp = tempdir().expect("tempdir");
        let warehouse = open_test_warehouse(temp.path());
        let samsung = ticker("005930");

        warehouse
            .insert_daily_prices(&samsung, &[observation("2024-06-03", 10.0)])
            .expect("insert");

        let mut row = indicator_row("2024-06-03");
        warehouse
            .upsert_indicators(&samsung, &[row.clone()])
            .expect("first upsert");

        row.rs_momentum = Some(31.0);
        row.roc_21 = None;
        let written = warehouse
            .upsert_indicators(&samsung, &[row])
            .expect("second upsert");
        assert_eq!(written, 1);

        let result = warehouse
            .execute_query(
                "SELECT rs_momentum, roc_21 FROM daily_prices WHERE ticker = '005930'",
                QueryGuardrails::default(),
                false,
            )
            .expect("query");
        assert_eq!(result.rows[0][0], serde_json::json!(31.0));
        assert_eq!(result.rows[0][1], serde_json::Value::Null);
    }

    #[test]
    fn rankings_round_trip_through_snapshots() {
        let temp = tempdir().expect("tempdir");
        let warehouse = open_test_warehouse(temp.path());
        let date = TradingDate::parse("2024-06-03").expect("date");
        let samsung = ticker("005930");

        warehouse
            .register_instruments(&[Instrument::new(
                samsung.clone(),
                "Samsung Electronics",
                Market::Kospi,
                true,
            )])
            .expect("register");
        warehouse
            .insert_daily_prices(&samsung, &[observation("2024-06-03", 10.0)])
            .expect("insert");
        warehouse
            .upsert_indicators(&samsung, &[indicator_row("2024-06-03")])
            .expect("indicators");

        assert!(!warehouse.has_rankings(date).expect("has_rankings"));

        let scores = warehouse.momentum_scores_on(date).expect("scores");
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].rs_momentum, 23.0);

        warehouse
            .upsert_rankings(
                date,
                &[RankAssignment {
                    ticker: samsung.clone(),
                    rs_rank: 1,
                    rs_grade: 100.0,
                }],
            )
            .expect("rankings");

        assert!(warehouse.has_rankings(date).expect("has_rankings"));
        let snapshots = warehouse.snapshots_on(date).expect("snapshots");
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].name, "Samsung Electronics");
        assert_eq!(snapshots[0].rs_grade, Some(100.0));
        assert_eq!(snapshots[0].ma_200_trending_up, Some(true));
    }

    #[test]
    fn imports_prices_from_csv() {
        let temp = tempdir().expect("tempdir");
        let warehouse = open_test_warehouse(temp.path());

        let csv_path = temp.path().join("prices.csv");
        let mut file = fs::File::create(&csv_path).expect("create csv");
        writeln!(file, "ticker,date,open,high,low,close,volume").expect("write");
        writeln!(file, "005930,2024-06-03,10.0,10.5,9.8,10.2,1500").expect("write");
        writeln!(file, "000660,2024-06-03,20.0,21.0,19.5,20.5,900").expect("write");
        drop(file);

        let loaded = warehouse.import_prices_csv(&csv_path).expect("import");
        assert_eq!(loaded, 2);

        // Importing the same file again inserts nothing new.
        let reloaded = warehouse.import_prices_csv(&csv_path).expect("re-import");
        assert_eq!(reloaded, 0);

        let history = warehouse
            .price_history(&ticker("005930"))
            .expect("history");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].close, 10.2);
    }
}
