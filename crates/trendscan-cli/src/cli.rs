//! CLI argument definitions for trendscan.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `import` | Load instruments or daily prices from CSV |
//! | `momentum` | Compute derived indicators for the universe |
//! | `rank` | Rank the universe's momentum scores on a date |
//! | `screen` | Run the trend-template screen on a date |
//! | `analyze` | Momentum, rank, and screen in sequence |
//! | `sql` | Query the local DuckDB warehouse |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--db-path` | `$TRENDSCAN_HOME/warehouse.duckdb` | Warehouse location |
//!
//! # Examples
//!
//! ```bash
//! # Load the universe and a year of prices
//! trendscan import instruments universe.csv
//! trendscan import prices prices.csv
//!
//! # Full pipeline, then inspect the leaders
//! trendscan analyze --pretty
//! trendscan sql "SELECT * FROM vw_momentum_latest LIMIT 20" --format table
//!
//! # Incremental daily run
//! trendscan momentum --latest-only && trendscan rank && trendscan screen
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Relative strength momentum screening over a local DuckDB warehouse.
///
/// Computes IBD-style composite momentum per instrument, ranks the whole
/// universe cross-sectionally, and filters it through a staged trend
/// template.
#[derive(Debug, Parser)]
#[command(
    name = "trendscan",
    author,
    version,
    about = "Relative strength momentum screener"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Warehouse database file (defaults to $TRENDSCAN_HOME/warehouse.duckdb).
    #[arg(long, global = true)]
    pub db_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format for terminal display.
    Table,
    /// Single JSON document.
    Json,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load instruments or daily prices into the warehouse from CSV.
    ///
    /// Existing (ticker, date) price rows are never overwritten, so
    /// re-importing a file is safe.
    Import(ImportArgs),

    /// Compute moving averages, rolling extremes, ROC, and composite
    /// momentum for every active instrument.
    ///
    /// # Examples
    ///
    ///   trendscan momentum
    ///   trendscan momentum --latest-only --workers 8
    Momentum(MomentumArgs),

    /// Rank the universe's composite momentum scores on one date and
    /// persist rank and percentile grade.
    ///
    /// # Examples
    ///
    ///   trendscan rank
    ///   trendscan rank --date 2024-06-03
    Rank(RankArgs),

    /// Run the staged trend-template screen and list the candidates.
    ///
    /// # Examples
    ///
    ///   trendscan screen --format table
    ///   trendscan screen --date 2024-06-03 --min-grade 80 --limit 25
    Screen(ScreenArgs),

    /// Run momentum, ranking, and the screen in sequence.
    Analyze(AnalyzeArgs),

    /// Run SQL queries against the DuckDB warehouse.
    ///
    /// Default mode is read-only; use --write for data modifications.
    /// All queries run under guardrails (row cap, timeout).
    ///
    /// # Examples
    ///
    ///   trendscan sql "SELECT * FROM vw_ranking_coverage"
    ///   trendscan sql "SELECT COUNT(*) FROM daily_prices"
    Sql(SqlArgs),
}

/// Arguments for the `import` command.
#[derive(Debug, Args)]
pub struct ImportArgs {
    #[command(subcommand)]
    pub target: ImportTarget,
}

/// What to import.
#[derive(Debug, Subcommand)]
pub enum ImportTarget {
    /// Instrument metadata CSV with columns: ticker, name, market.
    Instruments {
        /// Path to the CSV file.
        file: PathBuf,
    },
    /// Daily price CSV with columns: ticker, date, open, high, low,
    /// close, volume.
    Prices {
        /// Path to the CSV file.
        file: PathBuf,
    },
}

/// Arguments for the `momentum` command.
#[derive(Debug, Args)]
pub struct MomentumArgs {
    /// Persist only each instrument's newest row (incremental daily pass).
    #[arg(long, default_value_t = false)]
    pub latest_only: bool,

    /// Worker threads for the per-instrument fan-out.
    #[arg(long, default_value_t = trendscan_core::DEFAULT_WORKERS)]
    pub workers: usize,
}

/// Arguments for the `rank` command.
#[derive(Debug, Args)]
pub struct RankArgs {
    /// Evaluation date (YYYY-MM-DD); defaults to the newest observation
    /// date in the warehouse.
    #[arg(long)]
    pub date: Option<String>,
}

/// Arguments for the `screen` command.
#[derive(Debug, Args)]
pub struct ScreenArgs {
    /// Evaluation date (YYYY-MM-DD); defaults to the newest observation
    /// date in the warehouse.
    #[arg(long)]
    pub date: Option<String>,

    /// Minimum closing price kept in stage 1.
    #[arg(long, default_value_t = 20.0)]
    pub min_price: f64,

    /// Minimum percentile grade kept in stage 3.
    #[arg(long, default_value_t = 70.0)]
    pub min_grade: f64,

    /// Maximum number of candidates returned.
    #[arg(long, default_value_t = 100)]
    pub limit: usize,

    /// Return every candidate, ignoring --limit.
    #[arg(long, default_value_t = false)]
    pub unlimited: bool,
}

/// Arguments for the `analyze` command.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Persist only each instrument's newest row during the momentum step.
    #[arg(long, default_value_t = false)]
    pub latest_only: bool,

    /// Worker threads for the momentum fan-out.
    #[arg(long, default_value_t = trendscan_core::DEFAULT_WORKERS)]
    pub workers: usize,

    /// Minimum closing price kept in stage 1.
    #[arg(long, default_value_t = 20.0)]
    pub min_price: f64,

    /// Minimum percentile grade kept in stage 3.
    #[arg(long, default_value_t = 70.0)]
    pub min_grade: f64,

    /// Maximum number of candidates returned.
    #[arg(long, default_value_t = 100)]
    pub limit: usize,

    /// Return every candidate, ignoring --limit.
    #[arg(long, default_value_t = false)]
    pub unlimited: bool,
}

/// Arguments for the `sql` command.
#[derive(Debug, Args)]
pub struct SqlArgs {
    /// SQL query to execute.
    pub query: String,

    /// Allow write operations (INSERT, UPDATE, DELETE, CREATE, etc.).
    #[arg(long, default_value_t = false)]
    pub write: bool,

    /// Maximum number of rows to return.
    #[arg(long, default_value_t = 10_000)]
    pub max_rows: usize,

    /// Query timeout in milliseconds.
    #[arg(long, default_value_t = 5_000)]
    pub query_timeout_ms: u64,
}
