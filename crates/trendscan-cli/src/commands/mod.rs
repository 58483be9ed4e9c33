mod analyze;
mod import;
mod momentum;
mod rank;
mod screen;
mod sql;

use serde_json::Value;

use trendscan_core::PriceSeriesStore;
use trendscan_warehouse::{Warehouse, WarehouseConfig};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// What a command hands back to `main` for rendering.
pub struct CommandOutcome {
    pub data: Value,
    /// Instruments that failed inside an otherwise-successful pass.
    pub partial_failures: usize,
}

impl CommandOutcome {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            partial_failures: 0,
        }
    }
}

pub fn run(cli: &Cli) -> Result<CommandOutcome, CliError> {
    let warehouse = open_warehouse(cli)?;

    match &cli.command {
        Command::Import(args) => import::run(args, &warehouse),
        Command::Momentum(args) => momentum::run(args, &warehouse),
        Command::Rank(args) => rank::run(args, &warehouse),
        Command::Screen(args) => screen::run(args, &warehouse),
        Command::Analyze(args) => analyze::run(args, &warehouse),
        Command::Sql(args) => sql::run(args, &warehouse),
    }
}

fn open_warehouse(cli: &Cli) -> Result<Warehouse, CliError> {
    let warehouse = match &cli.db_path {
        Some(path) => Warehouse::open(WarehouseConfig {
            db_path: path.clone(),
            max_pool_size: 4,
        })?,
        None => Warehouse::open_default()?,
    };
    Ok(warehouse)
}

/// Resolve an optional `--date` argument, falling back to the newest
/// observation date in the warehouse.
fn resolve_date(
    raw: Option<&str>,
    warehouse: &Warehouse,
) -> Result<Option<trendscan_core::TradingDate>, CliError> {
    match raw {
        Some(raw) => Ok(Some(trendscan_core::TradingDate::parse(raw)?)),
        None => Ok(warehouse.latest_date()?),
    }
}
