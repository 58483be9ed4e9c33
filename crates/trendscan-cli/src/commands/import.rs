use serde_json::json;

use trendscan_warehouse::Warehouse;

use crate::cli::{ImportArgs, ImportTarget};
use crate::error::CliError;

use super::CommandOutcome;

pub fn run(args: &ImportArgs, warehouse: &Warehouse) -> Result<CommandOutcome, CliError> {
    let (dataset, loaded) = match &args.target {
        ImportTarget::Instruments { file } => {
            ("instruments", warehouse.import_instruments_csv(file)?)
        }
        ImportTarget::Prices { file } => ("daily_prices", warehouse.import_prices_csv(file)?),
    };

    Ok(CommandOutcome::ok(json!({
        "dataset": dataset,
        "rows_loaded": loaded,
    })))
}
