use serde_json::json;

use trendscan_core::run_ranking_pass;
use trendscan_warehouse::Warehouse;

use crate::cli::RankArgs;
use crate::error::CliError;

use super::{resolve_date, CommandOutcome};

pub fn run(args: &RankArgs, warehouse: &Warehouse) -> Result<CommandOutcome, CliError> {
    let Some(date) = resolve_date(args.date.as_deref(), warehouse)? else {
        return Ok(CommandOutcome::ok(json!({
            "date": null,
            "ranked": 0,
        })));
    };

    let report = run_ranking_pass(warehouse, date)?;
    Ok(CommandOutcome::ok(serde_json::to_value(&report)?))
}
