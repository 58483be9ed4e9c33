use serde_json::json;

use trendscan_core::{run_screen, ScreenParams};
use trendscan_warehouse::Warehouse;

use crate::cli::ScreenArgs;
use crate::error::CliError;

use super::{resolve_date, CommandOutcome};

pub fn run(args: &ScreenArgs, warehouse: &Warehouse) -> Result<CommandOutcome, CliError> {
    let Some(date) = resolve_date(args.date.as_deref(), warehouse)? else {
        return Ok(CommandOutcome::ok(json!([])));
    };

    let params = ScreenParams {
        min_price: args.min_price,
        min_grade: args.min_grade,
        limit: (!args.unlimited).then_some(args.limit),
    };

    let candidates = run_screen(warehouse, date, &params)?;
    Ok(CommandOutcome::ok(serde_json::to_value(&candidates)?))
}
