use trendscan_warehouse::{QueryGuardrails, Warehouse};

use crate::cli::SqlArgs;
use crate::error::CliError;

use super::CommandOutcome;

pub fn run(args: &SqlArgs, warehouse: &Warehouse) -> Result<CommandOutcome, CliError> {
    let guardrails = QueryGuardrails {
        max_rows: args.max_rows,
        query_timeout_ms: args.query_timeout_ms,
    };

    let result = warehouse.execute_query(&args.query, guardrails, args.write)?;
    Ok(CommandOutcome::ok(serde_json::to_value(&result)?))
}
