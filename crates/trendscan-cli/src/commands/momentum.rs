use trendscan_core::{run_momentum_pass, MomentumScope};
use trendscan_warehouse::Warehouse;

use crate::cli::MomentumArgs;
use crate::error::CliError;

use super::CommandOutcome;

pub fn run(args: &MomentumArgs, warehouse: &Warehouse) -> Result<CommandOutcome, CliError> {
    let scope = if args.latest_only {
        MomentumScope::LatestOnly
    } else {
        MomentumScope::FullHistory
    };

    let report = run_momentum_pass(warehouse, scope, args.workers)?;
    let partial_failures = report.failed;

    Ok(CommandOutcome {
        data: serde_json::to_value(&report)?,
        partial_failures,
    })
}
