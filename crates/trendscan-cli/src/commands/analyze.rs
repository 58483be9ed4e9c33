use trendscan_core::{run_analysis, MomentumScope, ScreenParams};
use trendscan_warehouse::Warehouse;

use crate::cli::AnalyzeArgs;
use crate::error::CliError;

use super::CommandOutcome;

pub fn run(args: &AnalyzeArgs, warehouse: &Warehouse) -> Result<CommandOutcome, CliError> {
    let scope = if args.latest_only {
        MomentumScope::LatestOnly
    } else {
        MomentumScope::FullHistory
    };
    let params = ScreenParams {
        min_price: args.min_price,
        min_grade: args.min_grade,
        limit: (!args.unlimited).then_some(args.limit),
    };

    let report = run_analysis(warehouse, &params, scope, args.workers)?;
    let partial_failures = report.momentum.failed;

    Ok(CommandOutcome {
        data: serde_json::to_value(&report)?,
        partial_failures,
    })
}
