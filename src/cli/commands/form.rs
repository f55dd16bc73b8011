//! Interactive form command implementation.

use anyhow::{Context, Result};
use planner_config::AppConfig;
use planner_monitor::{FormState, PlanReport, PlannerForm};
use tracing::info;

use super::build_planner;
use crate::cli::FormArgs;

pub fn run(args: FormArgs, config: &AppConfig) -> Result<()> {
    let planner = build_planner(config, args.mode);
    let state = FormState::with_inputs(planner.clone(), args.inputs.to_raw(), config.report.precision);

    let inputs = PlannerForm::run(state).context("Terminal error in planner form")?;
    info!("Planner form closed");

    // Leave the last complete plan on screen
    if let Some(plan) = planner.evaluate(&inputs).plan() {
        let report = PlanReport::new(plan.clone()).with_precision(config.report.precision);
        print!("{}", report.summary());
    }

    Ok(())
}
