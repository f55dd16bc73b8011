//! Plan command implementation.

use anyhow::{Context, Result};
use planner_config::AppConfig;
use planner_core::error::PlannerResult;
use planner_core::types::PlanStatus;
use planner_monitor::{incomplete_summary, PlanReport};
use std::path::Path;
use tracing::{info, warn};

use super::build_planner;
use crate::cli::{OutputFormat, PlanArgs};

pub fn run(args: PlanArgs, config: &AppConfig) -> Result<()> {
    let planner = build_planner(config, args.mode);
    info!("Evaluating trade plan ({} mode)", planner.mode());

    let status = planner.evaluate(&args.inputs.to_raw());
    let ready = status.is_ready();
    if !ready {
        warn!("Inputs incomplete, nothing to display");
    }

    let rendered = render(status, args.output, config.report.precision)?;
    print!("{}", rendered);

    if let (true, Some(save_path)) = (ready, &args.save) {
        save(save_path, &rendered)
            .with_context(|| format!("Failed to save plan to {}", save_path.display()))?;
        info!("Plan saved to {:?}", save_path);
    }

    Ok(())
}

/// Render a plan in the requested format, or the list of missing inputs.
pub fn render(status: PlanStatus, output: OutputFormat, precision: u32) -> PlannerResult<String> {
    let plan = match status {
        PlanStatus::Ready(plan) => plan,
        incomplete => return Ok(incomplete_summary(&incomplete).unwrap_or_default()),
    };

    let report = PlanReport::new(plan).with_precision(precision);
    match output {
        OutputFormat::Text => Ok(report.summary()),
        OutputFormat::Json => Ok(report.to_json()? + "\n"),
        OutputFormat::Csv => report.to_csv(),
    }
}

fn save(path: &Path, rendered: &str) -> PlannerResult<()> {
    std::fs::write(path, rendered)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::error::PlannerError;
    use planner_core::types::{InputField, RawInputs, RiskMode};
    use planner_risk::TradePlanner;

    fn inputs() -> RawInputs {
        RawInputs::new()
            .with_field(InputField::PortfolioValue, "10000")
            .with_field(InputField::EntryPrice, "100")
            .with_field(InputField::AtrPercentage, "5")
            .with_field(InputField::LowOfDay, "90")
            .with_field(InputField::ProfitRatio, "2")
    }

    fn ready() -> PlanStatus {
        TradePlanner::default().evaluate(&inputs())
    }

    #[test]
    fn test_render_text() {
        let text = render(ready(), OutputFormat::Text, 2).unwrap();
        assert!(text.contains("Stop Loss:           $95.00  (ATR-based)"));
        assert!(text.contains("Profit Target:       $110.00  (2:1 ratio)"));
        assert!(text.contains("10%: 10.00 shares"));
    }

    #[test]
    fn test_render_json() {
        let json = render(ready(), OutputFormat::Json, 2).unwrap();
        assert!(json.contains("\"generated_at\""));
        assert!(json.contains("\"mode\": \"allocation_table\""));
        assert!(json.ends_with('\n'));
    }

    #[test]
    fn test_render_csv() {
        let csv = render(ready(), OutputFormat::Csv, 2).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("allocation_pct,position_value"));
        assert_eq!(lines[2], "10,1000.00,10.00,5.00,50.00,0.50");
    }

    #[test]
    fn test_render_incomplete_inputs() {
        let status = TradePlanner::default()
            .with_mode(RiskMode::FixedRisk)
            .evaluate(&inputs().with_field(InputField::LowOfDay, ""));

        let text = render(status, OutputFormat::Json, 2).unwrap();
        assert!(text.starts_with("Insufficient input"));
        assert!(text.contains("Low of Day ($) is empty"));
        assert!(text.contains("Risk Percentage (%) is empty"));
    }

    #[test]
    fn test_save_writes_rendered_plan() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.txt");
        let rendered = render(ready(), OutputFormat::Text, 2).unwrap();

        save(&path, &rendered).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), rendered);

        let err = save(&dir.path().join("missing").join("plan.txt"), &rendered).unwrap_err();
        assert!(matches!(err, PlannerError::Io(_)));
    }
}
