//! Validate configuration command.

use anyhow::Result;
use planner_config::load_config_strict;
use std::path::Path;

pub fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_config_strict(config_path) {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Risk mode: {}", config.planner.mode);
            println!(
                "Allocations: {}",
                config
                    .planner
                    .allocations
                    .iter()
                    .map(|pct| format!("{}%", pct.normalize()))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            println!("Max loss: {}%", config.planner.max_loss_pct);
            match config.planner.default_risk_pct {
                Some(pct) => println!("Default risk: {}%", pct),
                None => println!("Default risk: none"),
            }
            println!("Report precision: {}", config.report.precision);
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
