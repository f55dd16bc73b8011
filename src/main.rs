//! Trade planner CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use planner_config::load_config;
use planner_monitor::setup_logging;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Validation reports its own errors, so it runs before the config is loaded
    if let Commands::ValidateConfig = cli.command {
        let level = cli.log_level.map(|l| l.as_str()).unwrap_or("info");
        let _guard = setup_logging(level, cli.json_logs, None);
        return cli::commands::validate::run(&cli.config);
    }

    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {:?}", cli.config))?;

    // Setup logging
    let log_file = config.logging.file.as_deref().map(Path::new);
    let log_level = match (&cli.command, log_file) {
        // Console logging would draw over the form
        (Commands::Form(_), None) => "off",
        _ => cli
            .log_level
            .map(|l| l.as_str())
            .unwrap_or(config.logging.level.as_str()),
    };
    let json_logs = cli.json_logs || config.logging.format == "json";
    let _guard = setup_logging(log_level, json_logs, log_file);

    // Execute command
    match cli.command {
        Commands::Plan(args) => cli::commands::plan::run(args, &config),
        Commands::Form(args) => cli::commands::form::run(args, &config),
        Commands::ShowConfig => cli::commands::show_config::run(&config),
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config),
    }
}
