//! Show configuration command.

use anyhow::{Context, Result};
use planner_config::AppConfig;

pub fn run(config: &AppConfig) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}
