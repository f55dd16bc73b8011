//! CLI command implementations.

pub mod form;
pub mod plan;
pub mod show_config;
pub mod validate;

use planner_config::AppConfig;
use planner_risk::TradePlanner;

use crate::cli::ModeArg;

/// Planner from configuration, with the mode optionally overridden.
pub fn build_planner(config: &AppConfig, mode: Option<ModeArg>) -> TradePlanner {
    let planner = TradePlanner::new(config.planner.clone());
    match mode {
        Some(mode) => planner.with_mode(mode.into()),
        None => planner,
    }
}
