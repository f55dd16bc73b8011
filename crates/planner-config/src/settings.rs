//! Configuration structures.

use planner_risk::PlannerConfig;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::SettingsError;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub report: ReportSettings,
}

impl AppConfig {
    /// Reject values the planner cannot work with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let planner = &self.planner;

        if planner.allocations.is_empty() {
            return Err(SettingsError::Invalid(
                "planner.allocations must list at least one percentage".to_string(),
            ));
        }
        if let Some(bad) = planner
            .allocations
            .iter()
            .find(|pct| **pct <= Decimal::ZERO || **pct > dec!(100))
        {
            return Err(SettingsError::Invalid(format!(
                "planner.allocations entry {} is outside (0, 100]",
                bad
            )));
        }
        if planner.max_loss_pct <= Decimal::ZERO || planner.max_loss_pct >= dec!(100) {
            return Err(SettingsError::Invalid(format!(
                "planner.max_loss_pct {} is outside (0, 100)",
                planner.max_loss_pct
            )));
        }
        if let Some(risk) = planner.default_risk_pct {
            if risk < Decimal::ZERO {
                return Err(SettingsError::Invalid(format!(
                    "planner.default_risk_pct {} is negative",
                    risk
                )));
            }
        }
        if self.report.precision > MAX_PRECISION {
            return Err(SettingsError::Invalid(format!(
                "report.precision {} exceeds {}",
                self.report.precision, MAX_PRECISION
            )));
        }
        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(SettingsError::Invalid(format!(
                "logging.format must be \"pretty\" or \"json\", got {:?}",
                other
            ))),
        }
    }
}

const MAX_PRECISION: u32 = 8;

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "trade-planner".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Report rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Decimal places for prices, amounts and shares
    pub precision: u32,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self { precision: 2 }
    }
}
