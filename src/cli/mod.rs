//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use planner_core::types::{InputField, RawInputs, RiskMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "trade-planner")]
#[command(author, version, about = "Stop-loss, profit target and position sizing calculator")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides the configured level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute a trade plan from the given inputs
    Plan(PlanArgs),
    /// Open the interactive planner form
    Form(FormArgs),
    /// Print the effective configuration
    ShowConfig,
    /// Validate configuration
    ValidateConfig,
}

/// Risk accounting mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Risk per row of the allocation table
    AllocationTable,
    /// Single fixed risk percentage of the portfolio
    FixedRisk,
}

impl From<ModeArg> for RiskMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::AllocationTable => RiskMode::AllocationTable,
            ModeArg::FixedRisk => RiskMode::FixedRisk,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Trade inputs, kept as text so blank or malformed values surface as
/// incomplete input rather than argument errors.
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// Total portfolio value ($)
    #[arg(long, allow_hyphen_values = true)]
    pub portfolio_value: Option<String>,

    /// Entry price per share ($)
    #[arg(short, long, allow_hyphen_values = true)]
    pub entry_price: Option<String>,

    /// ATR as a percentage of price
    #[arg(short, long = "atr", allow_hyphen_values = true)]
    pub atr_percentage: Option<String>,

    /// Low of day ($)
    #[arg(long, allow_hyphen_values = true)]
    pub low_of_day: Option<String>,

    /// Reward-to-risk multiple
    #[arg(short, long, allow_hyphen_values = true)]
    pub profit_ratio: Option<String>,

    /// Portfolio percentage at risk (fixed-risk mode)
    #[arg(long = "risk-pct", allow_hyphen_values = true)]
    pub risk_percentage: Option<String>,
}

impl InputArgs {
    /// Convert to an input record, leaving absent values blank.
    pub fn to_raw(&self) -> RawInputs {
        let values = [
            (InputField::PortfolioValue, &self.portfolio_value),
            (InputField::EntryPrice, &self.entry_price),
            (InputField::AtrPercentage, &self.atr_percentage),
            (InputField::LowOfDay, &self.low_of_day),
            (InputField::ProfitRatio, &self.profit_ratio),
            (InputField::RiskPercentage, &self.risk_percentage),
        ];

        values
            .into_iter()
            .fold(RawInputs::new(), |raw, (field, value)| match value {
                Some(text) => raw.with_field(field, text.as_str()),
                None => raw,
            })
    }
}

#[derive(clap::Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Risk accounting mode (defaults to the configured mode)
    #[arg(short, long)]
    pub mode: Option<ModeArg>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Save the rendered plan to a file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct FormArgs {
    // Values to pre-fill the form with
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Risk accounting mode (defaults to the configured mode)
    #[arg(short, long)]
    pub mode: Option<ModeArg>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan_command() {
        let cli = Cli::try_parse_from([
            "trade-planner",
            "plan",
            "--portfolio-value",
            "10000",
            "--entry-price",
            "100",
            "--atr",
            "5",
            "--low-of-day",
            "90",
            "--profit-ratio",
            "2",
            "--mode",
            "fixed-risk",
            "--risk-pct",
            "1",
            "--output",
            "json",
        ])
        .unwrap();

        let Commands::Plan(args) = cli.command else {
            panic!("expected plan command");
        };
        assert_eq!(args.mode, Some(ModeArg::FixedRisk));
        assert_eq!(args.output, OutputFormat::Json);

        let raw = args.inputs.to_raw();
        assert_eq!(raw.portfolio_value, "10000");
        assert_eq!(raw.atr_percentage, "5");
        assert_eq!(raw.risk_percentage, "1");
    }

    #[test]
    fn test_absent_inputs_stay_blank() {
        let cli = Cli::try_parse_from(["trade-planner", "plan", "-e", "42.5"]).unwrap();
        let Commands::Plan(args) = cli.command else {
            panic!("expected plan command");
        };

        let raw = args.inputs.to_raw();
        assert_eq!(raw.entry_price, "42.5");
        assert_eq!(raw.low_of_day, "");
        assert_eq!(args.output, OutputFormat::Text);
        assert_eq!(args.mode, None);
    }

    #[test]
    fn test_negative_values_accepted() {
        let cli = Cli::try_parse_from(["trade-planner", "plan", "--atr", "-2"]).unwrap();
        let Commands::Plan(args) = cli.command else {
            panic!("expected plan command");
        };
        assert_eq!(args.inputs.atr_percentage.as_deref(), Some("-2"));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "trade-planner",
            "--config",
            "desk.toml",
            "--log-level",
            "debug",
            "show-config",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("desk.toml"));
        assert_eq!(cli.log_level.map(|l| l.as_str()), Some("debug"));
        assert!(matches!(cli.command, Commands::ShowConfig));
    }

    #[test]
    fn test_mode_converts() {
        assert_eq!(RiskMode::from(ModeArg::AllocationTable), RiskMode::AllocationTable);
        assert_eq!(RiskMode::from(ModeArg::FixedRisk), RiskMode::FixedRisk);
    }
}
