//! Derived results of a trade plan.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TradeInputs;
use crate::error::InputError;

/// How risk is accounted for in a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskMode {
    /// Risk reported per row of the allocation table
    #[default]
    AllocationTable,
    /// Risk fixed as a single percentage of the portfolio
    FixedRisk,
}

impl std::fmt::Display for RiskMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskMode::AllocationTable => write!(f, "allocation_table"),
            RiskMode::FixedRisk => write!(f, "fixed_risk"),
        }
    }
}

/// Which candidate produced the stop-loss price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopLossRationale {
    AtrBased,
    LowOfDay,
    MaxLossCap,
}

impl StopLossRationale {
    /// Display label. The cap label carries the cap percentage.
    pub fn label(&self, max_loss_pct: Decimal) -> String {
        match self {
            StopLossRationale::AtrBased => "ATR-based".to_string(),
            StopLossRationale::LowOfDay => "Low of Day".to_string(),
            StopLossRationale::MaxLossCap => format!("{}% Max Loss", max_loss_pct.normalize()),
        }
    }
}

/// The three stop prices considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopLossCandidates {
    pub atr: Decimal,
    pub low_of_day: Decimal,
    pub cap: Decimal,
}

/// Selected stop-loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopLossResult {
    /// Stop price, full precision
    pub price: Decimal,
    /// Winning candidate
    pub rationale: StopLossRationale,
    pub candidates: StopLossCandidates,
}

/// One row of the allocation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRow {
    /// Percentage of the portfolio allocated
    pub allocation_pct: Decimal,
    /// Capital allocated
    pub position_value: Decimal,
    /// Shares the allocation buys (fractional)
    pub shares: Decimal,
    pub risk_per_share: Decimal,
    /// Loss if the stop is hit
    pub risk_amount: Decimal,
    /// Loss as a percentage of the portfolio
    pub risk_pct_of_portfolio: Decimal,
}

/// Fixed-percentage risk figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedRisk {
    pub risk_pct: Decimal,
    /// Capital at risk
    pub risk_amount: Decimal,
    /// Shares whose stop-out loses exactly `risk_amount`
    pub shares_at_risk: Option<Decimal>,
}

/// Risk accounting section of a plan, one variant per mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RiskSection {
    AllocationTable { rows: Vec<PositionRow> },
    FixedRisk(FixedRisk),
}

impl RiskSection {
    pub fn mode(&self) -> RiskMode {
        match self {
            RiskSection::AllocationTable { .. } => RiskMode::AllocationTable,
            RiskSection::FixedRisk(_) => RiskMode::FixedRisk,
        }
    }
}

/// Everything derived from one input record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradePlan {
    pub inputs: TradeInputs,
    /// Cap applied to the stop loss, as a percentage below entry
    pub max_loss_pct: Decimal,
    pub stop_loss: StopLossResult,
    pub profit_target: Decimal,
    pub risk: RiskSection,
}

impl TradePlan {
    /// Label for the stop-loss rationale.
    pub fn stop_loss_label(&self) -> String {
        self.stop_loss.rationale.label(self.max_loss_pct)
    }
}

/// Outcome of evaluating an input record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanStatus {
    /// All inputs present and the plan could be computed
    Ready(TradePlan),
    /// Not ready to display
    Incomplete {
        errors: Vec<InputError>,
        /// Set when inputs parsed but the arithmetic could not be carried out
        reason: Option<String>,
    },
}

impl PlanStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, PlanStatus::Ready(_))
    }

    pub fn plan(&self) -> Option<&TradePlan> {
        match self {
            PlanStatus::Ready(plan) => Some(plan),
            PlanStatus::Incomplete { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rationale_labels() {
        assert_eq!(StopLossRationale::AtrBased.label(dec!(7)), "ATR-based");
        assert_eq!(StopLossRationale::LowOfDay.label(dec!(7)), "Low of Day");
        assert_eq!(StopLossRationale::MaxLossCap.label(dec!(7.00)), "7% Max Loss");
        assert_eq!(StopLossRationale::MaxLossCap.label(dec!(8.5)), "8.5% Max Loss");
    }

    #[test]
    fn test_risk_mode_serde() {
        let json = serde_json::to_string(&RiskMode::FixedRisk).unwrap();
        assert_eq!(json, "\"fixed_risk\"");
        let mode: RiskMode = serde_json::from_str("\"allocation_table\"").unwrap();
        assert_eq!(mode, RiskMode::AllocationTable);
    }
}
