//! Trade planner combining stop loss, profit target and position sizing.

use planner_core::error::{CalcError, CalcResult, InputError};
use planner_core::types::{
    InputField, PlanStatus, RawInputs, RiskMode, RiskSection, TradeInputs, TradePlan,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    compute_profit_target, PositionSizer, StopLossSelector, DEFAULT_ALLOCATIONS,
    DEFAULT_MAX_LOSS_PCT,
};

/// Planner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Risk accounting mode
    pub mode: RiskMode,
    /// Portfolio percentages for the allocation table
    pub allocations: Vec<Decimal>,
    /// Maximum loss below entry the stop may sit at, in percent
    pub max_loss_pct: Decimal,
    /// Risk percentage used in fixed-risk mode when the field is left blank
    pub default_risk_pct: Option<Decimal>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            mode: RiskMode::AllocationTable,
            allocations: DEFAULT_ALLOCATIONS.to_vec(),
            max_loss_pct: DEFAULT_MAX_LOSS_PCT,
            default_risk_pct: None,
        }
    }
}

/// Recomputes a full [`TradePlan`] from an input record.
#[derive(Debug, Clone)]
pub struct TradePlanner {
    config: PlannerConfig,
    sizer: PositionSizer,
    stop_loss: StopLossSelector,
}

impl Default for TradePlanner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

impl TradePlanner {
    /// Create a new planner.
    pub fn new(config: PlannerConfig) -> Self {
        let sizer = PositionSizer::new(config.allocations.clone());
        let stop_loss = StopLossSelector::new(config.max_loss_pct);

        Self {
            config,
            sizer,
            stop_loss,
        }
    }

    /// Switch the risk accounting mode.
    pub fn with_mode(mut self, mode: RiskMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn mode(&self) -> RiskMode {
        self.config.mode
    }

    /// Compute a plan from parsed inputs.
    ///
    /// Fixed-risk mode fails without a risk percentage from the inputs or
    /// the configured default.
    pub fn plan(&self, inputs: &TradeInputs) -> CalcResult<TradePlan> {
        let stop_loss = self.stop_loss.select(
            inputs.entry_price,
            inputs.atr_percentage,
            inputs.low_of_day,
        )?;

        let profit_target =
            compute_profit_target(inputs.entry_price, stop_loss.price, inputs.profit_ratio)?;

        let risk = match self.config.mode {
            RiskMode::AllocationTable => RiskSection::AllocationTable {
                rows: self
                    .sizer
                    .table(inputs.portfolio_value, inputs.entry_price, stop_loss.price)?,
            },
            RiskMode::FixedRisk => {
                let risk_pct = inputs
                    .risk_percentage
                    .or(self.config.default_risk_pct)
                    .ok_or(CalcError::MissingInput("risk percentage"))?;
                RiskSection::FixedRisk(PositionSizer::fixed_risk(
                    inputs.portfolio_value,
                    inputs.entry_price,
                    stop_loss.price,
                    risk_pct,
                )?)
            }
        };

        Ok(TradePlan {
            inputs: inputs.clone(),
            max_loss_pct: self.stop_loss.max_loss_pct(),
            stop_loss,
            profit_target,
            risk,
        })
    }

    /// Evaluate an input record, reporting what is still missing.
    ///
    /// Nothing is cached: every call recomputes from the record.
    pub fn evaluate(&self, raw: &RawInputs) -> PlanStatus {
        let raw = self.fill_defaults(raw);

        let inputs = match raw.parse(self.config.mode) {
            Ok(inputs) => inputs,
            Err(errors) => {
                debug!(
                    missing = errors.len(),
                    fields = ?errors.iter().map(InputError::field).collect::<Vec<_>>(),
                    "Inputs incomplete"
                );
                return PlanStatus::Incomplete {
                    errors,
                    reason: None,
                };
            }
        };

        match self.plan(&inputs) {
            Ok(plan) => {
                debug!(
                    stop = %plan.stop_loss.price,
                    target = %plan.profit_target,
                    mode = %self.config.mode,
                    "Plan computed"
                );
                PlanStatus::Ready(plan)
            }
            Err(e) => {
                debug!(error = %e, "Plan could not be computed");
                PlanStatus::Incomplete {
                    errors: Vec::new(),
                    reason: Some(e.to_string()),
                }
            }
        }
    }

    fn fill_defaults(&self, raw: &RawInputs) -> RawInputs {
        match self.config.default_risk_pct {
            Some(default)
                if self.config.mode == RiskMode::FixedRisk
                    && raw.get(InputField::RiskPercentage).trim().is_empty() =>
            {
                raw.with_field(InputField::RiskPercentage, default.to_string())
            }
            _ => raw.clone(),
        }
    }
}

/// Plan with the default configuration in the given mode.
pub fn compute_plan(inputs: &TradeInputs, mode: RiskMode) -> CalcResult<TradePlan> {
    TradePlanner::default().with_mode(mode).plan(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::types::StopLossRationale;
    use rust_decimal_macros::dec;

    fn raw() -> RawInputs {
        RawInputs::new()
            .with_field(InputField::PortfolioValue, "10000")
            .with_field(InputField::EntryPrice, "100")
            .with_field(InputField::AtrPercentage, "5")
            .with_field(InputField::LowOfDay, "90")
            .with_field(InputField::ProfitRatio, "2")
    }

    #[test]
    fn test_allocation_table_plan() {
        let planner = TradePlanner::default();
        let status = planner.evaluate(&raw());
        let plan = status.plan().unwrap();

        assert_eq!(plan.stop_loss.price, dec!(95));
        assert_eq!(plan.stop_loss.rationale, StopLossRationale::AtrBased);
        assert_eq!(plan.profit_target, dec!(110));
        assert_eq!(plan.stop_loss_label(), "ATR-based");

        match &plan.risk {
            RiskSection::AllocationTable { rows } => {
                assert_eq!(rows.len(), 4);
                assert_eq!(rows[1].allocation_pct, dec!(10));
                assert_eq!(rows[1].shares, dec!(10));
                assert_eq!(rows[1].risk_amount, dec!(50));
                assert_eq!(rows[1].risk_pct_of_portfolio, dec!(0.5));
            }
            other => panic!("unexpected risk section: {:?}", other),
        }
    }

    #[test]
    fn test_fixed_risk_plan() {
        let planner = TradePlanner::default().with_mode(RiskMode::FixedRisk);
        let status = planner.evaluate(&raw().with_field(InputField::RiskPercentage, "2"));
        let plan = status.plan().unwrap();

        assert_eq!(plan.risk.mode(), RiskMode::FixedRisk);
        match &plan.risk {
            RiskSection::FixedRisk(fixed) => {
                assert_eq!(fixed.risk_amount, dec!(200));
                assert_eq!(fixed.shares_at_risk, Some(dec!(40)));
            }
            other => panic!("unexpected risk section: {:?}", other),
        }
    }

    #[test]
    fn test_fixed_risk_needs_percentage() {
        let planner = TradePlanner::default().with_mode(RiskMode::FixedRisk);
        match planner.evaluate(&raw()) {
            PlanStatus::Incomplete { errors, reason } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field(), InputField::RiskPercentage);
                assert!(reason.is_none());
            }
            PlanStatus::Ready(_) => panic!("plan should not be ready"),
        }
    }

    #[test]
    fn test_default_risk_percentage_fills_blank_field() {
        let config = PlannerConfig {
            mode: RiskMode::FixedRisk,
            default_risk_pct: Some(dec!(1)),
            ..PlannerConfig::default()
        };
        let planner = TradePlanner::new(config);
        let plan = planner.evaluate(&raw()).plan().cloned().unwrap();

        assert_eq!(plan.inputs.risk_percentage, Some(dec!(1)));
        match plan.risk {
            RiskSection::FixedRisk(fixed) => assert_eq!(fixed.risk_amount, dec!(100)),
            other => panic!("unexpected risk section: {:?}", other),
        }
    }

    #[test]
    fn test_recompute_on_each_edit() {
        let planner = TradePlanner::default();
        let mut inputs = RawInputs::new();

        for (field, text) in [
            (InputField::PortfolioValue, "10000"),
            (InputField::EntryPrice, "100"),
            (InputField::AtrPercentage, "10"),
            (InputField::LowOfDay, "85"),
        ] {
            inputs = inputs.with_field(field, text);
            assert!(!planner.evaluate(&inputs).is_ready());
        }

        inputs = inputs.with_field(InputField::ProfitRatio, "3");
        let plan = planner.evaluate(&inputs).plan().cloned().unwrap();
        assert_eq!(plan.stop_loss.price, dec!(93));
        assert_eq!(plan.stop_loss.rationale, StopLossRationale::MaxLossCap);
        assert_eq!(plan.profit_target, dec!(121));

        inputs = inputs.with_field(InputField::LowOfDay, "97");
        let plan = planner.evaluate(&inputs).plan().cloned().unwrap();
        assert_eq!(plan.stop_loss.rationale, StopLossRationale::LowOfDay);
        assert_eq!(plan.profit_target, dec!(109));

        inputs = inputs.with_field(InputField::EntryPrice, "");
        assert!(!planner.evaluate(&inputs).is_ready());
    }

    #[test]
    fn test_zero_entry_is_not_ready() {
        let planner = TradePlanner::default();
        let status = planner.evaluate(
            &raw()
                .with_field(InputField::EntryPrice, "0")
                .with_field(InputField::LowOfDay, "0"),
        );
        match status {
            PlanStatus::Incomplete { errors, reason } => {
                assert!(errors.is_empty());
                assert!(reason.unwrap().contains("entry price"));
            }
            PlanStatus::Ready(_) => panic!("plan should not be ready"),
        }
    }

    #[test]
    fn test_compute_plan_helper() {
        let inputs = raw().parse(RiskMode::AllocationTable).unwrap();
        let plan = compute_plan(&inputs, RiskMode::AllocationTable).unwrap();
        assert_eq!(plan.max_loss_pct, dec!(7));
        assert_eq!(plan.profit_target, dec!(110));
    }

    #[test]
    fn test_fixed_risk_without_percentage_is_an_error() {
        let inputs = TradeInputs {
            portfolio_value: dec!(10000),
            entry_price: dec!(100),
            atr_percentage: dec!(5),
            low_of_day: dec!(90),
            profit_ratio: dec!(2),
            risk_percentage: None,
        };

        assert_eq!(
            compute_plan(&inputs, RiskMode::FixedRisk).unwrap_err(),
            CalcError::MissingInput("risk percentage")
        );

        let config = PlannerConfig {
            mode: RiskMode::FixedRisk,
            default_risk_pct: Some(dec!(1)),
            ..PlannerConfig::default()
        };
        let plan = TradePlanner::new(config).plan(&inputs).unwrap();
        match plan.risk {
            RiskSection::FixedRisk(fixed) => assert_eq!(fixed.risk_amount, dec!(100)),
            other => panic!("unexpected risk section: {:?}", other),
        }
    }
}
