//! Core data types for the trade planner.

mod inputs;
mod plan;

pub use inputs::{parse_field, InputField, RawInputs, TradeInputs};
pub use plan::{
    FixedRisk, PlanStatus, PositionRow, RiskMode, RiskSection, StopLossCandidates,
    StopLossRationale, StopLossResult, TradePlan,
};
