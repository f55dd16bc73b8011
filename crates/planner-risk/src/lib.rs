//! Risk calculations for trade planning.
//!
//! Provides stop-loss selection, position sizing, profit targets and the
//! planner that ties them together.

mod planner;
mod position_sizer;
mod profit_target;
mod stop_loss;

pub use planner::{compute_plan, PlannerConfig, TradePlanner};
pub use position_sizer::{
    compute_fixed_risk_amount, compute_position_sizing, PositionSizer, DEFAULT_ALLOCATIONS,
};
pub use profit_target::compute_profit_target;
pub use stop_loss::{compute_stop_loss, StopLossSelector, DEFAULT_MAX_LOSS_PCT};
