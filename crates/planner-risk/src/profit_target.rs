//! Profit target from a reward-to-risk multiple.

use planner_core::error::{CalcError, CalcResult};
use rust_decimal::Decimal;

/// `entry + (entry - stop) * ratio`.
pub fn compute_profit_target(
    entry_price: Decimal,
    stop_loss_price: Decimal,
    profit_ratio: Decimal,
) -> CalcResult<Decimal> {
    entry_price
        .checked_sub(stop_loss_price)
        .and_then(|risk| risk.checked_mul(profit_ratio))
        .and_then(|reward| entry_price.checked_add(reward))
        .ok_or(CalcError::Overflow("profit target"))
}
