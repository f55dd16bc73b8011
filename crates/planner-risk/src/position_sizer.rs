//! Position sizing.

use planner_core::error::{CalcError, CalcResult};
use planner_core::types::{FixedRisk, PositionRow};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Portfolio allocations shown when none are configured.
pub const DEFAULT_ALLOCATIONS: [Decimal; 4] = [dec!(5), dec!(10), dec!(15), dec!(20)];

/// Builds the allocation table for a set of portfolio percentages.
#[derive(Debug, Clone)]
pub struct PositionSizer {
    allocations: Vec<Decimal>,
}

impl Default for PositionSizer {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOCATIONS.to_vec())
    }
}

impl PositionSizer {
    /// Create a new position sizer.
    pub fn new(allocations: Vec<Decimal>) -> Self {
        Self { allocations }
    }

    /// One row per configured allocation, in configured order.
    pub fn table(
        &self,
        portfolio_value: Decimal,
        entry_price: Decimal,
        stop_loss_price: Decimal,
    ) -> CalcResult<Vec<PositionRow>> {
        compute_position_sizing(portfolio_value, entry_price, stop_loss_price, &self.allocations)
    }

    /// Size a single allocation.
    pub fn row(
        portfolio_value: Decimal,
        entry_price: Decimal,
        stop_loss_price: Decimal,
        allocation_pct: Decimal,
    ) -> CalcResult<PositionRow> {
        let position_value = portfolio_value
            .checked_mul(allocation_pct / dec!(100))
            .ok_or(CalcError::Overflow("position value"))?;

        let shares = divide(position_value, entry_price, "entry price")?;
        let risk_per_share = risk_per_share(entry_price, stop_loss_price)?;
        let risk_amount = risk_per_share
            .checked_mul(shares)
            .ok_or(CalcError::Overflow("risk amount"))?;
        let risk_pct_of_portfolio = divide(risk_amount, portfolio_value, "portfolio value")?
            .checked_mul(dec!(100))
            .ok_or(CalcError::Overflow("risk percentage"))?;

        Ok(PositionRow {
            allocation_pct,
            position_value,
            shares,
            risk_per_share,
            risk_amount,
            risk_pct_of_portfolio,
        })
    }

    /// Fixed-percentage risk figures.
    ///
    /// The risk amount depends only on the portfolio; `shares_at_risk` is the
    /// share count whose stop-out would lose exactly that amount, and is absent
    /// when the stop is not below entry.
    pub fn fixed_risk(
        portfolio_value: Decimal,
        entry_price: Decimal,
        stop_loss_price: Decimal,
        risk_pct: Decimal,
    ) -> CalcResult<FixedRisk> {
        let risk_amount = compute_fixed_risk_amount(portfolio_value, risk_pct)?;
        let per_share = risk_per_share(entry_price, stop_loss_price)?;

        let shares_at_risk = if per_share > Decimal::ZERO {
            Some(divide(risk_amount, per_share, "risk per share")?)
        } else {
            None
        };

        Ok(FixedRisk {
            risk_pct,
            risk_amount,
            shares_at_risk,
        })
    }
}

/// Allocation table for arbitrary percentages.
pub fn compute_position_sizing(
    portfolio_value: Decimal,
    entry_price: Decimal,
    stop_loss_price: Decimal,
    allocation_percentages: &[Decimal],
) -> CalcResult<Vec<PositionRow>> {
    allocation_percentages
        .iter()
        .map(|pct| PositionSizer::row(portfolio_value, entry_price, stop_loss_price, *pct))
        .collect()
}

/// Capital at risk for a fixed portfolio percentage.
pub fn compute_fixed_risk_amount(portfolio_value: Decimal, risk_percentage: Decimal) -> CalcResult<Decimal> {
    portfolio_value
        .checked_mul(risk_percentage / dec!(100))
        .ok_or(CalcError::Overflow("fixed risk amount"))
}

fn risk_per_share(entry_price: Decimal, stop_loss_price: Decimal) -> CalcResult<Decimal> {
    entry_price
        .checked_sub(stop_loss_price)
        .ok_or(CalcError::Overflow("risk per share"))
}

fn divide(numerator: Decimal, denominator: Decimal, what: &'static str) -> CalcResult<Decimal> {
    if denominator.is_zero() {
        return Err(CalcError::DivisionByZero(what));
    }
    numerator.checked_div(denominator).ok_or(CalcError::Overflow(what))
}
