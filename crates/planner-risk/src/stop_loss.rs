//! Stop-loss selection.

use planner_core::error::{CalcError, CalcResult};
use planner_core::types::{StopLossCandidates, StopLossRationale, StopLossResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

/// Default hard cap on the loss per share, as a percentage of entry.
pub const DEFAULT_MAX_LOSS_PCT: Decimal = dec!(7);

/// Picks the stop closest to entry among the ATR stop, the low of day and the
/// maximum-loss cap.
#[derive(Debug, Clone)]
pub struct StopLossSelector {
    max_loss_pct: Decimal,
}

impl Default for StopLossSelector {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LOSS_PCT)
    }
}

impl StopLossSelector {
    /// Create a selector with the given maximum loss percentage.
    pub fn new(max_loss_pct: Decimal) -> Self {
        Self { max_loss_pct }
    }

    /// Maximum loss percentage applied by the cap.
    pub fn max_loss_pct(&self) -> Decimal {
        self.max_loss_pct
    }

    /// Compute the three candidate stops.
    pub fn candidates(
        &self,
        entry_price: Decimal,
        atr_percentage: Decimal,
        low_of_day: Decimal,
    ) -> CalcResult<StopLossCandidates> {
        Ok(StopLossCandidates {
            atr: price_below(entry_price, atr_percentage, "ATR stop")?,
            low_of_day,
            cap: price_below(entry_price, self.max_loss_pct, "max loss stop")?,
        })
    }

    /// Select the highest candidate.
    ///
    /// Candidates are compared in the order ATR, low of day, cap and a later
    /// candidate wins a tie, so the cap wins whenever it equals the best.
    pub fn select(
        &self,
        entry_price: Decimal,
        atr_percentage: Decimal,
        low_of_day: Decimal,
    ) -> CalcResult<StopLossResult> {
        let candidates = self.candidates(entry_price, atr_percentage, low_of_day)?;

        let mut price = candidates.atr;
        let mut rationale = StopLossRationale::AtrBased;

        if candidates.low_of_day >= price {
            price = candidates.low_of_day;
            rationale = StopLossRationale::LowOfDay;
        }
        if candidates.cap >= price {
            price = candidates.cap;
            rationale = StopLossRationale::MaxLossCap;
        }

        debug!(
            atr = %candidates.atr,
            low_of_day = %candidates.low_of_day,
            cap = %candidates.cap,
            stop = %price,
            ?rationale,
            "Stop loss selected"
        );

        Ok(StopLossResult {
            price,
            rationale,
            candidates,
        })
    }
}

/// `price * (1 - percent / 100)`.
fn price_below(price: Decimal, percent: Decimal, what: &'static str) -> CalcResult<Decimal> {
    let factor = Decimal::ONE
        .checked_sub(percent / dec!(100))
        .ok_or(CalcError::Overflow(what))?;
    price.checked_mul(factor).ok_or(CalcError::Overflow(what))
}

/// Stop loss with the default 7% cap.
pub fn compute_stop_loss(
    entry_price: Decimal,
    atr_percentage: Decimal,
    low_of_day: Decimal,
) -> CalcResult<StopLossResult> {
    StopLossSelector::default().select(entry_price, atr_percentage, low_of_day)
}
