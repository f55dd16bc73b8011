//! Trade inputs as typed by the user and as parsed numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::RiskMode;
use crate::error::InputError;

/// One of the user-editable input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    PortfolioValue,
    EntryPrice,
    AtrPercentage,
    LowOfDay,
    ProfitRatio,
    RiskPercentage,
}

impl InputField {
    /// All fields in form order.
    pub const ALL: [InputField; 6] = [
        InputField::PortfolioValue,
        InputField::EntryPrice,
        InputField::AtrPercentage,
        InputField::LowOfDay,
        InputField::ProfitRatio,
        InputField::RiskPercentage,
    ];

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            InputField::PortfolioValue => "Portfolio Value ($)",
            InputField::EntryPrice => "Entry Price ($)",
            InputField::AtrPercentage => "ATR Percentage (%)",
            InputField::LowOfDay => "Low of Day ($)",
            InputField::ProfitRatio => "Profit/Risk Ratio",
            InputField::RiskPercentage => "Risk Percentage (%)",
        }
    }

    /// Whether the field takes part in the given risk mode.
    pub fn is_used_by(&self, mode: RiskMode) -> bool {
        match self {
            InputField::RiskPercentage => mode == RiskMode::FixedRisk,
            _ => true,
        }
    }
}

impl std::fmt::Display for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Unparsed input text, one entry per field.
///
/// The record is immutable: editing a field yields a new record, which is then
/// re-evaluated from scratch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInputs {
    pub portfolio_value: String,
    pub entry_price: String,
    pub atr_percentage: String,
    pub low_of_day: String,
    pub profit_ratio: String,
    pub risk_percentage: String,
}

impl RawInputs {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently held for a field.
    pub fn get(&self, field: InputField) -> &str {
        match field {
            InputField::PortfolioValue => &self.portfolio_value,
            InputField::EntryPrice => &self.entry_price,
            InputField::AtrPercentage => &self.atr_percentage,
            InputField::LowOfDay => &self.low_of_day,
            InputField::ProfitRatio => &self.profit_ratio,
            InputField::RiskPercentage => &self.risk_percentage,
        }
    }

    /// Return a copy of this record with one field replaced.
    pub fn with_field(&self, field: InputField, text: impl Into<String>) -> Self {
        let mut next = self.clone();
        let text = text.into();
        match field {
            InputField::PortfolioValue => next.portfolio_value = text,
            InputField::EntryPrice => next.entry_price = text,
            InputField::AtrPercentage => next.atr_percentage = text,
            InputField::LowOfDay => next.low_of_day = text,
            InputField::ProfitRatio => next.profit_ratio = text,
            InputField::RiskPercentage => next.risk_percentage = text,
        }
        next
    }

    /// Parse every field the mode needs, collecting all failures.
    pub fn parse(&self, mode: RiskMode) -> Result<TradeInputs, Vec<InputError>> {
        let mut errors = Vec::new();
        let mut take = |field: InputField| match parse_field(field, self.get(field)) {
            Ok(value) => Some(value),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        let portfolio_value = take(InputField::PortfolioValue);
        let entry_price = take(InputField::EntryPrice);
        let atr_percentage = take(InputField::AtrPercentage);
        let low_of_day = take(InputField::LowOfDay);
        let profit_ratio = take(InputField::ProfitRatio);
        let risk_percentage = if InputField::RiskPercentage.is_used_by(mode) {
            take(InputField::RiskPercentage)
        } else {
            None
        };

        match (portfolio_value, entry_price, atr_percentage, low_of_day, profit_ratio) {
            (Some(portfolio_value), Some(entry_price), Some(atr_percentage), Some(low_of_day), Some(profit_ratio))
                if errors.is_empty() =>
            {
                Ok(TradeInputs {
                    portfolio_value,
                    entry_price,
                    atr_percentage,
                    low_of_day,
                    profit_ratio,
                    risk_percentage,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Parse one field's text into a decimal.
///
/// Blank text is `Missing`; anything that is neither a plain nor a scientific
/// decimal literal is `Invalid`.
pub fn parse_field(field: InputField, text: &str) -> Result<Decimal, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Missing { field });
    }
    // Digit separators are not part of numeric input
    if trimmed.contains('_') {
        return Err(InputError::Invalid {
            field,
            value: text.to_string(),
        });
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| InputError::Invalid {
            field,
            value: text.to_string(),
        })
}

/// Fully parsed trade parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInputs {
    /// Total capital available
    pub portfolio_value: Decimal,
    /// Intended entry price per share
    pub entry_price: Decimal,
    /// ATR as a percentage of price
    pub atr_percentage: Decimal,
    /// Session low
    pub low_of_day: Decimal,
    /// Reward-to-risk multiple
    pub profit_ratio: Decimal,
    /// Portfolio percentage at risk (fixed-risk mode only)
    pub risk_percentage: Option<Decimal>,
}
