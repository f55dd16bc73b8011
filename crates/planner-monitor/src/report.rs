//! Plan report generation.

use chrono::{DateTime, Utc};
use planner_core::error::{InputError, PlannerError, PlannerResult};
use planner_core::types::{PlanStatus, RiskSection, TradePlan};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

const RULE_HEAVY: &str = "═══════════════════════════════════════════════════════════\n";
const RULE_LIGHT: &str = "───────────────────────────────────────────────────────────\n";

/// Complete plan report.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub generated_at: DateTime<Utc>,
    pub plan: TradePlan,
    /// Decimal places used when rendering
    #[serde(skip)]
    precision: u32,
}

impl PlanReport {
    /// Create a report rendered with two decimal places.
    pub fn new(plan: TradePlan) -> Self {
        Self {
            generated_at: Utc::now(),
            plan,
            precision: 2,
        }
    }

    /// Set the number of decimal places for rendered figures.
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let plan = &self.plan;
        let mut s = String::new();

        s.push_str(RULE_HEAVY);
        s.push_str("                        TRADE PLAN                         \n");
        s.push_str(RULE_HEAVY);
        s.push('\n');

        s.push_str("EXITS\n");
        s.push_str(RULE_LIGHT);
        s.push_str(&format!(
            "  Stop Loss:           ${}  ({})\n",
            self.fixed(plan.stop_loss.price),
            plan.stop_loss_label()
        ));
        s.push_str(&format!(
            "  Profit Target:       ${}  ({}:1 ratio)\n",
            self.fixed(plan.profit_target),
            plan.inputs.profit_ratio.normalize()
        ));
        s.push('\n');

        match &plan.risk {
            RiskSection::AllocationTable { rows } => {
                s.push_str("POSITION SIZE                   RISK\n");
                s.push_str(RULE_LIGHT);
                for row in rows {
                    let size = format!(
                        "{}%: {} shares",
                        row.allocation_pct.normalize(),
                        self.fixed(row.shares)
                    );
                    s.push_str(&format!(
                        "  {:<30}${} ({}%)\n",
                        size,
                        self.fixed(row.risk_amount),
                        self.fixed(row.risk_pct_of_portfolio)
                    ));
                }
            }
            RiskSection::FixedRisk(fixed) => {
                s.push_str("RISK\n");
                s.push_str(RULE_LIGHT);
                s.push_str(&format!(
                    "  Risk Percentage:     {}%\n",
                    fixed.risk_pct.normalize()
                ));
                s.push_str(&format!(
                    "  Risk Amount:         ${}\n",
                    self.fixed(fixed.risk_amount)
                ));
                match fixed.shares_at_risk {
                    Some(shares) => s.push_str(&format!(
                        "  Shares at Risk:      {}\n",
                        self.fixed(shares)
                    )),
                    None => s.push_str("  Shares at Risk:      n/a (stop not below entry)\n"),
                }
            }
        }
        s.push('\n');

        s.push_str(RULE_HEAVY);

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> PlannerResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PlannerError::Serialization(e.to_string()))
    }

    /// Export the risk section to CSV.
    pub fn to_csv(&self) -> PlannerResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        match &self.plan.risk {
            RiskSection::AllocationTable { rows } => {
                writer
                    .write_record([
                        "allocation_pct",
                        "position_value",
                        "shares",
                        "risk_per_share",
                        "risk_amount",
                        "risk_pct_of_portfolio",
                    ])
                    .map_err(csv_error)?;
                for row in rows {
                    writer
                        .write_record([
                            row.allocation_pct.normalize().to_string(),
                            self.fixed(row.position_value),
                            self.fixed(row.shares),
                            self.fixed(row.risk_per_share),
                            self.fixed(row.risk_amount),
                            self.fixed(row.risk_pct_of_portfolio),
                        ])
                        .map_err(csv_error)?;
                }
            }
            RiskSection::FixedRisk(fixed) => {
                writer
                    .write_record(["risk_pct", "risk_amount", "shares_at_risk"])
                    .map_err(csv_error)?;
                writer
                    .write_record([
                        fixed.risk_pct.normalize().to_string(),
                        self.fixed(fixed.risk_amount),
                        fixed.shares_at_risk.map(|s| self.fixed(s)).unwrap_or_default(),
                    ])
                    .map_err(csv_error)?;
            }
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| PlannerError::Serialization(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| PlannerError::Serialization(e.to_string()))
    }

    fn fixed(&self, value: Decimal) -> String {
        format_fixed(value, self.precision)
    }
}

fn csv_error(e: csv::Error) -> PlannerError {
    PlannerError::Serialization(e.to_string())
}

/// Round half away from zero and pad to exactly `precision` places.
pub fn format_fixed(value: Decimal, precision: u32) -> String {
    let rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", precision as usize, rounded)
}

/// Text shown while inputs are incomplete.
pub fn incomplete_summary(status: &PlanStatus) -> Option<String> {
    let PlanStatus::Incomplete { errors, reason } = status else {
        return None;
    };

    let mut s = String::from("Insufficient input: nothing to display yet.\n");
    for error in errors {
        s.push_str(&format!("  - {}\n", describe(error)));
    }
    if let Some(reason) = reason {
        s.push_str(&format!("  - {}\n", reason));
    }
    Some(s)
}

fn describe(error: &InputError) -> String {
    match error {
        InputError::Missing { field } => format!("{} is empty", field),
        InputError::Invalid { .. } => error.to_string(),
    }
}
