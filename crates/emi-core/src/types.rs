use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::EmiError;
use crate::EmiResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Interest rates as annual percentages (9 = 9% p.a.), the way lenders quote them.
pub type Rate = Decimal;

/// Unit of the tenure figure supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenureUnit {
    #[default]
    Years,
    Months,
}

/// Immutable parameters of a fixed-rate, fixed-term loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate_percent: Rate,
    pub tenure: u32,
    #[serde(default)]
    pub tenure_unit: TenureUnit,
    /// First calendar year of repayment. Years in the schedule are counted
    /// from disbursal, not aligned to January.
    pub start_year: i32,
}

impl LoanTerms {
    /// Resolve the tenure to a month count regardless of unit.
    ///
    /// The years-to-months conversion is checked so an absurd tenure surfaces
    /// as `InvalidInput` instead of wrapping.
    pub fn term_months(&self) -> EmiResult<u32> {
        match self.tenure_unit {
            TenureUnit::Years => {
                self.tenure
                    .checked_mul(12)
                    .ok_or_else(|| EmiError::InvalidInput {
                        field: "tenure".into(),
                        reason: "Tenure in years overflows the month count.".into(),
                    })
            }
            TenureUnit::Months => Ok(self.tenure),
        }
    }
}

/// Round to whole currency units, half away from zero. Applied only at the
/// output boundary; intermediate arithmetic stays unrounded.
pub fn round_money(value: Money) -> Money {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a percentage to two decimal places for display.
pub fn round_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
