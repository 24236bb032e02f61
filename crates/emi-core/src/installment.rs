use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::EmiError;
use crate::types::*;
use crate::EmiResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);

/// Nominal monthly rate from an annual percentage: r / 12 / 100.
///
/// This is the flat division lenders use for EMI quotes, not the effective
/// compounded conversion.
pub fn monthly_rate(annual_rate_percent: Rate) -> Rate {
    annual_rate_percent / MONTHS_PER_YEAR / HUNDRED
}

/// Fixed monthly installment that fully amortizes `principal` over
/// `term_months` at monthly compounding.
///
/// Uses the standard annuity formula E = P * i * (1+i)^n / ((1+i)^n - 1).
/// A zero rate falls back to straight-line P / n, where the formula's
/// denominator vanishes. No rounding here; callers round at the output
/// boundary.
pub fn installment(
    principal: Money,
    annual_rate_percent: Rate,
    term_months: u32,
) -> EmiResult<Money> {
    validate_terms(principal, annual_rate_percent, term_months)?;

    let i = monthly_rate(annual_rate_percent);
    if i.is_zero() {
        return Ok(principal / Decimal::from(term_months));
    }

    let growth = (Decimal::ONE + i).powu(u64::from(term_months));
    Ok(principal * i * growth / (growth - Decimal::ONE))
}

/// Headline payment figures for a loan, as shown next to the break-up chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSummary {
    /// Monthly installment, rounded to whole currency units.
    pub installment: Money,
    /// Rounded installment times the number of months.
    pub total_payment: Money,
    pub total_interest: Money,
    /// Principal's share of the total payment, in percent.
    pub principal_share_percent: Rate,
    /// Interest's share of the total payment, in percent.
    pub interest_share_percent: Rate,
}

/// Compute the installment and payment break-up for a loan.
pub fn payment_summary(terms: &LoanTerms) -> EmiResult<ComputationOutput<PaymentSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let term_months = terms.term_months()?;
    let raw = installment(terms.principal, terms.annual_rate_percent, term_months)?;

    if terms.annual_rate_percent.is_zero() {
        warnings.push("Zero interest rate; installments are straight-line principal.".into());
    }

    // The total is the rounded installment times the term, matching what the
    // borrower actually pays each month.
    let installment = round_money(raw);
    let total_payment = installment * Decimal::from(term_months);
    let total_interest = total_payment - terms.principal;

    // A sub-unit principal rounds the installment to zero; the shares of a
    // zero total are undefined, not an error.
    let (principal_share_percent, interest_share_percent) = if total_payment.is_zero() {
        warnings.push("Installment rounds to zero; payment shares are undefined.".into());
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        (
            round_percent(HUNDRED * terms.principal / total_payment),
            round_percent(HUNDRED * total_interest / total_payment),
        )
    };

    let output = PaymentSummary {
        installment,
        total_payment,
        total_interest,
        principal_share_percent,
        interest_share_percent,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Equated Monthly Installment (fixed-rate annuity)",
        &serde_json::json!({
            "principal": terms.principal.to_string(),
            "annual_rate_percent": terms.annual_rate_percent.to_string(),
            "term_months": term_months,
        }),
        warnings,
        elapsed,
        output,
    ))
}

pub(crate) fn validate_terms(
    principal: Money,
    annual_rate_percent: Rate,
    term_months: u32,
) -> EmiResult<()> {
    if principal <= Decimal::ZERO {
        return Err(EmiError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive.".into(),
        });
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(EmiError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate cannot be negative.".into(),
        });
    }
    if term_months == 0 {
        return Err(EmiError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least 1 month.".into(),
        });
    }
    Ok(())
}
