use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::installment::{installment, monthly_rate};
use crate::types::*;
use crate::EmiResult;

/// One month of the amortization ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRow {
    /// 1-based month index over the whole loan.
    pub month: u32,
    /// 1..=12 within the loan-relative year.
    pub month_of_year: u32,
    pub year: i32,
    pub principal: Money,
    pub interest: Money,
    pub total: Money,
    /// Balance after this payment, floored at zero.
    pub balance: Money,
    /// Share of the principal repaid so far, in percent.
    pub paid_percent: Decimal,
}

/// Aggregation of one loan-relative year of payments.
///
/// Principal, interest and total are summed over the year's months; balance
/// and paid_percent carry the last month's values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearRow {
    pub year: i32,
    pub principal: Money,
    pub interest: Money,
    pub total: Money,
    pub balance: Money,
    pub paid_percent: Decimal,
    pub months: Vec<PeriodRow>,
}

/// Full amortization schedule output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    /// Monthly installment, rounded to whole currency units.
    pub installment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    /// Ascending by year; covers exactly the loan's term.
    pub years: Vec<YearRow>,
}

/// Build the month-by-month ledger and its per-year aggregation.
///
/// Years are counted from disbursal: month 1 always falls in `start_year`,
/// month 13 in `start_year + 1`, regardless of calendar month names. A term
/// that does not align to full years produces a final partial year summing
/// only the months present.
pub fn build_schedule(terms: &LoanTerms) -> EmiResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let term_months = terms.term_months()?;
    let emi = installment(terms.principal, terms.annual_rate_percent, term_months)?;
    let rate = monthly_rate(terms.annual_rate_percent);

    if rate.is_zero() {
        warnings.push("Zero interest rate; schedule amortizes principal straight-line.".into());
    }

    let mut years: Vec<YearRow> = Vec::new();
    let mut balance = terms.principal;

    for month in 1..=term_months {
        let interest = balance * rate;
        let principal_portion = emi - interest;
        balance -= principal_portion;

        let year = terms.start_year + ((month - 1) / 12) as i32;
        // The unclamped balance can dip a hair below zero on the final
        // period from accumulated division residue; clamp on emit.
        let row = PeriodRow {
            month,
            month_of_year: (month - 1) % 12 + 1,
            year,
            principal: principal_portion,
            interest,
            total: emi,
            balance: balance.max(Decimal::ZERO),
            paid_percent: dec!(100) * (terms.principal - balance) / terms.principal,
        };

        // Loan-relative years arrive in order, so the open bucket is always
        // the last entry. Flows are summed; balance and paid_percent are
        // overwritten with the latest month's values.
        match years.last_mut() {
            Some(bucket) if bucket.year == year => {
                bucket.principal += row.principal;
                bucket.interest += row.interest;
                bucket.total += row.total;
                bucket.balance = row.balance;
                bucket.paid_percent = row.paid_percent;
                bucket.months.push(row);
            }
            _ => years.push(YearRow {
                year,
                principal: row.principal,
                interest: row.interest,
                total: row.total,
                balance: row.balance,
                paid_percent: row.paid_percent,
                months: vec![row],
            }),
        }
    }

    // Round once, after accumulation, so year sums are not distorted by
    // per-month rounding.
    for bucket in &mut years {
        bucket.principal = round_money(bucket.principal);
        bucket.interest = round_money(bucket.interest);
        bucket.total = round_money(bucket.total);
        bucket.balance = round_money(bucket.balance);
        bucket.paid_percent = round_percent(bucket.paid_percent);
        for row in &mut bucket.months {
            row.principal = round_money(row.principal);
            row.interest = round_money(row.interest);
            row.total = round_money(row.total);
            row.balance = round_money(row.balance);
            row.paid_percent = round_percent(row.paid_percent);
        }
    }

    let rounded_emi = round_money(emi);
    let total_payment = rounded_emi * Decimal::from(term_months);
    let output = ScheduleOutput {
        installment: rounded_emi,
        total_payment,
        total_interest: total_payment - terms.principal,
        years,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate amortization schedule",
        &serde_json::json!({
            "principal": terms.principal.to_string(),
            "annual_rate_percent": terms.annual_rate_percent.to_string(),
            "term_months": term_months,
            "start_year": terms.start_year,
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn home_loan() -> LoanTerms {
        LoanTerms {
            principal: dec!(5_000_000),
            annual_rate_percent: dec!(9),
            tenure: 240,
            tenure_unit: TenureUnit::Months,
            start_year: 2024,
        }
    }

    #[test]
    fn test_headline_figures() {
        let result = build_schedule(&home_loan()).unwrap();
        let s = &result.result;
        assert_eq!(s.installment, dec!(44_986));
        assert_eq!(s.total_payment, dec!(10_796_640));
        assert_eq!(s.total_interest, dec!(5_796_640));
    }

    #[test]
    fn test_first_year_aggregation() {
        let result = build_schedule(&home_loan()).unwrap();
        let first = &result.result.years[0];

        assert_eq!(first.year, 2024);
        assert_eq!(first.months.len(), 12);
        assert_eq!(first.principal, dec!(93_636));
        assert_eq!(first.interest, dec!(446_200));
        assert_eq!(first.total, dec!(539_836));
        assert_eq!(first.balance, dec!(4_906_364));
        assert_eq!(first.paid_percent, dec!(1.87));
    }

    #[test]
    fn test_first_month_split() {
        let result = build_schedule(&home_loan()).unwrap();
        let m1 = &result.result.years[0].months[0];

        // Interest on the full principal: 5M * 0.0075 = 37,500
        assert_eq!(m1.interest, dec!(37_500));
        assert_eq!(m1.principal, dec!(7_486));
        assert_eq!(m1.balance, dec!(4_992_514));
        assert_eq!(m1.month, 1);
        assert_eq!(m1.month_of_year, 1);
        assert_eq!(m1.year, 2024);
    }

    #[test]
    fn test_final_year_fully_amortized() {
        let result = build_schedule(&home_loan()).unwrap();
        let years = &result.result.years;

        assert_eq!(years.len(), 20);
        let last = years.last().unwrap();
        assert_eq!(last.year, 2043);
        assert_eq!(last.balance, Decimal::ZERO);
        assert_eq!(last.paid_percent, dec!(100.00));
        assert_eq!(last.months.last().unwrap().balance, Decimal::ZERO);
    }

    #[test]
    fn test_partial_final_year() {
        let terms = LoanTerms {
            principal: dec!(1_000_000),
            annual_rate_percent: dec!(8),
            tenure: 14,
            tenure_unit: TenureUnit::Months,
            start_year: 2024,
        };
        let result = build_schedule(&terms).unwrap();
        let years = &result.result.years;

        assert_eq!(years.len(), 2);
        assert_eq!(years[0].year, 2024);
        assert_eq!(years[0].months.len(), 12);
        assert_eq!(years[1].year, 2025);
        assert_eq!(years[1].months.len(), 2);
        assert_eq!(years[1].balance, Decimal::ZERO);
        assert_eq!(years[1].paid_percent, dec!(100.00));
        // Month 13 is month 1 of the second loan-relative year
        assert_eq!(years[1].months[0].month, 13);
        assert_eq!(years[1].months[0].month_of_year, 1);
    }

    #[test]
    fn test_zero_rate_schedule() {
        let terms = LoanTerms {
            principal: dec!(1_200_000),
            annual_rate_percent: Decimal::ZERO,
            tenure: 12,
            tenure_unit: TenureUnit::Months,
            start_year: 2030,
        };
        let result = build_schedule(&terms).unwrap();
        let s = &result.result;

        assert_eq!(s.installment, dec!(100_000));
        assert_eq!(s.total_interest, Decimal::ZERO);
        for row in &s.years[0].months {
            assert_eq!(row.interest, Decimal::ZERO);
            assert_eq!(row.principal, dec!(100_000));
        }
        assert_eq!(s.years[0].balance, Decimal::ZERO);
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_principal_portions_sum_to_principal() {
        let result = build_schedule(&home_loan()).unwrap();
        let sum: Decimal = result
            .result
            .years
            .iter()
            .flat_map(|y| y.months.iter())
            .map(|m| m.principal)
            .sum();

        // Rounding each of the 240 months can drift by at most a unit each
        let drift = (sum - dec!(5_000_000)).abs();
        assert!(drift <= dec!(240), "drift was {drift}");
    }

    #[test]
    fn test_balance_monotone_and_paid_percent_non_decreasing() {
        let result = build_schedule(&home_loan()).unwrap();
        let months: Vec<_> = result
            .result
            .years
            .iter()
            .flat_map(|y| y.months.iter())
            .collect();

        for pair in months.windows(2) {
            assert!(pair[1].balance <= pair[0].balance);
            assert!(pair[1].paid_percent >= pair[0].paid_percent);
        }
        assert_eq!(months.last().unwrap().paid_percent, dec!(100.00));
    }

    #[test]
    fn test_invalid_terms_rejected() {
        let mut terms = home_loan();
        terms.principal = Decimal::ZERO;
        assert!(build_schedule(&terms).is_err());

        let mut terms = home_loan();
        terms.tenure = 0;
        assert!(build_schedule(&terms).is_err());
    }
}
