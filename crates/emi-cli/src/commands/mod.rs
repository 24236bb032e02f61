pub mod loan;
pub mod schedule;

use clap::ValueEnum;
use rust_decimal::Decimal;

use emi_core::presets::{self, LoanKind};
use emi_core::types::{LoanTerms, TenureUnit};

/// CLI-facing mirror of the core tenure unit.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TenureUnitArg {
    Years,
    Months,
}

impl From<TenureUnitArg> for TenureUnit {
    fn from(unit: TenureUnitArg) -> Self {
        match unit {
            TenureUnitArg::Years => TenureUnit::Years,
            TenureUnitArg::Months => TenureUnit::Months,
        }
    }
}

/// CLI-facing mirror of the core loan kind.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LoanKindArg {
    Home,
    Personal,
    Car,
}

impl From<LoanKindArg> for LoanKind {
    fn from(kind: LoanKindArg) -> Self {
        match kind {
            LoanKindArg::Home => LoanKind::Home,
            LoanKindArg::Personal => LoanKind::Personal,
            LoanKindArg::Car => LoanKind::Car,
        }
    }
}

/// Assemble loan terms from individual flags. The principal falls back to the
/// selected preset's default and is clamped into its bounds, the way the UI
/// sliders constrain it.
pub fn terms_from_flags(
    principal: Option<Decimal>,
    rate: Option<Decimal>,
    tenure: Option<u32>,
    tenure_unit: TenureUnitArg,
    loan_type: Option<LoanKindArg>,
    start_year: Option<i32>,
) -> Result<LoanTerms, Box<dyn std::error::Error>> {
    let principal = match (principal, loan_type) {
        (Some(amount), Some(kind)) => presets::clamp_principal(kind.into(), amount),
        (Some(amount), None) => amount,
        (None, Some(kind)) => presets::preset_for(kind.into()).default_principal,
        (None, None) => return Err("--principal is required (or provide --loan-type)".into()),
    };

    Ok(LoanTerms {
        principal,
        annual_rate_percent: rate.ok_or("--rate is required (or provide --input)")?,
        tenure: tenure.ok_or("--tenure is required (or provide --input)")?,
        tenure_unit: tenure_unit.into(),
        start_year: start_year.unwrap_or_else(current_year),
    })
}

/// The calendar year the process is running in; the schedule's default start.
pub fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_explicit_principal_with_preset_is_clamped() {
        // 50k is below the home-loan slider's 100k floor
        let terms = terms_from_flags(
            Some(dec!(50_000)),
            Some(dec!(9)),
            Some(20),
            TenureUnitArg::Years,
            Some(LoanKindArg::Home),
            Some(2024),
        )
        .unwrap();
        assert_eq!(terms.principal, dec!(100_000));
    }

    #[test]
    fn test_explicit_principal_without_preset_is_untouched() {
        let terms = terms_from_flags(
            Some(dec!(50_000)),
            Some(dec!(9)),
            Some(20),
            TenureUnitArg::Years,
            None,
            Some(2024),
        )
        .unwrap();
        assert_eq!(terms.principal, dec!(50_000));
    }

    #[test]
    fn test_preset_supplies_default_principal() {
        let terms = terms_from_flags(
            None,
            Some(dec!(9)),
            Some(5),
            TenureUnitArg::Years,
            Some(LoanKindArg::Car),
            Some(2024),
        )
        .unwrap();
        assert_eq!(terms.principal, dec!(1_000_000));
        assert_eq!(terms.tenure_unit, TenureUnit::Years);
        assert_eq!(terms.start_year, 2024);
    }

    #[test]
    fn test_missing_principal_and_preset_is_an_error() {
        let err = terms_from_flags(
            None,
            Some(dec!(9)),
            Some(20),
            TenureUnitArg::Years,
            None,
            Some(2024),
        )
        .unwrap_err();
        assert!(err.to_string().contains("--principal"));
    }

    #[test]
    fn test_start_year_defaults_to_current_year() {
        let terms = terms_from_flags(
            Some(dec!(500_000)),
            Some(dec!(9)),
            Some(10),
            TenureUnitArg::Months,
            None,
            None,
        )
        .unwrap();
        assert_eq!(terms.start_year, current_year());
        assert_eq!(terms.tenure_unit, TenureUnit::Months);
    }
}
