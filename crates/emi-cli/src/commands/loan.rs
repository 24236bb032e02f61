use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use emi_core::installment;
use emi_core::presets;
use emi_core::types::LoanTerms;

use crate::input;

use super::{terms_from_flags, LoanKindArg, TenureUnitArg};

/// Arguments for the installment calculation
#[derive(Args)]
pub struct EmiArgs {
    /// Path to JSON input file with the loan terms (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal; defaults to the preset's amount when --loan-type is given
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (9 means 9% p.a.)
    #[arg(long, alias = "interest-rate")]
    pub rate: Option<Decimal>,

    /// Loan tenure, in the unit given by --tenure-unit
    #[arg(long)]
    pub tenure: Option<u32>,

    /// Unit of the tenure figure
    #[arg(long, default_value = "years")]
    pub tenure_unit: TenureUnitArg,

    /// Loan type preset; supplies default principal and slider bounds
    #[arg(long)]
    pub loan_type: Option<LoanKindArg>,

    /// First calendar year of repayment (defaults to the current year)
    #[arg(long)]
    pub start_year: Option<i32>,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: LoanTerms = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(terms) = input::read_stdin()? {
        terms
    } else {
        terms_from_flags(
            args.principal,
            args.rate,
            args.tenure,
            args.tenure_unit,
            args.loan_type,
            args.start_year,
        )?
    };

    let output = installment::payment_summary(&terms)?;
    Ok(serde_json::to_value(&output)?)
}

pub fn run_presets() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(presets::all_presets())?)
}
