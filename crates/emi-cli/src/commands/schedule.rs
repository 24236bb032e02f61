use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use emi_core::schedule;
use emi_core::types::LoanTerms;

use crate::input;

use super::{terms_from_flags, LoanKindArg, TenureUnitArg};

/// Year-wise summary rows or the flat month-wise ledger, the two table views
/// the calculator offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScheduleMode {
    Year,
    Month,
}

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
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

    /// First calendar year of the schedule (defaults to the current year)
    #[arg(long)]
    pub start_year: Option<i32>,

    /// Schedule granularity
    #[arg(long, default_value = "year")]
    pub mode: ScheduleMode,

    /// In year mode, keep each year's months nested under its row
    #[arg(long)]
    pub expand: bool,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
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

    let output = schedule::build_schedule(&terms)?;
    let mut value = serde_json::to_value(&output)?;
    shape_schedule(&mut value, args.mode, args.expand);
    Ok(value)
}

/// Reshape the envelope's nested year rows into the requested view: year
/// summary rows, year rows with months kept nested, or the flat monthly
/// ledger.
fn shape_schedule(value: &mut Value, mode: ScheduleMode, expand: bool) {
    let Some(result) = value.get_mut("result").and_then(Value::as_object_mut) else {
        return;
    };
    let Some(Value::Array(mut years)) = result.remove("years") else {
        return;
    };

    let rows = match mode {
        ScheduleMode::Month => years
            .iter_mut()
            .filter_map(|year| year.get_mut("months"))
            .filter_map(Value::as_array_mut)
            .flat_map(std::mem::take)
            .collect(),
        ScheduleMode::Year => {
            if !expand {
                for year in &mut years {
                    if let Some(row) = year.as_object_mut() {
                        row.remove("months");
                    }
                }
            }
            years
        }
    };

    result.insert("schedule".to_string(), Value::Array(rows));
}
