use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Monthly installment and payment break-up for a loan, JSON in / JSON out.
#[napi]
pub fn payment_summary(input_json: String) -> NapiResult<String> {
    let terms: emi_core::types::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = emi_core::installment::payment_summary(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Month-by-month amortization ledger grouped by loan-relative year.
#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let terms: emi_core::types::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = emi_core::schedule::build_schedule(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// The built-in loan type presets, for populating the UI's tab strip.
#[napi]
pub fn loan_presets() -> NapiResult<String> {
    serde_json::to_string(emi_core::presets::all_presets()).map_err(to_napi_error)
}
