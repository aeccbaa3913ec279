use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[napi]
pub fn build_loan_schedule(input_json: String) -> NapiResult<String> {
    let input: lending_core::schedule::builder::LoanScheduleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        lending_core::schedule::builder::build_loan_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn export_schedule_csv(input_json: String) -> NapiResult<String> {
    let input: lending_core::schedule::builder::LoanScheduleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let rows = lending_core::schedule::builder::amortization_rows(&input);
    lending_core::schedule::export::csv_string(&rows).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loan application
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
struct ValidationResponse {
    valid: bool,
    violations: Vec<lending_core::loan::application::FieldViolation>,
}

#[napi]
pub fn validate_loan_application(input_json: String) -> NapiResult<String> {
    let application: lending_core::loan::application::LoanApplication =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let violations = lending_core::loan::application::validate_application(&application);
    let response = ValidationResponse {
        valid: violations.is_empty(),
        violations,
    };
    serde_json::to_string(&response).map_err(to_napi_error)
}

#[napi]
pub fn build_loan_document(input_json: String) -> NapiResult<String> {
    let application: lending_core::loan::application::LoanApplication =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        lending_core::loan::document::build_loan_document(&application).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
