use clap::Args;
use serde_json::{json, Value};

use lending_core::loan::application::{validate_application, LoanApplication};
use lending_core::loan::document::build_loan_document;

use crate::input;

/// Arguments for application validation
#[derive(Args)]
pub struct ValidateArgs {
    /// Path to a JSON or YAML application file
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for assembling a submittable loan document
#[derive(Args)]
pub struct SubmitArgs {
    /// Path to a JSON or YAML application file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_validate(args: ValidateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let application = read_application(args.input.as_deref(), "validation")?;
    let violations = validate_application(&application);

    Ok(json!({
        "valid": violations.is_empty(),
        "violations": violations,
    }))
}

pub fn run_submit(args: SubmitArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let application = read_application(args.input.as_deref(), "submission")?;

    let violations = validate_application(&application);
    if !violations.is_empty() {
        let summary: Vec<String> = violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect();
        return Err(format!("application is not submittable: {}", summary.join("; ")).into());
    }

    let result = build_loan_document(&application)?;
    Ok(serde_json::to_value(result)?)
}

fn read_application(
    path: Option<&str>,
    purpose: &str,
) -> Result<LoanApplication, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        input::file::read_input(path)
    } else if let Some(data) = input::stdin::read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else {
        Err(format!("--input file is required for {purpose}").into())
    }
}
