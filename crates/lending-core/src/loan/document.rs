use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::LendingError;
use crate::schedule::dates;
use crate::schedule::frequency::PaymentFrequency;
use crate::schedule::RepaymentMethod;
use crate::types::{with_metadata, ComputationOutput, Currency, Money, Rate};

use super::application::{validate_application, LoanApplication};
use super::records::BankAccount;

/// Bank-account details frozen onto a loan document at submission time.
///
/// Deliberately a copy, not a reference: later edits to the account
/// registry must not rewrite history on existing loans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
}

impl From<&BankAccount> for AccountSnapshot {
    fn from(account: &BankAccount) -> Self {
        AccountSnapshot {
            bank_name: account.bank_name.clone(),
            account_name: account.account_name.clone(),
            account_number: account.account_number.clone(),
        }
    }
}

/// The loan record handed to the loan store on submission.
///
/// Rate and currency are resolved from the product at this point; the
/// document stands on its own even if the product is later repriced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDocument {
    pub borrower_id: String,
    pub product_id: String,
    pub currency: Currency,
    /// Nominal annual rate in percent, fixed at submission.
    pub annual_rate_percent: Rate,
    pub principal: Money,
    pub term_months: i64,
    pub frequency: PaymentFrequency,
    pub method: RepaymentMethod,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub disbursement_account: AccountSnapshot,
    pub repayment_account: AccountSnapshot,
}

/// Freeze a submittable application into the document the loan store
/// accepts. Fails with the first outstanding validation violation; run
/// [`validate_application`] beforehand to collect all of them.
pub fn build_loan_document(
    application: &LoanApplication,
) -> Result<ComputationOutput<LoanDocument>, LendingError> {
    let start_time = std::time::Instant::now();

    let violations = validate_application(application);
    if let Some(first) = violations.first() {
        return Err(LendingError::InvalidInput {
            field: first.field.clone(),
            reason: first.message.clone(),
        });
    }

    // validate_application guarantees these are present
    let product = required(application.product.as_ref(), "product")?;
    let disbursement = required(application.disbursement_account.as_ref(), "disbursement_account")?;
    let repayment = required(application.repayment_account.as_ref(), "repayment_account")?;
    let principal = required(application.amount, "amount")?;
    let term_months = required(application.term_months, "term_months")?;
    let start_date = required(application.start_date, "start_date")?;

    let mut warnings = Vec::new();
    for (label, account) in [("disbursement", disbursement), ("repayment", repayment)] {
        if account.currency != product.currency {
            warnings.push(format!(
                "{label} account currency differs from the product currency"
            ));
        }
    }

    let document = LoanDocument {
        borrower_id: application.borrower_id.clone().unwrap_or_default(),
        product_id: product.id.clone(),
        currency: product.currency.clone(),
        annual_rate_percent: product.annual_rate_percent,
        principal,
        term_months,
        frequency: application.frequency,
        method: application.method,
        start_date,
        end_date: dates::maturity_date(start_date, term_months),
        disbursement_account: AccountSnapshot::from(disbursement),
        repayment_account: AccountSnapshot::from(repayment),
    };

    let elapsed = start_time.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan document assembly",
        &json!({
            "rate": "resolved from the selected product at submission time",
            "end_date": "start date advanced by the full term in months",
            "accounts": "denormalized snapshots, detached from the registry",
        }),
        warnings,
        elapsed,
        document,
    ))
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, LendingError> {
    value.ok_or_else(|| LendingError::InvalidInput {
        field: field.to_string(),
        reason: format!("{field} is required"),
    })
}
