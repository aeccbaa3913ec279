use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schedule::builder::LoanScheduleInput;
use crate::schedule::frequency::PaymentFrequency;
use crate::schedule::RepaymentMethod;
use crate::types::Money;

use super::records::{BankAccount, LoanProduct};

/// A draft loan application as assembled by the origination form.
///
/// Everything is optional while the user is still filling the form in;
/// [`validate_application`] decides whether it is submittable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borrower_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<LoanProduct>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_months: Option<i64>,
    #[serde(default)]
    pub frequency: PaymentFrequency,
    #[serde(default)]
    pub method: RepaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disbursement_account: Option<BankAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repayment_account: Option<BankAccount>,
}

impl LoanApplication {
    /// Project the application onto the schedule engine's input. The rate
    /// comes from the selected product; with no product selected the rate
    /// stays unset and the engine computes at 0%.
    pub fn schedule_input(&self) -> LoanScheduleInput {
        LoanScheduleInput {
            principal: self.amount,
            annual_rate_percent: self.product.as_ref().map(|p| p.annual_rate_percent),
            term_months: self.term_months,
            frequency: self.frequency,
            method: self.method,
            start_date: self.start_date,
        }
    }
}

/// A single validation failure, keyed by the offending field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    fn new(field: &str, message: impl Into<String>) -> Self {
        FieldViolation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Check an application against required fields and product bounds.
///
/// Returns every violation rather than stopping at the first, so a form
/// can surface all of them at once. An empty result means the application
/// is submittable. The schedule engine itself never runs these checks; it
/// computes for any positive numerics regardless of product bounds.
pub fn validate_application(application: &LoanApplication) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    match application.borrower_id.as_deref() {
        Some(id) if !id.trim().is_empty() => {}
        _ => violations.push(FieldViolation::new("borrower_id", "a borrower is required")),
    }

    match &application.product {
        Some(product) => {
            if product.annual_rate_percent < Decimal::ZERO {
                violations.push(FieldViolation::new(
                    "product.annual_rate_percent",
                    "product rate must not be negative",
                ));
            }
        }
        None => violations.push(FieldViolation::new("product", "a loan product is required")),
    }

    match application.amount {
        Some(amount) if amount > Decimal::ZERO => {
            if let Some(product) = &application.product {
                if let Some(min) = product.min_amount {
                    if amount < min {
                        violations.push(FieldViolation::new(
                            "amount",
                            format!("amount must be at least {min}"),
                        ));
                    }
                }
                if let Some(max) = product.max_amount {
                    if amount > max {
                        violations.push(FieldViolation::new(
                            "amount",
                            format!("amount must be at most {max}"),
                        ));
                    }
                }
            }
        }
        Some(_) => violations.push(FieldViolation::new("amount", "amount must be positive")),
        None => violations.push(FieldViolation::new("amount", "amount is required")),
    }

    match application.term_months {
        Some(term) if term > 0 => {
            if let Some(product) = &application.product {
                if let Some(min) = product.min_term_months {
                    if term < min {
                        violations.push(FieldViolation::new(
                            "term_months",
                            format!("term must be at least {min} months"),
                        ));
                    }
                }
                if let Some(max) = product.max_term_months {
                    if term > max {
                        violations.push(FieldViolation::new(
                            "term_months",
                            format!("term must be at most {max} months"),
                        ));
                    }
                }
            }
        }
        Some(_) => violations.push(FieldViolation::new(
            "term_months",
            "term must be a positive number of months",
        )),
        None => violations.push(FieldViolation::new("term_months", "term is required")),
    }

    if application.start_date.is_none() {
        violations.push(FieldViolation::new("start_date", "a start date is required"));
    }
    if application.disbursement_account.is_none() {
        violations.push(FieldViolation::new(
            "disbursement_account",
            "a disbursement account is required",
        ));
    }
    if application.repayment_account.is_none() {
        violations.push(FieldViolation::new(
            "repayment_account",
            "a repayment account is required",
        ));
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Currency;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn product() -> LoanProduct {
        LoanProduct {
            id: "prod-1".to_string(),
            name: "Term Loan".to_string(),
            currency: Currency::USD,
            annual_rate_percent: dec!(12),
            min_term_months: Some(3),
            max_term_months: Some(60),
            min_amount: Some(dec!(500)),
            max_amount: Some(dec!(50000)),
        }
    }

    fn account(id: &str) -> BankAccount {
        BankAccount {
            id: id.to_string(),
            bank_name: "First Example Bank".to_string(),
            account_name: "Acme Ltd".to_string(),
            account_number: "0011223344".to_string(),
            branch: None,
            currency: Currency::USD,
        }
    }

    fn complete_application() -> LoanApplication {
        LoanApplication {
            borrower_id: Some("bor-7".to_string()),
            product: Some(product()),
            amount: Some(dec!(10000)),
            term_months: Some(12),
            frequency: PaymentFrequency::Monthly,
            method: RepaymentMethod::EqualTotal,
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1),
            disbursement_account: Some(account("acct-1")),
            repayment_account: Some(account("acct-2")),
        }
    }

    #[test]
    fn test_complete_application_is_valid() {
        assert_eq!(validate_application(&complete_application()), Vec::new());
    }

    #[test]
    fn test_empty_application_reports_every_required_field() {
        let violations = validate_application(&LoanApplication::default());
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "borrower_id",
                "product",
                "amount",
                "term_months",
                "start_date",
                "disbursement_account",
                "repayment_account",
            ]
        );
    }

    #[test]
    fn test_amount_outside_product_bounds() {
        let mut application = complete_application();
        application.amount = Some(dec!(100));
        let violations = validate_application(&application);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "amount");
        assert!(violations[0].message.contains("at least 500"));

        application.amount = Some(dec!(90000));
        let violations = validate_application(&application);
        assert!(violations[0].message.contains("at most 50000"));
    }

    #[test]
    fn test_term_outside_product_bounds() {
        let mut application = complete_application();
        application.term_months = Some(1);
        assert!(validate_application(&application)[0]
            .message
            .contains("at least 3 months"));

        application.term_months = Some(72);
        assert!(validate_application(&application)[0]
            .message
            .contains("at most 60 months"));
    }

    #[test]
    fn test_negative_product_rate_is_rejected_upstream_of_the_engine() {
        let mut application = complete_application();
        if let Some(product) = application.product.as_mut() {
            product.annual_rate_percent = dec!(-1);
        }
        let violations = validate_application(&application);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "product.annual_rate_percent");
    }

    #[test]
    fn test_blank_borrower_id_is_missing() {
        let mut application = complete_application();
        application.borrower_id = Some("   ".to_string());
        assert_eq!(validate_application(&application)[0].field, "borrower_id");
    }

    #[test]
    fn test_schedule_input_takes_rate_from_product() {
        let application = complete_application();
        let input = application.schedule_input();
        assert_eq!(input.principal, Some(dec!(10000)));
        assert_eq!(input.annual_rate_percent, Some(dec!(12)));
        assert_eq!(input.term_months, Some(12));
        assert_eq!(input.method, RepaymentMethod::EqualTotal);

        let blank = LoanApplication::default();
        assert_eq!(blank.schedule_input().annual_rate_percent, None);
    }
}
