use serde::{Deserialize, Serialize};

use crate::types::{Currency, Money, Rate};

/// A loan product as served by the product registry.
///
/// Products carry the interest rate a loan resolves at submission time and
/// the bounds the form validates against. Bounds are optional; a missing
/// bound simply does not constrain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanProduct {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub currency: Currency,
    /// Nominal annual rate in percent.
    pub annual_rate_percent: Rate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_term_months: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_term_months: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<Money>,
}

/// A borrower as served by the borrower registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Borrower {
    pub id: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A bank account as served by the account registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: String,
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default)]
    pub currency: Currency,
}
