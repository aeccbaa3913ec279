//! Loan application lifecycle around the schedule engine.
//!
//! Registry record shapes, form-side validation, and the frozen document
//! handed to the loan store at submission. Persistence itself lives with
//! external services; this module only prepares and checks the payloads.

pub mod application;
pub mod document;
pub mod records;

pub use application::{validate_application, FieldViolation, LoanApplication};
pub use document::{build_loan_document, AccountSnapshot, LoanDocument};
pub use records::{BankAccount, Borrower, LoanProduct};
