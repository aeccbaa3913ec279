//! Amortization schedule engine.
//!
//! The builder turns the loan terms captured by an origination form into an
//! ordered payment schedule. It is deliberately forgiving: a half-filled
//! form produces an empty schedule, never an error, so callers can recompute
//! live while the user types.

pub mod builder;
pub mod dates;
pub mod export;
pub mod frequency;

pub use builder::{
    amortization_rows, build_loan_schedule, LoanScheduleInput, RepaymentMethod, ScheduleOutput,
    ScheduleRow,
};
pub use frequency::PaymentFrequency;
