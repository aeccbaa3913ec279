pub mod loan;
pub mod schedule;
