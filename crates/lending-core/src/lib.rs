pub mod error;
pub mod loan;
pub mod schedule;
pub mod types;

pub use error::LendingError;
pub use types::*;

/// Standard result type for all lending operations
pub type LendingResult<T> = Result<T, LendingError>;
