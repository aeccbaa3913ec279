use thiserror::Error;

#[derive(Debug, Error)]
pub enum LendingError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Export error: {0}")]
    ExportError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LendingError {
    fn from(e: serde_json::Error) -> Self {
        LendingError::SerializationError(e.to_string())
    }
}

impl From<csv::Error> for LendingError {
    fn from(e: csv::Error) -> Self {
        LendingError::ExportError(e.to_string())
    }
}
