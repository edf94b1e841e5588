use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid {field} `{value}`: {reason}")]
    Validation {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("Malformed {field}: {reason}")]
    Format { field: &'static str, reason: String },
    #[error("Record #{index} does not exist (ledger has {len} active records)")]
    Range { index: usize, len: usize },
    #[error("Persistence error: {0}")]
    Persistence(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

impl LedgerError {
    pub fn validation(field: &'static str, value: impl ToString, reason: impl Into<String>) -> Self {
        LedgerError::Validation {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn format(field: &'static str, reason: impl Into<String>) -> Self {
        LedgerError::Format {
            field,
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::format("document", err.to_string())
    }
}
