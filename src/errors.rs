use std::io;

use thiserror::Error;

/// Failures raised by a ledger collaborator while servicing a read.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// The only failure that crosses the query boundary.
///
/// Extraction ambiguity never produces an error; it is encoded as empty
/// slots on the parsed query instead.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Ledger unavailable: {0}")]
    LedgerUnavailable(String),
}

impl From<LedgerError> for QueryError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Unavailable(message) | LedgerError::InvalidRecord(message) => {
                QueryError::LedgerUnavailable(message)
            }
            LedgerError::Io(err) => QueryError::LedgerUnavailable(err.to_string()),
            LedgerError::Serde(err) => QueryError::LedgerUnavailable(err.to_string()),
        }
    }
}

pub type QueryOutcome<T> = Result<T, QueryError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),
}
