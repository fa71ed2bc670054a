use thiserror::Error;

/// Error type that captures every ledger, codec, and storage failure.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Account already exists: {0}")]
    AccountExists(String),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Transaction already exists in account `{0}`")]
    DuplicateTransaction(String),
    #[error("Transaction not found in account `{0}`")]
    TransactionNotFound(String),
    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    #[error("Unknown transaction variant: {0}")]
    UnknownVariant(String),
    #[error("Storage failure: {0}")]
    StorageFailure(#[from] std::io::Error),
    #[error("Malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Payload-free discriminant of [`LedgerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AccountExists,
    AccountNotFound,
    DuplicateTransaction,
    TransactionNotFound,
    InvalidAttribute,
    InvalidValue,
    UnknownVariant,
    StorageFailure,
    Malformed,
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::AccountExists(_) => ErrorKind::AccountExists,
            LedgerError::AccountNotFound(_) => ErrorKind::AccountNotFound,
            LedgerError::DuplicateTransaction(_) => ErrorKind::DuplicateTransaction,
            LedgerError::TransactionNotFound(_) => ErrorKind::TransactionNotFound,
            LedgerError::InvalidAttribute(_) => ErrorKind::InvalidAttribute,
            LedgerError::InvalidValue(_) => ErrorKind::InvalidValue,
            LedgerError::UnknownVariant(_) => ErrorKind::UnknownVariant,
            LedgerError::StorageFailure(_) => ErrorKind::StorageFailure,
            LedgerError::Malformed(_) => ErrorKind::Malformed,
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
