use crate::domain::transaction::TransactionStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("invalid state: cannot {action} a transaction in status '{status}'")]
    InvalidState {
        action: &'static str,
        status: TransactionStatus,
    },
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("notification to '{observer}' failed: {reason}")]
    NotificationError { observer: String, reason: String },
}
