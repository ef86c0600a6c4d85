use crate::domain::ports::{AuditSink, Executable};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use std::fmt;

/// Represents a non-negative monetary magnitude.
///
/// This is a wrapper around `rust_decimal::Decimal` to enforce domain-specific rules
/// and provide type safety for financial calculations. The magnitude is
/// currency-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value >= Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::ValidationError(
                "Amount must not be negative".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle status of a transaction.
///
/// Transitions are monotone within one execute/undo cycle:
/// Created -> InProgress -> Completed on execute, and
/// Completed -> Cancelling -> Cancelled on undo. A cancelled transaction
/// may start a fresh execute cycle (that is what redo does); nothing else
/// is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionStatus {
    #[default]
    Created,
    InProgress,
    Completed,
    Cancelling,
    Cancelled,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Created => "Created",
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
            Self::Cancelling => "Cancelling",
            Self::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

/// The variant-specific payload. Party identifiers are opaque strings and
/// never validated by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    Payment {
        recipient: String,
    },
    Transfer {
        from_account: String,
        to_account: String,
    },
    Deposit {
        account: String,
    },
}

/// A single financial operation with its own status lifecycle.
///
/// `execute` and `undo` are the only mutation paths. Settlement is a stub:
/// the bodies log and transition status, nothing moves for real.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    kind: TransactionKind,
    amount: Amount,
    description: String,
    status: TransactionStatus,
}

impl Transaction {
    pub fn payment(
        amount: Amount,
        recipient: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(
            TransactionKind::Payment {
                recipient: recipient.into(),
            },
            amount,
            description,
        )
    }

    pub fn transfer(
        amount: Amount,
        from_account: impl Into<String>,
        to_account: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(
            TransactionKind::Transfer {
                from_account: from_account.into(),
                to_account: to_account.into(),
            },
            amount,
            description,
        )
    }

    pub fn deposit(
        amount: Amount,
        account: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(
            TransactionKind::Deposit {
                account: account.into(),
            },
            amount,
            description,
        )
    }

    fn new(kind: TransactionKind, amount: Amount, description: impl Into<String>) -> Self {
        Self {
            kind,
            amount,
            description: description.into(),
            status: TransactionStatus::Created,
        }
    }

    pub fn kind(&self) -> &TransactionKind {
        &self.kind
    }

    fn set_status(&mut self, next: TransactionStatus, audit: &dyn AuditSink) {
        self.status = next;
        audit.record(&format!(
            "{}: status changed to '{}'",
            self.description, next
        ));
    }

    fn settlement_line(&self) -> String {
        match &self.kind {
            TransactionKind::Payment { recipient } => {
                format!("Paying {} to {}", self.amount, recipient)
            }
            TransactionKind::Transfer {
                from_account,
                to_account,
            } => format!(
                "Transferring {} from {} to {}",
                self.amount, from_account, to_account
            ),
            TransactionKind::Deposit { account } => {
                format!("Depositing {} into {}", self.amount, account)
            }
        }
    }

    fn reversal_line(&self) -> String {
        match &self.kind {
            TransactionKind::Payment { recipient } => {
                format!("Reversing payment of {} to {}", self.amount, recipient)
            }
            TransactionKind::Transfer {
                from_account,
                to_account,
            } => format!(
                "Reversing transfer of {} from {} to {}",
                self.amount, from_account, to_account
            ),
            TransactionKind::Deposit { account } => {
                format!("Reversing deposit of {} into {}", self.amount, account)
            }
        }
    }
}

impl Executable for Transaction {
    fn amount(&self) -> Amount {
        self.amount
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn status(&self) -> TransactionStatus {
        self.status
    }

    fn execute(&mut self, audit: &dyn AuditSink) -> Result<()> {
        if !matches!(
            self.status,
            TransactionStatus::Created | TransactionStatus::Cancelled
        ) {
            return Err(PaymentError::InvalidState {
                action: "execute",
                status: self.status,
            });
        }
        self.set_status(TransactionStatus::InProgress, audit);
        audit.record(&self.settlement_line());
        self.set_status(TransactionStatus::Completed, audit);
        Ok(())
    }

    fn undo(&mut self, audit: &dyn AuditSink) -> Result<()> {
        if self.status != TransactionStatus::Completed {
            return Err(PaymentError::InvalidState {
                action: "undo",
                status: self.status,
            });
        }
        self.set_status(TransactionStatus::Cancelling, audit);
        audit.record(&self.reversal_line());
        self.set_status(TransactionStatus::Cancelled, audit);
        Ok(())
    }
}
