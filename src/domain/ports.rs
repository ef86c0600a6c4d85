use super::transaction::{Amount, TransactionStatus};
use crate::error::Result;
use chrono::{DateTime, Utc};

/// The capability set shared by transactions, decorators and command
/// adapters: anything the history stacks can execute and roll back.
///
/// Composition works by wrapping boxed trait objects, so a decorator is
/// itself an `Executable` holding another `Executable`.
pub trait Executable {
    fn amount(&self) -> Amount;
    fn description(&self) -> &str;
    fn status(&self) -> TransactionStatus;
    fn execute(&mut self, audit: &dyn AuditSink) -> Result<()>;
    fn undo(&mut self, audit: &dyn AuditSink) -> Result<()>;
}

/// Append-only sink for lifecycle and status events.
pub trait AuditSink {
    fn record(&self, message: &str);
}

/// A notification subscriber. `update` is best-effort: a failure is
/// reported to the caller but must never roll back the transaction.
pub trait Notifier {
    /// Stable identity used by `NotificationBus::detach`.
    fn name(&self) -> &str;
    fn update(&self, transaction: &dyn Executable, message: &str) -> Result<()>;
}

/// Timestamp source for audit entries, injectable for deterministic tests.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub type ExecutableBox = Box<dyn Executable>;
pub type NotifierBox = Box<dyn Notifier>;
