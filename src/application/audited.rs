use crate::domain::ports::{AuditSink, Executable, ExecutableBox};
use crate::domain::transaction::{Amount, TransactionStatus};
use crate::error::Result;

/// Decorator that brackets execute/undo with begin/end audit events.
///
/// Pure forwarding: no state of its own, amount/description/status pass
/// straight through. Since it implements `Executable` itself, decorators
/// can nest, though the orchestrator only ever wraps once.
pub struct AuditedTransaction {
    inner: ExecutableBox,
}

impl AuditedTransaction {
    pub fn new(inner: ExecutableBox) -> Self {
        Self { inner }
    }
}

impl Executable for AuditedTransaction {
    fn amount(&self) -> Amount {
        self.inner.amount()
    }

    fn description(&self) -> &str {
        self.inner.description()
    }

    fn status(&self) -> TransactionStatus {
        self.inner.status()
    }

    fn execute(&mut self, audit: &dyn AuditSink) -> Result<()> {
        audit.record(&format!("Begin execute: {}", self.inner.description()));
        self.inner.execute(audit)?;
        audit.record(&format!("End execute: {}", self.inner.description()));
        Ok(())
    }

    fn undo(&mut self, audit: &dyn AuditSink) -> Result<()> {
        audit.record(&format!("Begin undo: {}", self.inner.description()));
        self.inner.undo(audit)?;
        audit.record(&format!("End undo: {}", self.inner.description()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::Transaction;
    use crate::infrastructure::audit::AuditLog;
    use rust_decimal_macros::dec;

    fn decorated_payment() -> AuditedTransaction {
        let tx = Transaction::payment(Amount::new(dec!(100.0)).unwrap(), "Bob", "rent");
        AuditedTransaction::new(Box::new(tx))
    }

    #[test]
    fn test_execute_bracketed_by_begin_end() {
        let audit = AuditLog::new();
        let mut decorated = decorated_payment();

        decorated.execute(&audit).unwrap();

        let messages = audit.messages();
        assert_eq!(messages.first().unwrap(), "Begin execute: rent");
        assert_eq!(messages.last().unwrap(), "End execute: rent");
        assert_eq!(messages.len(), 5);
        assert_eq!(decorated.status(), TransactionStatus::Completed);
    }

    #[test]
    fn test_undo_bracketed_by_begin_end() {
        let audit = AuditLog::new();
        let mut decorated = decorated_payment();
        decorated.execute(&audit).unwrap();

        decorated.undo(&audit).unwrap();

        let messages = audit.messages();
        assert_eq!(messages[5], "Begin undo: rent");
        assert_eq!(messages.last().unwrap(), "End undo: rent");
        assert_eq!(decorated.status(), TransactionStatus::Cancelled);
    }

    #[test]
    fn test_failed_execute_has_no_end_event() {
        let audit = AuditLog::new();
        let mut decorated = decorated_payment();
        decorated.execute(&audit).unwrap();
        let before = audit.len();

        assert!(decorated.execute(&audit).is_err());

        let messages = audit.messages();
        // Only the begin event was appended before the failure surfaced
        assert_eq!(messages.len(), before + 1);
        assert_eq!(messages.last().unwrap(), "Begin execute: rent");
    }

    #[test]
    fn test_passthrough_accessors() {
        let decorated = decorated_payment();
        assert_eq!(decorated.amount(), Amount::new(dec!(100.0)).unwrap());
        assert_eq!(decorated.description(), "rent");
        assert_eq!(decorated.status(), TransactionStatus::Created);
    }
}
