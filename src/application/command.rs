use crate::domain::ports::{AuditSink, Executable, ExecutableBox};
use crate::domain::transaction::{Amount, TransactionStatus};
use crate::error::Result;

/// Uniform execute/undo adapter held by the history stacks.
///
/// Exists solely so the stacks carry one type regardless of the concrete
/// transaction variant or decoration depth underneath.
pub struct Command {
    inner: ExecutableBox,
}

impl Command {
    pub fn new(inner: ExecutableBox) -> Self {
        Self { inner }
    }
}

impl Executable for Command {
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
        self.inner.execute(audit)
    }

    fn undo(&mut self, audit: &dyn AuditSink) -> Result<()> {
        self.inner.undo(audit)
    }
}
