use crate::domain::ports::{AuditSink, Clock};
use chrono::{DateTime, Utc};
use std::cell::RefCell;

/// Wall-clock timestamp source used outside of tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// One audit record: when it happened and what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub at: DateTime<Utc>,
    pub message: String,
}

/// Append-only, in-memory audit trail shared by every component that
/// records lifecycle events.
///
/// Interior mutability lets components append through `&self`, so a single
/// `Rc<AuditLog>` can be handed to the orchestrator while the assembling
/// caller keeps a clone for display. Single-threaded by design; a
/// multi-caller deployment would need its own synchronization.
pub struct AuditLog {
    clock: Box<dyn Clock>,
    entries: RefCell<Vec<AuditEntry>>,
}

impl AuditLog {
    /// Creates an empty log timestamped by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    /// Creates an empty log with an injected timestamp source.
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            entries: RefCell::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all entries in append order.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.borrow().clone()
    }

    /// Returns just the messages, in append order. Convenient for display
    /// and assertions.
    pub fn messages(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .map(|entry| entry.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditSink for AuditLog {
    fn record(&self, message: &str) {
        self.entries.borrow_mut().push(AuditEntry {
            at: self.clock.now(),
            message: message.to_string(),
        });
    }
}
