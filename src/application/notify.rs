use crate::domain::ports::{Executable, Notifier, NotifierBox};
use crate::error::PaymentError;

/// Ordered fan-out of post-processing messages to subscribers.
///
/// Attachment order is delivery order. Duplicates are not rejected on
/// attach; `detach` removes the first observer whose name matches and is a
/// no-op when none does.
#[derive(Default)]
pub struct NotificationBus {
    observers: Vec<NotifierBox>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, observer: NotifierBox) {
        self.observers.push(observer);
    }

    pub fn detach(&mut self, name: &str) {
        if let Some(index) = self.observers.iter().position(|o| o.name() == name) {
            self.observers.remove(index);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    /// Delivers `message` to every observer in attachment order.
    ///
    /// Best-effort: a failing observer never stops the loop. Failures are
    /// returned so the caller can record them.
    pub fn notify(&self, transaction: &dyn Executable, message: &str) -> Vec<PaymentError> {
        let mut failures = Vec::new();
        for observer in &self.observers {
            if let Err(err) = observer.update(transaction, message) {
                failures.push(err);
            }
        }
        failures
    }
}
