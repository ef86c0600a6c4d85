use crate::application::audited::AuditedTransaction;
use crate::application::command::Command;
use crate::application::history::{CommandId, History};
use crate::application::notify::NotificationBus;
use crate::domain::fees::FeeStrategy;
use crate::domain::ports::{AuditSink, Executable, NotifierBox};
use crate::domain::transaction::{Transaction, TransactionStatus};
use crate::error::Result;
use crate::infrastructure::audit::AuditLog;
use crate::infrastructure::notifiers::{EmailNotifier, SmsNotifier};
use rust_decimal::Decimal;
use std::rc::Rc;

/// What `process` does with the redo side of the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedoPolicy {
    /// Conventional undo/redo: a new transaction clears the redo history.
    #[default]
    ClearOnProcess,
    /// Keep the redo history across new transactions. Redo may then replay
    /// a transaction unrelated to the last undo, the behavior of the
    /// system this engine replaces.
    Preserve,
}

/// Returned by `process`: the handle to the command now on the done-stack
/// and the fee that was charged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Receipt {
    pub command: CommandId,
    pub fee: Decimal,
}

/// The facade front ends drive.
///
/// Owns the current fee strategy, the command history and the notification
/// bus, and shares the audit log with whoever assembled it. Every public
/// operation runs to completion synchronously; the whole engine assumes a
/// single caller thread.
pub struct TransactionOrchestrator {
    audit: Rc<AuditLog>,
    fee_strategy: FeeStrategy,
    bus: NotificationBus,
    history: History,
    redo_policy: RedoPolicy,
}

impl TransactionOrchestrator {
    /// Creates an orchestrator with a 1% percentage fee and the two default
    /// subscribers (email, sms) attached.
    pub fn new(audit: Rc<AuditLog>) -> Self {
        let mut bus = NotificationBus::new();
        bus.attach(Box::new(EmailNotifier::new("notifications@example.com")));
        bus.attach(Box::new(SmsNotifier::new("+15550100")));
        Self {
            audit,
            fee_strategy: FeeStrategy::percentage(Decimal::ONE),
            bus,
            history: History::new(),
            redo_policy: RedoPolicy::default(),
        }
    }

    pub fn with_redo_policy(mut self, policy: RedoPolicy) -> Self {
        self.redo_policy = policy;
        self
    }

    /// Replaces the fee strategy. Takes effect on the next `process` call;
    /// already-processed transactions keep the fee they were charged.
    pub fn set_fee_strategy(&mut self, strategy: FeeStrategy) {
        self.fee_strategy = strategy;
    }

    pub fn attach_observer(&mut self, observer: NotifierBox) {
        self.bus.attach(observer);
    }

    pub fn detach_observer(&mut self, name: &str) {
        self.bus.detach(name);
    }

    /// Runs a transaction through the full workflow: fee, audit decoration,
    /// command execution, history push, subscriber fan-out.
    pub fn process(&mut self, transaction: Transaction) -> Result<Receipt> {
        let amount = transaction.amount();
        let description = transaction.description().to_string();
        let fee = self.fee_strategy.calculate_fee(amount);
        self.audit.record(&format!("Fee for '{description}': {fee}"));

        let decorated = AuditedTransaction::new(Box::new(transaction));
        let mut command = Command::new(Box::new(decorated));
        command.execute(self.audit.as_ref())?;

        if self.redo_policy == RedoPolicy::ClearOnProcess {
            self.history.clear_undone();
        }
        let id = self.history.register(command);
        self.history.push_done(id);
        tracing::debug!(?id, %amount, %fee, "transaction processed");

        let message = format!("Processed '{description}': amount {amount}, fee {fee}");
        if let Some(command) = self.history.command(id) {
            for failure in self.bus.notify(command, &message) {
                tracing::warn!("{failure}");
                self.audit.record(&format!("Notification failure: {failure}"));
            }
        }

        Ok(Receipt { command: id, fee })
    }

    /// Rolls back the most recent done command. An empty history is a
    /// reported no-op, not an error.
    pub fn undo_last(&mut self) -> Result<Option<CommandId>> {
        let Some(id) = self.history.pop_done() else {
            self.audit.record("Undo requested but history is empty");
            return Ok(None);
        };
        match self.run(id, |command, audit| command.undo(audit)) {
            Ok(()) => {
                self.history.push_undone(id);
                Ok(Some(id))
            }
            Err(err) => {
                self.history.push_done(id);
                Err(err)
            }
        }
    }

    /// Re-executes the most recent undone command. An empty redo history is
    /// a reported no-op, not an error.
    pub fn redo_last(&mut self) -> Result<Option<CommandId>> {
        let Some(id) = self.history.pop_undone() else {
            self.audit.record("Redo requested but history is empty");
            return Ok(None);
        };
        match self.run(id, |command, audit| command.execute(audit)) {
            Ok(()) => {
                self.history.push_done(id);
                Ok(Some(id))
            }
            Err(err) => {
                self.history.push_undone(id);
                Err(err)
            }
        }
    }

    fn run(
        &mut self,
        id: CommandId,
        op: impl FnOnce(&mut Command, &dyn AuditSink) -> Result<()>,
    ) -> Result<()> {
        // Handles popped from a stack always resolve: commands only leave
        // the registry when the redo side is cleared, and cleared handles
        // are no longer on any stack.
        let audit = Rc::clone(&self.audit);
        match self.history.command_mut(id) {
            Some(command) => op(command, audit.as_ref()),
            None => Ok(()),
        }
    }

    pub fn status_of(&self, id: CommandId) -> Option<TransactionStatus> {
        self.history.command(id).map(|command| command.status())
    }

    pub fn done_depth(&self) -> usize {
        self.history.done_depth()
    }

    pub fn undone_depth(&self) -> usize {
        self.history.undone_depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::Notifier;
    use crate::domain::transaction::Amount;
    use crate::error::PaymentError;
    use rust_decimal_macros::dec;
    use std::cell::RefCell;

    struct Recording {
        name: String,
        seen: Rc<RefCell<Vec<String>>>,
    }

    impl Notifier for Recording {
        fn name(&self) -> &str {
            &self.name
        }

        fn update(&self, _transaction: &dyn Executable, message: &str) -> Result<()> {
            self.seen.borrow_mut().push(format!("{}: {message}", self.name));
            Ok(())
        }
    }

    struct AlwaysFails;

    impl Notifier for AlwaysFails {
        fn name(&self) -> &str {
            "broken"
        }

        fn update(&self, _transaction: &dyn Executable, _message: &str) -> Result<()> {
            Err(PaymentError::NotificationError {
                observer: "broken".to_string(),
                reason: "unreachable endpoint".to_string(),
            })
        }
    }

    fn orchestrator() -> (Rc<AuditLog>, TransactionOrchestrator) {
        let audit = Rc::new(AuditLog::new());
        let orchestrator = TransactionOrchestrator::new(Rc::clone(&audit));
        (audit, orchestrator)
    }

    fn payment(amount: Decimal, description: &str) -> Transaction {
        Transaction::payment(Amount::new(amount).unwrap(), "Bob", description)
    }

    #[test]
    fn test_end_to_end_payment_scenario() {
        let (audit, mut orchestrator) = orchestrator();

        let receipt = orchestrator
            .process(payment(dec!(100.0), "rent"))
            .unwrap();

        // Default strategy is 1%
        assert_eq!(receipt.fee, dec!(1.0));
        assert_eq!(
            orchestrator.status_of(receipt.command),
            Some(TransactionStatus::Completed)
        );
        assert_eq!(orchestrator.done_depth(), 1);
        assert_eq!(orchestrator.undone_depth(), 0);

        orchestrator.undo_last().unwrap();
        assert_eq!(
            orchestrator.status_of(receipt.command),
            Some(TransactionStatus::Cancelled)
        );
        assert_eq!(orchestrator.done_depth(), 0);
        assert_eq!(orchestrator.undone_depth(), 1);

        let messages = audit.messages();
        assert!(messages.contains(&format!("Fee for 'rent': {}", receipt.fee)));
        assert!(messages.contains(&"rent: status changed to 'Completed'".to_string()));
        assert!(messages.contains(&"rent: status changed to 'Cancelled'".to_string()));
    }

    #[test]
    fn test_undo_redo_round_trip_restores_done_stack() {
        let (_, mut orchestrator) = orchestrator();
        let receipt = orchestrator.process(payment(dec!(10.0), "a")).unwrap();

        orchestrator.undo_last().unwrap();
        let redone = orchestrator.redo_last().unwrap();

        assert_eq!(redone, Some(receipt.command));
        assert_eq!(orchestrator.done_depth(), 1);
        assert_eq!(orchestrator.undone_depth(), 0);
        assert_eq!(
            orchestrator.status_of(receipt.command),
            Some(TransactionStatus::Completed)
        );
    }

    #[test]
    fn test_empty_history_is_a_reported_noop() {
        let (audit, mut orchestrator) = orchestrator();

        assert_eq!(orchestrator.undo_last().unwrap(), None);
        assert_eq!(orchestrator.redo_last().unwrap(), None);

        let messages = audit.messages();
        assert!(messages.contains(&"Undo requested but history is empty".to_string()));
        assert!(messages.contains(&"Redo requested but history is empty".to_string()));
    }

    #[test]
    fn test_fee_strategy_applies_from_next_process() {
        let (_, mut orchestrator) = orchestrator();

        let first = orchestrator.process(payment(dec!(200.0), "a")).unwrap();
        orchestrator.set_fee_strategy(FeeStrategy::fixed(dec!(10.0)));
        let second = orchestrator.process(payment(dec!(200.0), "b")).unwrap();

        assert_eq!(first.fee, dec!(2.0));
        assert_eq!(second.fee, dec!(10.0));
    }

    #[test]
    fn test_process_clears_redo_history_by_default() {
        let (audit, mut orchestrator) = orchestrator();
        let first = orchestrator.process(payment(dec!(1.0), "first")).unwrap();
        orchestrator.undo_last().unwrap();

        orchestrator.process(payment(dec!(2.0), "second")).unwrap();

        assert_eq!(orchestrator.undone_depth(), 0);
        // The stale command was evicted from the registry
        assert_eq!(orchestrator.status_of(first.command), None);
        assert_eq!(orchestrator.redo_last().unwrap(), None);
        assert!(
            audit
                .messages()
                .contains(&"Redo requested but history is empty".to_string())
        );
    }

    #[test]
    fn test_preserve_policy_replays_stale_transaction() {
        let audit = Rc::new(AuditLog::new());
        let mut orchestrator =
            TransactionOrchestrator::new(Rc::clone(&audit)).with_redo_policy(RedoPolicy::Preserve);

        let first = orchestrator.process(payment(dec!(1.0), "first")).unwrap();
        orchestrator.undo_last().unwrap();
        orchestrator.process(payment(dec!(2.0), "second")).unwrap();

        assert_eq!(orchestrator.undone_depth(), 1);
        let redone = orchestrator.redo_last().unwrap();
        assert_eq!(redone, Some(first.command));
        assert_eq!(
            orchestrator.status_of(first.command),
            Some(TransactionStatus::Completed)
        );
        assert_eq!(orchestrator.done_depth(), 2);
    }

    #[test]
    fn test_notification_fanout_order_and_content() {
        let (_, mut orchestrator) = orchestrator();
        orchestrator.detach_observer("email");
        orchestrator.detach_observer("sms");

        let seen = Rc::new(RefCell::new(Vec::new()));
        orchestrator.attach_observer(Box::new(Recording {
            name: "one".to_string(),
            seen: Rc::clone(&seen),
        }));
        orchestrator.attach_observer(Box::new(Recording {
            name: "two".to_string(),
            seen: Rc::clone(&seen),
        }));

        let receipt = orchestrator.process(payment(dec!(100.0), "rent")).unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].starts_with("one: "));
        assert!(seen[1].starts_with("two: "));
        assert!(seen[0].contains("amount 100.0"));
        assert!(seen[0].contains(&format!("fee {}", receipt.fee)));
    }

    #[test]
    fn test_observer_failure_is_isolated_and_logged() {
        let (audit, mut orchestrator) = orchestrator();
        orchestrator.detach_observer("email");
        orchestrator.detach_observer("sms");

        let seen = Rc::new(RefCell::new(Vec::new()));
        orchestrator.attach_observer(Box::new(AlwaysFails));
        orchestrator.attach_observer(Box::new(Recording {
            name: "after".to_string(),
            seen: Rc::clone(&seen),
        }));

        let receipt = orchestrator.process(payment(dec!(5.0), "snack")).unwrap();

        // The transaction itself completed and stayed on the done-stack
        assert_eq!(
            orchestrator.status_of(receipt.command),
            Some(TransactionStatus::Completed)
        );
        assert_eq!(orchestrator.done_depth(), 1);
        // The later observer still ran
        assert_eq!(seen.borrow().len(), 1);
        assert!(
            audit
                .messages()
                .iter()
                .any(|m| m.starts_with("Notification failure:"))
        );
    }

    #[test]
    fn test_audit_sequence_for_process() {
        let (audit, mut orchestrator) = orchestrator();
        let receipt = orchestrator.process(payment(dec!(100.0), "rent")).unwrap();

        let expected: Vec<String> = vec![
            format!("Fee for 'rent': {}", receipt.fee),
            "Begin execute: rent".to_string(),
            "rent: status changed to 'InProgress'".to_string(),
            "Paying 100.0 to Bob".to_string(),
            "rent: status changed to 'Completed'".to_string(),
            "End execute: rent".to_string(),
        ];
        assert_eq!(audit.messages(), expected);
    }
}
