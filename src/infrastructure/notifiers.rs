use crate::domain::ports::{Executable, Notifier};
use crate::error::Result;

/// Email-style subscriber. Delivery is a tracing event; a real mail
/// integration would live outside the core behind this same trait.
pub struct EmailNotifier {
    address: String,
}

impl EmailNotifier {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

impl Notifier for EmailNotifier {
    fn name(&self) -> &str {
        "email"
    }

    fn update(&self, transaction: &dyn Executable, message: &str) -> Result<()> {
        tracing::info!(
            channel = "email",
            to = %self.address,
            description = %transaction.description(),
            "{message}"
        );
        Ok(())
    }
}

/// SMS-style subscriber, same stand-in role as `EmailNotifier`.
pub struct SmsNotifier {
    number: String,
}

impl SmsNotifier {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
        }
    }
}

impl Notifier for SmsNotifier {
    fn name(&self) -> &str {
        "sms"
    }

    fn update(&self, transaction: &dyn Executable, message: &str) -> Result<()> {
        tracing::info!(
            channel = "sms",
            to = %self.number,
            description = %transaction.description(),
            "{message}"
        );
        Ok(())
    }
}
