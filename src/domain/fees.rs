use crate::domain::transaction::Amount;
use rust_decimal::Decimal;

/// Pluggable commission policy, replaceable on the orchestrator at any
/// time. The strategy active when `process` is called is the one applied;
/// swapping it never touches already-processed transactions.
///
/// Rates and flat values are not range-checked here. Rejecting absurd
/// inputs is the integrator's job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeeStrategy {
    /// Fee is `amount * rate / 100`.
    Percentage { rate: Decimal },
    /// Fee is `value` regardless of the amount.
    Fixed { value: Decimal },
}

impl FeeStrategy {
    pub fn percentage(rate: Decimal) -> Self {
        Self::Percentage { rate }
    }

    pub fn fixed(value: Decimal) -> Self {
        Self::Fixed { value }
    }

    pub fn calculate_fee(&self, amount: Amount) -> Decimal {
        match self {
            Self::Percentage { rate } => amount.value() * *rate / Decimal::ONE_HUNDRED,
            Self::Fixed { value } => *value,
        }
    }
}
