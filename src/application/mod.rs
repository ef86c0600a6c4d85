//! Application layer: the orchestration workflow built on the domain
//! capability traits.
//!
//! `TransactionOrchestrator` is the facade front ends talk to. It composes
//! the fee strategy, the audit decorator, the command adapter, the
//! done/undone history and the notification fan-out.

pub mod audited;
pub mod command;
pub mod history;
pub mod notify;
pub mod orchestrator;
