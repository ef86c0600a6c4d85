use crate::domain::transaction::{Amount, Transaction};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OpType {
    Payment,
    Transfer,
    Deposit,
    Undo,
    Redo,
}

/// One row of a request file: `op, amount, from, to, description`.
///
/// Undo/redo rows leave everything but `op` empty; empty fields
/// deserialize to `None`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Request {
    pub op: OpType,
    pub amount: Option<Decimal>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub description: Option<String>,
}

impl Request {
    /// Maps a payment/transfer/deposit row to a transaction via the domain
    /// factories. Undo/redo rows are not transactions and are rejected.
    pub fn into_transaction(self) -> Result<Transaction> {
        let amount = Amount::new(self.amount.ok_or_else(|| {
            PaymentError::ValidationError("amount is required".to_string())
        })?)?;
        let description = self.description.unwrap_or_default();
        match self.op {
            OpType::Payment => {
                let recipient = require(self.to, "payment requires a recipient")?;
                Ok(Transaction::payment(amount, recipient, description))
            }
            OpType::Transfer => {
                let from = require(self.from, "transfer requires a source account")?;
                let to = require(self.to, "transfer requires a destination account")?;
                Ok(Transaction::transfer(amount, from, to, description))
            }
            OpType::Deposit => {
                let account = require(self.to, "deposit requires an account")?;
                Ok(Transaction::deposit(amount, account, description))
            }
            OpType::Undo | OpType::Redo => Err(PaymentError::ValidationError(
                "undo/redo rows carry no transaction".to_string(),
            )),
        }
    }
}

fn require(field: Option<String>, message: &str) -> Result<String> {
    field.ok_or_else(|| PaymentError::ValidationError(message.to_string()))
}

/// Reads requests from a CSV source.
///
/// Wraps `csv::Reader` and yields an iterator over `Result<Request>`,
/// trimming whitespace and tolerating short rows so the stream keeps going
/// past malformed lines.
pub struct RequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RequestReader<R> {
    /// Creates a new `RequestReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes requests.
    pub fn requests(self) -> impl Iterator<Item = Result<Request>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}
