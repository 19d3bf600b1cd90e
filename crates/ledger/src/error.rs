//! Validation errors

use clearledger_core::PartyId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Which part of a record was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Debtor,
    Creditor,
    Amount,
    /// The record as a whole (e.g. not a JSON object)
    Record,
}

/// Why a record was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("field is missing")]
    Missing,

    #[error("field is empty")]
    Empty,

    #[error("expected a string, got {0}")]
    NotText(&'static str),

    #[error("not a decimal number: {0}")]
    NotANumber(String),

    #[error("amount is not finite: {0}")]
    NonFinite(String),

    #[error("amount must be greater than zero, got {0}")]
    NonPositive(String),

    #[error("amount {0} is below the working precision of 0.0000000001")]
    TooSmall(String),

    #[error("amount {0} exceeds the maximum of 1000000000000000000")]
    OutOfRange(String),

    #[error("running total {0} exceeds the ledger maximum of 1000000000000000000")]
    TotalOutOfRange(Decimal),

    #[error("{0} cannot owe money to itself")]
    SelfDebt(PartyId),
}

/// A rejected request: the first offending record.
///
/// The whole request fails; no partial results are produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid transaction #{index} ({field}): {reason}")]
pub struct ValidationError {
    /// Zero-based position of the record in the submitted list
    pub index: usize,
    pub field: Field,
    pub reason: Reason,
}

impl ValidationError {
    pub fn new(index: usize, field: Field, reason: Reason) -> Self {
        Self {
            index,
            field,
            reason,
        }
    }
}
