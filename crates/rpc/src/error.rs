//! Calculation errors

use clearledger_ledger::ValidationError;
use clearledger_settlement::SettlementError;
use thiserror::Error;

/// Message shown for every internal failure
pub const INTERNAL_ERROR_MESSAGE: &str = "internal error: settlement could not be computed";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculateError {
    /// The request contained an invalid record; nothing was computed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An internal invariant broke while planning
    #[error("consistency error: {0}")]
    Consistency(#[from] SettlementError),
}

impl CalculateError {
    /// True when the caller can fix the request
    pub fn is_user_error(&self) -> bool {
        matches!(self, CalculateError::Validation(_))
    }

    /// Message safe to show to the caller.
    ///
    /// Validation errors keep their full description; internal failures are
    /// reported generically.
    pub fn public_message(&self) -> String {
        match self {
            CalculateError::Validation(e) => e.to_string(),
            CalculateError::Consistency(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}
