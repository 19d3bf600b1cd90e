//! ClearLedger Ledger - Validation and netting of raw obligations
//!
//! The first two stages of the settlement pipeline live here.
//!
//! # Key Types
//! - `RawObligation`: An unvalidated `{debtor, creditor, amount}` record
//! - `ValidatedLedger`: Obligations that passed validation, plus precision warnings
//! - `BalanceSheet`: One signed balance per party, in first-appearance order
//! - `ValidationError`: First offending record (index, field, reason)

pub mod aggregate;
pub mod error;
pub mod validation;

pub use aggregate::{aggregate, BalanceSheet};
pub use error::{Field, Reason, ValidationError};
pub use validation::{validate, validate_values, PrecisionWarning, RawObligation, ValidatedLedger};
