//! ClearLedger Core - Domain types
//!
//! This crate contains the fundamental types shared by every stage of the
//! settlement pipeline:
//! - `PartyId`: Case-sensitive party identifier
//! - `Amount`: Strictly positive decimal wrapper for money
//! - `Obligation`: One recorded debt between two parties
//! - `Balance`: Signed net position of a party
//! - `Settlement`: Synthesized transfer from a net debtor to a net creditor
//! - `Tolerance`: Epsilon below which a value counts as zero

pub mod amount;
pub mod balance;
pub mod obligation;
pub mod party;
pub mod tolerance;

pub use amount::{Amount, AmountError};
pub use balance::{Balance, Settlement};
pub use obligation::{Obligation, ObligationError};
pub use party::{PartyError, PartyId};
pub use tolerance::{Tolerance, ToleranceError};
