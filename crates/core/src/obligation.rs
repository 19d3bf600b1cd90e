//! Obligation - One recorded debt between two parties

use crate::amount::Amount;
use crate::party::PartyId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when creating an obligation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObligationError {
    #[error("Party {0} cannot owe money to itself")]
    SelfDebt(PartyId),
}

/// `debtor` owes `creditor` the given `amount`.
///
/// # Invariant
/// `debtor != creditor`. The amount is positive by construction of [`Amount`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obligation {
    debtor: PartyId,
    creditor: PartyId,
    amount: Amount,
}

impl Obligation {
    pub fn new(debtor: PartyId, creditor: PartyId, amount: Amount) -> Result<Self, ObligationError> {
        if debtor == creditor {
            return Err(ObligationError::SelfDebt(debtor));
        }
        Ok(Self {
            debtor,
            creditor,
            amount,
        })
    }

    pub fn debtor(&self) -> &PartyId {
        &self.debtor
    }

    pub fn creditor(&self) -> &PartyId {
        &self.creditor
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}
