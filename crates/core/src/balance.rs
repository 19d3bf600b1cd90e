//! Balance and Settlement - Outputs of the netting pipeline

use crate::amount::Amount;
use crate::party::PartyId;
use crate::tolerance::Tolerance;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Net position of a party across all obligations.
///
/// - `net_amount > 0`: the party is owed money (net creditor)
/// - `net_amount < 0`: the party owes money (net debtor)
/// - within tolerance of zero: settled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub party: PartyId,
    pub net_amount: Decimal,
}

impl Balance {
    pub fn new(party: PartyId, net_amount: Decimal) -> Self {
        Self { party, net_amount }
    }

    pub fn is_creditor(&self, tolerance: &Tolerance) -> bool {
        self.net_amount > tolerance.epsilon()
    }

    pub fn is_debtor(&self, tolerance: &Tolerance) -> bool {
        self.net_amount < -tolerance.epsilon()
    }

    pub fn is_settled(&self, tolerance: &Tolerance) -> bool {
        tolerance.is_negligible(self.net_amount)
    }
}

/// A synthesized transfer: `from` pays `to` the given `amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: PartyId,
    pub to: PartyId,
    pub amount: Amount,
}

impl Settlement {
    pub fn new(from: PartyId, to: PartyId, amount: Amount) -> Self {
        Self { from, to, amount }
    }
}
