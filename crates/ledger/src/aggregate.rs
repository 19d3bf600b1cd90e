//! Balance aggregation
//!
//! Nets validated obligations into one signed balance per party. No
//! tolerance is applied at this stage. Validated amounts carry at most
//! [`Amount::SCALE`](clearledger_core::Amount::SCALE) fractional digits and
//! total at most `Amount::MAX`, so every partial sum is exact.

use clearledger_core::{Balance, Obligation, PartyId};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Net balances, one per party, in order of first appearance.
///
/// A party's rank is its position in that order. Within a record the
/// debtor is seen before the creditor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceSheet {
    balances: Vec<Balance>,
    /// PartyId -> rank
    ranks: HashMap<PartyId, usize>,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post an obligation: debtor goes down, creditor goes up.
    pub fn apply(&mut self, obligation: &Obligation) {
        let amount = obligation.amount().value();
        *self.slot(obligation.debtor()) -= amount;
        *self.slot(obligation.creditor()) += amount;
    }

    fn slot(&mut self, party: &PartyId) -> &mut Decimal {
        let rank = match self.ranks.get(party) {
            Some(&rank) => rank,
            None => {
                let rank = self.balances.len();
                self.balances.push(Balance::new(party.clone(), Decimal::ZERO));
                self.ranks.insert(party.clone(), rank);
                rank
            }
        };
        &mut self.balances[rank].net_amount
    }

    /// All balances in first-appearance order
    pub fn balances(&self) -> &[Balance] {
        &self.balances
    }

    pub fn into_balances(self) -> Vec<Balance> {
        self.balances
    }

    pub fn get(&self, party: &str) -> Option<&Balance> {
        self.ranks.get(party).map(|&rank| &self.balances[rank])
    }

    /// Algebraic sum of every balance. Zero for any well-formed ledger.
    pub fn total(&self) -> Decimal {
        self.balances.iter().map(|b| b.net_amount).sum()
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Balance> {
        self.balances.iter()
    }
}

/// Net a list of validated obligations
pub fn aggregate(obligations: &[Obligation]) -> BalanceSheet {
    let mut sheet = BalanceSheet::new();
    for obligation in obligations {
        sheet.apply(obligation);
    }
    sheet
}
