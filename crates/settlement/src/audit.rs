//! Plan audit
//!
//! Replays a settlement plan as new obligations against the balances it is
//! meant to clear. Paying a transfer raises the payer's balance and lowers
//! the payee's.

use std::collections::HashMap;

use clearledger_core::{Balance, PartyId, Settlement, Tolerance};
use rust_decimal::Decimal;

use crate::error::SettlementError;

/// Findings of [`audit_plan`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanAudit {
    /// Parties left with a residual above the allowance, with that residual
    pub residuals: Vec<Balance>,
    /// Indices of transfers that do not run from a net debtor to a net creditor
    pub misdirected: Vec<usize>,
    /// Parties named by a transfer but absent from the balances
    pub unknown: Vec<PartyId>,
    /// Largest residual tolerated per party
    pub allowance: Decimal,
}

impl PlanAudit {
    pub fn is_clean(&self) -> bool {
        self.residuals.is_empty() && self.misdirected.is_empty() && self.unknown.is_empty()
    }

    pub fn into_result(self) -> Result<(), SettlementError> {
        if self.is_clean() {
            return Ok(());
        }
        Err(SettlementError::AuditFailed {
            residuals: self.residuals.len(),
            misdirected: self.misdirected.len(),
            unknown: self.unknown.len(),
        })
    }
}

/// Check that `settlements` clear `balances`.
///
/// The per-party allowance is the tolerance times the number of parties that
/// were already negligible on entry (at least one): such "dust" balances are
/// never transferred, so their sum can remain on a counterparty.
pub fn audit_plan(balances: &[Balance], settlements: &[Settlement], tolerance: &Tolerance) -> PlanAudit {
    let dust = balances.iter().filter(|b| b.is_settled(tolerance)).count();
    let allowance = tolerance.epsilon() * Decimal::from(dust.max(1));

    let mut residual: Vec<Decimal> = balances.iter().map(|b| b.net_amount).collect();
    let index: HashMap<&str, usize> = balances
        .iter()
        .enumerate()
        .map(|(i, b)| (b.party.as_str(), i))
        .collect();

    let mut audit = PlanAudit {
        allowance,
        ..PlanAudit::default()
    };

    for (i, settlement) in settlements.iter().enumerate() {
        let from = index.get(settlement.from.as_str()).copied();
        let to = index.get(settlement.to.as_str()).copied();

        for (slot, party) in [(from, &settlement.from), (to, &settlement.to)] {
            if slot.is_none() && !audit.unknown.contains(party) {
                audit.unknown.push(party.clone());
            }
        }

        let (Some(from), Some(to)) = (from, to) else {
            continue;
        };

        if !balances[from].is_debtor(tolerance) || !balances[to].is_creditor(tolerance) {
            audit.misdirected.push(i);
        }

        let amount = settlement.amount.value();
        residual[from] += amount;
        residual[to] -= amount;
    }

    audit.residuals = balances
        .iter()
        .zip(residual)
        .filter(|(_, left)| left.abs() > allowance)
        .map(|(b, left)| Balance::new(b.party.clone(), left))
        .collect();

    audit
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearledger_core::Amount;
    use rust_decimal_macros::dec;

    fn party(name: &str) -> PartyId {
        PartyId::new(name).unwrap()
    }

    fn balances(entries: &[(&str, Decimal)]) -> Vec<Balance> {
        entries.iter().map(|(n, a)| Balance::new(party(n), *a)).collect()
    }

    fn pay(from: &str, to: &str, amount: Decimal) -> Settlement {
        Settlement::new(party(from), party(to), Amount::new(amount).unwrap())
    }

    #[test]
    fn test_clean_plan() {
        let b = balances(&[("A", dec!(-60)), ("B", dec!(20)), ("C", dec!(40))]);
        let plan = vec![pay("A", "C", dec!(40)), pay("A", "B", dec!(20))];
        let audit = audit_plan(&b, &plan, &Tolerance::DEFAULT);
        assert!(audit.is_clean());
        assert!(audit.into_result().is_ok());
    }

    #[test]
    fn test_short_plan_leaves_residuals() {
        let b = balances(&[("A", dec!(-60)), ("B", dec!(20)), ("C", dec!(40))]);
        let plan = vec![pay("A", "C", dec!(40))];
        let audit = audit_plan(&b, &plan, &Tolerance::DEFAULT);

        assert_eq!(audit.residuals.len(), 2);
        assert_eq!(audit.residuals[0].net_amount, dec!(-20));
        assert_eq!(audit.residuals[1].party.as_str(), "B");
        assert!(matches!(
            audit.into_result(),
            Err(SettlementError::AuditFailed { residuals: 2, .. })
        ));
    }

    #[test]
    fn test_misdirected_transfer() {
        let b = balances(&[("A", dec!(-10)), ("B", dec!(10))]);
        let plan = vec![pay("B", "A", dec!(10))];
        let audit = audit_plan(&b, &plan, &Tolerance::DEFAULT);
        assert_eq!(audit.misdirected, vec![0]);
    }

    #[test]
    fn test_unknown_party() {
        let b = balances(&[("A", dec!(-10)), ("B", dec!(10))]);
        let plan = vec![pay("A", "B", dec!(10)), pay("A", "Ghost", dec!(1))];
        let audit = audit_plan(&b, &plan, &Tolerance::DEFAULT);
        assert_eq!(audit.unknown, vec![party("Ghost")]);
        assert!(audit.residuals.is_empty());
    }

    #[test]
    fn test_dust_allowance() {
        let tol = Tolerance::new(dec!(0.01)).unwrap();
        let b = balances(&[
            ("A", dec!(0.009)),
            ("B", dec!(0.009)),
            ("C", dec!(0.009)),
            ("D", dec!(-0.027)),
        ]);
        let audit = audit_plan(&b, &[], &tol);
        assert_eq!(audit.allowance, dec!(0.03));
        assert!(audit.is_clean());
    }
}
