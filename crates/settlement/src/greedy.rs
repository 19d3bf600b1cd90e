//! Greedy largest-pair settlement

use std::cmp::Ordering;
use std::collections::binary_heap::PeekMut;
use std::collections::BinaryHeap;

use clearledger_core::{Amount, Settlement, Tolerance};
use rust_decimal::Decimal;

use crate::planner::Position;

/// Heap entry: larger magnitude first, earlier rank first on ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeapEntry {
    magnitude: Decimal,
    rank: usize,
    /// Index into the positions slice
    slot: usize,
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.magnitude
            .cmp(&other.magnitude)
            .then_with(|| other.rank.cmp(&self.rank))
    }
}

/// Settle `positions` by repeatedly pairing the largest creditor with the
/// largest debtor. Transfers are appended to `out`.
pub(crate) fn settle(positions: &[Position<'_>], tolerance: &Tolerance, out: &mut Vec<Settlement>) {
    let mut creditors = BinaryHeap::new();
    let mut debtors = BinaryHeap::new();

    for (slot, position) in positions.iter().enumerate() {
        if tolerance.is_negligible(position.amount) {
            continue;
        }
        let entry = HeapEntry {
            magnitude: position.amount.abs(),
            rank: position.rank,
            slot,
        };
        if position.amount > Decimal::ZERO {
            creditors.push(entry);
        } else {
            debtors.push(entry);
        }
    }

    while let (Some(mut creditor), Some(mut debtor)) = (creditors.peek_mut(), debtors.peek_mut()) {

        let transfer = creditor.magnitude.min(debtor.magnitude);
        if tolerance.exceeds(transfer) {
            let from = positions[debtor.slot].party;
            let to = positions[creditor.slot].party;
            tracing::debug!(from = %from, to = %to, amount = %transfer, "Recorded transfer");
            // transfer > epsilon >= 0
            out.push(Settlement::new(
                from.clone(),
                to.clone(),
                Amount::new_unchecked(transfer),
            ));
        }

        creditor.magnitude -= transfer;
        debtor.magnitude -= transfer;

        // A settled side leaves its heap; a partial one sifts back on drop
        if !tolerance.exceeds(creditor.magnitude) {
            PeekMut::pop(creditor);
        }
        if !tolerance.exceeds(debtor.magnitude) {
            PeekMut::pop(debtor);
        }
    }

    if !creditors.is_empty() || !debtors.is_empty() {
        tracing::debug!(
            creditors = creditors.len(),
            debtors = debtors.len(),
            "Greedy pass ended with one-sided residue"
        );
    }
}
