//! Exact minimum-transfer settlement for small party counts
//!
//! A group of `m` parties whose balances sum to zero can always be cleared
//! with `m - 1` transfers, so a plan over `k` disjoint zero-sum groups needs
//! `n - k` transfers. Maximizing `k` gives the optimum. `best[mask]` is the
//! largest number of zero-sum groups any removal order of `mask` passes
//! through, computed over all `2^n` subsets.

use clearledger_core::Tolerance;
use rust_decimal::Decimal;

use crate::planner::Position;

/// Partition `positions` into the maximum number of zero-sum groups.
///
/// Returns slot indices. Groups are ordered by their earliest member and
/// members are in ascending slot order.
pub(crate) fn zero_sum_groups(positions: &[Position<'_>], tolerance: &Tolerance) -> Vec<Vec<usize>> {
    let n = positions.len();
    if n == 0 {
        return Vec::new();
    }

    let full = (1usize << n) - 1;
    let mut sums = vec![Decimal::ZERO; full + 1];
    let mut best = vec![0u8; full + 1];

    for mask in 1..=full {
        let low = mask.trailing_zeros() as usize;
        sums[mask] = sums[mask & (mask - 1)] + positions[low].amount;

        let inner = members(mask, n)
            .map(|i| best[mask ^ (1 << i)])
            .max()
            .unwrap_or(0);
        best[mask] = inner + u8::from(tolerance.is_negligible(sums[mask]));
    }

    // Walk one optimal removal path; every zero-sum mask on it closes a group.
    let mut groups = Vec::new();
    let mut current = Vec::new();
    let mut mask = full;
    while mask != 0 {
        let target = best[mask] - u8::from(tolerance.is_negligible(sums[mask]));
        let chosen = members(mask, n)
            .find(|&i| best[mask ^ (1 << i)] == target)
            .unwrap_or(low_bit(mask));

        current.push(chosen);
        mask ^= 1 << chosen;

        if mask == 0 || tolerance.is_negligible(sums[mask]) {
            current.sort_unstable();
            groups.push(std::mem::take(&mut current));
        }
    }

    groups.sort_by_key(|group| group[0]);
    groups
}

fn members(mask: usize, n: usize) -> impl Iterator<Item = usize> {
    (0..n).filter(move |i| mask & (1 << i) != 0)
}

fn low_bit(mask: usize) -> usize {
    mask.trailing_zeros() as usize
}
