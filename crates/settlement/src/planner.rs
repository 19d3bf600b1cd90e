//! Settlement planner
//!
//! Entry point of the settlement stage. The order of the input balances is
//! the tie-break order: when two parties carry the same magnitude, the one
//! listed first is settled first.

use clearledger_core::{Balance, PartyId, Settlement, Tolerance};
use rust_decimal::Decimal;

use crate::error::SettlementError;
use crate::{exact, greedy};

/// Upper bound for the exact solver (`2^n` subsets are enumerated)
pub const MAX_EXACT_PARTIES: usize = 16;

/// How the planner searches for a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Greedy largest-pair heuristic for every input
    #[default]
    Greedy,
    /// Exact solver when at most `exact_max_parties` parties are unsettled
    /// (capped at [`MAX_EXACT_PARTIES`]), greedy otherwise
    Auto { exact_max_parties: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlannerOptions {
    pub tolerance: Tolerance,
    pub strategy: Strategy,
}

/// The algorithm that actually produced a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Greedy,
    Exact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementPlan {
    pub settlements: Vec<Settlement>,
    pub method: Method,
    /// Parties whose balance exceeded the tolerance on entry
    pub open_positions: usize,
}

/// A non-zero balance together with its first-appearance rank
#[derive(Debug, Clone, Copy)]
pub(crate) struct Position<'a> {
    pub rank: usize,
    pub party: &'a PartyId,
    pub amount: Decimal,
}

/// Compute the transfers that clear `balances`.
///
/// Fails with [`SettlementError::Imbalanced`] when the balances do not sum
/// to zero within the tolerance.
pub fn plan_settlements(
    balances: &[Balance],
    options: &PlannerOptions,
) -> Result<SettlementPlan, SettlementError> {
    let tolerance = options.tolerance;

    let total: Decimal = balances.iter().map(|b| b.net_amount).sum();
    if tolerance.exceeds(total) {
        tracing::error!(total = %total, tolerance = %tolerance, "Balances do not net to zero");
        return Err(SettlementError::Imbalanced {
            total,
            tolerance: tolerance.epsilon(),
        });
    }

    let positions: Vec<Position<'_>> = balances
        .iter()
        .enumerate()
        .filter(|(_, b)| !b.is_settled(&tolerance))
        .map(|(rank, b)| Position {
            rank,
            party: &b.party,
            amount: b.net_amount,
        })
        .collect();

    let method = match options.strategy {
        Strategy::Auto { exact_max_parties }
            if positions.len() <= exact_max_parties.min(MAX_EXACT_PARTIES) =>
        {
            Method::Exact
        }
        _ => Method::Greedy,
    };

    let mut settlements = Vec::with_capacity(positions.len().saturating_sub(1));
    match method {
        Method::Greedy => greedy::settle(&positions, &tolerance, &mut settlements),
        Method::Exact => {
            let groups = exact::zero_sum_groups(&positions, &tolerance);
            tracing::debug!(groups = groups.len(), "Exact solver partitioned balances");
            for group in groups {
                let members: Vec<Position<'_>> = group.iter().map(|&slot| positions[slot]).collect();
                greedy::settle(&members, &tolerance, &mut settlements);
            }
        }
    }

    tracing::debug!(
        method = ?method,
        open_positions = positions.len(),
        transfers = settlements.len(),
        "Settlement plan computed"
    );

    Ok(SettlementPlan {
        settlements,
        method,
        open_positions: positions.len(),
    })
}
