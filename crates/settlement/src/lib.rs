//! ClearLedger Settlement - Turning net balances into transfers
//!
//! Finding the minimum number of transfers that clear a set of balances is
//! NP-hard. The default planner is the greedy largest-creditor /
//! largest-debtor heuristic: deterministic, `O(n log n)`, at most `n - 1`
//! transfers, and near-minimal rather than minimal. For small party counts
//! an exact solver can be enabled with [`Strategy::Auto`].
//!
//! # Key Types
//! - `PlannerOptions`: Tolerance and strategy
//! - `SettlementPlan`: Transfers plus the method that produced them
//! - `PlanAudit`: Replay of a plan against the balances it should clear

pub mod audit;
pub mod error;
mod exact;
mod greedy;
pub mod planner;

pub use audit::{audit_plan, PlanAudit};
pub use error::SettlementError;
pub use planner::{plan_settlements, Method, PlannerOptions, SettlementPlan, Strategy, MAX_EXACT_PARTIES};
