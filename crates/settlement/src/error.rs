//! Settlement errors
//!
//! Both variants indicate an internal inconsistency upstream of, or inside,
//! the planner. They are never caused by a user input mistake that
//! validation would have caught.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettlementError {
    #[error("Balances do not net to zero: total {total} exceeds tolerance {tolerance}")]
    Imbalanced { total: Decimal, tolerance: Decimal },

    #[error(
        "Settlement plan failed audit: {residuals} unsettled parties, \
         {misdirected} misdirected transfers, {unknown} unknown parties"
    )]
    AuditFailed {
        residuals: usize,
        misdirected: usize,
        unknown: usize,
    },
}
