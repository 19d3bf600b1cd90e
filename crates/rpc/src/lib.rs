//! ClearLedger RPC - Request/response contract and CLI orchestrator
//!
//! This crate wires validation, netting and planning into one call and
//! provides the `clearledger` binary on top of it.

pub mod commands;
pub mod context;
pub mod dto;
pub mod error;
pub mod pipeline;

pub use context::AppContext;
pub use dto::{BalanceDto, CalculateRequest, CalculateResponse, SettlementDto};
pub use error::CalculateError;
pub use pipeline::{calculate, Calculation};
