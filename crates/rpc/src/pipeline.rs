//! Validate → aggregate → plan → audit
//!
//! Pure and synchronous; every call is independent of every other.

use clearledger_core::{Balance, Settlement};
use clearledger_ledger::{aggregate, validate_values, PrecisionWarning};
use clearledger_settlement::{audit_plan, plan_settlements, Method, PlannerOptions};
use serde_json::Value;

use crate::dto::CalculateResponse;
use crate::error::CalculateError;

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    /// One entry per party, in first-appearance order
    pub balances: Vec<Balance>,
    pub settlements: Vec<Settlement>,
    pub method: Method,
    pub warnings: Vec<PrecisionWarning>,
}

impl Calculation {
    pub fn to_response(&self) -> CalculateResponse {
        CalculateResponse::new(&self.balances, &self.settlements)
    }
}

/// Run the full pipeline over raw transaction records.
///
/// Fails as a whole on the first invalid record. A plan that does not clear
/// the balances is reported as [`CalculateError::Consistency`].
pub fn calculate(
    transactions: &[Value],
    options: &PlannerOptions,
) -> Result<Calculation, CalculateError> {
    let ledger = validate_values(transactions)?;
    for warning in &ledger.warnings {
        tracing::warn!(
            index = warning.index,
            original = %warning.original,
            working = %warning.working,
            "Amount rounded to working precision"
        );
    }

    let sheet = aggregate(&ledger.obligations);
    tracing::debug!(
        obligations = ledger.obligations.len(),
        parties = sheet.len(),
        "Balances aggregated"
    );

    let plan = plan_settlements(sheet.balances(), options)?;

    let audit = audit_plan(sheet.balances(), &plan.settlements, &options.tolerance);
    if !audit.is_clean() {
        tracing::error!(
            residuals = audit.residuals.len(),
            misdirected = audit.misdirected.len(),
            unknown = audit.unknown.len(),
            "Settlement plan failed audit"
        );
    }
    audit.into_result()?;

    Ok(Calculation {
        balances: sheet.into_balances(),
        settlements: plan.settlements,
        method: plan.method,
        warnings: ledger.warnings,
    })
}
