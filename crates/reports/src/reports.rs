//! Balance and settlement reports

use clearledger_core::{Balance, Settlement};
use rust_decimal::Decimal;

use crate::exporters::ReportData;

// ============================================================================
// Balance Report
// ============================================================================

/// Final balance of every party, in first-appearance order
#[derive(Debug, Clone)]
pub struct BalanceReport {
    pub title: String,
    pub balances: Vec<Balance>,
}

impl BalanceReport {
    pub fn new(balances: &[Balance]) -> Self {
        Self {
            title: "Final Balances".to_string(),
            balances: balances.to_vec(),
        }
    }

    /// Sum owed to net creditors
    pub fn total_owed(&self) -> Decimal {
        self.balances
            .iter()
            .map(|b| b.net_amount)
            .filter(|amount| *amount > Decimal::ZERO)
            .sum()
    }
}

impl ReportData for BalanceReport {
    fn title(&self) -> &str {
        &self.title
    }

    fn headers(&self) -> Vec<String> {
        vec!["Name".to_string(), "FinalBalance".to_string()]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.balances
            .iter()
            .map(|b| vec![b.party.to_string(), b.net_amount.to_string()])
            .collect()
    }

    fn summary(&self) -> Vec<(String, String)> {
        vec![
            ("Parties".to_string(), self.balances.len().to_string()),
            ("Total Owed".to_string(), self.total_owed().to_string()),
        ]
    }
}

// ============================================================================
// Settlement Report
// ============================================================================

/// Planned transfers, in emission order
#[derive(Debug, Clone)]
pub struct SettlementReport {
    pub title: String,
    pub settlements: Vec<Settlement>,
}

impl SettlementReport {
    pub fn new(settlements: &[Settlement]) -> Self {
        Self {
            title: "Final Settlements".to_string(),
            settlements: settlements.to_vec(),
        }
    }

    pub fn total_transferred(&self) -> Decimal {
        self.settlements.iter().map(|s| s.amount.value()).sum()
    }
}

impl ReportData for SettlementReport {
    fn title(&self) -> &str {
        &self.title
    }

    fn headers(&self) -> Vec<String> {
        vec!["From".to_string(), "To".to_string(), "Amount".to_string()]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.settlements
            .iter()
            .map(|s| vec![s.from.to_string(), s.to.to_string(), s.amount.to_string()])
            .collect()
    }

    fn summary(&self) -> Vec<(String, String)> {
        vec![
            ("Transfers".to_string(), self.settlements.len().to_string()),
            (
                "Total Transferred".to_string(),
                self.total_transferred().to_string(),
            ),
        ]
    }
}

// ============================================================================
// Text Summary
// ============================================================================

/// Plain-text list of transfers, one `from ➝ to : amount` line each.
///
/// Returns `"No settlements."` for an empty plan.
pub fn settlements_text(settlements: &[Settlement]) -> String {
    if settlements.is_empty() {
        return "No settlements.".to_string();
    }

    let mut lines = vec!["Final Settlements:".to_string(), String::new()];
    lines.extend(
        settlements
            .iter()
            .map(|s| format!("{} ➝ {} : {}", s.from, s.to, s.amount)),
    );
    lines.join("\n")
}
