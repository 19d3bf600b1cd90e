//! Wire types of the `/api/calculate` contract
//!
//! Decimals travel as JSON strings holding the exact value.

use clearledger_core::{Balance, Settlement};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{ "transactions": [ {"debtor", "creditor", "amount"}, ... ] }`
///
/// Records stay untyped here; the validator reports malformed entries with
/// their index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub transactions: Vec<Value>,
}

impl CalculateRequest {
    pub fn new(transactions: Vec<Value>) -> Self {
        Self { transactions }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceDto {
    pub name: String,
    #[serde(rename = "finalBalance")]
    pub final_balance: Decimal,
}

impl From<&Balance> for BalanceDto {
    fn from(balance: &Balance) -> Self {
        Self {
            name: balance.party.to_string(),
            final_balance: balance.net_amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementDto {
    pub from: String,
    pub to: String,
    pub amount: Decimal,
}

impl From<&Settlement> for SettlementDto {
    fn from(settlement: &Settlement) -> Self {
        Self {
            from: settlement.from.to_string(),
            to: settlement.to.to_string(),
            amount: settlement.amount.value(),
        }
    }
}

/// `{ "balances": [...], "settlements": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculateResponse {
    pub balances: Vec<BalanceDto>,
    pub settlements: Vec<SettlementDto>,
}

impl CalculateResponse {
    pub fn new(balances: &[Balance], settlements: &[Settlement]) -> Self {
        Self {
            balances: balances.iter().map(BalanceDto::from).collect(),
            settlements: settlements.iter().map(SettlementDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearledger_core::{Amount, PartyId};
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_missing_transactions_is_empty() {
        let request: CalculateRequest = serde_json::from_str("{}").unwrap();
        assert!(request.transactions.is_empty());
    }

    #[test]
    fn test_request_keeps_raw_records() {
        let request: CalculateRequest = serde_json::from_value(json!({
            "transactions": [{"debtor": "A", "creditor": "B", "amount": 5}, 42]
        }))
        .unwrap();

        assert_eq!(request.transactions.len(), 2);
        assert_eq!(request.transactions[1], json!(42));
    }

    #[test]
    fn test_response_shape() {
        let a = PartyId::new("A").unwrap();
        let b = PartyId::new("B").unwrap();
        let response = CalculateResponse::new(
            &[
                Balance::new(a.clone(), dec!(-12.50)),
                Balance::new(b.clone(), dec!(12.50)),
            ],
            &[Settlement::new(a, b, Amount::new(dec!(12.50)).unwrap())],
        );

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "balances": [
                    {"name": "A", "finalBalance": "-12.50"},
                    {"name": "B", "finalBalance": "12.50"}
                ],
                "settlements": [{"from": "A", "to": "B", "amount": "12.50"}]
            })
        );
    }
}
