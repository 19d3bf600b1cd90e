//! Integration tests for ClearLedger
//!
//! These tests run complete requests through the context: validation,
//! netting, planning, the audit and the report outputs.

use clearledger_config::ConfigLoader;
use clearledger_core::Tolerance;
use clearledger_reports::{save_outputs, BalanceReport, ExportFormat, SettlementReport};
use clearledger_rpc::{AppContext, CalculateError, CalculateRequest, CalculateResponse};
use clearledger_settlement::{Method, PlannerOptions, Strategy};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tempfile::TempDir;

fn request(value: Value) -> CalculateRequest {
    serde_json::from_value(value).unwrap()
}

fn respond(ctx: &AppContext, value: Value) -> CalculateResponse {
    ctx.respond(&request(value), "integration").unwrap()
}

fn transfers(response: &CalculateResponse) -> Vec<(&str, &str, Decimal)> {
    response
        .settlements
        .iter()
        .map(|s| (s.from.as_str(), s.to.as_str(), s.amount))
        .collect()
}

/// Test: the three-party trip from request JSON to response JSON
#[test]
fn test_full_workflow() {
    let ctx = AppContext::default();
    let response = respond(
        &ctx,
        json!({"transactions": [
            {"debtor": "A", "creditor": "B", "amount": 50},
            {"debtor": "B", "creditor": "C", "amount": 30},
            {"debtor": "A", "creditor": "C", "amount": 10}
        ]}),
    );

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "balances": [
                {"name": "A", "finalBalance": "-60"},
                {"name": "B", "finalBalance": "20"},
                {"name": "C", "finalBalance": "40"}
            ],
            "settlements": [
                {"from": "A", "to": "C", "amount": "40"},
                {"from": "A", "to": "B", "amount": "20"}
            ]
        })
    );
}

/// Test: mutual debts cancel out
#[test]
fn test_mutual_debts_cancel() {
    let response = respond(
        &AppContext::default(),
        json!({"transactions": [
            {"debtor": "A", "creditor": "B", "amount": 100},
            {"debtor": "B", "creditor": "A", "amount": 100}
        ]}),
    );

    assert_eq!(response.balances.len(), 2);
    assert!(response.balances.iter().all(|b| b.final_balance.is_zero()));
    assert!(response.settlements.is_empty());
}

/// Test: one bad record rejects the whole request
#[test]
fn test_rejection_produces_no_results() {
    let ctx = AppContext::default();

    for bad in [
        json!({"debtor": "A", "creditor": "B", "amount": 0}),
        json!({"debtor": "A", "creditor": "B", "amount": "-3"}),
        json!({"debtor": "A", "creditor": "A", "amount": 3}),
        json!({"debtor": "", "creditor": "B", "amount": 3}),
        json!({"debtor": "A", "creditor": "B", "amount": "NaN"}),
        json!({"debtor": "A", "creditor": "B"}),
        json!("A owes B"),
    ] {
        let req = request(json!({"transactions": [
            {"debtor": "X", "creditor": "Y", "amount": 1},
            bad
        ]}));

        let err = ctx.respond(&req, "integration").unwrap_err();
        match &err {
            CalculateError::Validation(e) => assert_eq!(e.index, 1),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_user_error());
        assert!(err.public_message().starts_with("Invalid transaction #1"));
    }
}

/// Test: capitalized field names are accepted
#[test]
fn test_capitalized_aliases() {
    let response = respond(
        &AppContext::default(),
        json!({"transactions": [
            {"Debtor": "A", "Creditor": "B", "Amount": "12.5"}
        ]}),
    );

    assert_eq!(transfers(&response), vec![("A", "B", dec!(12.5))]);
}

/// Test: missing `transactions` key and empty list
#[test]
fn test_empty_requests() {
    let ctx = AppContext::default();

    for body in [json!({}), json!({"transactions": []})] {
        let response = respond(&ctx, body);
        assert!(response.balances.is_empty());
        assert!(response.settlements.is_empty());
    }
}

/// Test: identical input gives identical output, including tie order
#[test]
fn test_determinism() {
    let ctx = AppContext::default();
    let body = json!({"transactions": [
        {"debtor": "A", "creditor": "C", "amount": 10},
        {"debtor": "B", "creditor": "D", "amount": 10},
        {"debtor": "A", "creditor": "D", "amount": 5},
        {"debtor": "B", "creditor": "C", "amount": 5}
    ]});

    let first = respond(&ctx, body.clone());
    for _ in 0..10 {
        assert_eq!(respond(&ctx, body.clone()), first);
    }

    // Equal magnitudes: earlier parties settle first
    assert_eq!(
        transfers(&first),
        vec![("A", "C", dec!(15)), ("B", "D", dec!(15))]
    );
}

/// Test: concurrent requests against one shared context
#[test]
fn test_concurrent_requests() {
    let ctx = AppContext::default();
    let body = json!({"transactions": [
        {"debtor": "A", "creditor": "B", "amount": "1.10"},
        {"debtor": "C", "creditor": "B", "amount": "2.20"},
        {"debtor": "B", "creditor": "D", "amount": "0.30"}
    ]});
    let expected = respond(&ctx, body.clone());

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let ctx = &ctx;
                let req = request(body.clone());
                scope.spawn(move || ctx.respond(&req, &format!("worker-{i}")).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

/// Test: conservation and settlement correctness on a larger ledger
#[test]
fn test_conservation_and_clearing() {
    let names = ["Ann", "Bo", "Cy", "Di", "Ed", "Flo"];
    let mut transactions = Vec::new();
    for (i, debtor) in names.iter().enumerate() {
        for (j, creditor) in names.iter().enumerate() {
            if i != j && (i + j) % 3 != 0 {
                transactions.push(json!({
                    "debtor": debtor,
                    "creditor": creditor,
                    "amount": format!("{}.{:02}", i * 7 + j + 1, (i * 13 + j * 5) % 100)
                }));
            }
        }
    }

    let response = respond(&AppContext::default(), json!({ "transactions": transactions }));

    let total: Decimal = response.balances.iter().map(|b| b.final_balance).sum();
    assert_eq!(total, Decimal::ZERO);

    let open = response
        .balances
        .iter()
        .filter(|b| !b.final_balance.is_zero())
        .count();
    assert!(response.settlements.len() <= open.saturating_sub(1));

    // Paying every settlement brings each party back to zero
    for balance in &response.balances {
        let paid: Decimal = response
            .settlements
            .iter()
            .filter(|s| s.from == balance.name)
            .map(|s| s.amount)
            .sum();
        let received: Decimal = response
            .settlements
            .iter()
            .filter(|s| s.to == balance.name)
            .map(|s| s.amount)
            .sum();
        assert_eq!(balance.final_balance + paid - received, Decimal::ZERO);
    }
}

/// Test: the auto strategy from config finds the optimal plan
#[test]
fn test_auto_strategy_from_config() {
    let loader = ConfigLoader::load_str("[settlement]\nstrategy = \"auto\"\nexact_max_parties = 8\n").unwrap();
    let ctx = AppContext::from_config(loader.into_inner()).unwrap();

    let req = request(json!({"transactions": [
        {"debtor": "A", "creditor": "D", "amount": 6},
        {"debtor": "B", "creditor": "E", "amount": 5},
        {"debtor": "C", "creditor": "E", "amount": 5}
    ]}));

    let calculation = ctx.calculate(&req, "integration").unwrap();
    assert_eq!(calculation.method, Method::Exact);
    assert_eq!(calculation.settlements.len(), 3);

    let greedy = AppContext::with_options(PlannerOptions {
        tolerance: Tolerance::DEFAULT,
        strategy: Strategy::Greedy,
    })
    .calculate(&req, "integration")
    .unwrap();
    assert_eq!(greedy.settlements.len(), 4);
}

/// Test: export writes both report files
#[test]
fn test_export_reports() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = AppContext::default();

    let calculation = ctx
        .calculate(
            &request(json!({"transactions": [
                {"debtor": "Smith, J", "creditor": "B", "amount": "9.99"}
            ]})),
            "integration",
        )
        .unwrap();

    let exporter = ExportFormat::Csv.exporter();
    let written = save_outputs(
        temp_dir.path(),
        &BalanceReport::new(&calculation.balances),
        &SettlementReport::new(&calculation.settlements),
        exporter.as_ref(),
    )
    .unwrap();

    let balances = std::fs::read_to_string(written.balances).unwrap();
    assert_eq!(balances, "Name,FinalBalance\n\"Smith, J\",-9.99\nB,9.99\n");

    let settlements = std::fs::read_to_string(written.settlements).unwrap();
    assert_eq!(settlements, "From,To,Amount\n\"Smith, J\",B,9.99\n");
}

fn exact_context() -> AppContext {
    AppContext::with_options(PlannerOptions {
        tolerance: Tolerance::EXACT,
        strategy: Strategy::Greedy,
    })
}

/// Test: an amount below the working precision is a validation error
#[test]
fn test_amount_below_precision_rejected_with_exact_tolerance() {
    let req = request(json!({"transactions": [
        {"debtor": "A", "creditor": "Big", "amount": "1000000000000000000"},
        {"debtor": "Q", "creditor": "A", "amount": "0.00000000004"}
    ]}));

    let err = exact_context().respond(&req, "integration").unwrap_err();
    match &err {
        CalculateError::Validation(e) => assert_eq!(e.index, 1),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_user_error());
}

/// Test: a near-maximum ledger with a tiny amount still balances exactly
#[test]
fn test_large_and_tiny_amounts_clear_with_exact_tolerance() {
    let req = request(json!({"transactions": [
        {"debtor": "A", "creditor": "Big", "amount": "999999999999999999"},
        {"debtor": "Q", "creditor": "A", "amount": "0.00000000006"}
    ]}));

    let calculation = exact_context().calculate(&req, "integration").unwrap();
    assert_eq!(calculation.warnings.len(), 1);

    let total: Decimal = calculation.balances.iter().map(|b| b.net_amount).sum();
    assert_eq!(total, Decimal::ZERO);

    let response = calculation.to_response();
    assert_eq!(
        transfers(&response),
        vec![
            ("A", "Big", dec!(999999999999999998.9999999999)),
            ("Q", "Big", dec!(0.0000000001)),
        ]
    );
}

/// Test: JSON number amounts keep every submitted digit
#[test]
fn test_json_number_amount_is_exact() {
    let req = clearledger_rpc::commands::parse_request(
        r#"{"transactions": [{"debtor": "A", "creditor": "B", "amount": 12345678901234567.89}]}"#,
    )
    .unwrap();

    let calculation = AppContext::default().calculate(&req, "integration").unwrap();
    assert!(calculation.warnings.is_empty());
    assert_eq!(
        transfers(&calculation.to_response()),
        vec![("A", "B", dec!(12345678901234567.89))]
    );
}
