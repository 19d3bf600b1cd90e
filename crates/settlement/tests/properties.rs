//! Property checks over generated ledgers
//!
//! Each case builds a random obligation list, nets it, plans it, and checks
//! the invariants every plan must satisfy.

use clearledger_core::{Amount, Obligation, PartyId, Tolerance};
use clearledger_ledger::aggregate;
use clearledger_settlement::{
    audit_plan, plan_settlements, Method, PlannerOptions, SettlementPlan, Strategy,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

fn random_ledger(rng: &mut StdRng, parties: usize, records: usize) -> Vec<Obligation> {
    let names: Vec<PartyId> = (0..parties)
        .map(|i| PartyId::new(format!("party-{i}")).unwrap())
        .collect();

    (0..records)
        .map(|_| {
            let debtor = rng.gen_range(0..parties);
            let mut creditor = rng.gen_range(0..parties - 1);
            if creditor >= debtor {
                creditor += 1;
            }
            // 0.01 ..= 500.00, with a bias towards round amounts to create ties
            let cents = if rng.gen_bool(0.3) {
                rng.gen_range(1..=5) * 1_000
            } else {
                rng.gen_range(1..=50_000)
            };
            Obligation::new(
                names[debtor].clone(),
                names[creditor].clone(),
                Amount::new(Decimal::new(cents, 2)).unwrap(),
            )
            .unwrap()
        })
        .collect()
}

fn check_plan(obligations: &[Obligation], options: &PlannerOptions) -> SettlementPlan {
    let sheet = aggregate(obligations);
    assert_eq!(sheet.total(), Decimal::ZERO, "money is conserved");

    let plan = plan_settlements(sheet.balances(), options).unwrap();

    let audit = audit_plan(sheet.balances(), &plan.settlements, &options.tolerance);
    assert!(audit.is_clean(), "plan clears every balance: {audit:?}");

    if plan.open_positions > 0 {
        assert!(plan.settlements.len() <= plan.open_positions - 1);
    } else {
        assert!(plan.settlements.is_empty());
    }

    let again = plan_settlements(sheet.balances(), options).unwrap();
    assert_eq!(plan, again, "planning is deterministic");

    plan
}

#[test]
fn test_greedy_invariants_hold() {
    let mut rng = StdRng::seed_from_u64(0x5e77_1e);
    let options = PlannerOptions::default();

    for case in 0..200 {
        let parties = rng.gen_range(2..12);
        let records = rng.gen_range(1..40);
        let ledger = random_ledger(&mut rng, parties, records);
        let plan = check_plan(&ledger, &options);
        assert_eq!(plan.method, Method::Greedy, "case {case}");
    }
}

#[test]
fn test_exact_never_worse_than_greedy() {
    let mut rng = StdRng::seed_from_u64(42);
    let exact = PlannerOptions {
        tolerance: Tolerance::DEFAULT,
        strategy: Strategy::Auto {
            exact_max_parties: 10,
        },
    };

    for _ in 0..100 {
        let parties = rng.gen_range(2..=10);
        let records = rng.gen_range(1..20);
        let ledger = random_ledger(&mut rng, parties, records);

        let greedy_plan = check_plan(&ledger, &PlannerOptions::default());
        let exact_plan = check_plan(&ledger, &exact);

        assert_eq!(exact_plan.method, Method::Exact);
        assert!(exact_plan.settlements.len() <= greedy_plan.settlements.len());
    }
}

#[test]
fn test_large_ledger_stays_bounded() {
    let mut rng = StdRng::seed_from_u64(7);
    let ledger = random_ledger(&mut rng, 500, 5_000);
    check_plan(&ledger, &PlannerOptions::default());
}

#[test]
fn test_reversed_ledger_keeps_balances() {
    let mut rng = StdRng::seed_from_u64(99);
    let ledger = random_ledger(&mut rng, 6, 30);

    // Reversal changes first-appearance order; compare per-party amounts.
    let mut reversed = ledger.clone();
    reversed.reverse();

    let forward = aggregate(&ledger);
    let backward = aggregate(&reversed);
    for balance in forward.iter() {
        let other = backward.get(balance.party.as_str()).unwrap();
        assert_eq!(balance.net_amount, other.net_amount);
    }
}
