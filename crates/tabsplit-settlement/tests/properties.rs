//! Integration test: settlement properties over seeded random groups.
//!
//! Every scenario is generated from a fixed seed, so failures reproduce.
//! Two kinds of groups are built:
//!
//! - **exact**: every amount divides evenly among its split set, so there is
//!   no rounding drift and settlement must clear every balance.
//! - **drifting**: arbitrary cent amounts. Settlement may leave residuals,
//!   but every cent must still be accounted for.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tabsplit_accounting::GroupAccounting;
use tabsplit_settlement::{SettlementEngine, verify_payment_root};
use tabsplit_types::constants::SHARE_PRECISION;
use tabsplit_types::fixtures::key;
use tabsplit_types::*;

const SCENARIOS: u64 = 200;

struct Scenario {
    people: Vec<ParticipantKey>,
    expenses: Vec<Expense>,
}

fn random_scenario(rng: &mut StdRng, exact: bool) -> Scenario {
    let size = rng.gen_range(2..=8);
    let people: Vec<ParticipantKey> = (0..size).map(|i| key(&format!("p{i}"))).collect();

    let count = rng.gen_range(1..=12);
    let mut expenses = Vec::with_capacity(count);
    for n in 0..count {
        let payer = people[rng.gen_range(0..people.len())].clone();
        let label = format!("item{n}");

        let split = if rng.gen_bool(0.5) {
            None
        } else {
            let mut chosen: Vec<ParticipantKey> =
                people.iter().filter(|_| rng.gen_bool(0.5)).cloned().collect();
            if chosen.is_empty() {
                chosen.push(people[rng.gen_range(0..people.len())].clone());
            }
            Some(chosen)
        };
        let split_len = split.as_ref().map_or(people.len(), Vec::len);

        let amount = if exact {
            let per_head: i64 = rng.gen_range(1..=5_000);
            Decimal::new(per_head * i64::try_from(split_len).unwrap(), 2)
        } else {
            Decimal::new(rng.gen_range(1..=50_000), 2)
        };

        expenses.push(match split {
            None => Expense::shared(payer, label, amount),
            Some(participants) => Expense::split_with(payer, label, amount, participants),
        });
    }

    Scenario { people, expenses }
}

fn settle(scenario: &Scenario) -> (BalanceSnapshot, SettlementPlan) {
    let snapshot = GroupAccounting::default()
        .run(scenario.people.clone(), &scenario.expenses)
        .unwrap();
    let plan = SettlementEngine::default().settle(&snapshot).unwrap();
    (snapshot, plan)
}

// =============================================================================
// Exact groups settle completely
// =============================================================================
#[test]
fn exact_groups_clear_every_balance() {
    let mut rng = StdRng::seed_from_u64(0x7AB5);
    for _ in 0..SCENARIOS {
        let scenario = random_scenario(&mut rng, true);
        let (snapshot, plan) = settle(&scenario);

        assert_eq!(snapshot.total_credit(), snapshot.total_debt());
        assert!(plan.is_complete(), "residuals: {:?}", plan.residuals);

        for balance in &snapshot {
            let b = balance.balance();
            if b >= Decimal::ZERO {
                assert_eq!(plan.received_by(&balance.participant), b);
                assert!(plan.paid_by(&balance.participant).is_zero());
            } else {
                assert_eq!(plan.paid_by(&balance.participant), -b);
                assert!(plan.received_by(&balance.participant).is_zero());
            }
        }

        // Each instruction clears one side, the last clears both.
        let nonzero = snapshot.iter().filter(|b| !b.balance().is_zero()).count();
        assert!(plan.instructions.len() <= nonzero.saturating_sub(1));
    }
}

// =============================================================================
// Drifting groups account for every cent
// =============================================================================
#[test]
fn drifting_groups_account_for_remainders() {
    let mut rng = StdRng::seed_from_u64(0xD21F);
    let engine = SettlementEngine::default();
    for _ in 0..SCENARIOS {
        let scenario = random_scenario(&mut rng, false);
        let (snapshot, plan) = settle(&scenario);

        for balance in &snapshot {
            let who = &balance.participant;
            let b = balance.balance();
            let remaining = if b >= Decimal::ZERO {
                b - plan.received_by(who)
            } else {
                b + plan.paid_by(who)
            };

            match plan.residuals.iter().find(|r| &r.participant == who) {
                Some(residual) => assert_eq!(residual.amount, remaining),
                None => assert!(
                    engine.is_settled(remaining),
                    "{who} left with {remaining} and no residual"
                ),
            }
        }
    }
}

// =============================================================================
// Instructions are well formed
// =============================================================================
#[test]
fn instructions_are_positive_and_directed() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let engine = SettlementEngine::default();
    for i in 0..SCENARIOS {
        let scenario = random_scenario(&mut rng, i % 2 == 0);
        let (snapshot, plan) = settle(&scenario);

        for instruction in &plan.instructions {
            assert!(instruction.amount > Decimal::ZERO);
            assert!(
                !engine.is_settled(instruction.amount),
                "payment of {} shows as zero",
                instruction.amount
            );
            assert_ne!(instruction.payer, instruction.payee);
            assert!(snapshot.get(&instruction.payer).unwrap().in_debt());
            assert!(!snapshot.get(&instruction.payee).unwrap().in_debt());
        }
        assert!(verify_payment_root(&plan.instructions, &plan.payment_root));
    }
}

// =============================================================================
// Expense order does not change the outcome
// =============================================================================
#[test]
fn expense_order_is_irrelevant() {
    let mut rng = StdRng::seed_from_u64(0x0DE2);
    for _ in 0..SCENARIOS {
        let mut scenario = random_scenario(&mut rng, false);
        let (snapshot_a, plan_a) = settle(&scenario);

        scenario.expenses.shuffle(&mut rng);
        let (snapshot_b, plan_b) = settle(&scenario);

        assert_eq!(snapshot_a, snapshot_b);
        assert_eq!(plan_a, plan_b);
        assert_eq!(plan_a.payment_root, plan_b.payment_root);
    }
}

// =============================================================================
// Naming every member explicitly is the same as omitting the split
// =============================================================================
#[test]
fn explicit_everyone_matches_implicit() {
    let mut rng = StdRng::seed_from_u64(0xA11);
    for _ in 0..SCENARIOS {
        let scenario = random_scenario(&mut rng, false);
        let explicit = Scenario {
            people: scenario.people.clone(),
            expenses: scenario
                .expenses
                .iter()
                .map(|e| match &e.split {
                    Split::Everyone => Expense::split_with(
                        e.payer.clone(),
                        e.label.clone(),
                        e.amount,
                        scenario.people.clone(),
                    ),
                    Split::Among(_) => e.clone(),
                })
                .collect(),
        };

        assert_eq!(settle(&scenario), settle(&explicit));
    }
}

// =============================================================================
// Conservation drift stays within the per-share rounding bound
// =============================================================================
#[test]
fn drift_within_rounding_bound() {
    let mut rng = StdRng::seed_from_u64(0xB0B);
    for _ in 0..SCENARIOS {
        let scenario = random_scenario(&mut rng, false);
        let (snapshot, _) = settle(&scenario);

        let bound: Decimal = scenario
            .expenses
            .iter()
            .map(|e| {
                let heads = match &e.split {
                    Split::Everyone => scenario.people.len(),
                    Split::Among(p) => p.len(),
                };
                Decimal::from(heads) * half_unit(SHARE_PRECISION)
            })
            .sum();
        let spent: Decimal = scenario.expenses.iter().map(|e| e.amount).sum();

        assert_eq!(snapshot.total_credit(), spent);
        assert!((snapshot.total_credit() - snapshot.total_debt()).abs() <= bound);
    }
}
