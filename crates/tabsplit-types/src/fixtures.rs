//! Test fixtures shared across the workspace (`test-helpers` feature).

use rust_decimal::Decimal;

use crate::{BalanceSnapshot, Expense, ParticipantBalance, ParticipantKey};

/// Canonical key for a test name.
///
/// # Panics
/// Panics if `name` is blank.
#[must_use]
pub fn key(name: &str) -> ParticipantKey {
    ParticipantKey::canonicalize(name).expect("fixture names are non-empty")
}

/// Keys for a list of names, in order.
#[must_use]
pub fn keys(names: &[&str]) -> Vec<ParticipantKey> {
    names.iter().map(|n| key(n)).collect()
}

/// Decimal from a value in cents (`cents(2050)` is `20.50`).
#[must_use]
pub fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

/// Snapshot from `(name, credit, debt)` triples given in cents.
#[must_use]
pub fn snapshot(entries: &[(&str, i64, i64)]) -> BalanceSnapshot {
    BalanceSnapshot::new(
        entries
            .iter()
            .map(|&(name, credit, debt)| ParticipantBalance {
                participant: key(name),
                credit: cents(credit),
                debt: cents(debt),
            })
            .collect(),
    )
}

/// The three-person scenario: A pays 30 for everyone, B pays 15 for C only.
///
/// Balances: A +20, B +5, C -25.
#[must_use]
pub fn abc_trip() -> (Vec<ParticipantKey>, Vec<Expense>) {
    let people = keys(&["A", "B", "C"]);
    let expenses = vec![
        Expense::shared(key("A"), "groceries", Decimal::new(30, 0)),
        Expense::split_with(key("B"), "taxi", Decimal::new(15, 0), vec![key("C")]),
    ];
    (people, expenses)
}
