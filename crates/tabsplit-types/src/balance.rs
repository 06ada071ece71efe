//! Post-accrual balance types.
//!
//! A [`BalanceSnapshot`] is produced once accounting has finished and is
//! immutable from then on. Settlement reads it and keeps its own working
//! balances; credit and debt can no longer change.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ParticipantKey;

/// Final credit and debt of one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantBalance {
    pub participant: ParticipantKey,
    /// Total this participant paid on behalf of the group.
    pub credit: Decimal,
    /// Total of this participant's shares, including shares of their own expenses.
    pub debt: Decimal,
}

impl ParticipantBalance {
    /// `credit - debt`. Positive: owed money. Negative: owes money.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.credit - self.debt
    }

    /// Whether this participant owes money to the group.
    #[must_use]
    pub fn in_debt(&self) -> bool {
        self.balance() < Decimal::ZERO
    }
}

/// Immutable per-participant balances, in group insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    balances: Vec<ParticipantBalance>,
}

impl BalanceSnapshot {
    #[must_use]
    pub fn new(balances: Vec<ParticipantBalance>) -> Self {
        Self { balances }
    }

    /// Balances in group insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ParticipantBalance> {
        self.balances.iter()
    }

    /// Balance of a single participant.
    #[must_use]
    pub fn get(&self, participant: &ParticipantKey) -> Option<&ParticipantBalance> {
        self.balances.iter().find(|b| &b.participant == participant)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Sum of all credit (total group spend).
    #[must_use]
    pub fn total_credit(&self) -> Decimal {
        self.balances.iter().map(|b| b.credit).sum()
    }

    /// Sum of all debt.
    #[must_use]
    pub fn total_debt(&self) -> Decimal {
        self.balances.iter().map(|b| b.debt).sum()
    }
}

impl<'a> IntoIterator for &'a BalanceSnapshot {
    type Item = &'a ParticipantBalance;
    type IntoIter = std::slice::Iter<'a, ParticipantBalance>;

    fn into_iter(self) -> Self::IntoIter {
        self.balances.iter()
    }
}
