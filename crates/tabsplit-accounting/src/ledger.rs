//! Per-participant ledger entry.

use rust_decimal::Decimal;
use tabsplit_types::{ParticipantBalance, ParticipantKey, Result, TabsplitError};

/// Running credit and debt of one participant during accrual.
///
/// Both totals only ever grow. Mutation is restricted to this crate so
/// nothing outside accrual can touch them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    participant: ParticipantKey,
    credit: Decimal,
    debt: Decimal,
}

impl LedgerEntry {
    /// A fresh entry with zero credit and zero debt.
    #[must_use]
    pub fn new(participant: ParticipantKey) -> Self {
        Self {
            participant,
            credit: Decimal::ZERO,
            debt: Decimal::ZERO,
        }
    }

    #[must_use]
    pub fn participant(&self) -> &ParticipantKey {
        &self.participant
    }

    /// Total paid on behalf of the group so far.
    #[must_use]
    pub fn credit(&self) -> Decimal {
        self.credit
    }

    /// Total of shares owed so far.
    #[must_use]
    pub fn debt(&self) -> Decimal {
        self.debt
    }

    /// `credit - debt`.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.credit - self.debt
    }

    /// Credit `amount` paid for the expense `label`.
    pub(crate) fn add_credit(&mut self, amount: Decimal, label: &str) -> Result<()> {
        debug_assert!(amount >= Decimal::ZERO, "credit must not decrease");
        self.credit = grow(self.credit, amount, label)?;
        Ok(())
    }

    /// Debit a share of the expense `label`.
    pub(crate) fn add_debt(&mut self, amount: Decimal, label: &str) -> Result<()> {
        debug_assert!(amount >= Decimal::ZERO, "debt must not decrease");
        self.debt = grow(self.debt, amount, label)?;
        Ok(())
    }

    pub(crate) fn into_balance(self) -> ParticipantBalance {
        ParticipantBalance {
            participant: self.participant,
            credit: self.credit,
            debt: self.debt,
        }
    }
}

fn grow(total: Decimal, amount: Decimal, label: &str) -> Result<Decimal> {
    total
        .checked_add(amount)
        .ok_or_else(|| TabsplitError::AmountOverflow {
            label: label.to_string(),
        })
}
