//! Expense allocation.
//!
//! Divides one expense's amount evenly across its split set. Each share is
//! rounded to the share precision on its own, with no remainder
//! redistribution:
//!
//! ```text
//! share = round(amount / |split set|, share_precision)
//! ```
//!
//! For amounts that do not divide evenly the applied shares therefore sum to
//! slightly more or less than `amount` (10 split three ways gives
//! `3 × 3.333 = 9.999`). That drift is part of the accounting rules; it is
//! bounded by `|split set| × half_unit(share_precision)` and is tracked by
//! the [`ConservationTracker`](crate::ConservationTracker).

use std::collections::HashSet;

use rust_decimal::Decimal;
use tabsplit_types::{
    EngineConfig, ParticipantKey, Result, RoundingMode, TabsplitError, half_unit, round_to,
};

use crate::Group;

/// One participant's debt increment from a single expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    pub participant: ParticipantKey,
    pub amount: Decimal,
}

/// The validated result of splitting one expense.
///
/// Produced before any ledger is touched; applying it cannot fail on
/// membership grounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// The amount that was split.
    pub amount: Decimal,
    /// Debt increments, in split-set order.
    pub shares: Vec<Share>,
    /// Largest drift this allocation may introduce.
    pub drift_bound: Decimal,
}

impl Allocation {
    /// Sum of all applied shares.
    ///
    /// [`ExpenseAllocator::allocate`] only returns allocations whose total
    /// fits; use [`Allocation::checked_total`] for hand-built ones.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.shares.iter().map(|s| s.amount).sum()
    }

    /// Sum of all applied shares, or `None` on overflow.
    #[must_use]
    pub fn checked_total(&self) -> Option<Decimal> {
        self.shares
            .iter()
            .try_fold(Decimal::ZERO, |acc, s| acc.checked_add(s.amount))
    }

    /// `total - amount`: positive when rounding over-allocated.
    #[must_use]
    pub fn drift(&self) -> Decimal {
        self.total() - self.amount
    }
}

/// Splits expense amounts into rounded per-participant shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpenseAllocator {
    share_precision: u32,
    rounding: RoundingMode,
}

impl ExpenseAllocator {
    #[must_use]
    pub fn new(share_precision: u32, rounding: RoundingMode) -> Self {
        Self {
            share_precision,
            rounding,
        }
    }

    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.share_precision, config.rounding)
    }

    /// Split `amount` evenly across `participants`.
    ///
    /// `label` only names the expense in errors.
    ///
    /// # Errors
    /// - `InvalidAmount` if `amount` is negative
    /// - `EmptySplit` if `participants` is empty
    /// - `UnknownParticipant` if a participant is not in `group`
    /// - `DuplicateParticipant` if a participant is listed twice
    /// - `AmountOverflow` if the rounded shares add up past the
    ///   representable range
    pub fn allocate(
        &self,
        label: &str,
        amount: Decimal,
        participants: &[ParticipantKey],
        group: &Group,
    ) -> Result<Allocation> {
        if amount < Decimal::ZERO {
            return Err(TabsplitError::InvalidAmount {
                label: label.to_string(),
                amount,
            });
        }
        if participants.is_empty() {
            return Err(TabsplitError::EmptySplit {
                label: label.to_string(),
            });
        }

        let mut seen = HashSet::with_capacity(participants.len());
        for participant in participants {
            if !group.contains(participant) {
                return Err(TabsplitError::UnknownParticipant {
                    participant: participant.clone(),
                    label: label.to_string(),
                });
            }
            if !seen.insert(participant) {
                return Err(TabsplitError::DuplicateParticipant(participant.clone()));
            }
        }

        let count = Decimal::from(participants.len());
        let share = round_to(amount / count, self.share_precision, self.rounding);

        let allocation = Allocation {
            amount,
            shares: participants
                .iter()
                .map(|p| Share {
                    participant: p.clone(),
                    amount: share,
                })
                .collect(),
            drift_bound: count * half_unit(self.share_precision),
        };
        if allocation.checked_total().is_none() {
            return Err(TabsplitError::AmountOverflow {
                label: label.to_string(),
            });
        }
        Ok(allocation)
    }
}

impl Default for ExpenseAllocator {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
