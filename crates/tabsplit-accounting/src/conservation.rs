//! Money conservation checker.
//!
//! Invariant enforced before a group is closed:
//! ```text
//! Σ credit == Σ spend
//! Σ debt   == Σ applied shares
//! |Σ credit − Σ debt| <= Σ drift_bound
//! ```
//!
//! Settlement only terminates cleanly on conserved balances, so a violation
//! is fatal and stops processing before any payment is computed.

use rust_decimal::Decimal;
use tabsplit_types::{Result, TabsplitError};

use crate::Allocation;

/// Tracks what accrual should have produced and validates the ledgers
/// against it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConservationTracker {
    /// Total amount credited to payers.
    spent: Decimal,
    /// Total of all applied shares.
    allocated: Decimal,
    /// Accumulated per-allocation drift bound.
    drift_allowance: Decimal,
}

impl ConservationTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one applied expense, named `label` in errors.
    ///
    /// Either every total is updated or none is.
    ///
    /// # Errors
    /// Returns [`TabsplitError::AmountOverflow`] if a running total would
    /// leave the representable range.
    pub fn record(&mut self, label: &str, allocation: &Allocation) -> Result<()> {
        let overflow = || TabsplitError::AmountOverflow {
            label: label.to_string(),
        };
        let spent = self
            .spent
            .checked_add(allocation.amount)
            .ok_or_else(overflow)?;
        let allocated = allocation
            .checked_total()
            .and_then(|total| self.allocated.checked_add(total))
            .ok_or_else(overflow)?;
        let drift_allowance = self
            .drift_allowance
            .checked_add(allocation.drift_bound)
            .ok_or_else(overflow)?;

        self.spent = spent;
        self.allocated = allocated;
        self.drift_allowance = drift_allowance;
        Ok(())
    }

    /// Total group spend recorded so far.
    #[must_use]
    pub fn spent(&self) -> Decimal {
        self.spent
    }

    /// Total debt handed out so far.
    #[must_use]
    pub fn allocated(&self) -> Decimal {
        self.allocated
    }

    /// How far total debt may legitimately sit from total credit.
    #[must_use]
    pub fn drift_allowance(&self) -> Decimal {
        self.drift_allowance
    }

    /// Verify ledger totals against what was recorded.
    ///
    /// # Errors
    /// Returns [`TabsplitError::ConservationViolation`] if the ledgers do not
    /// add up to the recorded totals, or if credit and debt differ by more
    /// than the drift allowance.
    pub fn verify(&self, total_credit: Decimal, total_debt: Decimal) -> Result<()> {
        let ledgers_match = total_credit == self.spent && total_debt == self.allocated;
        if !ledgers_match || (total_credit - total_debt).abs() > self.drift_allowance {
            return Err(TabsplitError::ConservationViolation {
                credit: total_credit,
                debt: total_debt,
                allowance: self.drift_allowance,
            });
        }
        Ok(())
    }
}
