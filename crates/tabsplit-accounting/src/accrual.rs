//! Group accounting: applies every expense to the group's ledgers.

use rust_decimal::Decimal;
use tabsplit_types::{
    BalanceSnapshot, EngineConfig, Expense, ParticipantKey, Result, TabsplitError,
};

use crate::{ExpenseAllocator, Group};

/// What an accrual pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccrualSummary {
    /// Number of expenses applied.
    pub expenses: usize,
    /// Sum of all expense amounts.
    pub total_spend: Decimal,
}

/// Drives the [`ExpenseAllocator`] over recorded expenses.
#[derive(Debug, Clone)]
pub struct GroupAccounting {
    allocator: ExpenseAllocator,
    check_conservation: bool,
}

impl GroupAccounting {
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            allocator: ExpenseAllocator::from_config(config),
            check_conservation: config.check_conservation,
        }
    }

    /// Apply `expenses` to `group`, in order.
    ///
    /// For each expense the payer is credited the full amount and every
    /// member of the split set is debited their rounded share. Each expense
    /// is validated in full before its ledger changes are written; the pass
    /// stops at the first invalid expense, leaving earlier ones applied.
    ///
    /// # Errors
    /// `UnknownParticipant`, `EmptySplit`, `DuplicateParticipant`,
    /// `InvalidAmount` or `AmountOverflow` from the failing expense.
    pub fn accrue(&self, group: &mut Group, expenses: &[Expense]) -> Result<AccrualSummary> {
        let mut total_spend = Decimal::ZERO;
        for expense in expenses {
            let split = group.split_set(&expense.split);
            let allocation =
                self.allocator
                    .allocate(&expense.label, expense.amount, &split, group)?;
            group.apply(expense, &allocation)?;
            total_spend = total_spend.checked_add(expense.amount).ok_or_else(|| {
                TabsplitError::AmountOverflow {
                    label: expense.label.clone(),
                }
            })?;

            tracing::debug!(
                payer = %expense.payer,
                label = %expense.label,
                amount = %expense.amount,
                split = split.len(),
                explicit = expense.split.is_explicit(),
                drift = %allocation.drift(),
                "Expense applied"
            );
        }

        tracing::info!(
            participants = group.len(),
            expenses = expenses.len(),
            total_spend = %total_spend,
            "Accrual complete"
        );

        Ok(AccrualSummary {
            expenses: expenses.len(),
            total_spend,
        })
    }

    /// Close the group, checking conservation unless disabled in config.
    ///
    /// # Errors
    /// Returns `ConservationViolation` if the check is enabled and fails.
    pub fn finish(&self, group: Group) -> Result<BalanceSnapshot> {
        if self.check_conservation {
            group.close()
        } else {
            tracing::warn!("Conservation check disabled; closing group unchecked");
            Ok(group.close_unchecked())
        }
    }

    /// Build the group, apply every expense, and close it.
    ///
    /// # Errors
    /// Any error from [`Group::new`], [`GroupAccounting::accrue`] or
    /// [`GroupAccounting::finish`].
    pub fn run(&self, people: Vec<ParticipantKey>, expenses: &[Expense]) -> Result<BalanceSnapshot> {
        let mut group = Group::new(people)?;
        self.accrue(&mut group, expenses)?;
        self.finish(group)
    }
}

impl Default for GroupAccounting {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
