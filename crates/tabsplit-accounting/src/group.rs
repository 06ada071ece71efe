//! The participant roster and its ledgers.

use std::collections::HashMap;

use tabsplit_types::{
    BalanceSnapshot, Expense, ParticipantKey, Result, Split, TabsplitError,
};

use crate::{Allocation, ConservationTracker, LedgerEntry};

/// Fixed set of participants, each with a ledger entry.
///
/// The shape (who is in the group, in which order) is set at construction
/// and never changes. Ledger values change only through [`Group::apply`],
/// which is driven by [`GroupAccounting`](crate::GroupAccounting).
#[derive(Debug, Clone)]
pub struct Group {
    /// Ledgers in insertion order.
    entries: Vec<LedgerEntry>,
    /// Canonical key → position in `entries`.
    index: HashMap<ParticipantKey, usize>,
    conservation: ConservationTracker,
}

impl Group {
    /// Build a group from canonical keys, keeping their order.
    ///
    /// # Errors
    /// - `EmptyGroup` if `people` is empty
    /// - `DuplicateParticipant` if a key appears twice
    pub fn new(people: Vec<ParticipantKey>) -> Result<Self> {
        if people.is_empty() {
            return Err(TabsplitError::EmptyGroup);
        }
        let mut index = HashMap::with_capacity(people.len());
        let mut entries = Vec::with_capacity(people.len());
        for participant in people {
            if index.contains_key(&participant) {
                return Err(TabsplitError::DuplicateParticipant(participant));
            }
            index.insert(participant.clone(), entries.len());
            entries.push(LedgerEntry::new(participant));
        }
        Ok(Self {
            entries,
            index,
            conservation: ConservationTracker::new(),
        })
    }

    /// Build a group from raw names, canonicalizing each one.
    ///
    /// # Errors
    /// As [`Group::new`], plus `InvalidParticipantName` for blank names.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let people = names
            .into_iter()
            .map(|n| ParticipantKey::canonicalize(n.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(people)
    }

    #[must_use]
    pub fn contains(&self, participant: &ParticipantKey) -> bool {
        self.index.contains_key(participant)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Participants in insertion order.
    pub fn participants(&self) -> impl Iterator<Item = &ParticipantKey> {
        self.entries.iter().map(LedgerEntry::participant)
    }

    /// Ledger entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    #[must_use]
    pub fn entry(&self, participant: &ParticipantKey) -> Option<&LedgerEntry> {
        self.index.get(participant).map(|&i| &self.entries[i])
    }

    /// Conservation totals recorded so far.
    #[must_use]
    pub fn conservation(&self) -> &ConservationTracker {
        &self.conservation
    }

    /// The participants who share an expense: the explicit list, or
    /// everyone in insertion order.
    #[must_use]
    pub fn split_set(&self, split: &Split) -> Vec<ParticipantKey> {
        match split {
            Split::Everyone => self.participants().cloned().collect(),
            Split::Among(participants) => participants.clone(),
        }
    }

    fn position(&self, participant: &ParticipantKey, label: &str) -> Result<usize> {
        self.index
            .get(participant)
            .copied()
            .ok_or_else(|| TabsplitError::UnknownParticipant {
                participant: participant.clone(),
                label: label.to_string(),
            })
    }

    /// Apply one allocated expense: credit the payer, add every share.
    ///
    /// Every participant is resolved and the group totals are checked
    /// before any ledger is written, so on error the ledgers are unchanged.
    /// No single ledger can exceed the group totals, so once those fit the
    /// ledger updates cannot overflow.
    ///
    /// # Errors
    /// - `UnknownParticipant` if the payer or a share holder is not in the
    ///   group
    /// - `AmountOverflow` if the group's running totals would overflow
    pub fn apply(&mut self, expense: &Expense, allocation: &Allocation) -> Result<()> {
        let label = expense.label.as_str();
        let payer = self.position(&expense.payer, label)?;
        let debtors = allocation
            .shares
            .iter()
            .map(|share| Ok((self.position(&share.participant, label)?, share.amount)))
            .collect::<Result<Vec<_>>>()?;

        self.conservation.record(label, allocation)?;
        self.entries[payer].add_credit(allocation.amount, label)?;
        for (position, amount) in debtors {
            self.entries[position].add_debt(amount, label)?;
        }
        Ok(())
    }

    /// Close accrual and snapshot the balances, verifying conservation.
    ///
    /// # Errors
    /// Returns `ConservationViolation` if total credit and total debt do not
    /// reconcile.
    pub fn close(self) -> Result<BalanceSnapshot> {
        let Self {
            entries,
            conservation,
            ..
        } = self;
        let snapshot = Self::snapshot(entries);
        conservation.verify(snapshot.total_credit(), snapshot.total_debt())?;
        Ok(snapshot)
    }

    /// Close accrual without the conservation check.
    #[must_use]
    pub fn close_unchecked(self) -> BalanceSnapshot {
        Self::snapshot(self.entries)
    }

    fn snapshot(entries: Vec<LedgerEntry>) -> BalanceSnapshot {
        BalanceSnapshot::new(entries.into_iter().map(LedgerEntry::into_balance).collect())
    }
}
