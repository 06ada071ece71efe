//! Document validation.
//!
//! Turns an [`ExpenseDocument`] into a [`Roster`]: canonical participant
//! keys in document order plus typed expenses. The first problem found is
//! reported; nothing is partially accepted.

use std::collections::HashSet;

use rust_decimal::Decimal;
use tabsplit_types::{Expense, ParticipantKey, Result, Split, TabsplitError};

use crate::ExpenseDocument;

/// A validated document, ready for accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    /// Participants in document order.
    pub people: Vec<ParticipantKey>,
    /// Expenses grouped by payer (in `people` order), then by label.
    pub expenses: Vec<Expense>,
}

impl Roster {
    /// Expenses paid by `payer`, in order.
    pub fn expenses_of<'a>(&'a self, payer: &'a ParticipantKey) -> impl Iterator<Item = &'a Expense> {
        self.expenses.iter().filter(move |e| &e.payer == payer)
    }

    /// Sum of all expense amounts.
    ///
    /// [`validate`] rejects documents whose amounts do not fit this sum.
    #[must_use]
    pub fn total_spend(&self) -> Decimal {
        self.expenses.iter().map(|e| e.amount).sum()
    }
}

/// Validate a parsed document.
///
/// # Errors
/// - `EmptyGroup` if `people` is empty
/// - `InvalidParticipantName` for a blank name
/// - `DuplicateParticipant` for case-insensitive duplicates in `people`, in
///   the payer keys, or within one `split_with`
/// - `UnknownParticipant` if a payer or `split_with` name is not in `people`
/// - `EmptySplit` for an empty `split_with`
/// - `InvalidAmount` for a negative amount
/// - `AmountOverflow` if the amounts together exceed the representable range
pub fn validate(document: &ExpenseDocument) -> Result<Roster> {
    if document.people.is_empty() {
        return Err(TabsplitError::EmptyGroup);
    }

    let mut people = Vec::with_capacity(document.people.len());
    let mut known = HashSet::with_capacity(document.people.len());
    for name in &document.people {
        let key = ParticipantKey::canonicalize(name)?;
        if !known.insert(key.clone()) {
            return Err(TabsplitError::DuplicateParticipant(key));
        }
        people.push(key);
    }

    // Payer keys, canonicalized and checked against `people`.
    let mut by_payer = Vec::with_capacity(document.expenses.len());
    let mut payers = HashSet::with_capacity(document.expenses.len());
    for (payer_name, records) in &document.expenses {
        let payer = ParticipantKey::canonicalize(payer_name)?;
        if !known.contains(&payer) {
            return Err(TabsplitError::UnknownParticipant {
                participant: payer,
                label: records.keys().next().cloned().unwrap_or_default(),
            });
        }
        if !payers.insert(payer.clone()) {
            return Err(TabsplitError::DuplicateParticipant(payer));
        }
        by_payer.push((payer, records));
    }

    let mut expenses = Vec::new();
    let mut total = Decimal::ZERO;
    for person in &people {
        let Some((payer, records)) = by_payer.iter().find(|(p, _)| p == person) else {
            continue;
        };
        for (label, record) in *records {
            if record.amount < Decimal::ZERO {
                return Err(TabsplitError::InvalidAmount {
                    label: label.clone(),
                    amount: record.amount,
                });
            }
            total = total
                .checked_add(record.amount)
                .ok_or_else(|| TabsplitError::AmountOverflow {
                    label: label.clone(),
                })?;
            let split = match &record.split_with {
                None => Split::Everyone,
                Some(names) => Split::Among(validate_split(label, names, &known)?),
            };
            expenses.push(Expense {
                payer: payer.clone(),
                label: label.clone(),
                amount: record.amount,
                split,
            });
        }
    }

    tracing::debug!(
        participants = people.len(),
        expenses = expenses.len(),
        "Expense document validated"
    );

    Ok(Roster { people, expenses })
}

fn validate_split(
    label: &str,
    names: &[String],
    known: &HashSet<ParticipantKey>,
) -> Result<Vec<ParticipantKey>> {
    if names.is_empty() {
        return Err(TabsplitError::EmptySplit {
            label: label.to_string(),
        });
    }
    let mut seen = HashSet::with_capacity(names.len());
    names
        .iter()
        .map(|name| {
            let key = ParticipantKey::canonicalize(name)?;
            if !known.contains(&key) {
                return Err(TabsplitError::UnknownParticipant {
                    participant: key,
                    label: label.to_string(),
                });
            }
            if !seen.insert(key.clone()) {
                return Err(TabsplitError::DuplicateParticipant(key));
            }
            Ok(key)
        })
        .collect()
}
