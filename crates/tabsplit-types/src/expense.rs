//! Expense model.
//!
//! An [`Expense`] is one payment a participant made on behalf of the group,
//! together with the set of people who share its cost.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ParticipantKey;

/// Who shares the cost of an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "participants")]
pub enum Split {
    /// Implicit split: every participant in the group, payer included.
    Everyone,
    /// Explicit split: only the listed participants. Never empty once validated.
    Among(Vec<ParticipantKey>),
}

impl Split {
    /// Whether this is an explicit split.
    #[must_use]
    pub fn is_explicit(&self) -> bool {
        matches!(self, Self::Among(_))
    }
}

/// A single recorded expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// The participant who paid and is credited with `amount`.
    pub payer: ParticipantKey,
    /// Free-form label ("groceries", "hotel", ...).
    pub label: String,
    /// Amount paid.
    pub amount: Decimal,
    /// Who owes a share of `amount`.
    pub split: Split,
}

impl Expense {
    /// Expense split across the whole group.
    #[must_use]
    pub fn shared(payer: ParticipantKey, label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            payer,
            label: label.into(),
            amount,
            split: Split::Everyone,
        }
    }

    /// Expense split among an explicit subset.
    #[must_use]
    pub fn split_with(
        payer: ParticipantKey,
        label: impl Into<String>,
        amount: Decimal,
        participants: Vec<ParticipantKey>,
    ) -> Self {
        Self {
            payer,
            label: label.into(),
            amount,
            split: Split::Among(participants),
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} paid {} for '{}'", self.payer, self.amount, self.label)?;
        if let Split::Among(participants) = &self.split {
            let names: Vec<&str> = participants.iter().map(ParticipantKey::as_str).collect();
            write!(f, " (split with: {})", names.join(", "))?;
        }
        Ok(())
    }
}
