//! Settlement output types.
//!
//! A [`SettlementPlan`] is the immutable result of running the settlement
//! engine over a [`BalanceSnapshot`](crate::BalanceSnapshot).

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ParticipantKey;

/// One participant pays another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInstruction {
    /// The debtor sending money.
    pub payer: ParticipantKey,
    /// The creditor receiving money.
    pub payee: ParticipantKey,
    /// Exact amount; always positive.
    pub amount: Decimal,
}

impl fmt::Display for PaymentInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pays {} {}", self.payer, self.payee, self.amount)
    }
}

/// Which side of the settlement a residual balance was left on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Creditor,
    Debtor,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Creditor => write!(f, "creditor"),
            Self::Debtor => write!(f, "debtor"),
        }
    }
}

/// A working balance the greedy loop could not clear.
///
/// Only arises from accumulated per-share rounding drift: creditors can be
/// owed slightly more than debtors owe in total (or the reverse).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Residual {
    pub participant: ParticipantKey,
    pub side: Side,
    /// Remaining signed working balance.
    pub amount: Decimal,
}

/// Ordered payment instructions plus anything left unsettled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPlan {
    /// Instructions in emission order.
    pub instructions: Vec<PaymentInstruction>,
    /// Balances left over after the loop finished.
    pub residuals: Vec<Residual>,
    /// SHA-256 over the ordered instructions.
    pub payment_root: [u8; 32],
}

impl SettlementPlan {
    /// Whether every balance was cleared.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.residuals.is_empty()
    }

    /// Total amount received by `payee`.
    #[must_use]
    pub fn received_by(&self, payee: &ParticipantKey) -> Decimal {
        self.instructions
            .iter()
            .filter(|i| &i.payee == payee)
            .map(|i| i.amount)
            .sum()
    }

    /// Total amount paid by `payer`.
    #[must_use]
    pub fn paid_by(&self, payer: &ParticipantKey) -> Decimal {
        self.instructions
            .iter()
            .filter(|i| &i.payer == payer)
            .map(|i| i.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> ParticipantKey {
        ParticipantKey::canonicalize(name).unwrap()
    }

    fn plan() -> SettlementPlan {
        SettlementPlan {
            instructions: vec![
                PaymentInstruction {
                    payer: key("c"),
                    payee: key("a"),
                    amount: Decimal::new(20, 0),
                },
                PaymentInstruction {
                    payer: key("c"),
                    payee: key("b"),
                    amount: Decimal::new(5, 0),
                },
            ],
            residuals: vec![],
            payment_root: [0u8; 32],
        }
    }

    #[test]
    fn sums_per_participant() {
        let p = plan();
        assert_eq!(p.paid_by(&key("c")), Decimal::new(25, 0));
        assert_eq!(p.received_by(&key("a")), Decimal::new(20, 0));
        assert_eq!(p.received_by(&key("b")), Decimal::new(5, 0));
        assert_eq!(p.paid_by(&key("a")), Decimal::ZERO);
        assert!(p.is_complete());
    }

    #[test]
    fn instruction_display() {
        let p = plan();
        assert_eq!(format!("{}", p.instructions[0]), "C pays A 20");
    }

    #[test]
    fn plan_serde_roundtrip() {
        let p = plan();
        let json = serde_json::to_string(&p).unwrap();
        let back: SettlementPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
