//! Greedy creditor/debtor settlement.
//!
//! Every creditor, in group order, is paid by the debtors, in group order,
//! until nothing is owed to them:
//!
//! ```text
//! for creditor c:
//!     while c not settled:
//!         for debtor d (skipping settled ones):
//!             c + d > 0  → d pays -d, c = round(c + d), d = 0   (DebtorCleared, next debtor)
//!             otherwise  → d pays c,  d = round(d + c), c = 0   (CreditorCleared, next creditor)
//! ```
//!
//! "Settled" means the balance is zero once rounded to display precision.
//! The same test decides when a creditor is paid, when a debtor is skipped,
//! and when the pass over debtors stops after a debtor clears. If a whole pass over the debtors pays nothing while the creditor
//! is still owed, the remainder is rounding drift that no debtor can cover;
//! it is reported as a [`Residual`] and the next creditor is processed.

use rust_decimal::Decimal;
use tabsplit_types::{
    BalanceSnapshot, EngineConfig, ParticipantKey, PaymentInstruction, Residual, Result,
    RoundingMode, SettlementPlan, Side, TabsplitError, round_to, rounds_to_zero,
};

use crate::determinism::compute_payment_root;

/// Outcome of matching one creditor against one debtor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The debtor's whole remaining debt fit under the creditor's credit;
    /// move on to the next debtor.
    DebtorCleared,
    /// The debtor covered everything the creditor was owed; move on to the
    /// next creditor.
    CreditorCleared,
}

/// A participant's working balance during settlement.
#[derive(Debug)]
struct Position {
    participant: ParticipantKey,
    balance: Decimal,
}

/// Greedy settlement engine.
#[derive(Debug, Clone)]
pub struct SettlementEngine {
    share_precision: u32,
    display_precision: u32,
    rounding: RoundingMode,
    max_steps: usize,
}

impl SettlementEngine {
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            share_precision: config.share_precision,
            display_precision: config.display_precision,
            rounding: config.rounding,
            max_steps: config.max_settlement_steps,
        }
    }

    /// Whether a working balance counts as zero.
    #[must_use]
    pub fn is_settled(&self, balance: Decimal) -> bool {
        rounds_to_zero(balance, self.display_precision, self.rounding)
    }

    /// Produce payment instructions that clear every balance in `snapshot`.
    ///
    /// # Errors
    /// Returns [`TabsplitError::SettlementStepLimit`] if more than
    /// `max_settlement_steps` transitions are needed.
    pub fn settle(&self, snapshot: &BalanceSnapshot) -> Result<SettlementPlan> {
        let (mut creditors, mut debtors): (Vec<Position>, Vec<Position>) = snapshot
            .iter()
            .map(|b| Position {
                participant: b.participant.clone(),
                balance: b.balance(),
            })
            .partition(|p| p.balance >= Decimal::ZERO);

        let mut instructions = Vec::new();
        let mut residuals = Vec::new();
        let mut steps = 0usize;

        for creditor in &mut creditors {
            while !self.is_settled(creditor.balance) {
                let mut paid_this_pass = false;
                for debtor in &mut debtors {
                    if self.is_settled(debtor.balance) {
                        continue;
                    }
                    steps += 1;
                    if steps > self.max_steps {
                        return Err(TabsplitError::SettlementStepLimit {
                            limit: self.max_steps,
                        });
                    }
                    paid_this_pass = true;

                    let (instruction, transition) = self.transfer(creditor, debtor);
                    tracing::debug!(
                        payer = %instruction.payer,
                        payee = %instruction.payee,
                        amount = %instruction.amount,
                        ?transition,
                        "Payment matched"
                    );
                    instructions.push(instruction);

                    // A sub-cent remainder after a debtor clears is absorbed.
                    if transition == Transition::CreditorCleared
                        || self.is_settled(creditor.balance)
                    {
                        break;
                    }
                }

                if !paid_this_pass {
                    tracing::warn!(
                        creditor = %creditor.participant,
                        remaining = %creditor.balance,
                        "No debtor left to cover creditor; recording residual"
                    );
                    residuals.push(Residual {
                        participant: creditor.participant.clone(),
                        side: Side::Creditor,
                        amount: creditor.balance,
                    });
                    break;
                }
            }
        }

        for debtor in debtors.iter().filter(|d| !self.is_settled(d.balance)) {
            tracing::warn!(
                debtor = %debtor.participant,
                remaining = %debtor.balance,
                "Debtor left with unpaid balance; recording residual"
            );
            residuals.push(Residual {
                participant: debtor.participant.clone(),
                side: Side::Debtor,
                amount: debtor.balance,
            });
        }

        let payment_root = compute_payment_root(&instructions);

        tracing::info!(
            creditors = creditors.len(),
            debtors = debtors.len(),
            payments = instructions.len(),
            residuals = residuals.len(),
            payment_root = %hex::encode(payment_root),
            "Settlement complete"
        );

        Ok(SettlementPlan {
            instructions,
            residuals,
            payment_root,
        })
    }

    /// Move money from `debtor` to `creditor` and report which side cleared.
    fn transfer(&self, creditor: &mut Position, debtor: &mut Position) -> (PaymentInstruction, Transition) {
        let combined = creditor.balance + debtor.balance;
        let (amount, transition) = if combined > Decimal::ZERO {
            let amount = -debtor.balance;
            creditor.balance = round_to(combined, self.share_precision, self.rounding);
            debtor.balance = Decimal::ZERO;
            (amount, Transition::DebtorCleared)
        } else {
            let amount = creditor.balance;
            debtor.balance = round_to(combined, self.share_precision, self.rounding);
            creditor.balance = Decimal::ZERO;
            (amount, Transition::CreditorCleared)
        };

        (
            PaymentInstruction {
                payer: debtor.participant.clone(),
                payee: creditor.participant.clone(),
                amount,
            },
            transition,
        )
    }
}

impl Default for SettlementEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabsplit_types::fixtures::{cents, key, snapshot};

    fn pay(payer: &str, payee: &str, amount: Decimal) -> PaymentInstruction {
        PaymentInstruction {
            payer: key(payer),
            payee: key(payee),
            amount,
        }
    }

    #[test]
    fn abc_scenario() {
        // A +20, B +5, C -25
        let snap = snapshot(&[("a", 3000, 1000), ("b", 1500, 1000), ("c", 0, 2500)]);
        let plan = SettlementEngine::default().settle(&snap).unwrap();
        assert_eq!(
            plan.instructions,
            vec![pay("c", "a", Decimal::new(20, 0)), pay("c", "b", Decimal::new(5, 0))]
        );
        assert!(plan.is_complete());
    }

    #[test]
    fn one_creditor_many_debtors() {
        // A +30, B -10, C -20: creditor A is paid by B in full, then by C.
        let snap = snapshot(&[("a", 3000, 0), ("b", 0, 1000), ("c", 0, 2000)]);
        let plan = SettlementEngine::default().settle(&snap).unwrap();
        assert_eq!(
            plan.instructions,
            vec![pay("b", "a", cents(1000)), pay("c", "a", cents(2000))]
        );
        assert!(plan.is_complete());
    }

    #[test]
    fn debtor_split_across_creditors() {
        // A +10, B +10, C -20
        let snap = snapshot(&[("a", 1000, 0), ("b", 1000, 0), ("c", 0, 2000)]);
        let plan = SettlementEngine::default().settle(&snap).unwrap();
        assert_eq!(
            plan.instructions,
            vec![pay("c", "a", cents(1000)), pay("c", "b", cents(1000))]
        );
    }

    #[test]
    fn exact_match_clears_creditor() {
        // c + d == 0 takes the creditor-cleared branch.
        let snap = snapshot(&[("a", 500, 0), ("b", 0, 500)]);
        let plan = SettlementEngine::default().settle(&snap).unwrap();
        assert_eq!(plan.instructions, vec![pay("b", "a", cents(500))]);
        assert!(plan.is_complete());
    }

    #[test]
    fn debtor_order_follows_insertion_order() {
        let snap = snapshot(&[("d2", 0, 500), ("a", 1000, 0), ("d1", 0, 500)]);
        let plan = SettlementEngine::default().settle(&snap).unwrap();
        assert_eq!(
            plan.instructions,
            vec![pay("d2", "a", cents(500)), pay("d1", "a", cents(500))]
        );
    }

    #[test]
    fn all_zero_emits_nothing() {
        let snap = snapshot(&[("a", 1000, 1000), ("b", 0, 0)]);
        let plan = SettlementEngine::default().settle(&snap).unwrap();
        assert!(plan.instructions.is_empty());
        assert!(plan.is_complete());
    }

    #[test]
    fn sub_cent_debtor_is_skipped() {
        // C owes 0.004: below display tolerance, never asked to pay.
        let snap = BalanceSnapshot::new(vec![
            tabsplit_types::ParticipantBalance {
                participant: key("a"),
                credit: Decimal::new(10_004, 3),
                debt: Decimal::ZERO,
            },
            tabsplit_types::ParticipantBalance {
                participant: key("b"),
                credit: Decimal::ZERO,
                debt: Decimal::new(10, 0),
            },
            tabsplit_types::ParticipantBalance {
                participant: key("c"),
                credit: Decimal::ZERO,
                debt: Decimal::new(4, 3),
            },
        ]);
        let plan = SettlementEngine::default().settle(&snap).unwrap();
        assert_eq!(plan.instructions, vec![pay("b", "a", Decimal::new(10, 0))]);
        assert!(plan.is_complete());
    }

    #[test]
    fn sub_cent_creditor_remainder_is_absorbed() {
        // A +5.003, B -5, C -10.003, D +10: once B pays, A is owed 0.003
        // and must not be sent a payment that displays as 0.00.
        let balance = |name: &str, credit: Decimal, debt: Decimal| tabsplit_types::ParticipantBalance {
            participant: key(name),
            credit,
            debt,
        };
        let snap = BalanceSnapshot::new(vec![
            balance("a", Decimal::new(5003, 3), Decimal::ZERO),
            balance("b", Decimal::ZERO, Decimal::new(5, 0)),
            balance("c", Decimal::ZERO, Decimal::new(10_003, 3)),
            balance("d", Decimal::new(10, 0), Decimal::ZERO),
        ]);
        let engine = SettlementEngine::default();
        let plan = engine.settle(&snap).unwrap();
        assert_eq!(
            plan.instructions,
            vec![pay("b", "a", Decimal::new(5, 0)), pay("c", "d", Decimal::new(10, 0))]
        );
        assert!(plan.is_complete());
        assert!(plan.instructions.iter().all(|i| !engine.is_settled(i.amount)));
    }

    #[test]
    fn uncovered_creditor_becomes_residual() {
        // Creditors are owed 0.05 more than debtors owe.
        let snap = snapshot(&[("a", 1005, 0), ("b", 0, 1000)]);
        let plan = SettlementEngine::default().settle(&snap).unwrap();
        assert_eq!(plan.instructions, vec![pay("b", "a", cents(1000))]);
        assert_eq!(
            plan.residuals,
            vec![Residual {
                participant: key("a"),
                side: Side::Creditor,
                amount: cents(5),
            }]
        );
    }

    #[test]
    fn overpaying_debtor_becomes_residual() {
        let snap = snapshot(&[("a", 1000, 0), ("b", 0, 1005)]);
        let plan = SettlementEngine::default().settle(&snap).unwrap();
        assert_eq!(plan.instructions, vec![pay("b", "a", cents(1000))]);
        assert_eq!(plan.residuals.len(), 1);
        assert_eq!(plan.residuals[0].side, Side::Debtor);
        assert_eq!(plan.residuals[0].amount, cents(-5));
    }

    #[test]
    fn step_limit_enforced() {
        let config = EngineConfig {
            max_settlement_steps: 1,
            ..EngineConfig::default()
        };
        let snap = snapshot(&[("a", 3000, 0), ("b", 0, 1000), ("c", 0, 2000)]);
        let err = SettlementEngine::new(&config).settle(&snap).unwrap_err();
        assert!(matches!(err, TabsplitError::SettlementStepLimit { limit: 1 }));
    }

    #[test]
    fn payment_root_matches_instructions() {
        let snap = snapshot(&[("a", 3000, 1000), ("b", 1500, 1000), ("c", 0, 2500)]);
        let plan = SettlementEngine::default().settle(&snap).unwrap();
        assert!(crate::verify_payment_root(&plan.instructions, &plan.payment_root));
    }

    #[test]
    fn is_settled_tolerance() {
        let engine = SettlementEngine::default();
        assert!(engine.is_settled(Decimal::ZERO));
        assert!(engine.is_settled(Decimal::new(4, 3)));
        assert!(engine.is_settled(Decimal::new(-4, 3)));
        assert!(!engine.is_settled(Decimal::new(5, 3)));
        assert!(!engine.is_settled(Decimal::new(-1, 2)));
    }
}
