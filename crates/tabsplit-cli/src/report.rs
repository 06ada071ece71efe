//! Human-readable and JSON renderings of a finished run.
//!
//! The text report has three sections, in order: what each person spent,
//! each person's credit/debt position, and who pays whom. Residual balances
//! left by rounding drift are listed after the payouts.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use tabsplit_ingress::Roster;
use tabsplit_types::{
    BalanceSnapshot, EngineConfig, ParticipantKey, PaymentInstruction, Residual, RoundingMode,
    SettlementPlan, Split, format_amount,
};

/// Everything produced for one expense document.
pub struct Report<'a> {
    roster: &'a Roster,
    snapshot: &'a BalanceSnapshot,
    plan: &'a SettlementPlan,
    display_precision: u32,
    rounding: RoundingMode,
}

impl<'a> Report<'a> {
    pub fn new(
        roster: &'a Roster,
        snapshot: &'a BalanceSnapshot,
        plan: &'a SettlementPlan,
        config: &EngineConfig,
    ) -> Self {
        Self {
            roster,
            snapshot,
            plan,
            display_precision: config.display_precision,
            rounding: config.rounding,
        }
    }

    fn money(&self, amount: Decimal) -> String {
        format_amount(amount, self.display_precision, self.rounding)
    }

    /// `$1.50` or `-$1.50`.
    fn signed_money(&self, amount: Decimal) -> String {
        let sign = if amount < Decimal::ZERO { "-" } else { "" };
        format!("{sign}${}", self.money(amount.abs()))
    }

    /// An amount as written, padded to display precision but never rounded.
    fn exact_money(&self, amount: Decimal) -> String {
        let precision = amount.scale().max(self.display_precision);
        format_amount(amount, precision, self.rounding)
    }

    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let report = JsonReport {
            participants: self
                .snapshot
                .iter()
                .map(|b| JsonParticipant {
                    name: &b.participant,
                    credit: b.credit,
                    debt: b.debt,
                    balance: b.balance(),
                })
                .collect(),
            instructions: &self.plan.instructions,
            residuals: &self.plan.residuals,
            total_spend: self.roster.total_spend(),
            payment_root: hex::encode(self.plan.payment_root),
        };
        serde_json::to_string_pretty(&report)
    }

    fn write_expenses(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "Expense Details")?;
        for person in &self.roster.people {
            let mut expenses = self.roster.expenses_of(person).peekable();
            if expenses.peek().is_none() {
                writeln!(f, "{person} has no expenses")?;
                continue;
            }
            writeln!(f, "{person} has spent:")?;
            for expense in expenses {
                write!(f, " - ${} on {}", self.exact_money(expense.amount), expense.label)?;
                if let Split::Among(participants) = &expense.split {
                    let names: Vec<&str> = participants.iter().map(ParticipantKey::as_str).collect();
                    write!(f, " (split with: {})", names.join(", "))?;
                }
                writeln!(f)?;
            }
        }
        writeln!(
            f,
            "\nThe group has spent a total of: ${}",
            self.money(self.roster.total_spend())
        )
    }

    fn write_positions(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "Group Debt/Credit Totals")?;
        for balance in self.snapshot {
            let net = balance.balance();
            if balance.in_debt() {
                writeln!(
                    f,
                    "{} owes ${} to the group based on:",
                    balance.participant,
                    self.money(-net)
                )?;
            } else {
                writeln!(
                    f,
                    "{} is receiving ${} from the group based on:",
                    balance.participant,
                    self.money(net)
                )?;
            }
            writeln!(f, " - Credit: ${}", self.money(balance.credit))?;
            writeln!(f, " - Debt: -${}", self.money(balance.debt))?;
        }
        Ok(())
    }

    fn write_payouts(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "Group Payout Information")?;
        if self.plan.instructions.is_empty() {
            writeln!(f, "Nobody owes anything.")?;
        }
        for PaymentInstruction {
            payer,
            payee,
            amount,
        } in &self.plan.instructions
        {
            writeln!(f, " - {payer} pays {payee} ${}", self.money(*amount))?;
        }

        if !self.plan.residuals.is_empty() {
            writeln!(f, "\nUnsettled after rounding:")?;
            for residual in &self.plan.residuals {
                writeln!(
                    f,
                    " - {} ({}) left with {}",
                    residual.participant,
                    residual.side,
                    self.signed_money(residual.amount)
                )?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_expenses(f)?;
        self.write_positions(f)?;
        self.write_payouts(f)
    }
}

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    let rule = "=".repeat(title.len());
    writeln!(f, "\n{rule}\n{title}\n{rule}")
}

#[derive(Serialize)]
struct JsonParticipant<'a> {
    name: &'a ParticipantKey,
    credit: Decimal,
    debt: Decimal,
    balance: Decimal,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    participants: Vec<JsonParticipant<'a>>,
    instructions: &'a [PaymentInstruction],
    residuals: &'a [Residual],
    total_spend: Decimal,
    payment_root: String,
}
