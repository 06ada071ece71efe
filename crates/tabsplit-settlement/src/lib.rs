//! # tabsplit-settlement
//!
//! **Settlement plane**: converts closed balances into payment instructions.
//!
//! ## Architecture
//!
//! The settlement plane receives a [`BalanceSnapshot`] from accounting and:
//! 1. Partitions participants into creditors (`balance >= 0`) and debtors
//!    (`balance < 0`), keeping group insertion order
//! 2. Greedily matches each creditor against the debtors in order until the
//!    creditor is paid
//! 3. Records any balance rounding drift left unmatched as a residual
//! 4. Hashes the ordered instructions into a payment root
//!
//! The matching is deterministic, but it does not minimise the number of
//! payments.
//!
//! [`BalanceSnapshot`]: tabsplit_types::BalanceSnapshot

pub mod determinism;
pub mod engine;

pub use determinism::{compute_payment_root, verify_payment_root};
pub use engine::{SettlementEngine, Transition};
