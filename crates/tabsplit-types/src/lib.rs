//! # tabsplit-types
//!
//! Shared types, errors, and configuration for **tabsplit**.
//!
//! Leaf crate of the workspace; every other crate depends on it. It defines:
//!
//! - **Identifiers**: [`ParticipantKey`]
//! - **Expense model**: [`Expense`], [`Split`]
//! - **Balance model**: [`ParticipantBalance`], [`BalanceSnapshot`]
//! - **Settlement output**: [`PaymentInstruction`], [`Residual`], [`SettlementPlan`]
//! - **Money helpers**: [`RoundingMode`], [`round_to`], [`format_amount`]
//! - **Configuration**: [`EngineConfig`]
//! - **Errors**: [`TabsplitError`] with `TS_ERR_` prefix codes
//! - **Constants**: precisions and defaults

pub mod balance;
pub mod config;
pub mod constants;
pub mod error;
pub mod expense;
pub mod ids;
pub mod money;
pub mod payment;

#[cfg(any(test, feature = "test-helpers"))]
pub mod fixtures;

// Re-export all primary types at crate root for ergonomic imports:
//   use tabsplit_types::{ParticipantKey, Expense, BalanceSnapshot, ...};

pub use balance::*;
pub use config::*;
pub use error::*;
pub use expense::*;
pub use ids::*;
pub use money::*;
pub use payment::*;

// Constants are accessed via `tabsplit_types::constants::FOO`
// (not re-exported to avoid name collisions).
