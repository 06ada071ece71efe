//! # tabsplit-accounting
//!
//! **Accrual plane**: turns recorded expenses into per-participant credit
//! and debt.
//!
//! ## Architecture
//!
//! 1. **Group**: the roster, built once from canonical keys, owning one
//!    [`LedgerEntry`] per participant in insertion order
//! 2. **ExpenseAllocator**: divides one expense among its split set, each
//!    share rounded independently
//! 3. **GroupAccounting**: drives the allocator over every expense and
//!    applies credit/debt atomically per expense
//! 4. **ConservationTracker**: checks `Σ credit == Σ debt` (within rounding
//!    drift) before the group is closed
//!
//! ## Flow
//!
//! ```text
//! Group::new() → GroupAccounting.accrue() → GroupAccounting.finish()
//!     → BalanceSnapshot → settlement
//! ```
//!
//! Closing the group consumes it, so ledgers cannot change once settlement
//! has their snapshot.

pub mod accrual;
pub mod allocator;
pub mod conservation;
pub mod group;
pub mod ledger;

pub use accrual::{AccrualSummary, GroupAccounting};
pub use allocator::{Allocation, ExpenseAllocator, Share};
pub use conservation::ConservationTracker;
pub use group::Group;
pub use ledger::LedgerEntry;
