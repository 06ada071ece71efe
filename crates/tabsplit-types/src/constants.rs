//! System-wide constants for tabsplit.

/// Decimal places each per-person share is rounded to.
pub const SHARE_PRECISION: u32 = 3;

/// Decimal places amounts are displayed with, and the precision at which a
/// working balance counts as settled.
pub const DISPLAY_PRECISION: u32 = 2;

/// Upper bound on settlement transitions before the engine gives up.
///
/// The greedy loop needs at most `creditors + debtors - 1` transitions on
/// conserved input; this cap only trips on corrupted balances.
pub const DEFAULT_MAX_SETTLEMENT_STEPS: usize = 1_000_000;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "tabsplit";
