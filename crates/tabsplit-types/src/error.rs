//! Error types for tabsplit.
//!
//! All errors use the `TS_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Input / document errors
//! - 2xx: Accounting (allocation) errors
//! - 3xx: Settlement errors
//! - 9xx: General errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::ParticipantKey;

/// Central error enum for all tabsplit operations.
#[derive(Debug, Error)]
pub enum TabsplitError {
    // =================================================================
    // Input Errors (1xx)
    // =================================================================
    /// The expense document could not be parsed.
    #[error("TS_ERR_100: Malformed expense document: {0}")]
    Parse(String),

    /// Two entries of `people` canonicalize to the same key.
    #[error("TS_ERR_101: Duplicate participant: {0}")]
    DuplicateParticipant(ParticipantKey),

    /// A participant name is empty after trimming.
    #[error("TS_ERR_102: Invalid participant name: {name:?}")]
    InvalidParticipantName { name: String },

    /// An expense amount is negative.
    #[error("TS_ERR_103: Invalid amount {amount} for expense '{label}'")]
    InvalidAmount { label: String, amount: Decimal },

    /// The group has no participants.
    #[error("TS_ERR_104: Group has no participants")]
    EmptyGroup,

    /// Adding an expense would take a running total past the largest
    /// representable amount.
    #[error("TS_ERR_105: Amounts for expense '{label}' exceed the supported range")]
    AmountOverflow { label: String },

    // =================================================================
    // Accounting Errors (2xx)
    // =================================================================
    /// An expense or split references a name that is not in the group.
    #[error("TS_ERR_200: Unknown participant {participant} in expense '{label}'")]
    UnknownParticipant {
        participant: ParticipantKey,
        label: String,
    },

    /// An explicit split list is empty (nothing to divide by).
    #[error("TS_ERR_201: Expense '{label}' has an empty split list")]
    EmptySplit { label: String },

    // =================================================================
    // Settlement Errors (3xx)
    // =================================================================
    /// Total credit and total debt differ by more than the rounding allowance.
    #[error(
        "TS_ERR_300: Conservation violation: credit {credit} != debt {debt} \
         (allowance {allowance})"
    )]
    ConservationViolation {
        credit: Decimal,
        debt: Decimal,
        allowance: Decimal,
    },

    /// Settlement did not finish within the configured number of transitions.
    #[error("TS_ERR_301: Settlement exceeded {limit} steps")]
    SettlementStepLimit { limit: usize },

    // =================================================================
    // General (9xx)
    // =================================================================
    /// Configuration error (invalid config file, bad precision, etc.).
    #[error("TS_ERR_900: Configuration error: {0}")]
    Configuration(String),

    /// I/O error.
    #[error("TS_ERR_901: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, TabsplitError>;

impl From<std::io::Error> for TabsplitError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
