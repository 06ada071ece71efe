//! Money arithmetic helpers.
//!
//! All amounts are exact [`Decimal`]s. Rounding happens only where the
//! accounting rules call for it (per-share allocation, settlement
//! transitions, display) and always through [`round_to`] so the mode is
//! applied consistently.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// How midpoints are resolved when rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    /// Midpoint away from zero (`2.0005 -> 2.001`, `-2.0005 -> -2.001`).
    #[default]
    HalfUp,
    /// Midpoint to the nearest even digit (`2.0005 -> 2.000`).
    HalfEven,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            Self::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HalfUp => write!(f, "half-up"),
            Self::HalfEven => write!(f, "half-even"),
        }
    }
}

/// Round `amount` to `dp` decimal places using `mode`.
#[must_use]
pub fn round_to(amount: Decimal, dp: u32, mode: RoundingMode) -> Decimal {
    amount.round_dp_with_strategy(dp, mode.strategy())
}

/// Half a unit in the last place at precision `dp` (e.g. `0.0005` for 3).
///
/// The largest error a single rounding to `dp` places can introduce.
#[must_use]
pub fn half_unit(dp: u32) -> Decimal {
    Decimal::new(5, dp + 1)
}

/// Whether `amount` is zero once rounded to `dp` places.
#[must_use]
pub fn rounds_to_zero(amount: Decimal, dp: u32, mode: RoundingMode) -> bool {
    round_to(amount.abs(), dp, mode).is_zero()
}

/// Render `amount` with exactly `dp` decimal places (`20` -> `"20.00"`).
#[must_use]
pub fn format_amount(amount: Decimal, dp: u32, mode: RoundingMode) -> String {
    let mut rounded = round_to(amount, dp, mode);
    rounded.rescale(dp);
    rounded.to_string()
}
