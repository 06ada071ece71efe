//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::{RoundingMode, Result, TabsplitError, constants};

/// Knobs shared by accounting and settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Decimal places each per-person share is rounded to.
    pub share_precision: u32,
    /// Decimal places for display and for the "settled" tolerance.
    pub display_precision: u32,
    /// Midpoint handling for every rounding step.
    pub rounding: RoundingMode,
    /// Verify `sum(credit) == sum(debt)` (within drift) before settlement.
    pub check_conservation: bool,
    /// Abort settlement after this many transitions.
    pub max_settlement_steps: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            share_precision: constants::SHARE_PRECISION,
            display_precision: constants::DISPLAY_PRECISION,
            rounding: RoundingMode::default(),
            check_conservation: true,
            max_settlement_steps: constants::DEFAULT_MAX_SETTLEMENT_STEPS,
        }
    }
}

impl EngineConfig {
    /// Check that the settings are coherent.
    ///
    /// # Errors
    /// Returns [`TabsplitError::Configuration`] if display precision exceeds
    /// share precision, if a precision is beyond what `Decimal` can hold, or
    /// if the step cap is zero.
    pub fn validate(&self) -> Result<()> {
        // Decimal supports a scale of at most 28.
        if self.share_precision > 27 {
            return Err(TabsplitError::Configuration(format!(
                "share_precision {} is out of range (max 27)",
                self.share_precision
            )));
        }
        if self.display_precision > self.share_precision {
            return Err(TabsplitError::Configuration(format!(
                "display_precision {} exceeds share_precision {}",
                self.display_precision, self.share_precision
            )));
        }
        if self.max_settlement_steps == 0 {
            return Err(TabsplitError::Configuration(
                "max_settlement_steps must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
