//! Participant identity.
//!
//! Names are case-insensitive. They are canonicalized exactly once, at
//! ingestion, into a [`ParticipantKey`]; every lookup afterward compares keys
//! and never folds case again.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Result, TabsplitError};

/// Canonical participant identifier: the trimmed, upper-cased name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParticipantKey(String);

impl ParticipantKey {
    /// Canonicalize a raw participant name.
    ///
    /// # Errors
    /// Returns [`TabsplitError::InvalidParticipantName`] if the name is empty
    /// after trimming.
    pub fn canonicalize(name: &str) -> Result<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TabsplitError::InvalidParticipantName {
                name: name.to_string(),
            });
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// The canonical key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ParticipantKey {
    type Error = TabsplitError;

    fn try_from(name: String) -> Result<Self> {
        Self::canonicalize(&name)
    }
}

impl From<ParticipantKey> for String {
    fn from(key: ParticipantKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ParticipantKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize_folds_case() {
        let a = ParticipantKey::canonicalize("alice").unwrap();
        let b = ParticipantKey::canonicalize("ALICE").unwrap();
        let c = ParticipantKey::canonicalize("AlIcE").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.as_str(), "ALICE");
    }

    #[test]
    fn canonicalize_trims() {
        let key = ParticipantKey::canonicalize("  bob \t").unwrap();
        assert_eq!(key.as_str(), "BOB");
    }

    #[test]
    fn empty_name_rejected() {
        let err = ParticipantKey::canonicalize("   ").unwrap_err();
        assert!(matches!(err, TabsplitError::InvalidParticipantName { .. }));
    }

    #[test]
    fn display_is_canonical() {
        let key = ParticipantKey::canonicalize("carol").unwrap();
        assert_eq!(format!("{key}"), "CAROL");
    }

    #[test]
    fn serde_serializes_as_string() {
        let key = ParticipantKey::canonicalize("dave").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"DAVE\"");
    }

    #[test]
    fn deserialize_canonicalizes() {
        let key: ParticipantKey = serde_json::from_str("\" erin \"").unwrap();
        assert_eq!(key.as_str(), "ERIN");
        assert!(serde_json::from_str::<ParticipantKey>("\"\"").is_err());
    }
}
