//! The on-disk expense document.
//!
//! Two top-level fields:
//!
//! ```toml
//! people = ["Alice", "Bob", "Carol"]
//!
//! [expenses.Alice.groceries]
//! amount = "30.00"
//!
//! [expenses.Bob.taxi]
//! amount = "15"
//! split_with = ["Carol"]
//! ```
//!
//! The JSON form has the same shape. Amounts may be strings or numbers.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tabsplit_types::{Result, TabsplitError};

/// One expense entry as written in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpenseRecord {
    pub amount: Decimal,
    /// Explicit split set; absent means everyone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_with: Option<Vec<String>>,
}

/// Raw, unvalidated expense document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpenseDocument {
    /// Participant names, in the order they should be processed.
    pub people: Vec<String>,
    /// Payer name → expense label → record.
    #[serde(default)]
    pub expenses: BTreeMap<String, BTreeMap<String, ExpenseRecord>>,
}

/// Serialization format of an expense document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// Pick the format from a file extension (`.json`, `.toml`).
    ///
    /// # Errors
    /// Returns [`TabsplitError::Parse`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(TabsplitError::Parse(format!(
                "cannot infer document format from {}",
                path.display()
            ))),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Toml => write!(f, "toml"),
        }
    }
}

/// Parse a document from text.
///
/// # Errors
/// Returns [`TabsplitError::Parse`] if the text is not a well-formed document.
pub fn parse_document(input: &str, format: DocumentFormat) -> Result<ExpenseDocument> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str(input).map_err(|e| TabsplitError::Parse(e.to_string()))
        }
        DocumentFormat::Toml => toml::from_str(input).map_err(|e| TabsplitError::Parse(e.to_string())),
    }
}

/// Read and parse a document from disk.
///
/// When `format` is `None` it is inferred from the file extension.
///
/// # Errors
/// `Io` if the file cannot be read, `Parse` if it is malformed.
pub fn load_document(path: &Path, format: Option<DocumentFormat>) -> Result<ExpenseDocument> {
    let format = match format {
        Some(f) => f,
        None => DocumentFormat::from_path(path)?,
    };
    tracing::info!(path = %path.display(), %format, "Reading expense document");
    let text = std::fs::read_to_string(path)?;
    parse_document(&text, format)
}
