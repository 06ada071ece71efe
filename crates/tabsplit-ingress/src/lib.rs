//! # tabsplit-ingress
//!
//! **Ingress**: reads expense documents and validates them into the typed
//! model the accounting plane consumes.
//!
//! ## Flow
//!
//! ```text
//! file / string → parse_document() → ExpenseDocument
//!     → validate() → Roster (participant keys + expenses) → accounting
//! ```
//!
//! Names are canonicalized here, once. Everything downstream works on
//! [`ParticipantKey`](tabsplit_types::ParticipantKey)s.

pub mod document;
pub mod validation;

pub use document::{DocumentFormat, ExpenseDocument, ExpenseRecord, load_document, parse_document};
pub use validation::{Roster, validate};
