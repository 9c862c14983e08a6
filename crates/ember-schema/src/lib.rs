//! Ember Schema - Behavior field declarations
//!
//! Every behavior declares its fields up front as a name and a `FieldKind`.
//! Scene text is coerced into a field according to that declared kind.

mod coerce;
mod field;

pub use coerce::{coerce, unquote, CoerceError};
pub use field::{FieldDecl, FieldKind, FieldValue};
