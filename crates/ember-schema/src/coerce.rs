//! Coercion of raw scene text into typed field values

use crate::field::{FieldKind, FieldValue};
use ember_core::{literal, LiteralError, SpriteAnchor};
use thiserror::Error;

/// Why a piece of field text could not become a value of its declared kind
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoerceError {
    #[error("Unable to parse \"{text}\" as type {expected}")]
    Invalid { text: String, expected: &'static str },

    #[error("Unable to parse \"{text}\" as type {expected}: {source}")]
    Literal {
        text: String,
        expected: &'static str,
        source: LiteralError,
    },

    #[error("Value \"{text}\" for a string field must be wrapped in double quotes")]
    Unquoted { text: String },
}

impl CoerceError {
    /// The offending text as it appeared in the scene
    pub fn text(&self) -> &str {
        match self {
            CoerceError::Invalid { text, .. }
            | CoerceError::Literal { text, .. }
            | CoerceError::Unquoted { text } => text,
        }
    }
}

/// Strip one pair of surrounding double quotes, if present
pub fn unquote(raw: &str) -> Option<&str> {
    raw.strip_prefix('"')?.strip_suffix('"')
}

/// Convert trimmed field text into a value of `kind`.
///
/// Strings must be quoted, chars are exactly one character, booleans are
/// `true`/`false` in any case, anchors match a variant name exactly.
pub fn coerce(kind: FieldKind, raw: &str) -> Result<FieldValue, CoerceError> {
    let invalid = || CoerceError::Invalid {
        text: raw.to_string(),
        expected: kind.type_name(),
    };
    let literal_err = |source: LiteralError| CoerceError::Literal {
        text: raw.to_string(),
        expected: kind.type_name(),
        source,
    };

    match kind {
        FieldKind::I16 => raw.parse().map(FieldValue::I16).map_err(|_| invalid()),
        FieldKind::I32 => raw.parse().map(FieldValue::I32).map_err(|_| invalid()),
        FieldKind::I64 => raw.parse().map(FieldValue::I64).map_err(|_| invalid()),
        FieldKind::F32 => match raw.parse::<f32>() {
            Ok(v) if v.is_finite() => Ok(FieldValue::F32(v)),
            _ => Err(invalid()),
        },
        FieldKind::F64 => match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(FieldValue::F64(v)),
            _ => Err(invalid()),
        },
        FieldKind::String => unquote(raw)
            .map(|s| FieldValue::String(s.to_string()))
            .ok_or_else(|| CoerceError::Unquoted {
                text: raw.to_string(),
            }),
        FieldKind::Char => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(FieldValue::Char(c)),
                _ => Err(invalid()),
            }
        }
        FieldKind::Bool => {
            if raw.eq_ignore_ascii_case("true") {
                Ok(FieldValue::Bool(true))
            } else if raw.eq_ignore_ascii_case("false") {
                Ok(FieldValue::Bool(false))
            } else {
                Err(invalid())
            }
        }
        FieldKind::Vec2 => literal::parse_vec2(raw)
            .map(FieldValue::Vec2)
            .map_err(literal_err),
        FieldKind::Vec3 => literal::parse_vec3(raw)
            .map(FieldValue::Vec3)
            .map_err(literal_err),
        FieldKind::Color => literal::parse_color(raw)
            .map(FieldValue::Color)
            .map_err(literal_err),
        FieldKind::Anchor => raw
            .parse::<SpriteAnchor>()
            .map(FieldValue::Anchor)
            .map_err(|_| invalid()),
    }
}
