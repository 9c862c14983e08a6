//! Field kinds, values and declarations

use ember_core::{Color, EmberError, Result, SpriteAnchor, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// The closed set of kinds a behavior field can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    I16,
    I32,
    I64,
    F32,
    F64,
    String,
    Char,
    Bool,
    Vec2,
    Vec3,
    Anchor,
    Color,
}

impl FieldKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::I16 => "i16",
            FieldKind::I32 => "i32",
            FieldKind::I64 => "i64",
            FieldKind::F32 => "f32",
            FieldKind::F64 => "f64",
            FieldKind::String => "string",
            FieldKind::Char => "char",
            FieldKind::Bool => "bool",
            FieldKind::Vec2 => "vec2",
            FieldKind::Vec3 => "vec3",
            FieldKind::Anchor => "anchor",
            FieldKind::Color => "color",
        }
    }
}

/// A field value of one of the supported kinds
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    String(String),
    Char(char),
    Bool(bool),
    Vec2(Vec2),
    Vec3(Vec3),
    Anchor(SpriteAnchor),
    Color(Color),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::I16(_) => FieldKind::I16,
            FieldValue::I32(_) => FieldKind::I32,
            FieldValue::I64(_) => FieldKind::I64,
            FieldValue::F32(_) => FieldKind::F32,
            FieldValue::F64(_) => FieldKind::F64,
            FieldValue::String(_) => FieldKind::String,
            FieldValue::Char(_) => FieldKind::Char,
            FieldValue::Bool(_) => FieldKind::Bool,
            FieldValue::Vec2(_) => FieldKind::Vec2,
            FieldValue::Vec3(_) => FieldKind::Vec3,
            FieldValue::Anchor(_) => FieldKind::Anchor,
            FieldValue::Color(_) => FieldKind::Color,
        }
    }

    /// Render the value the way it is written in a scene file.
    ///
    /// Fails for strings containing a newline or ending in a backslash, and
    /// for characters that the tokenizer treats as structure.
    pub fn to_literal(&self) -> Result<String> {
        let literal = match self {
            FieldValue::I16(v) => v.to_string(),
            FieldValue::I32(v) => v.to_string(),
            FieldValue::I64(v) => v.to_string(),
            FieldValue::F32(v) => v.to_string(),
            FieldValue::F64(v) => v.to_string(),
            FieldValue::String(s) => {
                if s.contains('\n') || s.ends_with('\\') {
                    return Err(EmberError::Unrepresentable(format!("string {:?}", s)));
                }
                format!("\"{}\"", s.replace('"', "\\\""))
            }
            FieldValue::Char(c) => {
                if c.is_whitespace() || matches!(c, '#' | ':' | '{' | '}' | '(' | '"') {
                    return Err(EmberError::Unrepresentable(format!("char {:?}", c)));
                }
                c.to_string()
            }
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Vec2(v) => v.to_string(),
            FieldValue::Vec3(v) => v.to_string(),
            FieldValue::Anchor(a) => a.name().to_string(),
            FieldValue::Color(c) => c.to_literal(),
        };
        Ok(literal)
    }
}

macro_rules! field_value_conversions {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    FieldValue::$variant(value)
                }
            }

            impl TryFrom<FieldValue> for $ty {
                type Error = EmberError;

                fn try_from(value: FieldValue) -> Result<Self> {
                    match value {
                        FieldValue::$variant(v) => Ok(v),
                        other => Err(EmberError::InvalidFieldType {
                            expected: FieldKind::$variant.type_name().to_string(),
                            got: other.kind().type_name().to_string(),
                        }),
                    }
                }
            }
        )*
    };
}

field_value_conversions! {
    I16 => i16,
    I32 => i32,
    I64 => i64,
    F32 => f32,
    F64 => f64,
    String => String,
    Char => char,
    Bool => bool,
    Vec2 => Vec2,
    Vec3 => Vec3,
    Anchor => SpriteAnchor,
    Color => Color,
}

/// Declaration of a single behavior field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDecl {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
}

impl FieldDecl {
    pub const fn new(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kind() {
        assert_eq!(FieldValue::from(2.5f32).kind(), FieldKind::F32);
        assert_eq!(FieldValue::from(Color::RED).kind(), FieldKind::Color);
        assert_eq!(FieldValue::from(String::from("a")).kind(), FieldKind::String);
    }

    #[test]
    fn test_try_from_mismatch() {
        let err = f32::try_from(FieldValue::Bool(true)).unwrap_err();
        match err {
            EmberError::InvalidFieldType { expected, got } => {
                assert_eq!(expected, "f32");
                assert_eq!(got, "bool");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(i64::try_from(FieldValue::I64(-9)).unwrap(), -9);
    }

    #[test]
    fn test_string_literal_escapes_quotes() {
        let value = FieldValue::String("say \"hi\"".to_string());
        assert_eq!(value.to_literal().unwrap(), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_unrepresentable_values() {
        assert!(FieldValue::String("two\nlines".into()).to_literal().is_err());
        assert!(FieldValue::String("trailing\\".into()).to_literal().is_err());
        assert!(FieldValue::Char(' ').to_literal().is_err());
        assert!(FieldValue::Char('#').to_literal().is_err());
        assert!(FieldValue::Char(':').to_literal().is_err());
        assert_eq!(FieldValue::Char('x').to_literal().unwrap(), "x");
    }

    #[test]
    fn test_scalar_literals() {
        assert_eq!(FieldValue::F32(2.5).to_literal().unwrap(), "2.5");
        assert_eq!(FieldValue::I16(-7).to_literal().unwrap(), "-7");
        assert_eq!(FieldValue::Bool(false).to_literal().unwrap(), "false");
        assert_eq!(
            FieldValue::Anchor(SpriteAnchor::MiddleLeft).to_literal().unwrap(),
            "MiddleLeft"
        );
        assert_eq!(
            FieldValue::Vec3(Vec3::new(0.0, 0.0, 1.0)).to_literal().unwrap(),
            "(0, 0, 1)"
        );
    }
}
