//! Error types for Ember

use thiserror::Error;

/// The main error type for Ember operations
#[derive(Debug, Error)]
pub enum EmberError {
    #[error("Cannot add more than one [{behavior}] behavior to object '{object}'")]
    DuplicateBehavior { behavior: String, object: String },

    #[error("Behavior {behavior} has no field named '{field}'")]
    FieldNotFound { behavior: String, field: String },

    #[error("Invalid field type: expected {expected}, got {got}")]
    InvalidFieldType { expected: String, got: String },

    #[error("Scene not found: {0}")]
    SceneNotFound(String),

    #[error("Scene error: {0}")]
    SceneError(String),

    #[error("Cannot write {0} in scene text")]
    Unrepresentable(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Ember operations
pub type Result<T> = std::result::Result<T, EmberError>;

impl From<toml::de::Error> for EmberError {
    fn from(err: toml::de::Error) -> Self {
        EmberError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for EmberError {
    fn from(err: toml::ser::Error) -> Self {
        EmberError::TomlSerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_into(out: &mut dyn std::fmt::Write) -> Result<()> {
        write!(out, "scale: 1")?;
        Ok(())
    }

    struct Full;

    impl std::fmt::Write for Full {
        fn write_str(&mut self, _s: &str) -> std::fmt::Result {
            Err(std::fmt::Error)
        }
    }

    #[test]
    fn test_fmt_error_propagates() {
        let mut out = String::new();
        write_into(&mut out).unwrap();
        assert_eq!(out, "scale: 1");

        assert!(matches!(
            write_into(&mut Full),
            Err(EmberError::FormatError(_))
        ));
    }
}
