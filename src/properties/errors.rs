//! Error types for the properties domain

use thiserror::Error;

/// Errors raised while parsing or reading request properties
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    /// A required key is absent or its value is blank
    #[error("Missing required property '{0}'")]
    Missing(String),

    /// A value could not be read as the requested type
    #[error("Property '{key}' has value '{value}' which is not a valid {expected}")]
    TypeCoercion {
        key: String,
        value: String,
        expected: &'static str,
    },

    /// The property text itself is malformed
    #[error("Invalid property text at line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl PropertyError {
    pub fn missing<S: Into<String>>(key: S) -> Self {
        Self::Missing(key.into())
    }

    pub fn parse<S: Into<String>>(line: usize, message: S) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
