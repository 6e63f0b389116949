//! Error types for the generation domain

use std::path::PathBuf;
use thiserror::Error;

use crate::properties::PropertyError;
use crate::templates::TemplateError;

/// Errors that can occur while running generators
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Template syntax is invalid or references a missing data-model field.
    /// Only the failing generator is aborted.
    #[error("Failed to render '{template}' for generator {generator}: {message}")]
    Render {
        generator: String,
        template: String,
        message: String,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two generators in one run resolved to the same output file
    #[error("Output path {path} claimed by {first} is also claimed by {second}")]
    DuplicateOutput {
        path: PathBuf,
        first: String,
        second: String,
    },

    #[error("Invalid projectName '{0}': must be a single directory name")]
    InvalidProjectName(String),

    /// A generator resolved an output file outside the context's output root
    #[error("Generator {generator} would write {path} outside the output root")]
    OutsideOutputRoot { generator: String, path: PathBuf },

    #[error("Invalid Java package '{0}'")]
    InvalidPackage(String),

    #[error("Data model serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GenerationError {
    /// Whether the error only aborts the generator that raised it
    pub fn is_generator_local(&self) -> bool {
        matches!(self, GenerationError::Render { .. })
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
