//! Error types for the template layer

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating or loading templates
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Neither the primary nor the reduced search path holds the template
    #[error("Template '{name}' not found (searched: {})", display_paths(.searched))]
    NotFound { name: String, searched: Vec<PathBuf> },

    /// Template name escapes the search path or is otherwise unusable
    #[error("Invalid template name: {0}")]
    InvalidName(String),

    /// Template body is not valid UTF-8
    #[error("Template at {0} is not valid UTF-8")]
    InvalidEncoding(PathBuf),

    /// IO error while reading a template
    #[error("IO error reading template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TemplateError {
    pub fn not_found<S: Into<String>>(name: S, searched: Vec<PathBuf>) -> Self {
        Self::NotFound {
            name: name.into(),
            searched,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
