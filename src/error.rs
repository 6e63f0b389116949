//! Request-level error type
//!
//! Every failure leaving the transport is a [`ScaffoldError`]. Callers that
//! need a stable classification use [`ScaffoldError::kind`].

use serde::Serialize;
use std::fmt::Formatter;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::generation::GenerationError;
use crate::packaging::PackagingError;
use crate::properties::PropertyError;
use crate::services::ServiceError;
use crate::templates::TemplateError;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Packaging(#[from] PackagingError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Invalid {key} '{value}': must be a single directory name")]
    InvalidDirectoryName { key: &'static str, value: String },

    #[error("Failed to prepare output directory {path}: {source}")]
    OutputRoot {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure classification reported alongside the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required property is absent or blank
    MissingConfig,
    /// A typed property could not be read as its type
    TypeCoercion,
    /// Property text or values are malformed in some other way
    InvalidProperties,
    /// No search path holds a template
    TemplateNotFound,
    /// A template failed to render
    Render,
    /// Writing generated output failed
    Write,
    /// Two generators claimed the same output file
    DuplicateOutput,
    /// The server discriminator matched nothing
    UnknownServer,
    /// Archive assembly failed
    Packaging,
    /// Configuration, catalog or template setup is broken
    Configuration,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingConfig => "missing_config",
            ErrorKind::TypeCoercion => "type_coercion",
            ErrorKind::InvalidProperties => "invalid_properties",
            ErrorKind::TemplateNotFound => "template_not_found",
            ErrorKind::Render => "render",
            ErrorKind::Write => "write",
            ErrorKind::DuplicateOutput => "duplicate_output",
            ErrorKind::UnknownServer => "unknown_server",
            ErrorKind::Packaging => "packaging",
            ErrorKind::Configuration => "configuration",
        }
    }

    /// Whether the request itself was at fault, as opposed to the deployment
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::MissingConfig
                | ErrorKind::TypeCoercion
                | ErrorKind::InvalidProperties
                | ErrorKind::UnknownServer
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ScaffoldError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScaffoldError::Property(e) => property_kind(e),
            ScaffoldError::Service(e) => service_kind(e),
            ScaffoldError::Packaging(_) => ErrorKind::Packaging,
            ScaffoldError::OutputRoot { .. } => ErrorKind::Write,
            ScaffoldError::InvalidDirectoryName { .. } => ErrorKind::InvalidProperties,
            ScaffoldError::Config(_) | ScaffoldError::Catalog(_) => ErrorKind::Configuration,
        }
    }
}

fn property_kind(err: &PropertyError) -> ErrorKind {
    match err {
        PropertyError::Missing(_) => ErrorKind::MissingConfig,
        PropertyError::TypeCoercion { .. } => ErrorKind::TypeCoercion,
        PropertyError::Parse { .. } => ErrorKind::InvalidProperties,
    }
}

fn service_kind(err: &ServiceError) -> ErrorKind {
    match err {
        ServiceError::UnknownServer { .. } => ErrorKind::UnknownServer,
        ServiceError::NotRegistered(_) | ServiceError::InternalError(_) => {
            ErrorKind::Configuration
        }
        ServiceError::Property(e) => property_kind(e),
        ServiceError::Generation(e) => generation_kind(e),
    }
}

fn generation_kind(err: &GenerationError) -> ErrorKind {
    match err {
        GenerationError::Property(e) => property_kind(e),
        GenerationError::Template(TemplateError::NotFound { .. }) => ErrorKind::TemplateNotFound,
        GenerationError::Template(_) => ErrorKind::Configuration,
        GenerationError::Render { .. } | GenerationError::Serialization(_) => ErrorKind::Render,
        GenerationError::Write { .. } => ErrorKind::Write,
        GenerationError::DuplicateOutput { .. } => ErrorKind::DuplicateOutput,
        GenerationError::InvalidPackage(_)
        | GenerationError::InvalidProjectName(_)
        | GenerationError::OutsideOutputRoot { .. } => ErrorKind::InvalidProperties,
    }
}
