//! Service dispatch error types

use crate::generation::GenerationError;
use crate::properties::PropertyError;
use crate::services::ServerKind;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The discriminator holds a value no server kind answers to
    #[error("Unknown server type '{value}' for '{key}' (expected one of: {expected})")]
    UnknownServer {
        key: String,
        value: String,
        expected: String,
    },

    #[error("No service registered for server type {0}")]
    NotRegistered(ServerKind),

    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Internal error: {0}")]
    InternalError(String),
}
