//! Error types for archive packaging

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackagingError {
    #[error("Output root {0} is not a directory")]
    MissingRoot(PathBuf),

    #[error("Failed to walk output directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("IO error packaging {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Packaging task failed: {0}")]
    Join(String),
}

impl PackagingError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
