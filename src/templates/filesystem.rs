//! Filesystem-based template store
//!
//! Serves template bodies from a directory tree, typically given with the
//! `--template-dir` CLI flag or the `template_dir` config setting.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::store::validate_name;
use crate::templates::{TemplateError, TemplateStore};

/// Template store rooted at a directory on disk
#[derive(Debug, Clone)]
pub struct FileSystemTemplateStore {
    root: PathBuf,
}

impl FileSystemTemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl TemplateStore for FileSystemTemplateStore {
    async fn find(&self, search_path: &Path, name: &str) -> Result<Option<String>, TemplateError> {
        validate_name(name)?;
        let path = self.root.join(search_path).join(name);

        match fs::read(&path).await {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| TemplateError::InvalidEncoding(path)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(TemplateError::Io { path, source }),
        }
    }
}
