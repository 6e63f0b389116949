//! In-memory template store for tests and programmatic use

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

use super::store::{template_key, validate_name};
use crate::templates::{TemplateError, TemplateStore};

/// Template store holding bodies in a map keyed by `search/path/name`
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateStore {
    templates: HashMap<String, String>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template under a `/`-separated key such as `base/zuul/Filter.template`
    pub fn insert(&mut self, key: impl AsRef<Path>, content: impl Into<String>) {
        let key = key.as_ref();
        let normalized = match (key.parent(), key.file_name()) {
            (Some(parent), Some(name)) => template_key(parent, &name.to_string_lossy()),
            _ => key.to_string_lossy().into_owned(),
        };
        self.templates.insert(normalized, content.into());
    }

    pub fn with_template(mut self, key: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.insert(key, content);
        self
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[async_trait]
impl TemplateStore for InMemoryTemplateStore {
    async fn find(&self, search_path: &Path, name: &str) -> Result<Option<String>, TemplateError> {
        validate_name(name)?;
        Ok(self.templates.get(&template_key(search_path, name)).cloned())
    }
}
