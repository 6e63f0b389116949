//! Template store backed by templates embedded at compile time
//!
//! Every file under the crate's `templates/` directory is compiled into the
//! binary, so `cloudgen` works right after `cargo install` without a separate
//! template checkout.

use async_trait::async_trait;
use rust_embed::RustEmbed;
use std::path::{Path, PathBuf};

use super::store::{template_key, validate_name};
use crate::templates::{TemplateError, TemplateStore};

/// Container for all templates embedded at compile time
#[derive(RustEmbed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

/// Template store over the embedded `templates/` tree
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplateStore;

impl EmbeddedTemplateStore {
    pub fn new() -> Self {
        Self
    }

    /// All embedded template keys, sorted
    pub fn list(&self) -> Vec<String> {
        let mut keys: Vec<String> = EmbeddedTemplates::iter().map(|p| p.into_owned()).collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl TemplateStore for EmbeddedTemplateStore {
    async fn find(&self, search_path: &Path, name: &str) -> Result<Option<String>, TemplateError> {
        validate_name(name)?;
        let key = template_key(search_path, name);

        let Some(file) = EmbeddedTemplates::get(&key) else {
            return Ok(None);
        };
        String::from_utf8(file.data.into_owned())
            .map(Some)
            .map_err(|_| TemplateError::InvalidEncoding(PathBuf::from(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embedded_common_templates_present() {
        let store = EmbeddedTemplateStore::new();
        for name in [
            "logback.xml.template",
            "pom.xml.template",
            "Application.java.template",
            "gitignore.template",
        ] {
            let found = store.find(Path::new("base/common"), name).await.unwrap();
            assert!(found.is_some(), "missing embedded template {name}");
        }
    }

    #[tokio::test]
    async fn test_embedded_zuul_filter_template_present() {
        let store = EmbeddedTemplateStore::new();
        let body = store
            .find(Path::new("base/zuul"), "ZuulFilter.java.template")
            .await
            .unwrap()
            .expect("zuul filter template");
        assert!(body.contains("filterType"));
    }

    #[test]
    fn test_list_is_sorted() {
        let keys = EmbeddedTemplateStore::new().list();
        assert!(!keys.is_empty());
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
