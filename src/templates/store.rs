//! Template store port and two-tier template resolution

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::context::GenerationContext;
use crate::templates::TemplateError;

/// Read-only hierarchical namespace of template bodies
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Look up `name` under `search_path`. `Ok(None)` means "not here".
    async fn find(&self, search_path: &Path, name: &str) -> Result<Option<String>, TemplateError>;
}

/// A template body together with where it was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    pub name: String,
    pub origin: PathBuf,
    pub content: String,
}

/// Resolve a template for a context: primary search path first, then the
/// reduced path. A template in the primary path always wins.
pub async fn resolve_template(
    store: &dyn TemplateStore,
    context: &GenerationContext,
    name: &str,
) -> Result<ResolvedTemplate, TemplateError> {
    validate_name(name)?;

    let search_paths = context.template_search_paths();
    for search_path in &search_paths {
        if let Some(content) = store.find(search_path, name).await? {
            debug!(template = %name, origin = %search_path.display(), "Resolved template");
            return Ok(ResolvedTemplate {
                name: name.to_string(),
                origin: search_path.clone(),
                content,
            });
        }
    }

    Err(TemplateError::not_found(name, search_paths.to_vec()))
}

/// Reject names that are empty, absolute, or climb out of the search path
pub(crate) fn validate_name(name: &str) -> Result<(), TemplateError> {
    let path = Path::new(name);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if name.trim().is_empty() || escapes {
        return Err(TemplateError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Join a search path and a name into a `/`-separated store key
pub(crate) fn template_key(search_path: &Path, name: &str) -> String {
    search_path
        .join(name)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
