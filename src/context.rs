//! Generation context - describes where and in what variant to generate

use std::path::{Path, PathBuf};

/// Where a generator writes and which template tree it reads from.
///
/// Contexts are plain values. Nested generator groups derive their own context
/// with [`GenerationContext::scoped`] instead of mutating the parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationContext {
    output_root: PathBuf,
    project_type: String,
    template_path: PathBuf,
    reduced_template_path: PathBuf,
    template_anchor: String,
}

impl GenerationContext {
    /// Create a new generation context
    pub fn new(
        output_root: impl Into<PathBuf>,
        project_type: impl Into<String>,
        template_path: impl Into<PathBuf>,
        reduced_template_path: impl Into<PathBuf>,
        template_anchor: impl Into<String>,
    ) -> Self {
        Self {
            output_root: output_root.into(),
            project_type: project_type.into(),
            template_path: template_path.into(),
            reduced_template_path: reduced_template_path.into(),
            template_anchor: template_anchor.into(),
        }
    }

    /// Derive a context for a nested generator with a different project type
    /// and template anchor. Output root and search paths are shared.
    pub fn scoped(&self, project_type: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            project_type: project_type.into(),
            template_anchor: anchor.into(),
            ..self.clone()
        }
    }

    /// Derive a context that reads templates from another template tree
    pub fn with_template_paths(
        &self,
        template_path: impl Into<PathBuf>,
        reduced_template_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            template_path: template_path.into(),
            reduced_template_path: reduced_template_path.into(),
            ..self.clone()
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn project_type(&self) -> &str {
        &self.project_type
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    pub fn reduced_template_path(&self) -> &Path {
        &self.reduced_template_path
    }

    pub fn template_anchor(&self) -> &str {
        &self.template_anchor
    }

    /// Join a relative suffix onto the output root.
    ///
    /// All generator output paths are built through this function.
    pub fn resolved_output_path(&self, relative_suffix: impl AsRef<Path>) -> PathBuf {
        self.output_root.join(relative_suffix)
    }

    /// Template search paths in lookup order: primary first, reduced second
    pub fn template_search_paths(&self) -> [PathBuf; 2] {
        [
            self.template_path.join(&self.template_anchor),
            self.reduced_template_path.join(&self.template_anchor),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent() -> GenerationContext {
        GenerationContext::new("/tmp/out", "app", "variants/zuul", "base", "common")
    }

    #[test]
    fn test_scoped_overrides_type_and_anchor_only() {
        let parent = parent();
        let child = parent.scoped("zuul", "zuul");

        assert_eq!(child.project_type(), "zuul");
        assert_eq!(child.template_anchor(), "zuul");
        assert_eq!(child.output_root(), parent.output_root());
        assert_eq!(child.template_path(), parent.template_path());
        assert_eq!(child.reduced_template_path(), parent.reduced_template_path());

        // parent is untouched
        assert_eq!(parent.project_type(), "app");
        assert_eq!(parent.template_anchor(), "common");
    }

    #[test]
    fn test_with_template_paths() {
        let child = parent().with_template_paths("other", "other-base");
        assert_eq!(child.template_path(), Path::new("other"));
        assert_eq!(child.reduced_template_path(), Path::new("other-base"));
        assert_eq!(child.project_type(), "app");
    }

    #[test]
    fn test_resolved_output_path() {
        let ctx = parent();
        assert_eq!(
            ctx.resolved_output_path("orders-zuul/pom.xml"),
            PathBuf::from("/tmp/out/orders-zuul/pom.xml")
        );
    }

    #[test]
    fn test_template_search_paths_order() {
        let [primary, reduced] = parent().scoped("zuul", "zuul").template_search_paths();
        assert_eq!(primary, PathBuf::from("variants/zuul/zuul"));
        assert_eq!(reduced, PathBuf::from("base/zuul"));
    }
}
