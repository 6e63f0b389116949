//! Scaffolder configuration
//!
//! Read once at startup and passed explicitly to the transport. Every field
//! has a default, so an empty file (or no file at all) is a valid setup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::templates::{EmbeddedTemplateStore, FileSystemTemplateStore, TemplateStore};

/// Environment variable overriding [`ScaffoldConfig::template_dir`]
pub const TEMPLATE_DIR_ENV: &str = "CLOUDGEN_TEMPLATE_DIR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported config format for {0} (expected .yaml, .yml or .toml)")]
    UnsupportedFormat(PathBuf),

    #[error("Template directory not found: {0}")]
    InvalidTemplateDir(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Primary template directory prefix; the request's `applicationType` is appended
    pub prefix_template_directory: PathBuf,
    /// Fallback template directory
    pub reduced_template_directory: PathBuf,
    /// Base name of the produced archive
    pub generate_file_name: String,
    /// Parent of the per-request output directories
    pub generate_path: PathBuf,
    /// Filesystem template root; the embedded templates are used when unset
    pub template_dir: Option<PathBuf>,
    /// Keep per-request output directories after packaging
    pub keep_output: bool,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            prefix_template_directory: PathBuf::from("variants"),
            reduced_template_directory: PathBuf::from("base"),
            generate_file_name: "skeleton".to_string(),
            generate_path: default_generate_path(),
            template_dir: None,
            keep_output: false,
        }
    }
}

impl ScaffoldConfig {
    /// Load from a `.yaml`/`.yml` or `.toml` file
    pub async fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let config = match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content)?,
            Some("toml") => Self::from_toml_str(&content)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        debug!(path = %path.display(), "Loaded scaffold config");
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply [`TEMPLATE_DIR_ENV`] when it is set and non-empty
    pub fn with_env_overrides(self) -> Self {
        self.with_template_dir_override(std::env::var(TEMPLATE_DIR_ENV).ok())
    }

    fn with_template_dir_override(mut self, value: Option<String>) -> Self {
        if let Some(dir) = value.filter(|v| !v.trim().is_empty()) {
            self.template_dir = Some(PathBuf::from(dir));
        }
        self
    }

    /// Template store for this configuration
    pub fn template_store(&self) -> Result<Arc<dyn TemplateStore>, ConfigError> {
        match &self.template_dir {
            Some(dir) if dir.is_dir() => {
                debug!(template_dir = %dir.display(), "Using filesystem templates");
                Ok(Arc::new(FileSystemTemplateStore::new(dir.clone())))
            }
            Some(dir) => Err(ConfigError::InvalidTemplateDir(dir.clone())),
            None => {
                debug!("Using embedded templates");
                Ok(Arc::new(EmbeddedTemplateStore::new()))
            }
        }
    }
}

fn default_generate_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("cloudgen")
}
