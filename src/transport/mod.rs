//! Transport - the boundary between callers and the generation core
//!
//! A request is a property blob. The transport parses it, picks the template
//! variant from `applicationType`, generates into a fresh per-request output
//! root, packages that root and hands back bytes (optionally wrapped with
//! download headers). Nothing mutable is shared between requests.

pub mod response;

pub use response::*;

use std::sync::Arc;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::catalog::{ConfigGroup, MetadataCatalog};
use crate::config::ScaffoldConfig;
use crate::context::GenerationContext;
use crate::error::ScaffoldError;
use crate::generation::naming::is_directory_name;
use crate::packaging::{canonical_file_name, package_and_download};
use crate::properties::{APPLICATION_TYPE, PROJECT_NAME, Properties};
use crate::services::{Dispatcher, ServiceRegistry};

pub struct ScaffoldTransport {
    config: ScaffoldConfig,
    dispatcher: Dispatcher,
    catalog: MetadataCatalog,
}

impl ScaffoldTransport {
    /// Transport with the built-in services, catalog and the configured templates
    pub fn new(config: ScaffoldConfig) -> Result<Self, ScaffoldError> {
        let store = config.template_store()?;
        let registry = Arc::new(ServiceRegistry::with_defaults()?);
        let catalog = MetadataCatalog::builtin()?;
        Ok(Self::with_parts(
            config,
            Dispatcher::new(registry, store),
            catalog,
        ))
    }

    pub fn with_parts(config: ScaffoldConfig, dispatcher: Dispatcher, catalog: MetadataCatalog) -> Self {
        Self {
            config,
            dispatcher,
            catalog,
        }
    }

    pub fn config(&self) -> &ScaffoldConfig {
        &self.config
    }

    /// Parse an inbound property blob
    pub fn parse_properties(text: &str) -> Result<Properties, ScaffoldError> {
        Ok(Properties::parse(text)?)
    }

    /// Name the archive for `properties` would be downloaded under
    pub fn canonical_file_name(&self, properties: &Properties) -> String {
        canonical_file_name(&self.config.generate_file_name, properties)
    }

    /// Configuration groups for clients building a request
    pub fn metadata(&self) -> &[ConfigGroup] {
        self.catalog.groups()
    }

    pub fn catalog(&self) -> &MetadataCatalog {
        &self.catalog
    }

    /// Raw archive bytes for a property blob
    pub async fn download_bytes(&self, text: &str) -> Result<Vec<u8>, ScaffoldError> {
        let properties = Self::parse_properties(text)?;
        Ok(self.generate(&properties).await?.bytes)
    }

    /// Archive bytes wrapped as an attachment with no-cache headers
    pub async fn download_response(&self, text: &str) -> Result<DownloadResponse, ScaffoldError> {
        let properties = Self::parse_properties(text)?;
        let archive = self.generate(&properties).await?;
        Ok(DownloadResponse::attachment(archive.file_name, archive.bytes))
    }

    /// Generate and package one request
    pub async fn generate(&self, properties: &Properties) -> Result<GeneratedArchive, ScaffoldError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("scaffold", request_id = %request_id);
        self.generate_request(request_id, properties)
            .instrument(span)
            .await
    }

    async fn generate_request(
        &self,
        request_id: Uuid,
        properties: &Properties,
    ) -> Result<GeneratedArchive, ScaffoldError> {
        let application_type = properties.get_string(APPLICATION_TYPE)?;
        validate_directory_name(APPLICATION_TYPE, application_type)?;
        // A missing projectName is reported by the service's own validation
        if let Ok(project_name) = properties.get_string(PROJECT_NAME) {
            validate_directory_name(PROJECT_NAME, project_name)?;
        }

        // Select before touching the filesystem so bad requests leave nothing behind
        self.dispatcher.select(properties)?;

        let generate_path = &self.config.generate_path;
        tokio::fs::create_dir_all(generate_path)
            .await
            .map_err(|source| ScaffoldError::OutputRoot {
                path: generate_path.clone(),
                source,
            })?;
        let output_root = tempfile::Builder::new()
            .prefix(&format!("cloudgen-{request_id}-"))
            .tempdir_in(generate_path)
            .map_err(|source| ScaffoldError::OutputRoot {
                path: generate_path.clone(),
                source,
            })?;

        let context = GenerationContext::new(
            output_root.path(),
            application_type,
            self.config.prefix_template_directory.join(application_type),
            self.config.reduced_template_directory.clone(),
            "",
        );
        info!(
            application_type,
            output_root = %output_root.path().display(),
            "Generating scaffold"
        );

        let report = self.dispatcher.dispatch(&context, properties).await?;
        for failure in report.failures() {
            warn!(generator = %failure.generator, error = %failure.error, "File left out of archive");
        }

        let files = report.relative_paths(output_root.path());
        let archive = package_and_download(
            output_root.path(),
            &self.config.generate_file_name,
            properties,
        )
        .await?;

        if self.config.keep_output {
            let kept = output_root.keep();
            info!(path = %kept.display(), "Kept output directory");
        } else if let Err(e) = output_root.close() {
            warn!(error = %e, "Failed to remove output directory");
        }

        info!(
            file_name = %archive.file_name,
            files = files.len(),
            bytes = archive.bytes.len(),
            "Scaffold packaged"
        );

        Ok(GeneratedArchive {
            file_name: archive.file_name,
            bytes: archive.bytes,
            files,
            failures: report.into_failures(),
        })
    }
}

/// `applicationType` names one directory below the template prefix and
/// `projectName` one directory below the output root
fn validate_directory_name(key: &'static str, value: &str) -> Result<(), ScaffoldError> {
    if is_directory_name(value) {
        Ok(())
    } else {
        Err(ScaffoldError::InvalidDirectoryName {
            key,
            value: value.to_string(),
        })
    }
}
