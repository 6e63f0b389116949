//! Service entry interface

use async_trait::async_trait;
use tracing::info;

use crate::context::GenerationContext;
use crate::generation::{GenerationReport, Generator, GeneratorRunner};
use crate::properties::{PROJECT_NAME, Properties};
use crate::services::{ServerKind, ServiceError};
use crate::templates::TemplateStore;

/// A group of generators scaffolding one kind of server
#[async_trait]
pub trait ScaffoldService: Send + Sync {
    /// The server kind this service answers to
    fn kind(&self) -> ServerKind;

    /// Properties that must be present and non-blank before anything is written
    fn required_properties(&self) -> &'static [&'static str] {
        &[PROJECT_NAME]
    }

    /// Generators in execution order, bound to `context`
    fn generators(&self, context: &GenerationContext) -> Vec<Box<dyn Generator>>;

    /// Fails with the first required property that is absent or blank
    fn validate(&self, properties: &Properties) -> Result<(), ServiceError> {
        for key in self.required_properties() {
            properties.get_string(key)?;
        }
        Ok(())
    }

    /// Validate, then run every generator against `context`
    async fn generate(
        &self,
        store: &dyn TemplateStore,
        context: &GenerationContext,
        properties: &Properties,
    ) -> Result<GenerationReport, ServiceError> {
        self.validate(properties)?;

        let generators = self.generators(context);
        info!(
            server = %self.kind(),
            generators = generators.len(),
            output_root = %context.output_root().display(),
            "Running service generators"
        );

        let report = GeneratorRunner::new(store)
            .run_all(&generators, properties)
            .await?;
        Ok(report)
    }
}
