//! Generator capability interface

use std::path::PathBuf;

use crate::context::GenerationContext;
use crate::generation::{DataModel, GenerationError};
use crate::properties::Properties;

/// One generated file: where it goes, which template renders it, and with
/// which data.
///
/// Implementations hold no state beyond their context, so every method is a
/// pure function of `(context, properties)`. Shared conventions (project
/// directory, resources directory, Java package paths) come from
/// [`crate::generation::layout`].
pub trait Generator: Send + Sync {
    /// Identifier used in logs and failure reports
    fn name(&self) -> &str;

    fn context(&self) -> &GenerationContext;

    /// Template looked up through the context's search paths
    fn template_name(&self) -> &str;

    /// Base name of the output file
    fn file_name(&self, properties: &Properties) -> Result<String, GenerationError>;

    /// Directory the file is written into
    fn output_path(&self, properties: &Properties) -> Result<PathBuf, GenerationError>;

    /// Values exposed to the template
    fn data_model(&self, properties: &Properties) -> Result<DataModel, GenerationError>;

    /// Full output file path
    fn output_file(&self, properties: &Properties) -> Result<PathBuf, GenerationError> {
        Ok(self.output_path(properties)?.join(self.file_name(properties)?))
    }
}
