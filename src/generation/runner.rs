//! Executes generators: resolve, render, write

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, warn};

use crate::generation::{GenerationError, Generator};
use crate::properties::Properties;
use crate::templates::{TemplateStore, renderer, resolve_template};

/// A generator that failed without aborting the run
#[derive(Debug)]
pub struct GeneratorFailure {
    pub generator: String,
    pub error: GenerationError,
}

/// Outcome of one generation run
#[derive(Debug, Default)]
pub struct GenerationReport {
    written: Vec<PathBuf>,
    failures: Vec<GeneratorFailure>,
    claimed: HashMap<PathBuf, String>,
}

impl GenerationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files written, in generator order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Generators that failed with a generator-local error
    pub fn failures(&self) -> &[GeneratorFailure] {
        &self.failures
    }

    /// True when every generator produced its file
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_failures(self) -> Vec<GeneratorFailure> {
        self.failures
    }

    /// Written files relative to `root`, with `/` separators. Paths that do not
    /// stay under `root` are left out.
    pub fn relative_paths(&self, root: &Path) -> Vec<String> {
        self.written
            .iter()
            .filter_map(|p| relative_to(p, root))
            .map(|p| {
                p.components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .collect()
    }

    /// Reserve an output path for a generator; a path can be claimed once per run
    fn claim(&mut self, path: &Path, generator: &str) -> Result<(), GenerationError> {
        if let Some(first) = self.claimed.get(path) {
            return Err(GenerationError::DuplicateOutput {
                path: path.to_path_buf(),
                first: first.clone(),
                second: generator.to_string(),
            });
        }
        self.claimed.insert(path.to_path_buf(), generator.to_string());
        Ok(())
    }
}

/// Runs generators against a template store
pub struct GeneratorRunner<'a> {
    store: &'a dyn TemplateStore,
}

impl<'a> GeneratorRunner<'a> {
    pub fn new(store: &'a dyn TemplateStore) -> Self {
        Self { store }
    }

    /// Run a single generator and record its output in `report`.
    pub async fn run(
        &self,
        generator: &dyn Generator,
        properties: &Properties,
        report: &mut GenerationReport,
    ) -> Result<PathBuf, GenerationError> {
        let template =
            resolve_template(self.store, generator.context(), generator.template_name()).await?;
        let path = generator.output_file(properties)?;
        if relative_to(&path, generator.context().output_root()).is_none() {
            return Err(GenerationError::OutsideOutputRoot {
                generator: generator.name().to_string(),
                path,
            });
        }
        report.claim(&path, generator.name())?;

        let model = generator.data_model(properties)?;
        let content =
            renderer::render(&template, &model).map_err(|e| GenerationError::Render {
                generator: generator.name().to_string(),
                template: template.name.clone(),
                message: renderer::describe_error(&e),
            })?;

        write_file(&path, &content).await?;
        debug!(
            generator = generator.name(),
            template = %template.origin.join(&template.name).display(),
            path = %path.display(),
            "Generated file"
        );
        report.written.push(path.clone());
        Ok(path)
    }

    /// Run generators in order.
    ///
    /// Render failures are recorded and the remaining generators still run.
    /// Any other failure stops the run and is returned.
    pub async fn run_all(
        &self,
        generators: &[Box<dyn Generator>],
        properties: &Properties,
    ) -> Result<GenerationReport, GenerationError> {
        let mut report = GenerationReport::new();

        for generator in generators {
            match self.run(generator.as_ref(), properties, &mut report).await {
                Ok(_) => {}
                Err(e) if e.is_generator_local() => {
                    warn!(generator = generator.name(), error = %e, "Generator failed, continuing");
                    report.failures.push(GeneratorFailure {
                        generator: generator.name().to_string(),
                        error: e,
                    });
                }
                Err(e) => {
                    error!(generator = generator.name(), error = %e, "Generator failed, aborting run");
                    return Err(e);
                }
            }
        }

        Ok(report)
    }
}

/// `path` relative to `root`, when it is made only of plain names below it
fn relative_to<'p>(path: &'p Path, root: &Path) -> Option<&'p Path> {
    let relative = path.strip_prefix(root).ok()?;
    let mut components = relative.components().peekable();
    components.peek()?;
    components
        .all(|c| matches!(c, Component::Normal(_)))
        .then_some(relative)
}

/// Write a fully rendered file. The handle is dropped before returning on
/// every path, and nothing is opened until the content is complete.
async fn write_file(path: &Path, content: &str) -> Result<(), GenerationError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| GenerationError::write(parent, e))?;
    }

    let mut file = fs::File::create(path)
        .await
        .map_err(|e| GenerationError::write(path, e))?;
    file.write_all(content.as_bytes())
        .await
        .map_err(|e| GenerationError::write(path, e))?;
    file.flush()
        .await
        .map_err(|e| GenerationError::write(path, e))?;

    Ok(())
}
