//! Output layout conventions shared by generators
//!
//! Generators compose these helpers instead of inheriting path logic:
//! every generated project lives in `<projectName>-<projectType>/` under the
//! context's output root, resources go to `src/main/resources`, and Java
//! sources map their dotted package onto nested directories.

use std::path::{Path, PathBuf};

use crate::context::GenerationContext;
use crate::generation::naming::{is_directory_name, is_valid_package, to_package_segment};
use crate::generation::{DataModel, GenerationError};
use crate::properties::{BASE_PACKAGE, PROJECT_NAME, Properties};

pub const MAIN_JAVA_DIR: &str = "src/main/java";
pub const TEST_JAVA_DIR: &str = "src/test/java";
pub const MAIN_RESOURCES_DIR: &str = "src/main/resources";

/// Template model key for the Java package
pub const PACKAGE_KEY: &str = "package";

/// `<projectName>-<projectType>`, also used as the service name
pub fn project_dir_name(
    context: &GenerationContext,
    properties: &Properties,
) -> Result<String, GenerationError> {
    let project_name = properties.get_string(PROJECT_NAME)?;
    if !is_directory_name(project_name) {
        return Err(GenerationError::InvalidProjectName(project_name.to_string()));
    }
    Ok(format!("{project_name}-{}", context.project_type()))
}

/// Root directory of the generated project
pub fn project_dir(
    context: &GenerationContext,
    properties: &Properties,
) -> Result<PathBuf, GenerationError> {
    Ok(context.resolved_output_path(project_dir_name(context, properties)?))
}

/// `src/main/resources` of the generated project
pub fn resources_dir(
    context: &GenerationContext,
    properties: &Properties,
) -> Result<PathBuf, GenerationError> {
    let relative = Path::new(&project_dir_name(context, properties)?).join(MAIN_RESOURCES_DIR);
    Ok(context.resolved_output_path(relative))
}

/// Base package: the `basePackage` property, or `com.<projectName>`
pub fn base_package(properties: &Properties) -> Result<String, GenerationError> {
    match properties.get(BASE_PACKAGE).map(str::trim).filter(|p| !p.is_empty()) {
        Some(package) if is_valid_package(package) => Ok(package.to_string()),
        Some(package) => Err(GenerationError::InvalidPackage(package.to_string())),
        None => {
            let project_name = properties.get_string(PROJECT_NAME)?;
            Ok(format!("com.{}", to_package_segment(project_name)))
        }
    }
}

/// `<basePackage>.<projectType>`
pub fn service_package(
    context: &GenerationContext,
    properties: &Properties,
) -> Result<String, GenerationError> {
    Ok(format!(
        "{}.{}",
        base_package(properties)?,
        to_package_segment(context.project_type())
    ))
}

/// `a.b.c` -> `a/b/c`
pub fn package_to_path(package: &str) -> PathBuf {
    package.split('.').filter(|s| !s.is_empty()).collect()
}

/// Which Java source root a class belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSet {
    Main,
    Test,
}

impl SourceSet {
    pub fn root(&self) -> &'static str {
        match self {
            SourceSet::Main => MAIN_JAVA_DIR,
            SourceSet::Test => TEST_JAVA_DIR,
        }
    }
}

/// A Java class to generate: package, simple name and source set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaClass {
    pub package: String,
    pub class_name: String,
    pub source_set: SourceSet,
}

impl JavaClass {
    pub fn main(package: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            class_name: class_name.into(),
            source_set: SourceSet::Main,
        }
    }

    pub fn test(package: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            source_set: SourceSet::Test,
            ..Self::main(package, class_name)
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.java", self.class_name)
    }

    /// `<project>/src/main/java/<package path>`
    pub fn output_dir(
        &self,
        context: &GenerationContext,
        properties: &Properties,
    ) -> Result<PathBuf, GenerationError> {
        let relative = Path::new(&project_dir_name(context, properties)?)
            .join(self.source_set.root())
            .join(package_to_path(&self.package));
        Ok(context.resolved_output_path(relative))
    }

    /// Model entries every Java class template needs
    pub fn data_model(&self) -> DataModel {
        DataModel::new()
            .with(PACKAGE_KEY, self.package.clone())
            .with("className", self.class_name.clone())
    }
}
