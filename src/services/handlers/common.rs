//! Generators shared by every server kind
//!
//! Each server project gets an application class, a smoke test, an
//! `application.yml`, a `logback.xml`, a `.gitignore` and a `pom.xml`. The
//! service decides which annotations and dependencies go in; the layout comes
//! from [`crate::generation::layout`].

use serde::Serialize;
use std::path::PathBuf;

use crate::context::GenerationContext;
use crate::generation::layout::{self, JavaClass};
use crate::generation::naming::to_pascal_case;
use crate::generation::{DataModel, GenerationError, Generator};
use crate::properties::{PROJECT_NAME, Properties, PropertyError};

pub const SERVER_PORT: &str = "serverPort";
pub const REGISTER_WITH_EUREKA: &str = "registerWithEureka";
pub const EUREKA_URL: &str = "eurekaUrl";
pub const CONFIG_GIT_URI: &str = "configGitUri";
pub const SPRING_BOOT_VERSION: &str = "springBootVersion";
pub const SPRING_CLOUD_VERSION: &str = "springCloudVersion";
pub const JAVA_VERSION: &str = "javaVersion";

pub const DEFAULT_EUREKA_URL: &str = "http://localhost:8761/eureka/";
pub const DEFAULT_CONFIG_GIT_URI: &str = "https://github.com/spring-cloud-samples/config-repo";
pub const DEFAULT_SPRING_BOOT_VERSION: &str = "2.1.18.RELEASE";
pub const DEFAULT_SPRING_CLOUD_VERSION: &str = "Greenwich.SR6";
pub const DEFAULT_JAVA_VERSION: &str = "1.8";

/// Template anchor of the shared templates
pub const COMMON_ANCHOR: &str = "common";

/// A class-level annotation on the generated application class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub name: String,
    pub qualified_name: String,
}

impl Annotation {
    pub fn new(name: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualified_name: qualified_name.into(),
        }
    }

    pub fn discovery_client() -> Self {
        Self::new(
            "EnableDiscoveryClient",
            "org.springframework.cloud.client.discovery.EnableDiscoveryClient",
        )
    }
}

/// A Maven dependency managed by the Spring BOMs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
}

impl Dependency {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }

    pub fn spring_cloud(artifact_id: impl Into<String>) -> Self {
        Self::new("org.springframework.cloud", artifact_id)
    }

    pub fn eureka_client() -> Self {
        Self::spring_cloud("spring-cloud-starter-netflix-eureka-client")
    }
}

fn common_context(context: &GenerationContext) -> GenerationContext {
    context.scoped(context.project_type(), COMMON_ANCHOR)
}

fn service_name(context: &GenerationContext, properties: &Properties) -> Result<String, GenerationError> {
    layout::project_dir_name(context, properties)
}

/// Whether the generated server registers itself with Eureka
pub fn registers_with_eureka(properties: &Properties) -> Result<bool, GenerationError> {
    Ok(properties.get_bool_or(REGISTER_WITH_EUREKA, true)?)
}

/// `serverPort`, or the kind's default; must be a valid TCP port
pub fn server_port(properties: &Properties, default: i64) -> Result<i64, GenerationError> {
    let port = properties.get_int_or(SERVER_PORT, default)?;
    if !(1..=65535).contains(&port) {
        return Err(PropertyError::TypeCoercion {
            key: SERVER_PORT.to_string(),
            value: port.to_string(),
            expected: "port number (1-65535)",
        }
        .into());
    }
    Ok(port)
}

/// `<PascalCase(projectType)>Application`
pub fn application_class_name(context: &GenerationContext) -> String {
    format!("{}Application", to_pascal_case(context.project_type()))
}

/// Spring Boot entry point: `<Type>Application.java`
pub struct ApplicationClassGenerator {
    context: GenerationContext,
    annotations: Vec<Annotation>,
    discovery: bool,
}

impl ApplicationClassGenerator {
    /// `discovery` adds `@EnableDiscoveryClient` when the server registers with Eureka
    pub fn new(context: &GenerationContext, annotations: Vec<Annotation>, discovery: bool) -> Self {
        Self {
            context: common_context(context),
            annotations,
            discovery,
        }
    }

    fn java_class(&self, properties: &Properties) -> Result<JavaClass, GenerationError> {
        Ok(JavaClass::main(
            layout::service_package(&self.context, properties)?,
            application_class_name(&self.context),
        ))
    }
}

impl Generator for ApplicationClassGenerator {
    fn name(&self) -> &str {
        "application-class"
    }

    fn context(&self) -> &GenerationContext {
        &self.context
    }

    fn template_name(&self) -> &str {
        "Application.java.template"
    }

    fn file_name(&self, properties: &Properties) -> Result<String, GenerationError> {
        Ok(self.java_class(properties)?.file_name())
    }

    fn output_path(&self, properties: &Properties) -> Result<PathBuf, GenerationError> {
        self.java_class(properties)?.output_dir(&self.context, properties)
    }

    fn data_model(&self, properties: &Properties) -> Result<DataModel, GenerationError> {
        let mut annotations = self.annotations.clone();
        if self.discovery && registers_with_eureka(properties)? {
            annotations.push(Annotation::discovery_client());
        }

        let mut model = self.java_class(properties)?.data_model();
        model.insert("serviceName", service_name(&self.context, properties)?);
        model.insert_serialized("annotations", &annotations)?;
        Ok(model)
    }
}

/// Context-loads smoke test: `<Type>ApplicationTests.java`
pub struct ApplicationTestsGenerator {
    context: GenerationContext,
}

impl ApplicationTestsGenerator {
    pub fn new(context: &GenerationContext) -> Self {
        Self {
            context: common_context(context),
        }
    }

    fn java_class(&self, properties: &Properties) -> Result<JavaClass, GenerationError> {
        Ok(JavaClass::test(
            layout::service_package(&self.context, properties)?,
            format!("{}Tests", application_class_name(&self.context)),
        ))
    }
}

impl Generator for ApplicationTestsGenerator {
    fn name(&self) -> &str {
        "application-tests"
    }

    fn context(&self) -> &GenerationContext {
        &self.context
    }

    fn template_name(&self) -> &str {
        "ApplicationTests.java.template"
    }

    fn file_name(&self, properties: &Properties) -> Result<String, GenerationError> {
        Ok(self.java_class(properties)?.file_name())
    }

    fn output_path(&self, properties: &Properties) -> Result<PathBuf, GenerationError> {
        self.java_class(properties)?.output_dir(&self.context, properties)
    }

    fn data_model(&self, properties: &Properties) -> Result<DataModel, GenerationError> {
        Ok(self
            .java_class(properties)?
            .data_model()
            .with("applicationClass", application_class_name(&self.context)))
    }
}

/// `src/main/resources/application.yml`, read from the server's own anchor
pub struct ApplicationYmlGenerator {
    context: GenerationContext,
    default_port: i64,
}

impl ApplicationYmlGenerator {
    pub fn new(context: &GenerationContext, default_port: i64) -> Self {
        Self {
            context: context.clone(),
            default_port,
        }
    }
}

impl Generator for ApplicationYmlGenerator {
    fn name(&self) -> &str {
        "application-yml"
    }

    fn context(&self) -> &GenerationContext {
        &self.context
    }

    fn template_name(&self) -> &str {
        "application.yml.template"
    }

    fn file_name(&self, _properties: &Properties) -> Result<String, GenerationError> {
        Ok("application.yml".to_string())
    }

    fn output_path(&self, properties: &Properties) -> Result<PathBuf, GenerationError> {
        layout::resources_dir(&self.context, properties)
    }

    fn data_model(&self, properties: &Properties) -> Result<DataModel, GenerationError> {
        Ok(DataModel::new()
            .with("serviceName", service_name(&self.context, properties)?)
            .with("projectName", properties.get_string(PROJECT_NAME)?)
            .with("serverPort", server_port(properties, self.default_port)?)
            .with("registerWithEureka", registers_with_eureka(properties)?)
            .with(
                "eurekaUrl",
                properties.get_string_or(EUREKA_URL, DEFAULT_EUREKA_URL),
            )
            .with(
                "configGitUri",
                properties.get_string_or(CONFIG_GIT_URI, DEFAULT_CONFIG_GIT_URI),
            ))
    }
}

/// `src/main/resources/logback.xml`
pub struct LogbackXmlGenerator {
    context: GenerationContext,
}

impl LogbackXmlGenerator {
    pub fn new(context: &GenerationContext) -> Self {
        Self {
            context: common_context(context),
        }
    }
}

impl Generator for LogbackXmlGenerator {
    fn name(&self) -> &str {
        "logback-xml"
    }

    fn context(&self) -> &GenerationContext {
        &self.context
    }

    fn template_name(&self) -> &str {
        "logback.xml.template"
    }

    fn file_name(&self, _properties: &Properties) -> Result<String, GenerationError> {
        Ok("logback.xml".to_string())
    }

    fn output_path(&self, properties: &Properties) -> Result<PathBuf, GenerationError> {
        layout::resources_dir(&self.context, properties)
    }

    fn data_model(&self, properties: &Properties) -> Result<DataModel, GenerationError> {
        Ok(DataModel::new().with("serviceName", service_name(&self.context, properties)?))
    }
}

/// `.gitignore` at the project root
pub struct GitIgnoreGenerator {
    context: GenerationContext,
}

impl GitIgnoreGenerator {
    pub fn new(context: &GenerationContext) -> Self {
        Self {
            context: common_context(context),
        }
    }
}

impl Generator for GitIgnoreGenerator {
    fn name(&self) -> &str {
        "gitignore"
    }

    fn context(&self) -> &GenerationContext {
        &self.context
    }

    fn template_name(&self) -> &str {
        "gitignore.template"
    }

    fn file_name(&self, _properties: &Properties) -> Result<String, GenerationError> {
        Ok(".gitignore".to_string())
    }

    fn output_path(&self, properties: &Properties) -> Result<PathBuf, GenerationError> {
        layout::project_dir(&self.context, properties)
    }

    fn data_model(&self, properties: &Properties) -> Result<DataModel, GenerationError> {
        Ok(DataModel::new().with("serviceName", service_name(&self.context, properties)?))
    }
}

/// Maven build descriptor at the project root
pub struct PomXmlGenerator {
    context: GenerationContext,
    dependencies: Vec<Dependency>,
    discovery: bool,
}

impl PomXmlGenerator {
    /// `discovery` adds the Eureka client when the server registers with Eureka
    pub fn new(context: &GenerationContext, dependencies: Vec<Dependency>, discovery: bool) -> Self {
        Self {
            context: common_context(context),
            dependencies,
            discovery,
        }
    }
}

impl Generator for PomXmlGenerator {
    fn name(&self) -> &str {
        "pom-xml"
    }

    fn context(&self) -> &GenerationContext {
        &self.context
    }

    fn template_name(&self) -> &str {
        "pom.xml.template"
    }

    fn file_name(&self, _properties: &Properties) -> Result<String, GenerationError> {
        Ok("pom.xml".to_string())
    }

    fn output_path(&self, properties: &Properties) -> Result<PathBuf, GenerationError> {
        layout::project_dir(&self.context, properties)
    }

    fn data_model(&self, properties: &Properties) -> Result<DataModel, GenerationError> {
        let mut dependencies = self.dependencies.clone();
        if self.discovery && registers_with_eureka(properties)? {
            dependencies.push(Dependency::eureka_client());
        }

        let mut model = DataModel::new()
            .with("groupId", layout::base_package(properties)?)
            .with("artifactId", service_name(&self.context, properties)?)
            .with("projectName", properties.get_string(PROJECT_NAME)?)
            .with(
                "springBootVersion",
                properties.get_string_or(SPRING_BOOT_VERSION, DEFAULT_SPRING_BOOT_VERSION),
            )
            .with(
                "springCloudVersion",
                properties.get_string_or(SPRING_CLOUD_VERSION, DEFAULT_SPRING_CLOUD_VERSION),
            )
            .with(
                "javaVersion",
                properties.get_string_or(JAVA_VERSION, DEFAULT_JAVA_VERSION),
            );
        model.insert_serialized("dependencies", &dependencies)?;
        Ok(model)
    }
}
