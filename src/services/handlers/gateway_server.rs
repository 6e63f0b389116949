//! Zuul gateway server and its filter classes

use std::path::PathBuf;

use crate::context::GenerationContext;
use crate::generation::layout::{self, JavaClass};
use crate::generation::naming::to_pascal_case;
use crate::generation::{DataModel, GenerationError, Generator};
use crate::properties::Properties;
use crate::services::ScaffoldService;
use crate::services::ServerKind;
use crate::services::handlers::common::{
    Annotation, ApplicationClassGenerator, ApplicationTestsGenerator, ApplicationYmlGenerator,
    Dependency, GitIgnoreGenerator, LogbackXmlGenerator, PomXmlGenerator,
};

/// Template anchor of the filter templates
pub const FILTER_ANCHOR: &str = "zuul";

/// Sub-package the filters live in, below the service package
pub const FILTER_PACKAGE: &str = "filter";

/// Zuul filter lifecycle stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Pre,
    Route,
    Post,
    Error,
}

impl FilterKind {
    /// Filters in the order they are generated
    pub fn all() -> &'static [FilterKind] {
        &[
            FilterKind::Pre,
            FilterKind::Route,
            FilterKind::Post,
            FilterKind::Error,
        ]
    }

    /// Value returned by the generated `filterType()`
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Pre => "pre",
            FilterKind::Route => "route",
            FilterKind::Post => "post",
            FilterKind::Error => "error",
        }
    }

    /// `PreFilter`, `RouteFilter`, ...
    pub fn class_name(&self) -> String {
        format!("{}Filter", to_pascal_case(self.as_str()))
    }

    pub fn explanation(&self) -> &'static str {
        match self {
            FilterKind::Pre => "Invoked before the request is routed.",
            FilterKind::Route => {
                "Invoked while the request is being routed to the backend service."
            }
            FilterKind::Post => {
                "Invoked after routing; if an exception occurs before or during routing it is invoked after the error filter."
            }
            FilterKind::Error => "Invoked when an error occurs while handling the request.",
        }
    }
}

/// One `ZuulFilter` subclass in `<service package>.filter`
pub struct FilterClassGenerator {
    context: GenerationContext,
    kind: FilterKind,
    name: String,
}

impl FilterClassGenerator {
    pub fn new(context: &GenerationContext, kind: FilterKind) -> Self {
        Self {
            context: context.scoped(context.project_type(), FILTER_ANCHOR),
            kind,
            name: format!("{}-filter", kind.as_str()),
        }
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    fn java_class(&self, properties: &Properties) -> Result<JavaClass, GenerationError> {
        let package = format!(
            "{}.{FILTER_PACKAGE}",
            layout::service_package(&self.context, properties)?
        );
        Ok(JavaClass::main(package, self.kind.class_name()))
    }
}

impl Generator for FilterClassGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    fn context(&self) -> &GenerationContext {
        &self.context
    }

    fn template_name(&self) -> &str {
        "ZuulFilter.java.template"
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
            .with("filterType", self.kind.as_str())
            .with("explanation", self.kind.explanation()))
    }
}

pub struct GatewayServerService;

impl GatewayServerService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GatewayServerService {
    fn default() -> Self {
        Self::new()
    }
}

impl ScaffoldService for GatewayServerService {
    fn kind(&self) -> ServerKind {
        ServerKind::Gateway
    }

    fn generators(&self, context: &GenerationContext) -> Vec<Box<dyn Generator>> {
        let mut generators: Vec<Box<dyn Generator>> = vec![
            Box::new(ApplicationClassGenerator::new(
                context,
                vec![Annotation::new(
                    "EnableZuulProxy",
                    "org.springframework.cloud.netflix.zuul.EnableZuulProxy",
                )],
                true,
            )),
            Box::new(ApplicationTestsGenerator::new(context)),
        ];

        generators.extend(
            FilterKind::all()
                .iter()
                .map(|kind| Box::new(FilterClassGenerator::new(context, *kind)) as Box<dyn Generator>),
        );

        generators.push(Box::new(ApplicationYmlGenerator::new(
            context,
            self.kind().default_port(),
        )));
        generators.push(Box::new(LogbackXmlGenerator::new(context)));
        generators.push(Box::new(GitIgnoreGenerator::new(context)));
        generators.push(Box::new(PomXmlGenerator::new(
            context,
            vec![Dependency::spring_cloud("spring-cloud-starter-netflix-zuul")],
            true,
        )));
        generators
    }
}
