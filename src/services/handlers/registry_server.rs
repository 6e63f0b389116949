//! Eureka registry server

use crate::context::GenerationContext;
use crate::generation::Generator;
use crate::services::ScaffoldService;
use crate::services::ServerKind;
use crate::services::handlers::common::{
    Annotation, ApplicationClassGenerator, ApplicationTestsGenerator, ApplicationYmlGenerator,
    Dependency, GitIgnoreGenerator, LogbackXmlGenerator, PomXmlGenerator,
};

pub struct RegistryServerService;

impl RegistryServerService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RegistryServerService {
    fn default() -> Self {
        Self::new()
    }
}

impl ScaffoldService for RegistryServerService {
    fn kind(&self) -> ServerKind {
        ServerKind::Registry
    }

    fn generators(&self, context: &GenerationContext) -> Vec<Box<dyn Generator>> {
        vec![
            Box::new(ApplicationClassGenerator::new(
                context,
                vec![Annotation::new(
                    "EnableEurekaServer",
                    "org.springframework.cloud.netflix.eureka.server.EnableEurekaServer",
                )],
                false,
            )),
            Box::new(ApplicationTestsGenerator::new(context)),
            Box::new(ApplicationYmlGenerator::new(
                context,
                self.kind().default_port(),
            )),
            Box::new(LogbackXmlGenerator::new(context)),
            Box::new(GitIgnoreGenerator::new(context)),
            Box::new(PomXmlGenerator::new(
                context,
                vec![Dependency::spring_cloud(
                    "spring-cloud-starter-netflix-eureka-server",
                )],
                false,
            )),
        ]
    }
}
