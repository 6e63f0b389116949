//! Spring Cloud Config server

use crate::context::GenerationContext;
use crate::generation::Generator;
use crate::services::ScaffoldService;
use crate::services::ServerKind;
use crate::services::handlers::common::{
    Annotation, ApplicationClassGenerator, ApplicationTestsGenerator, ApplicationYmlGenerator,
    Dependency, GitIgnoreGenerator, LogbackXmlGenerator, PomXmlGenerator,
};

pub struct ConfigServerService;

impl ConfigServerService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConfigServerService {
    fn default() -> Self {
        Self::new()
    }
}

impl ScaffoldService for ConfigServerService {
    fn kind(&self) -> ServerKind {
        ServerKind::Config
    }

    fn generators(&self, context: &GenerationContext) -> Vec<Box<dyn Generator>> {
        vec![
            Box::new(ApplicationClassGenerator::new(
                context,
                vec![Annotation::new(
                    "EnableConfigServer",
                    "org.springframework.cloud.config.server.EnableConfigServer",
                )],
                true,
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
                vec![Dependency::spring_cloud("spring-cloud-config-server")],
                true,
            )),
        ]
    }
}
