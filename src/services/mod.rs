//! Service domain module - server kinds, their generator groups and dispatch
//!
//! Each server kind the scaffolder knows is a [`ScaffoldService`] registered in
//! a [`ServiceRegistry`]. The [`Dispatcher`] reads the `sc-alone-radio`
//! property, picks exactly one service and runs its generators.

pub mod errors;
pub mod handlers;
pub mod registry;
pub mod traits;
pub mod types;

pub use errors::*;
pub use registry::*;
pub use traits::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::GenerationContext;
    use crate::generation::{GenerationError, Generator};
    use crate::properties::{Properties, PropertyError};
    use crate::templates::{EmbeddedTemplateStore, TemplateError};
    use std::str::FromStr;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn properties(pairs: &[(&str, &str)]) -> Properties {
        pairs.iter().copied().collect()
    }

    fn dispatcher(registry: ServiceRegistry) -> Dispatcher {
        Dispatcher::new(Arc::new(registry), Arc::new(EmbeddedTemplateStore::new()))
    }

    fn context(root: &TempDir) -> GenerationContext {
        GenerationContext::new(root.path(), "", "variants/none", "base", "")
    }

    fn file_count(root: &TempDir) -> usize {
        walkdir::WalkDir::new(root.path())
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .count()
    }

    #[test]
    fn test_server_kind_from_str() {
        assert_eq!(ServerKind::from_str("registry-server").unwrap(), ServerKind::Registry);
        assert_eq!(ServerKind::from_str("eureka-server").unwrap(), ServerKind::Registry);
        assert_eq!(ServerKind::from_str(" gateway-server ").unwrap(), ServerKind::Gateway);
        assert_eq!(ServerKind::from_str("zuul-server").unwrap(), ServerKind::Gateway);
        assert_eq!(ServerKind::from_str("config-server").unwrap(), ServerKind::Config);

        match ServerKind::from_str("Gateway-Server") {
            Err(ServiceError::UnknownServer { key, value, expected }) => {
                assert_eq!(key, SERVER_TYPE_KEY);
                assert_eq!(value, "Gateway-Server");
                assert_eq!(expected, "registry-server, gateway-server, config-server");
            }
            other => panic!("Expected UnknownServer, got {other:?}"),
        }
    }

    #[test]
    fn test_server_kind_properties() {
        assert_eq!(ServerKind::Gateway.project_type(), "zuul");
        assert_eq!(ServerKind::Registry.default_port(), 8761);
        assert_eq!(ServerKind::Config.to_string(), "config-server");
        assert_eq!(ServerKind::all().len(), 3);
    }

    #[test]
    fn test_registry_registration() {
        let registry = ServiceRegistry::new();
        assert!(!registry.is_registered(ServerKind::Gateway));

        registry
            .register(Arc::new(handlers::GatewayServerService::new()))
            .unwrap();

        assert!(registry.is_registered(ServerKind::Gateway));
        assert!(!registry.is_registered(ServerKind::Config));
        assert_eq!(
            registry.get(ServerKind::Gateway).map(|s| s.kind()),
            Some(ServerKind::Gateway)
        );
        assert!(registry.get(ServerKind::Config).is_none());
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = ServiceRegistry::with_defaults().unwrap();
        assert_eq!(
            registry.kinds(),
            vec![ServerKind::Registry, ServerKind::Gateway, ServerKind::Config]
        );
    }

    #[test]
    fn test_select_requires_discriminator() {
        let dispatcher = dispatcher(ServiceRegistry::with_defaults().unwrap());

        let err = dispatcher
            .select(&properties(&[("projectName", "orders")]))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ServiceError::Property(PropertyError::Missing(ref key)) if key == SERVER_TYPE_KEY
        ));
    }

    #[tokio::test]
    async fn test_dispatch_runs_selected_service_only() {
        let temp_dir = TempDir::new().unwrap();
        let dispatcher = dispatcher(ServiceRegistry::with_defaults().unwrap());

        let report = dispatcher
            .dispatch(
                &context(&temp_dir),
                &properties(&[("sc-alone-radio", "registry-server"), ("projectName", "orders")]),
            )
            .await
            .unwrap();

        assert!(report.is_complete());
        let written = report.relative_paths(temp_dir.path());
        assert_eq!(
            written,
            vec![
                "orders-eureka/src/main/java/com/orders/eureka/EurekaApplication.java",
                "orders-eureka/src/test/java/com/orders/eureka/EurekaApplicationTests.java",
                "orders-eureka/src/main/resources/application.yml",
                "orders-eureka/src/main/resources/logback.xml",
                "orders-eureka/.gitignore",
                "orders-eureka/pom.xml",
            ]
        );
        assert!(!temp_dir.path().join("orders-zuul").exists());
        assert!(!temp_dir.path().join("orders-config").exists());
    }

    #[tokio::test]
    async fn test_dispatch_unknown_server_fails_loudly() {
        let temp_dir = TempDir::new().unwrap();
        let dispatcher = dispatcher(ServiceRegistry::with_defaults().unwrap());

        let err = dispatcher
            .dispatch(
                &context(&temp_dir),
                &properties(&[("sc-alone-radio", "dubbo-server"), ("projectName", "orders")]),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::UnknownServer { .. }));
        assert_eq!(file_count(&temp_dir), 0);
    }

    #[tokio::test]
    async fn test_dispatch_unregistered_kind() {
        let temp_dir = TempDir::new().unwrap();
        let dispatcher = dispatcher(ServiceRegistry::new());

        let err = dispatcher
            .dispatch(
                &context(&temp_dir),
                &properties(&[("sc-alone-radio", "config-server"), ("projectName", "orders")]),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotRegistered(ServerKind::Config)));
    }

    #[tokio::test]
    async fn test_missing_required_property_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let dispatcher = dispatcher(ServiceRegistry::with_defaults().unwrap());

        let err = dispatcher
            .dispatch(
                &context(&temp_dir),
                &properties(&[("sc-alone-radio", "gateway-server")]),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Property(PropertyError::Missing(ref key)) if key == "projectName"
        ));
        assert_eq!(file_count(&temp_dir), 0);
    }

    struct BrokenService;

    impl ScaffoldService for BrokenService {
        fn kind(&self) -> ServerKind {
            ServerKind::Config
        }

        fn generators(&self, context: &GenerationContext) -> Vec<Box<dyn Generator>> {
            vec![Box::new(handlers::common::ApplicationYmlGenerator::new(
                &context.scoped(context.project_type(), "missing-anchor"),
                8888,
            ))]
        }
    }

    #[tokio::test]
    async fn test_dispatch_propagates_generator_failures() {
        let temp_dir = TempDir::new().unwrap();
        let registry = ServiceRegistry::new();
        registry.register(Arc::new(BrokenService)).unwrap();

        let err = dispatcher(registry)
            .dispatch(
                &context(&temp_dir),
                &properties(&[("sc-alone-radio", "config-server"), ("projectName", "orders")]),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Generation(GenerationError::Template(TemplateError::NotFound { .. }))
        ));
    }
}
