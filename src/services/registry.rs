//! Service registry and discriminator-based dispatch

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

use crate::context::GenerationContext;
use crate::generation::GenerationReport;
use crate::properties::Properties;
use crate::services::handlers::{ConfigServerService, GatewayServerService, RegistryServerService};
use crate::services::{ScaffoldService, ServerKind, ServiceError};
use crate::templates::TemplateStore;

pub struct ServiceRegistry {
    services: Arc<RwLock<HashMap<ServerKind, Arc<dyn ScaffoldService>>>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self {
            services: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a new registry with every built-in server registered
    pub fn with_defaults() -> Result<Self, ServiceError> {
        let registry = Self::new();

        registry.register(Arc::new(RegistryServerService::new()))?;
        registry.register(Arc::new(GatewayServerService::new()))?;
        registry.register(Arc::new(ConfigServerService::new()))?;

        Ok(registry)
    }

    /// Register a service under its own kind, replacing any previous one
    pub fn register(&self, service: Arc<dyn ScaffoldService>) -> Result<(), ServiceError> {
        let kind = service.kind();
        self.services
            .write()
            .map_err(|_| ServiceError::InternalError("Failed to acquire write lock".to_string()))?
            .insert(kind, service);
        debug!(server = %kind, "Registered service");
        Ok(())
    }

    pub fn get(&self, kind: ServerKind) -> Option<Arc<dyn ScaffoldService>> {
        self.services.read().ok()?.get(&kind).cloned()
    }

    /// Registered kinds, in declaration order
    pub fn kinds(&self) -> Vec<ServerKind> {
        let mut kinds: Vec<ServerKind> = self
            .services
            .read()
            .ok()
            .map(|guard| guard.keys().copied().collect())
            .unwrap_or_default();
        kinds.sort();
        kinds
    }

    pub fn is_registered(&self, kind: ServerKind) -> bool {
        self.services
            .read()
            .ok()
            .map(|guard| guard.contains_key(&kind))
            .unwrap_or(false)
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Selects exactly one service from the discriminator property and runs it
pub struct Dispatcher {
    registry: Arc<ServiceRegistry>,
    store: Arc<dyn TemplateStore>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ServiceRegistry>, store: Arc<dyn TemplateStore>) -> Self {
        Self { registry, store }
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Resolve the service for `properties` without running it
    pub fn select(&self, properties: &Properties) -> Result<Arc<dyn ScaffoldService>, ServiceError> {
        let kind = ServerKind::from_properties(properties)?;
        self.registry
            .get(kind)
            .ok_or(ServiceError::NotRegistered(kind))
    }

    /// Run the selected service.
    ///
    /// The service sees a context scoped to its own project type and template
    /// anchor. Generator failures propagate unchanged.
    pub async fn dispatch(
        &self,
        context: &GenerationContext,
        properties: &Properties,
    ) -> Result<GenerationReport, ServiceError> {
        let service = self.select(properties)?;
        let kind = service.kind();
        let scoped = context.scoped(kind.project_type(), kind.project_type());

        info!(server = %kind, project_type = kind.project_type(), "Dispatching");
        service
            .generate(self.store.as_ref(), &scoped, properties)
            .await
    }
}
