//! The admin handle: registered resources, dashboard handler, populator and
//! audit sink.
//!
//! An [`AdminRegistry`] is assembled once at startup through
//! [`AdminRegistryBuilder`] and is read-only afterwards. Requests share it
//! behind an `Arc`, so nothing can be registered between an authorization
//! check and the handler call that follows it.

use crate::audit::{AuditSink, NullAuditSink, TracingAuditSink};
use crate::context::DashboardHandler;
use crate::decorator::ResourceDecorator;
use crate::error::DispatchError;
use crate::populator::{NoopPopulator, Populator};
use crate::view_helpers::ViewHelpers;
use adminkit_core::{AdminConfig, PaginationConfig};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Read-only registry of everything the dispatcher resolves at request time.
pub struct AdminRegistry {
    root_path: String,
    pagination: PaginationConfig,
    resources: BTreeMap<String, ResourceDecorator>,
    dashboard: Option<Arc<dyn DashboardHandler>>,
    populator: Arc<dyn Populator>,
    audit: Arc<dyn AuditSink>,
}

impl AdminRegistry {
    pub fn builder(config: AdminConfig) -> AdminRegistryBuilder {
        AdminRegistryBuilder::new(config)
    }

    /// Resolve a resource by id.
    pub fn find_resource(&self, resource_id: &str) -> Result<&ResourceDecorator, DispatchError> {
        self.resources
            .get(resource_id)
            .ok_or_else(|| DispatchError::resource_not_found(resource_id))
    }

    pub fn resources(&self) -> impl Iterator<Item = &ResourceDecorator> {
        self.resources.values()
    }

    pub fn dashboard_handler(&self) -> Option<&Arc<dyn DashboardHandler>> {
        self.dashboard.as_ref()
    }

    pub fn populator(&self) -> &dyn Populator {
        self.populator.as_ref()
    }

    pub fn audit(&self) -> &dyn AuditSink {
        self.audit.as_ref()
    }

    pub fn pagination(&self) -> &PaginationConfig {
        &self.pagination
    }

    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    pub fn view_helpers(&self) -> ViewHelpers {
        ViewHelpers::new(self.root_path.as_str())
    }
}

impl fmt::Debug for AdminRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminRegistry")
            .field("root_path", &self.root_path)
            .field("resources", &self.resources.keys().collect::<Vec<_>>())
            .field("dashboard", &self.dashboard.is_some())
            .finish()
    }
}

/// Builder for [`AdminRegistry`].
pub struct AdminRegistryBuilder {
    config: AdminConfig,
    resources: Vec<ResourceDecorator>,
    dashboard: Option<Arc<dyn DashboardHandler>>,
    populator: Arc<dyn Populator>,
    audit: Arc<dyn AuditSink>,
}

impl AdminRegistryBuilder {
    pub fn new(config: AdminConfig) -> Self {
        Self {
            config,
            resources: Vec::new(),
            dashboard: None,
            populator: Arc::new(NoopPopulator),
            audit: Arc::new(TracingAuditSink),
        }
    }

    /// Register a decorated resource.
    pub fn resource(mut self, resource: ResourceDecorator) -> Self {
        self.resources.push(resource);
        self
    }

    pub fn dashboard(mut self, handler: impl DashboardHandler + 'static) -> Self {
        self.dashboard = Some(Arc::new(handler));
        self
    }

    pub fn populator(mut self, populator: impl Populator + 'static) -> Self {
        self.populator = Arc::new(populator);
        self
    }

    pub fn audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit = sink;
        self
    }

    /// Freeze the registry. Configured resource options are applied to the
    /// matching resources; a later registration under an existing id replaces
    /// the earlier one.
    pub fn build(self) -> AdminRegistry {
        let mut resources = BTreeMap::new();
        for decorator in self.resources {
            let decorator = match self.config.resource(decorator.id()) {
                Some(options) => decorator.with_options(options),
                None => decorator,
            };
            let id = decorator.id().to_string();
            if resources.insert(id.clone(), decorator).is_some() {
                tracing::warn!(resource_id = %id, "Resource registered twice, keeping the last one");
            }
        }

        let audit = if self.config.audit.enabled {
            self.audit
        } else {
            Arc::new(NullAuditSink)
        };

        tracing::debug!(
            resources = resources.len(),
            dashboard = self.dashboard.is_some(),
            "Admin registry built"
        );

        AdminRegistry {
            root_path: self.config.root_path,
            pagination: self.config.pagination,
            resources,
            dashboard: self.dashboard,
            populator: self.populator,
            audit,
        }
    }
}
