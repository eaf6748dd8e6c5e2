//! Shared application state.

use adminkit_core::AdminConfig;
use adminkit_runtime::{
    AdminRegistry, Dispatcher, MemoryResource, ReferencePopulator, ResourceDecorator,
    TracingAuditSink,
};
use std::sync::Arc;

/// State shared by every request handler.
#[derive(Clone, Debug)]
pub struct AppState {
    dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Build state from configuration alone: every configured resource is
    /// served from memory with the built-in actions, and references are
    /// populated.
    pub fn from_config(config: AdminConfig) -> Self {
        let mut builder = AdminRegistry::builder(config.clone())
            .populator(ReferencePopulator)
            .audit_sink(Arc::new(TracingAuditSink));

        for (id, options) in &config.resources {
            let resource = MemoryResource::from_options(id.as_str(), options);
            builder = builder.resource(ResourceDecorator::new(Arc::new(resource)).with_default_actions());
        }

        Self::new(Dispatcher::new(Arc::new(builder.build())))
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_registers_configured_resources() {
        let config = AdminConfig::from_yaml(
            r#"
resources:
  users:
    title_property: email
    records:
      - { id: "1", email: ann@example.com }
  orders:
    references: { user_id: users }
"#,
        )
        .unwrap();

        let state = AppState::from_config(config);
        let admin = state.dispatcher().admin();

        let ids: Vec<&str> = admin.resources().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["orders", "users"]);

        let users = admin.find_resource("users").unwrap();
        assert_eq!(users.title_property().path(), "email");
        assert!(users.action("list").is_some());

        let orders = admin.find_resource("orders").unwrap();
        assert_eq!(orders.property("user_id").and_then(|p| p.reference()), Some("users"));
    }
}
